/// One-shot deadline polled once per frame.
///
/// Deferred phases (camera hold, warp fades) are deadlines rather than
/// callbacks. Only one deadline is held: re-arming overwrites it and
/// cancelling clears it, so a superseded deadline can never report due.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneShot {
    due_ms: Option<f64>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the deadline `delay_ms` from `now_ms`, replacing any pending one.
    pub fn arm(&mut self, now_ms: f64, delay_ms: f64) {
        self.due_ms = Some(now_ms + delay_ms.max(0.0));
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.due_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due_ms.is_some()
    }

    /// Milliseconds until the deadline, or None when disarmed.
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.due_ms.map(|due| (due - now_ms).max(0.0))
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_deadline() {
        let mut t = OneShot::new();
        t.arm(1000.0, 180.0);
        assert!(!t.fire(1100.0));
        assert!(t.fire(1180.0));
        assert!(!t.fire(1200.0));
        assert!(!t.is_armed());
    }

    #[test]
    fn rearm_supersedes_old_deadline() {
        let mut t = OneShot::new();
        t.arm(0.0, 100.0);
        t.arm(50.0, 100.0);
        assert!(!t.fire(120.0), "old deadline must not fire");
        assert!(t.fire(150.0));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut t = OneShot::new();
        t.arm(0.0, 10.0);
        t.cancel();
        assert!(!t.is_armed());
        assert!(!t.fire(1000.0));
    }

    #[test]
    fn zero_delay_fires_same_poll() {
        let mut t = OneShot::new();
        t.arm(42.0, 0.0);
        assert_eq!(t.remaining_ms(42.0), Some(0.0));
        assert!(t.fire(42.0));
    }
}
