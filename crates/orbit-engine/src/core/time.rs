/// Wall clock for the frame loop.
/// Fed with the page's animation-frame timestamps (milliseconds).
#[derive(Debug, Clone)]
pub struct FrameClock {
    now_ms: f64,
    dt_ms: f64,
    frame: u64,
    started: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            dt_ms: 0.0,
            frame: 0,
            started: false,
        }
    }

    /// Start the clock at a known timestamp without counting a frame.
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms,
            dt_ms: 0.0,
            frame: 0,
            started: true,
        }
    }

    /// Move to the given timestamp and count one frame. Returns the frame delta.
    /// Timestamps that run backwards are clamped, so every timed phase sees a
    /// non-decreasing clock.
    pub fn advance_to(&mut self, timestamp_ms: f64) -> f64 {
        if !self.started {
            self.started = true;
            self.now_ms = timestamp_ms;
            self.dt_ms = 0.0;
        } else {
            self.dt_ms = (timestamp_ms - self.now_ms).max(0.0);
            self.now_ms += self.dt_ms;
        }
        self.frame += 1;
        self.dt_ms
    }

    /// Current time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Delta of the most recent frame in milliseconds.
    pub fn dt_ms(&self) -> f64 {
        self.dt_ms
    }

    /// Number of frames counted so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance_to(5000.0), 0.0);
        assert_eq!(clock.now_ms(), 5000.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn delta_tracks_timestamps() {
        let mut clock = FrameClock::starting_at(0.0);
        let dt = clock.advance_to(16.5);
        assert!((dt - 16.5).abs() < 1e-9);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn backwards_timestamps_are_clamped() {
        let mut clock = FrameClock::starting_at(100.0);
        let dt = clock.advance_to(90.0);
        assert_eq!(dt, 0.0);
        assert_eq!(clock.now_ms(), 100.0);
    }
}
