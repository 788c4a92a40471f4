use glam::Vec2;

use crate::api::action::Arrival;
use crate::api::config::CameraConfig;
use crate::core::timer::OneShot;
use crate::core::viewport::ViewTransform;
use crate::extensions::easing::{approach, approach_vec2};

/// Camera lifecycle. Exactly one phase at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPhase {
    /// No pending arrival. May still be easing back to neutral.
    Settled,
    /// Easing toward a flight destination.
    Flying,
    /// Reached the destination; dwelling before the arrival chain runs.
    Arriving,
}

/// Arrival handed back when the hold elapses.
#[derive(Debug)]
pub struct CameraRelease {
    pub epoch: u64,
    pub arrival: Arrival,
}

/// Pan/zoom camera that eases toward a destination and reports arrival.
///
/// The transform zooms around the viewport centre, then pans: see
/// [`ViewTransform`].
pub struct OrbitCamera {
    pan: Vec2,
    zoom: f32,
    target_pan: Vec2,
    target_zoom: f32,
    phase: CameraPhase,
    hold: OneShot,
    pending: Option<(u64, Arrival)>,
    config: CameraConfig,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            target_pan: Vec2::ZERO,
            target_zoom: 1.0,
            phase: CameraPhase::Settled,
            hold: OneShot::new(),
            pending: None,
            config: config.clone(),
        }
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn target_pan(&self) -> Vec2 {
        self.target_pan
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    /// Flying or arriving.
    pub fn is_busy(&self) -> bool {
        self.phase != CameraPhase::Settled
    }

    /// Zoom within `tolerance` of 1.
    pub fn is_neutral(&self, tolerance: f32) -> bool {
        (self.zoom - 1.0).abs() <= tolerance
    }

    pub fn transform(&self, center: Vec2) -> ViewTransform {
        ViewTransform {
            center,
            pan: self.pan,
            zoom: self.zoom,
        }
    }

    /// Ease toward `pan`/`zoom`; `arrival` runs after settle plus the hold.
    /// Returns any arrival this call superseded.
    pub fn fly_to(&mut self, pan: Vec2, zoom: f32, epoch: u64, arrival: Arrival) -> Option<Arrival> {
        self.hold.cancel();
        self.target_pan = pan;
        self.target_zoom = zoom;
        self.phase = CameraPhase::Flying;
        log::debug!("camera: flying to {:?} x{:.2} (epoch {})", pan, zoom, epoch);
        self.pending.replace((epoch, arrival)).map(|(_, old)| old)
    }

    /// Abandon any flight or hold and head back to neutral.
    /// The pending arrival is returned to the caller and never fires.
    pub fn cancel(&mut self) -> Option<Arrival> {
        self.hold.cancel();
        if self.phase != CameraPhase::Settled {
            log::debug!("camera: {:?} cancelled", self.phase);
        }
        self.phase = CameraPhase::Settled;
        self.target_pan = Vec2::ZERO;
        self.target_zoom = 1.0;
        self.pending.take().map(|(_, arrival)| arrival)
    }

    fn at_target(&self) -> bool {
        let eps = self.config.settle_epsilon_px;
        (self.pan.x - self.target_pan.x).abs() < eps
            && (self.pan.y - self.target_pan.y).abs() < eps
            && (self.zoom - self.target_zoom).abs() < self.config.settle_epsilon_zoom
    }

    /// Advance one frame. Returns the arrival once the hold has elapsed,
    /// provided it still belongs to `current_epoch`.
    pub fn tick(&mut self, now_ms: f64, current_epoch: u64) -> Option<CameraRelease> {
        let k = self.config.smoothing;
        self.pan = approach_vec2(self.pan, self.target_pan, k);
        self.zoom = approach(self.zoom, self.target_zoom, k);

        if self.phase == CameraPhase::Flying && self.at_target() {
            self.phase = CameraPhase::Arriving;
            self.hold.arm(now_ms, self.config.return_delay_ms);
            log::debug!("camera: settled, holding {}ms", self.config.return_delay_ms);
        }

        if self.phase == CameraPhase::Arriving && self.hold.fire(now_ms) {
            self.phase = CameraPhase::Settled;
            self.target_pan = Vec2::ZERO;
            self.target_zoom = 1.0;
            let (epoch, arrival) = self.pending.take()?;
            if epoch != current_epoch {
                log::warn!("camera: dropping stale arrival (epoch {} != {})", epoch, current_epoch);
                return None;
            }
            return Some(CameraRelease { epoch, arrival });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, Arrival) {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        (hits, Arrival::callback(move |_| h.set(h.get() + 1)))
    }

    fn run(arrival: Option<CameraRelease>) {
        if let Some(CameraRelease { arrival: Arrival::Callback(f), .. }) = arrival {
            f(&mut crate::api::action::ActionContext::new());
        }
    }

    #[test]
    fn converges_geometrically() {
        let mut cam = OrbitCamera::new(&CameraConfig::default());
        cam.fly_to(Vec2::new(1.0, 1.0), 2.0, 1, Arrival::Nothing);
        for _ in 0..55 {
            cam.tick(0.0, 1);
        }
        assert!((cam.pan() - Vec2::new(1.0, 1.0)).length() < 1e-3 * 1.5);
        assert!((cam.zoom() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn arrival_fires_once_after_hold() {
        let mut cam = OrbitCamera::new(&CameraConfig::default());
        let (hits, arrival) = counter();
        cam.fly_to(Vec2::new(-150.0, 80.0), 1.85, 7, arrival);

        let mut now = 0.0;
        while cam.phase() == CameraPhase::Flying {
            now += 16.0;
            run(cam.tick(now, 7));
            assert!(now < 10_000.0, "camera never settled");
        }
        assert_eq!(cam.phase(), CameraPhase::Arriving);
        assert_eq!(hits.get(), 0, "must wait for the hold");

        let held_at = now;
        while now < held_at + 200.0 {
            now += 16.0;
            run(cam.tick(now, 7));
        }
        assert_eq!(hits.get(), 1);
        assert_eq!(cam.phase(), CameraPhase::Settled);
        assert_eq!(cam.target_zoom(), 1.0);
        assert_eq!(cam.target_pan(), Vec2::ZERO);

        for _ in 0..100 {
            now += 16.0;
            run(cam.tick(now, 7));
        }
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn cancelled_hold_never_fires() {
        let mut cam = OrbitCamera::new(&CameraConfig { return_delay_ms: 180.0, ..CameraConfig::default() });
        let (hits, arrival) = counter();
        cam.fly_to(Vec2::ZERO, 1.0, 1, arrival);
        run(cam.tick(0.0, 1));
        assert_eq!(cam.phase(), CameraPhase::Arriving);

        let dropped = cam.cancel();
        assert!(dropped.is_some());
        for i in 0..50 {
            run(cam.tick(i as f64 * 16.0, 1));
        }
        assert_eq!(hits.get(), 0);
        assert!(!cam.is_busy());
    }

    #[test]
    fn stale_epoch_is_dropped() {
        let mut cam = OrbitCamera::new(&CameraConfig { return_delay_ms: 0.0, ..CameraConfig::default() });
        let (hits, arrival) = counter();
        cam.fly_to(Vec2::ZERO, 1.0, 1, arrival);
        let release = cam.tick(0.0, 2);
        assert!(release.is_none());
        run(release);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn refly_replaces_pending() {
        let mut cam = OrbitCamera::new(&CameraConfig::default());
        cam.fly_to(Vec2::new(10.0, 0.0), 1.5, 1, Arrival::Nothing);
        let old = cam.fly_to(Vec2::new(20.0, 0.0), 1.5, 2, Arrival::Nothing);
        assert!(matches!(old, Some(Arrival::Nothing)));
        assert_eq!(cam.phase(), CameraPhase::Flying);
    }

    #[test]
    fn transform_follows_state() {
        let mut cam = OrbitCamera::new(&CameraConfig { smoothing: 1.0, ..CameraConfig::default() });
        cam.fly_to(Vec2::new(-300.0, 200.0), 1.85, 1, Arrival::Nothing);
        cam.tick(0.0, 1);
        let center = Vec2::new(400.0, 300.0);
        let t = cam.transform(center);
        // The destination (pan + center) is drawn at the screen centre.
        assert!((t.apply(Vec2::new(100.0, 500.0)) - center).length() < 1e-3);
        assert!(!cam.is_neutral(0.02));
    }
}
