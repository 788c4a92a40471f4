//! Ship path follower: one curved, eased flight at a time.

use glam::Vec2;

use crate::api::action::Arrival;
use crate::api::config::ShipConfig;
use crate::components::ship::Ship;
use crate::extensions::curve::CubicBezier;
use crate::extensions::easing::Easing;

/// A timed traversal of one arc.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPath {
    pub curve: CubicBezier,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl FlightPath {
    pub fn new(from: Vec2, to: Vec2, config: &ShipConfig, start_ms: f64) -> Self {
        Self {
            curve: CubicBezier::arc(from, to, config.arc_height),
            start_ms,
            duration_ms: config.flight_ms,
            easing: config.easing,
        }
    }

    /// Raw progress `clamp((now - start) / duration, 0, 1)`.
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn destination(&self) -> Vec2 {
        self.curve.p3
    }
}

/// Outcome of one [`FlightController::tick`].
#[derive(Debug)]
pub enum FlightStep {
    /// No flight active.
    Idle,
    /// Still travelling; `progress` is the raw (uneased) value.
    Moving { progress: f32 },
    /// Touched down this frame.
    Landed(Landing),
}

/// Handed to the camera on touchdown.
#[derive(Debug)]
pub struct Landing {
    pub epoch: u64,
    pub point: Vec2,
    pub arrival: Arrival,
}

#[derive(Debug)]
struct ActiveFlight {
    path: FlightPath,
    epoch: u64,
    arrival: Arrival,
}

/// Owns the single active flight. Every flight gets a fresh epoch so work
/// deferred on behalf of an older flight can be recognised as stale.
#[derive(Debug)]
pub struct FlightController {
    active: Option<ActiveFlight>,
    epoch: u64,
    land_scale: f32,
    last_progress: f32,
}

impl FlightController {
    pub fn new(config: &ShipConfig) -> Self {
        Self {
            active: None,
            epoch: 0,
            land_scale: config.land_scale,
            last_progress: 0.0,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.active.is_some()
    }

    /// Epoch of the most recently started flight.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn path(&self) -> Option<&FlightPath> {
        self.active.as_ref().map(|f| &f.path)
    }

    /// Raw progress of the active flight as of the last tick.
    pub fn last_progress(&self) -> f32 {
        self.last_progress
    }

    /// Start a flight, replacing any active one. Returns the new epoch and
    /// the arrival of the flight it replaced, which must not be run.
    pub fn begin(&mut self, path: FlightPath, arrival: Arrival) -> (u64, Option<Arrival>) {
        self.epoch += 1;
        self.last_progress = 0.0;
        let previous = self.active.replace(ActiveFlight {
            path,
            epoch: self.epoch,
            arrival,
        });
        (self.epoch, previous.map(|f| f.arrival))
    }

    /// Advance the active flight and pose the ship along it.
    pub fn tick(&mut self, now_ms: f64, ship: &mut Ship) -> FlightStep {
        let Some(flight) = self.active.as_ref() else {
            return FlightStep::Idle;
        };
        let t = flight.path.progress(now_ms).max(self.last_progress);
        self.last_progress = t;
        let et = flight.path.easing.apply(t);

        ship.pos = flight.path.curve.point(et);
        if let Some(heading) = flight.path.curve.heading_deg(et) {
            ship.heading_deg = heading;
        }
        ship.scale = 1.0 - (1.0 - self.land_scale) * et;

        if t < 1.0 {
            return FlightStep::Moving { progress: t };
        }

        match self.active.take() {
            Some(done) => {
                ship.engine_on = false;
                ship.scale = self.land_scale;
                FlightStep::Landed(Landing {
                    epoch: done.epoch,
                    point: ship.pos,
                    arrival: done.arrival,
                })
            }
            None => FlightStep::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TargetRef;

    fn controller() -> (FlightController, ShipConfig) {
        let config = ShipConfig::default();
        (FlightController::new(&config), config)
    }

    #[test]
    fn scenario_midpoint_and_landing() {
        let (mut fc, config) = controller();
        let mut ship = Ship::parked(Vec2::new(100.0, 500.0), -90.0);
        let path = FlightPath::new(ship.pos, Vec2::new(400.0, 300.0), &config, 0.0);
        let curve = path.curve;
        fc.begin(path, Arrival::Activate(TargetRef::new(0, 1)));

        match fc.tick(450.0, &mut ship) {
            FlightStep::Moving { progress } => assert!((progress - 0.5).abs() < 1e-6),
            other => panic!("expected Moving, got {:?}", other),
        }
        assert!(curve.hull_contains(ship.pos));
        assert!((ship.pos - Vec2::new(277.0, 440.5)).length() < 1e-2);
        let expected = (-200.0f32).atan2(300.0).to_degrees();
        assert!((ship.heading_deg - expected).abs() < 1e-3);
        assert!((ship.scale - (1.0 - 0.45 * 0.5)).abs() < 1e-5);

        match fc.tick(916.0, &mut ship) {
            FlightStep::Landed(landing) => {
                assert_eq!(landing.epoch, 1);
                assert_eq!(landing.arrival.target(), Some(TargetRef::new(0, 1)));
                assert!((landing.point - Vec2::new(400.0, 300.0)).length() < 1e-3);
            }
            other => panic!("expected Landed, got {:?}", other),
        }
        assert!(!fc.is_moving());
        assert_eq!(ship.scale, 0.55);
        assert!(matches!(fc.tick(1000.0, &mut ship), FlightStep::Idle));
    }

    #[test]
    fn progress_is_monotonic_and_completes() {
        let (mut fc, config) = controller();
        let mut ship = Ship::parked(Vec2::ZERO, 0.0);
        fc.begin(FlightPath::new(ship.pos, Vec2::new(300.0, 0.0), &config, 1000.0), Arrival::Nothing);

        let mut prev = 0.0;
        let mut now = 1000.0;
        let frame = 16.7;
        loop {
            now += frame;
            match fc.tick(now, &mut ship) {
                FlightStep::Moving { progress } => {
                    assert!(progress >= prev);
                    prev = progress;
                }
                FlightStep::Landed(_) => break,
                FlightStep::Idle => panic!("flight vanished"),
            }
        }
        assert!(now - 1000.0 <= config.flight_ms + frame);
    }

    #[test]
    fn backwards_clock_does_not_rewind() {
        let (mut fc, config) = controller();
        let mut ship = Ship::parked(Vec2::ZERO, 0.0);
        fc.begin(FlightPath::new(ship.pos, Vec2::new(300.0, 0.0), &config, 0.0), Arrival::Nothing);
        fc.tick(600.0, &mut ship);
        let x = ship.pos.x;
        fc.tick(300.0, &mut ship);
        assert!(ship.pos.x >= x);
    }

    #[test]
    fn new_flight_supersedes_old() {
        let (mut fc, config) = controller();
        let ship = Ship::parked(Vec2::ZERO, 0.0);
        let (first, none) = fc.begin(
            FlightPath::new(ship.pos, Vec2::new(100.0, 0.0), &config, 0.0),
            Arrival::Activate(TargetRef::new(0, 0)),
        );
        assert!(none.is_none());
        let (second, old) = fc.begin(
            FlightPath::new(ship.pos, Vec2::new(0.0, 100.0), &config, 10.0),
            Arrival::Activate(TargetRef::new(0, 3)),
        );
        assert!(second > first);
        assert_eq!(old.and_then(|a| a.target()), Some(TargetRef::new(0, 0)));
        assert_eq!(fc.path().map(|p| p.destination()), Some(Vec2::new(0.0, 100.0)));
    }

    #[test]
    fn zero_duration_lands_immediately() {
        let config = ShipConfig { flight_ms: 0.0, ..ShipConfig::default() };
        let mut fc = FlightController::new(&config);
        let mut ship = Ship::parked(Vec2::ZERO, 0.0);
        fc.begin(FlightPath::new(ship.pos, Vec2::new(50.0, 50.0), &config, 0.0), Arrival::Nothing);
        assert!(matches!(fc.tick(0.0, &mut ship), FlightStep::Landed(_)));
        assert_eq!(ship.pos, Vec2::new(50.0, 50.0));
    }
}
