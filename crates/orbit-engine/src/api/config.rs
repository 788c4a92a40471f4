//! Scene configuration.
//!
//! Every section deserializes with `#[serde(default)]`, so a page can ship a
//! partial JSON document and inherit the remaining values.

use serde::{Deserialize, Serialize};

use crate::core::viewport::Percent;
use crate::extensions::easing::Easing;

/// Starfield tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    /// Size of the star pool.
    pub count: usize,
    pub idle_speed: f32,
    pub cruise_speed: f32,
    pub warp_speed: f32,
    /// Per-frame smoothing factor of the speed toward its target.
    pub smoothing: f32,
    /// Speed at or above which stars streak instead of twinkling.
    pub streak_threshold: f32,
    /// Per-frame meteor spawn probability.
    pub meteor_probability: f32,
    pub meteor_max: usize,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 420,
            idle_speed: 0.0,
            cruise_speed: 0.006,
            warp_speed: 0.28,
            smoothing: 0.06,
            streak_threshold: 0.01,
            meteor_probability: 0.001,
            meteor_max: 1,
        }
    }
}

/// Post-flight camera zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub zoom: f32,
    pub smoothing: f32,
    /// Dwell at the destination before the arrival chain runs.
    pub return_delay_ms: f64,
    pub settle_epsilon_px: f32,
    pub settle_epsilon_zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: 1.85,
            smoothing: 0.12,
            return_delay_ms: 180.0,
            settle_epsilon_px: 0.6,
            settle_epsilon_zoom: 0.01,
        }
    }
}

/// Ship flight parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub flight_ms: f64,
    /// Perpendicular bulge of the arc as a fraction of the flight distance.
    pub arc_height: f32,
    pub land_scale: f32,
    /// Added to every heading handed to the ship renderer.
    pub angle_offset_deg: f32,
    pub easing: Easing,
    /// Parking spot before the first flight, in percent of the viewport.
    pub park: Percent,
    pub park_heading_deg: f32,
    /// Starfield target speed floor while flying. None leaves it untouched.
    pub flight_boost_speed: Option<f32>,
    /// Starfield target speed on touchdown. None leaves it untouched.
    pub landing_speed: Option<f32>,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            flight_ms: 900.0,
            arc_height: 0.18,
            land_scale: 0.55,
            angle_offset_deg: 0.0,
            easing: Easing::CubicInOut,
            park: Percent::new(50.0, 86.0),
            park_heading_deg: -90.0,
            flight_boost_speed: Some(0.08),
            landing_speed: Some(0.22),
        }
    }
}

/// Warp overlay timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    pub enter_ms: f64,
    pub hold_ms: f64,
    pub exit_ms: f64,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            enter_ms: 700.0,
            hold_ms: 900.0,
            exit_ms: 300.0,
        }
    }
}

/// Idle-triggered automatic flights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    /// Idle time before a flight is issued. None disables the autopilot.
    pub idle_ms: Option<f64>,
    /// Destination offset from the target centre, in multiples of its radius.
    pub offset_min: f32,
    pub offset_max: f32,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            idle_ms: None,
            offset_min: 1.3,
            offset_max: 1.9,
        }
    }
}

/// Intro screen behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// When false the stage is interactive immediately.
    pub enabled: bool,
    /// Start the intro warp on its own after this many milliseconds.
    pub auto_start_ms: Option<f64>,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_start_ms: None,
        }
    }
}

/// Configuration for the scene, provided by the site setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub stars: StarConfig,
    pub camera: CameraConfig,
    pub ship: ShipConfig,
    pub warp: WarpConfig,
    pub autopilot: AutopilotConfig,
    pub intro: IntroConfig,
    /// Seed for the scene's random generator.
    pub seed: u64,
    /// Maximum targets in one room (default: 16).
    pub max_targets: usize,
    /// Maximum asteroid belt points across a room (default: 1024).
    pub max_belt_points: usize,
    /// Maximum scene events per frame (default: 32).
    pub max_events: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            stars: StarConfig::default(),
            camera: CameraConfig::default(),
            ship: ShipConfig::default(),
            warp: WarpConfig::default(),
            autopilot: AutopilotConfig::default(),
            intro: IntroConfig::default(),
            seed: 0x5EED_0F_5A11,
            max_targets: 16,
            max_belt_points: 1024,
            max_events: 32,
        }
    }
}

impl SceneConfig {
    /// Parse a (possibly partial) configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Preset for `prefers-reduced-motion`: slower stars, shorter flights,
    /// no meteors and no warp fades.
    pub fn reduced_motion() -> Self {
        let mut config = Self::default();
        config.apply_reduced_motion();
        config
    }

    /// Switch an existing configuration to its reduced-motion values.
    pub fn apply_reduced_motion(&mut self) {
        self.stars.cruise_speed = 0.002;
        self.stars.warp_speed = 0.12;
        self.stars.meteor_probability = 0.0;
        self.camera.zoom = 1.35;
        self.ship.flight_ms = 500.0;
        self.ship.flight_boost_speed = None;
        self.ship.landing_speed = None;
        self.warp = WarpConfig {
            enter_ms: 0.0,
            hold_ms: 200.0,
            exit_ms: 0.0,
        };
    }
}
