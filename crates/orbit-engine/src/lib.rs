pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::action::{Action, ActionContext, Arrival};
pub use api::config::{
    AutopilotConfig, CameraConfig, IntroConfig, SceneConfig, ShipConfig, StarConfig, WarpConfig,
};
pub use api::setup::Setup;
pub use api::types::{EventKind, SceneEvent, TargetRef, WarpTheme};
pub use assets::manifest::PlanetManifest;
pub use assets::textures::{texture_key, ProceduralTexture, TextureCache, TextureState};
pub use bridge::protocol::{FrameBuffer, FrameHeader, ProtocolLayout};
pub use components::ship::Ship;
pub use components::star::{Meteor, Star};
pub use components::target::{Color, Palette, Room, Target};
pub use core::rng::Rng;
pub use core::scene::SceneState;
pub use core::time::FrameClock;
pub use core::timer::OneShot;
pub use core::viewport::{Percent, ViewTransform, Viewport};
pub use input::queue::{InputEvent, InputQueue, Key};
pub use renderer::camera::{CameraPhase, OrbitCamera};
pub use renderer::instance::{BeltInstance, StarInstance, TargetInstance};
pub use renderer::traits::{ShipPose, ShipRenderer, ShipRendererError};
pub use systems::autopilot::{Autopilot, AutopilotPlan};
pub use systems::decor::BeltSpec;
pub use systems::flight::{FlightController, FlightPath, FlightStep};
pub use systems::hit::{find_hit, HitMode, InteractionGate};
pub use systems::registry::TargetRegistry;
pub use systems::starfield::{StarMode, Starfield};
pub use systems::warp::{WarpCause, WarpController, WarpPhase, WarpSignal};

// Extensions: decoupled math helpers
pub use extensions::{approach, approach_vec2, CubicBezier, Easing};
