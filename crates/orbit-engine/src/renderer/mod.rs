pub mod camera;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{CameraPhase, CameraRelease, OrbitCamera};
pub use instance::{BeltInstance, StarInstance, TargetInstance};
pub use traits::{ShipLink, ShipPose, ShipRenderer, ShipRendererError};
