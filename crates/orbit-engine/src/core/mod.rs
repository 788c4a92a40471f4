pub mod rng;
pub mod scene;
pub mod time;
pub mod timer;
pub mod viewport;
