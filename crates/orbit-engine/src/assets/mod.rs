pub mod manifest;
pub mod textures;
