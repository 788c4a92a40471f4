use crate::api::config::SceneConfig;
use crate::assets::manifest::PlanetManifest;
use crate::components::target::Room;

/// The contract every site must fulfill.
pub trait Setup {
    /// Return scene configuration. Called once before the rooms are built.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// Apply page-supplied site data (JSON). Called before `rooms`.
    /// Malformed data is reported and the site keeps its built-in values.
    fn load(&mut self, _site_json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// Build the ordered rooms. Room 0 is active at start.
    fn rooms(&mut self) -> Vec<Room>;

    /// Texture file naming for planet images.
    fn manifest(&self) -> PlanetManifest {
        PlanetManifest::default()
    }
}
