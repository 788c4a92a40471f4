use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Describes where planet images live and how texture keys map to files.
/// Loaded from a JSON file at runtime, or supplied by the site setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetManifest {
    /// Directory of the planet images (e.g., "assets/planets").
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// File extension without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Texture key → exact file stem, for files whose name is not the key.
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_base_path() -> String {
    "assets/planets".to_string()
}

fn default_extension() -> String {
    "png".to_string()
}

impl Default for PlanetManifest {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            extension: default_extension(),
            overrides: HashMap::new(),
        }
    }
}

impl PlanetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_override(mut self, key: impl Into<String>, file: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), file.into());
        self
    }

    /// Relative path of the image for a texture key.
    pub fn file_for(&self, key: &str) -> String {
        let stem = self.overrides.get(key).map(String::as_str).unwrap_or(key);
        format!("{}/{}.{}", self.base_path.trim_end_matches('/'), stem, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_key() {
        let manifest = PlanetManifest::default()
            .with_override("thal3", "Thal3")
            .with_override("abysium", "Abyssium");
        assert_eq!(manifest.file_for("thal3"), "assets/planets/Thal3.png");
        assert_eq!(manifest.file_for("abysium"), "assets/planets/Abyssium.png");
        assert_eq!(manifest.file_for("kairon"), "assets/planets/kairon.png");
    }

    #[test]
    fn parse_partial_manifest() {
        let json = r#"{
            "base_path": "img/worlds/",
            "overrides": { "orionisix": "Orionis-IX" }
        }"#;
        let manifest = PlanetManifest::from_json(json).unwrap();
        assert_eq!(manifest.extension, "png");
        assert_eq!(manifest.file_for("orionisix"), "img/worlds/Orionis-IX.png");
    }
}
