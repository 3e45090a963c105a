//! Configuration system
//!
//! Scene-initialization input: a room configuration describing the
//! structural shell that exists before any asset is retrieved. Configs are
//! plain serde structs loadable from TOML or RON files.

pub use serde::{Deserialize, Serialize};

use crate::scene::{LightParams, Material};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Default-light section of a room configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultLightConfig {
    /// Mounting height of the light in meters
    pub height: f32,

    /// Light parameters stored as element metadata
    #[serde(flatten)]
    pub params: LightParams,
}

impl Default for DefaultLightConfig {
    fn default() -> Self {
        Self {
            height: 1.6,
            params: LightParams {
                intensity: 40.0,
                light_type: "point".to_string(),
                color: [255, 255, 255],
            },
        }
    }
}

/// Structural shell of a rectangular room
///
/// Describes the scene-initialization state: four walls, a floor sheet, a
/// ceiling sheet, and one default light. Dimensions are meters; the room is
/// centered on the origin with the floor at z = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Room type label, e.g. "warehouse"
    pub room_type: String,

    /// Extent along x
    pub width: f32,

    /// Extent along y
    pub depth: f32,

    /// Extent along z
    pub height: f32,

    /// Material applied to every wall
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_material: Option<Material>,

    /// Material applied to the floor sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_material: Option<Material>,

    /// Material applied to the ceiling sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_material: Option<Material>,

    /// Default light placed at the room center
    #[serde(default)]
    pub default_light: DefaultLightConfig,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            room_type: "an interior scene".to_string(),
            width: 6.0,
            depth: 8.0,
            height: 4.5,
            wall_material: None,
            floor_material: None,
            ceiling_material: None,
            default_light: DefaultLightConfig::default(),
        }
    }
}

impl Config for RoomConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_config_toml_round_trip() {
        let config = RoomConfig {
            room_type: "warehouse".to_string(),
            wall_material: Some(
                Material::new("Bricks074", "exposed brick, rough").expect("valid material"),
            ),
            ..Default::default()
        };

        let toml = toml::to_string_pretty(&config).expect("serialize");
        let decoded: RoomConfig = toml::from_str(&toml).expect("parse");
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_default_light_section_defaults() {
        let config: RoomConfig = toml::from_str(
            r#"
            room_type = "studio"
            width = 4.0
            depth = 5.0
            height = 3.0
            "#,
        )
        .expect("minimal config should parse");
        assert_eq!(config.default_light.params.light_type, "point");
        assert_eq!(config.default_light.height, 1.6);
    }
}
