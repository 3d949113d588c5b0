use std::fs;
use std::path::{Path, PathBuf};

use expanse_blocks::BlockRegistry;
use expanse_carvers::CarversConfig;
use expanse_heights::HeightsConfig;
use serde::Deserialize;

use crate::error::ConfigError;

/// Contents of `expanse.toml`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExpanseConfig {
    #[serde(default)]
    pub heights: HeightsConfig,
    #[serde(default)]
    pub generation: Generation,
    #[serde(default)]
    pub carvers: CarversConfig,
    #[serde(default)]
    pub blocks: Blocks,
}

impl ExpanseConfig {
    pub const DEFAULT_PATH: &'static str = "expanse.toml";

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads `path` if given, else `expanse.toml` when present, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = Path::new(Self::DEFAULT_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    log::debug!("no {} found, using defaults", Self::DEFAULT_PATH);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn block_registry(&self) -> Result<BlockRegistry, ConfigError> {
        match &self.blocks.path {
            Some(p) => Ok(BlockRegistry::load_from_path(p)?),
            None => Ok(BlockRegistry::builtin()),
        }
    }
}

/// `[generation]`: world bounds and the flat test terrain used by `carve`.
#[derive(Clone, Debug, Deserialize)]
pub struct Generation {
    #[serde(default)]
    pub seed: i64,
    #[serde(default = "default_min_y")]
    pub min_y: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    #[serde(default = "default_surface_y")]
    pub surface_y: i32,
    #[serde(default = "default_liquid")]
    pub liquid: String,
}
fn default_min_y() -> i32 {
    -256
}
fn default_height() -> i32 {
    2544
}
fn default_sea_level() -> i32 {
    63
}
fn default_surface_y() -> i32 {
    120
}
fn default_liquid() -> String {
    "water".to_string()
}
impl Default for Generation {
    fn default() -> Self {
        Self {
            seed: 0,
            min_y: default_min_y(),
            height: default_height(),
            sea_level: default_sea_level(),
            surface_y: default_surface_y(),
            liquid: default_liquid(),
        }
    }
}

/// `[blocks]`: optional block table replacing the builtin one.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Blocks {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use expanse_heights::ScaleProfile;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = ExpanseConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.generation.min_y, -256);
        assert_eq!(cfg.generation.height, 2544);
        assert_eq!(cfg.heights.range().unwrap(), ScaleProfile::Expanse.range());
        assert!(cfg.carvers.blue_hole.enabled);
        assert!(cfg.block_registry().unwrap().id_by_name("water").is_some());
    }

    #[test]
    fn sections_override_independently() {
        let cfg = ExpanseConfig::from_toml_str(
            r#"
            [heights]
            profile = "expanse_heights"
            tag = "deep_ores"

            [generation]
            seed = -7
            sea_level = 40

            [carvers.massive_ravine]
            enabled = false
        "#,
        )
        .unwrap();
        assert_eq!(cfg.heights.tag, "deep_ores");
        assert_eq!(cfg.heights.range().unwrap().new_max(), 2000);
        assert_eq!(cfg.generation.seed, -7);
        assert_eq!(cfg.generation.sea_level, 40);
        assert_eq!(cfg.generation.min_y, -256);
        assert!(!cfg.carvers.massive_ravine.enabled);
        assert!(cfg.carvers.mega_ocean_ravine.enabled);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ExpanseConfig::load(Path::new("/nonexistent/expanse.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
