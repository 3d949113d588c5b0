use serde::{Deserialize, Serialize};

use crate::error::ScaleRangeError;
use crate::range::{ScaleProfile, ScaleRange};

/// `[heights]` section: which range to project onto and which tag to rescale.
///
/// Explicit bounds override the corresponding profile bound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightsConfig {
    #[serde(default)]
    pub profile: ScaleProfile,
    #[serde(default)]
    pub old_min: Option<i32>,
    #[serde(default)]
    pub old_max: Option<i32>,
    #[serde(default)]
    pub new_min: Option<i32>,
    #[serde(default)]
    pub new_max: Option<i32>,
    #[serde(default = "HeightsConfig::default_tag")]
    pub tag: String,
}

impl HeightsConfig {
    fn default_tag() -> String {
        "ores".to_string()
    }

    pub fn range(&self) -> Result<ScaleRange, ScaleRangeError> {
        let base = self.profile.range();
        ScaleRange::new(
            self.old_min.unwrap_or(base.old_min()),
            self.old_max.unwrap_or(base.old_max()),
            self.new_min.unwrap_or(base.new_min()),
            self.new_max.unwrap_or(base.new_max()),
        )
    }
}

impl Default for HeightsConfig {
    fn default() -> Self {
        Self {
            profile: ScaleProfile::default(),
            old_min: None,
            old_max: None,
            new_min: None,
            new_max: None,
            tag: Self::default_tag(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_expanse_profile_and_ore_tag() {
        let cfg: HeightsConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, HeightsConfig::default());
        assert_eq!(cfg.range().unwrap(), ScaleProfile::Expanse.range());
        assert_eq!(cfg.tag, "ores");
    }

    #[test]
    fn bounds_override_profile() {
        let cfg: HeightsConfig = toml::from_str(
            r#"
            profile = "expanse_heights"
            new_max = 1024
        "#,
        )
        .unwrap();
        let range = cfg.range().unwrap();
        assert_eq!(range.new_min(), -256);
        assert_eq!(range.new_max(), 1024);
    }

    #[test]
    fn inverted_override_is_rejected() {
        let cfg = HeightsConfig { new_min: Some(4000), ..HeightsConfig::default() };
        assert!(cfg.range().is_err());
    }
}
