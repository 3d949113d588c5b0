use serde::Deserialize;

use crate::error::CarverConfigError;
use crate::random::{FloatProvider, IntRange};
use crate::shapes::{CanyonScaling, CanyonShape, PitShape};

/// `[carvers]` table. Carvers run in the order of the fields here.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CarversConfig {
    #[serde(default = "default_mega_ocean_ravine")]
    pub mega_ocean_ravine: CanyonConfig,
    #[serde(default = "default_massive_ravine")]
    pub massive_ravine: CanyonConfig,
    #[serde(default)]
    pub blue_hole: PitConfig,
}

impl Default for CarversConfig {
    fn default() -> Self {
        Self {
            mega_ocean_ravine: default_mega_ocean_ravine(),
            massive_ravine: default_massive_ravine(),
            blue_hole: PitConfig::default(),
        }
    }
}

fn default_mega_ocean_ravine() -> CanyonConfig {
    CanyonConfig {
        probability: 0.02,
        y: IntRange::new(-120, 40),
        ..CanyonConfig::default()
    }
}

fn default_massive_ravine() -> CanyonConfig {
    CanyonConfig::default()
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CanyonConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_canyon_probability")]
    pub probability: f32,
    #[serde(default = "default_canyon_y")]
    pub y: IntRange,
    #[serde(default = "default_y_scale")]
    pub y_scale: FloatProvider,
    #[serde(default = "default_vertical_rotation")]
    pub vertical_rotation: FloatProvider,
    #[serde(default = "default_distance_factor")]
    pub distance_factor: FloatProvider,
    #[serde(default = "default_thickness")]
    pub thickness: FloatProvider,
    #[serde(default = "default_width_smoothness")]
    pub width_smoothness: i32,
    #[serde(default = "default_horizontal_radius_factor")]
    pub horizontal_radius_factor: FloatProvider,
    #[serde(default = "default_vertical_radius_default_factor")]
    pub vertical_radius_default_factor: f32,
    #[serde(default)]
    pub vertical_radius_center_factor: f32,
    #[serde(default = "default_base_length")]
    pub base_length: i32,
}

fn default_enabled() -> bool {
    true
}
fn default_canyon_probability() -> f32 {
    0.01
}
fn default_canyon_y() -> IntRange {
    IntRange::new(10, 67)
}
fn default_y_scale() -> FloatProvider {
    FloatProvider::constant(3.0)
}
fn default_vertical_rotation() -> FloatProvider {
    FloatProvider::uniform(-0.125, 0.125)
}
fn default_distance_factor() -> FloatProvider {
    FloatProvider::uniform(0.75, 1.0)
}
fn default_thickness() -> FloatProvider {
    FloatProvider::Trapezoid { min: 0.0, max: 6.0, plateau: 2.0 }
}
fn default_width_smoothness() -> i32 {
    3
}
fn default_horizontal_radius_factor() -> FloatProvider {
    FloatProvider::uniform(0.75, 1.0)
}
fn default_vertical_radius_default_factor() -> f32 {
    1.0
}
fn default_base_length() -> i32 {
    112
}

impl Default for CanyonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probability: default_canyon_probability(),
            y: default_canyon_y(),
            y_scale: default_y_scale(),
            vertical_rotation: default_vertical_rotation(),
            distance_factor: default_distance_factor(),
            thickness: default_thickness(),
            width_smoothness: default_width_smoothness(),
            horizontal_radius_factor: default_horizontal_radius_factor(),
            vertical_radius_default_factor: default_vertical_radius_default_factor(),
            vertical_radius_center_factor: 0.0,
            base_length: default_base_length(),
        }
    }
}

impl CanyonConfig {
    /// Validated shape with the variant's multipliers applied.
    pub fn shape(&self, carver: &'static str, scaling: CanyonScaling) -> Result<CanyonShape, CarverConfigError> {
        check_probability(carver, self.probability)?;
        let providers = [
            ("y_scale", &self.y_scale),
            ("vertical_rotation", &self.vertical_rotation),
            ("distance_factor", &self.distance_factor),
            ("thickness", &self.thickness),
            ("horizontal_radius_factor", &self.horizontal_radius_factor),
        ];
        for (field, provider) in providers {
            provider
                .validate()
                .map_err(|reason| CarverConfigError::Parameter { carver, field, reason })?;
        }
        if self.y.min_inclusive > self.y.max_inclusive {
            return Err(parameter(carver, "y", format!("{} > {}", self.y.min_inclusive, self.y.max_inclusive)));
        }
        if self.width_smoothness < 1 {
            return Err(parameter(carver, "width_smoothness", "must be at least 1".to_string()));
        }
        if self.base_length < 1 {
            return Err(parameter(carver, "base_length", "must be at least 1".to_string()));
        }
        if self.distance_factor.min_value() < 0.0 {
            return Err(parameter(carver, "distance_factor", "must not be negative".to_string()));
        }
        if self.horizontal_radius_factor.min_value() <= 0.0 {
            return Err(parameter(carver, "horizontal_radius_factor", "must be positive".to_string()));
        }
        Ok(CanyonShape {
            y: self.y,
            y_scale: self.y_scale,
            vertical_rotation: self.vertical_rotation,
            distance_factor: self.distance_factor,
            thickness: self.thickness,
            width_smoothness: self.width_smoothness,
            horizontal_radius_factor: self.horizontal_radius_factor,
            vertical_radius_default_factor: self.vertical_radius_default_factor,
            vertical_radius_center_factor: self.vertical_radius_center_factor,
            base_length: self.base_length,
            scaling,
        })
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PitConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_pit_probability")]
    pub probability: f32,
    #[serde(default = "default_min_depth")]
    pub min_depth: i32,
    #[serde(default = "default_depth_variation")]
    pub depth_variation: i32,
    #[serde(default = "default_min_radius")]
    pub min_radius: i32,
    #[serde(default = "default_radius_variation")]
    pub radius_variation: i32,
}

fn default_pit_probability() -> f32 {
    0.01
}
fn default_min_depth() -> i32 {
    50
}
fn default_depth_variation() -> i32 {
    51
}
fn default_min_radius() -> i32 {
    9
}
fn default_radius_variation() -> i32 {
    10
}

impl Default for PitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probability: default_pit_probability(),
            min_depth: default_min_depth(),
            depth_variation: default_depth_variation(),
            min_radius: default_min_radius(),
            radius_variation: default_radius_variation(),
        }
    }
}

impl PitConfig {
    pub fn shape(&self, carver: &'static str) -> Result<PitShape, CarverConfigError> {
        check_probability(carver, self.probability)?;
        if self.min_depth < 0 {
            return Err(parameter(carver, "min_depth", "must not be negative".to_string()));
        }
        if self.depth_variation < 1 {
            return Err(parameter(carver, "depth_variation", "must be at least 1".to_string()));
        }
        if self.min_radius < 0 {
            return Err(parameter(carver, "min_radius", "must not be negative".to_string()));
        }
        if self.radius_variation < 1 {
            return Err(parameter(carver, "radius_variation", "must be at least 1".to_string()));
        }
        Ok(PitShape {
            min_depth: self.min_depth,
            depth_variation: self.depth_variation,
            min_radius: self.min_radius,
            radius_variation: self.radius_variation,
        })
    }
}

fn check_probability(carver: &'static str, value: f32) -> Result<(), CarverConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CarverConfigError::Probability { carver, value })
    }
}

fn parameter(carver: &'static str, field: &'static str, reason: String) -> CarverConfigError {
    CarverConfigError::Parameter { carver, field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_uses_variant_defaults() {
        let cfg: CarversConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, CarversConfig::default());
        assert_eq!(cfg.mega_ocean_ravine.probability, 0.02);
        assert_eq!(cfg.massive_ravine.y, IntRange::new(10, 67));
        assert_eq!(cfg.blue_hole.min_depth, 50);
    }

    #[test]
    fn parses_providers_and_overrides() {
        let cfg: CarversConfig = toml::from_str(
            r#"
            [massive_ravine]
            probability = 0.05
            thickness = { type = "uniform", min_inclusive = 1.0, max_exclusive = 4.0 }
            y = { min_inclusive = -40, max_inclusive = 20 }

            [blue_hole]
            enabled = false
        "#,
        )
        .unwrap();
        assert_eq!(cfg.massive_ravine.probability, 0.05);
        assert_eq!(cfg.massive_ravine.thickness, FloatProvider::uniform(1.0, 4.0));
        assert_eq!(cfg.massive_ravine.y_scale, FloatProvider::constant(3.0));
        assert!(!cfg.blue_hole.enabled);
    }

    #[test]
    fn rejects_bad_parameters() {
        let bad = CanyonConfig { probability: 1.5, ..CanyonConfig::default() };
        assert!(matches!(
            bad.shape("massive_ravine", CanyonScaling::IDENTITY),
            Err(CarverConfigError::Probability { .. })
        ));
        let bad = CanyonConfig { width_smoothness: 0, ..CanyonConfig::default() };
        assert!(matches!(
            bad.shape("massive_ravine", CanyonScaling::IDENTITY),
            Err(CarverConfigError::Parameter { field: "width_smoothness", .. })
        ));
        let bad = PitConfig { radius_variation: 0, ..PitConfig::default() };
        assert!(bad.shape("blue_hole").is_err());
    }
}
