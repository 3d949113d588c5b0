//! The three carvers of the expanse world, with their fixed variant multipliers.

use crate::carver::{Carver, ConfiguredCarver};
use crate::config::{CanyonConfig, PitConfig};
use crate::error::CarverConfigError;
use crate::shapes::{CanyonScaling, PitShape};

pub const MEGA_OCEAN_RAVINE: &str = "mega_ocean_ravine";
pub const MASSIVE_RAVINE: &str = "massive_ravine";
pub const BLUE_HOLE: &str = "blue_hole";

/// Twice as wide and up to four times as long as a plain ravine.
pub const MASSIVE_RAVINE_SCALING: CanyonScaling =
    CanyonScaling { thickness: 2.0, max_length: 4.0, vertical_extent: 1.0, min_floor_y: None };

/// Wider and taller, never starting below y = -75.
pub const MEGA_OCEAN_RAVINE_SCALING: CanyonScaling =
    CanyonScaling { thickness: 1.25, max_length: 1.0, vertical_extent: 1.5, min_floor_y: Some(-75) };

pub fn massive_ravine(cfg: &CanyonConfig) -> Result<ConfiguredCarver, CarverConfigError> {
    let shape = cfg.shape(MASSIVE_RAVINE, MASSIVE_RAVINE_SCALING)?;
    Ok(ConfiguredCarver::Canyon { name: MASSIVE_RAVINE, carver: Carver::new(cfg.probability, shape) })
}

pub fn mega_ocean_ravine(cfg: &CanyonConfig) -> Result<ConfiguredCarver, CarverConfigError> {
    let shape = cfg.shape(MEGA_OCEAN_RAVINE, MEGA_OCEAN_RAVINE_SCALING)?;
    Ok(ConfiguredCarver::Canyon { name: MEGA_OCEAN_RAVINE, carver: Carver::new(cfg.probability, shape) })
}

pub fn blue_hole(cfg: &PitConfig) -> Result<ConfiguredCarver, CarverConfigError> {
    let shape: PitShape = cfg.shape(BLUE_HOLE)?;
    Ok(ConfiguredCarver::Pit { name: BLUE_HOLE, carver: Carver::new(cfg.probability, shape) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{IntRange, LegacyRandom};
    use crate::shapes::{CanyonShape, CanyonStart};
    use expanse_chunk::ChunkPos;

    fn canyon_shape(carver: ConfiguredCarver) -> CanyonShape {
        match carver {
            ConfiguredCarver::Canyon { carver, .. } => carver.shape,
            ConfiguredCarver::Pit { name, .. } => panic!("{name} is not a canyon"),
        }
    }

    /// Starts drawn by the variant and by the unscaled shape from identical streams.
    fn paired_starts(scaled: &CanyonShape, seed: i64) -> (CanyonStart, CanyonStart) {
        let baseline = CanyonShape { scaling: CanyonScaling::IDENTITY, ..scaled.clone() };
        let source = ChunkPos::new(3, -2);
        let a = scaled.sample_start(source, &mut LegacyRandom::new(seed));
        let b = baseline.sample_start(source, &mut LegacyRandom::new(seed));
        (a, b)
    }

    #[test]
    fn massive_ravine_is_thicker_and_longer() {
        let shape = canyon_shape(massive_ravine(&CanyonConfig::default()).unwrap());
        assert_eq!(shape.scaling, MASSIVE_RAVINE_SCALING);
        assert_eq!(shape.max_length(), 448);
        for seed in 0..32 {
            let (scaled, base) = paired_starts(&shape, seed);
            assert_eq!((scaled.x, scaled.y, scaled.z), (base.x, base.y, base.z));
            assert_eq!(scaled.yaw, base.yaw);
            assert_eq!(scaled.y_scale, base.y_scale);
            assert!((scaled.thickness - base.thickness * 2.0).abs() < 1e-5);
            assert!(scaled.steps >= base.steps * 4 && scaled.steps <= base.steps * 4 + 3);
        }
    }

    #[test]
    fn mega_ocean_ravine_is_wider_taller_and_floored() {
        let cfg = CanyonConfig { y: IntRange::new(-120, 40), ..CanyonConfig::default() };
        let shape = canyon_shape(mega_ocean_ravine(&cfg).unwrap());
        assert_eq!(shape.scaling, MEGA_OCEAN_RAVINE_SCALING);
        let mut clamped = 0;
        for seed in 0..64 {
            let (scaled, base) = paired_starts(&shape, seed);
            assert_eq!(scaled.y, base.y.max(-75.0));
            if base.y < -75.0 {
                clamped += 1;
            }
            assert_eq!(scaled.y_scale, base.y_scale * 1.5);
            assert!((scaled.thickness - base.thickness * 1.25).abs() < 1e-5);
            assert_eq!(scaled.steps, base.steps);
        }
        assert!(clamped > 0);
    }
}
