use expanse_chunk::{ChunkAccess, ChunkPos};

use crate::carver::{CarvePhase, ConfiguredCarver};
use crate::config::CarversConfig;
use crate::context::CarveContext;
use crate::error::CarverConfigError;
use crate::mask::CarveMask;
use crate::random::LegacyRandom;
use crate::variants;
use crate::writer::CarveWriter;

/// Per-carver totals for one target chunk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarverStats {
    pub name: &'static str,
    pub evaluated: usize,
    pub started: usize,
    pub edited: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkCarveReport {
    pub chunk: ChunkPos,
    pub carvers: Vec<CarverStats>,
    pub carved: usize,
}

impl ChunkCarveReport {
    pub fn edited(&self) -> usize {
        self.carvers.iter().map(|c| c.edited).sum()
    }
}

/// The enabled carvers, in the order they run against each chunk.
#[derive(Clone, Debug, Default)]
pub struct CarverSet {
    carvers: Vec<ConfiguredCarver>,
}

impl CarverSet {
    pub fn new(carvers: Vec<ConfiguredCarver>) -> Self {
        Self { carvers }
    }

    /// Builds and validates every enabled carver.
    pub fn from_config(cfg: &CarversConfig) -> Result<Self, CarverConfigError> {
        let mut carvers = Vec::with_capacity(3);
        if cfg.mega_ocean_ravine.enabled {
            carvers.push(variants::mega_ocean_ravine(&cfg.mega_ocean_ravine)?);
        }
        if cfg.massive_ravine.enabled {
            carvers.push(variants::massive_ravine(&cfg.massive_ravine)?);
        }
        if cfg.blue_hole.enabled {
            carvers.push(variants::blue_hole(&cfg.blue_hole)?);
        }
        Ok(Self { carvers })
    }

    pub fn carvers(&self) -> &[ConfiguredCarver] {
        &self.carvers
    }

    pub fn is_empty(&self) -> bool {
        self.carvers.is_empty()
    }

    pub fn max_reach(&self) -> i32 {
        self.carvers.iter().map(ConfiguredCarver::reach_chunks).max().unwrap_or(0)
    }

    /// Runs every carver from every source chunk in reach against `chunk`,
    /// sharing one fresh mask across all of them.
    pub fn carve_chunk<C: ChunkAccess + ?Sized>(
        &self,
        world_seed: i64,
        chunk: &mut C,
        ctx: &CarveContext<'_>,
    ) -> ChunkCarveReport {
        let target = chunk.pos();
        let mut stats: Vec<CarverStats> = self
            .carvers
            .iter()
            .map(|c| CarverStats { name: c.name(), ..CarverStats::default() })
            .collect();
        let mut mask = CarveMask::new(ctx.gen_depth.max(0) as usize);
        let reach = self.max_reach();
        {
            let mut writer = CarveWriter::new(ctx, chunk, &mut mask);
            for dx in -reach..=reach {
                for dz in -reach..=reach {
                    let source = target.offset(dx, dz);
                    for (index, carver) in self.carvers.iter().enumerate() {
                        if source.chebyshev_distance(target) > carver.reach_chunks() {
                            continue;
                        }
                        let seed = world_seed.wrapping_add(index as i64);
                        let mut rng = LegacyRandom::large_feature(seed, source.cx, source.cz);
                        let outcome = carver.carve_from(source, &mut writer, &mut rng);
                        let s = &mut stats[index];
                        s.evaluated += 1;
                        if outcome.phase == CarvePhase::Done {
                            s.started += 1;
                            s.edited += outcome.edited;
                        }
                    }
                }
            }
        }
        ChunkCarveReport { chunk: target, carvers: stats, carved: mask.carved_count() }
    }
}
