//! Carving a square region of flat test terrain on a worker pool.

use expanse_blocks::{Block, BlockRegistry};
use expanse_carvers::{CarveContext, CarverSet, ChunkCarveReport};
use expanse_chunk::{ChunkColumn, ChunkPos};
use hashbrown::HashMap;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::config::Generation;
use crate::error::{AppError, ConfigError};

#[derive(Clone, Debug)]
pub struct RegionOptions {
    pub center: ChunkPos,
    pub radius: i32,
    pub workers: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarverTotals {
    pub evaluated: usize,
    pub started: usize,
    pub edited: usize,
}

#[derive(Clone, Debug, Default)]
pub struct RegionSummary {
    pub chunks: usize,
    pub carved: usize,
    pub per_carver: HashMap<&'static str, CarverTotals>,
}

impl RegionSummary {
    fn absorb(&mut self, report: &ChunkCarveReport) {
        self.chunks += 1;
        self.carved += report.carved;
        for stats in &report.carvers {
            let totals = self.per_carver.entry(stats.name).or_default();
            totals.evaluated += stats.evaluated;
            totals.started += stats.started;
            totals.edited += stats.edited;
        }
    }
}

/// Bedrock floor, stone up to `surface_y`, air above.
pub fn flat_column(pos: ChunkPos, generation: &Generation, registry: &BlockRegistry) -> Result<ChunkColumn, ConfigError> {
    let bedrock = registry.require("bedrock")?;
    let stone = registry.require("stone")?;
    let min_y = generation.min_y;
    let surface = generation.surface_y;
    let sy = generation.height.max(0) as usize;
    Ok(ChunkColumn::layered(pos, min_y, sy, |wy| {
        if wy == min_y {
            bedrock
        } else if wy <= surface {
            stone
        } else {
            Block::AIR
        }
    }))
}

/// Carves every chunk within `radius` of `center`, one column per task.
pub fn carve_region(
    set: &CarverSet,
    generation: &Generation,
    registry: &BlockRegistry,
    opts: &RegionOptions,
) -> Result<RegionSummary, AppError> {
    let ctx = CarveContext::new(
        registry,
        generation.min_y,
        generation.height,
        generation.sea_level,
        &generation.liquid,
    )
    .map_err(ConfigError::from)?;

    let r = opts.radius.max(0);
    let positions: Vec<ChunkPos> = (-r..=r)
        .flat_map(|dx| (-r..=r).map(move |dz| opts.center.offset(dx, dz)))
        .collect();

    let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("expanse-carve-{i}"));
    if let Some(n) = opts.workers {
        builder = builder.num_threads(n);
    }
    let pool = builder.build()?;
    log::info!(
        "carving {} chunks around ({}, {}) with {} workers",
        positions.len(),
        opts.center.cx,
        opts.center.cz,
        pool.current_num_threads()
    );

    let reports: Vec<ChunkCarveReport> = pool.install(|| {
        positions
            .par_iter()
            .map(|&pos| {
                let mut column = flat_column(pos, generation, registry)?;
                Ok(set.carve_chunk(generation.seed, &mut column, &ctx))
            })
            .collect::<Result<_, ConfigError>>()
    })?;

    let mut summary = RegionSummary::default();
    for report in &reports {
        if report.carved > 0 {
            log::debug!("chunk ({}, {}): {} carved", report.chunk.cx, report.chunk.cz, report.carved);
        }
        summary.absorb(report);
    }
    for carver in set.carvers() {
        if let Some(t) = summary.per_carver.get(carver.name()) {
            log::info!(
                "{}: {} starts out of {} evaluations, {} blocks",
                carver.name(),
                t.started,
                t.evaluated,
                t.edited
            );
        }
    }
    log::info!("{} blocks carved across {} chunks", summary.carved, summary.chunks);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use expanse_carvers::CarversConfig;

    fn small_world() -> Generation {
        Generation { seed: 42, min_y: -64, height: 128, sea_level: 0, surface_y: 40, ..Generation::default() }
    }

    #[test]
    fn flat_column_layers() {
        let registry = BlockRegistry::builtin();
        let column = flat_column(ChunkPos::new(0, 0), &small_world(), &registry).unwrap();
        let bedrock = registry.block_by_name("bedrock").unwrap();
        let stone = registry.block_by_name("stone").unwrap();
        assert_eq!(column.get_world(3, -64, 3), Some(bedrock));
        assert_eq!(column.get_world(3, 40, 3), Some(stone));
        assert_eq!(column.get_world(3, 41, 3), Some(Block::AIR));
    }

    #[test]
    fn region_is_deterministic_across_pool_sizes() {
        let registry = BlockRegistry::builtin();
        let mut cfg = CarversConfig::default();
        cfg.blue_hole.probability = 0.5;
        let set = CarverSet::from_config(&cfg).unwrap();
        let generation = small_world();

        let run = |workers| {
            let opts = RegionOptions { center: ChunkPos::new(0, 0), radius: 1, workers: Some(workers) };
            carve_region(&set, &generation, &registry, &opts).unwrap()
        };
        let one = run(1);
        let four = run(4);
        assert_eq!(one.chunks, 9);
        assert_eq!(one.carved, four.carved);
        assert_eq!(one.per_carver, four.per_carver);
        assert!(one.per_carver.contains_key("blue_hole"));
    }

    #[test]
    fn shallow_world_is_rejected() {
        let registry = BlockRegistry::builtin();
        let set = CarverSet::default();
        let generation = Generation { height: 4, ..small_world() };
        let opts = RegionOptions { center: ChunkPos::new(0, 0), radius: 0, workers: Some(1) };
        assert!(matches!(
            carve_region(&set, &generation, &registry, &opts),
            Err(AppError::Config(ConfigError::Carvers(_)))
        ));
    }
}
