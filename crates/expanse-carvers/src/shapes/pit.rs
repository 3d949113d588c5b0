use expanse_chunk::{ChunkAccess, ChunkPos};

use super::FootprintShape;
use crate::random::RandomSource;
use crate::writer::CarveWriter;

/// A flooded vertical cylinder sunk from just above sea level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PitShape {
    pub min_depth: i32,
    pub depth_variation: i32,
    pub min_radius: i32,
    pub radius_variation: i32,
}

impl Default for PitShape {
    fn default() -> Self {
        Self { min_depth: 50, depth_variation: 51, min_radius: 9, radius_variation: 10 }
    }
}

impl PitShape {
    /// Levels above sea level where the pit opens.
    pub const RIM: i32 = 5;

    pub fn max_radius(&self) -> i32 {
        self.min_radius + self.radius_variation - 1
    }
}

impl FootprintShape for PitShape {
    fn reach_chunks(&self) -> i32 {
        (self.max_radius() + ChunkPos::SIZE - 1) / ChunkPos::SIZE
    }

    fn carve<R, C>(&self, writer: &mut CarveWriter<'_, C>, source: ChunkPos, rng: &mut R)
    where
        R: RandomSource,
        C: ChunkAccess + ?Sized,
    {
        let ctx = writer.ctx();
        let center_x = source.min_block_x() + rng.next_int(16);
        let center_z = source.min_block_z() + rng.next_int(16);
        let depth = self.min_depth + rng.next_int(self.depth_variation);
        let radius = self.min_radius + rng.next_int(self.radius_variation);

        let top = (ctx.sea_level + Self::RIM).min(ctx.top_y());
        let bottom = ctx.min_gen_y.max(top - depth);
        let radius_sq = radius * radius;

        // clip the disc to the target chunk
        let target = writer.pos();
        let x0 = (center_x - radius).max(target.min_block_x());
        let x1 = (center_x + radius).min(target.min_block_x() + ChunkPos::SIZE - 1);
        let z0 = (center_z - radius).max(target.min_block_z());
        let z1 = (center_z + radius).min(target.min_block_z() + ChunkPos::SIZE - 1);
        if x0 > x1 || z0 > z1 {
            return;
        }

        for y in (bottom..=top).rev() {
            for x in x0..=x1 {
                let dx = x - center_x;
                for z in z0..=z1 {
                    let dz = z - center_z;
                    if dx * dx + dz * dz > radius_sq {
                        continue;
                    }
                    writer.try_carve(x, y, z);
                }
            }
        }
    }
}
