use expanse_chunk::{ChunkAccess, ChunkPos};

use crate::context::CarveContext;
use crate::mask::CarveMask;

/// Applies the per-voxel carve rules to one target chunk and its mask.
pub struct CarveWriter<'w, C: ChunkAccess + ?Sized> {
    ctx: &'w CarveContext<'w>,
    chunk: &'w mut C,
    mask: &'w mut CarveMask,
    edited: usize,
}

impl<'w, C: ChunkAccess + ?Sized> CarveWriter<'w, C> {
    pub fn new(ctx: &'w CarveContext<'w>, chunk: &'w mut C, mask: &'w mut CarveMask) -> Self {
        Self { ctx, chunk, mask, edited: 0 }
    }

    #[inline]
    pub fn ctx(&self) -> &'w CarveContext<'w> {
        self.ctx
    }

    /// The chunk being written.
    #[inline]
    pub fn pos(&self) -> ChunkPos {
        self.chunk.pos()
    }

    /// Voxels replaced so far through this writer.
    #[inline]
    pub fn edited(&self) -> usize {
        self.edited
    }

    pub fn mask(&self) -> &CarveMask {
        self.mask
    }

    /// Carves world voxel `(x, y, z)` if every rule allows it; returns whether it was replaced.
    ///
    /// Skips voxels outside the target chunk or the generation range, voxels
    /// already claimed in the mask, air, and blocks flagged as not carvable
    /// (bedrock). Fluids are carved like any other block. Carved voxels at or
    /// below sea level are flooded with the liquid.
    pub fn try_carve(&mut self, x: i32, y: i32, z: i32) -> bool {
        let Some((lx, lz)) = self.chunk.pos().local_xz(x, z) else {
            return false;
        };
        if !self.ctx.contains_y(y) {
            return false;
        }
        let ly = (y - self.ctx.min_gen_y) as usize;
        if self.mask.get(lx, ly, lz) {
            return false;
        }
        let current = self.chunk.block_at(x, y, z);
        let registry = self.ctx.registry;
        if registry.is_air(current) || !registry.is_carvable(current) {
            return false;
        }

        self.mask.set(lx, ly, lz);
        let replacement = if y <= self.ctx.sea_level { self.ctx.liquid } else { self.ctx.air };
        self.chunk.set_block(x, y, z, replacement);
        if registry.is_fluid(replacement) {
            self.chunk.mark_for_postprocess(x, y, z);
        }
        self.edited += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expanse_blocks::{Block, BlockRegistry};
    use expanse_chunk::ChunkColumn;

    fn setup(reg: &BlockRegistry) -> (CarveContext<'_>, ChunkColumn) {
        let ctx = CarveContext::new(reg, -16, 32, 0, "water").unwrap();
        let stone = reg.require("stone").unwrap();
        let col = ChunkColumn::layered(ChunkPos::new(1, 0), -16, 32, |_| stone);
        (ctx, col)
    }

    #[test]
    fn floods_at_and_below_sea_level() {
        let reg = BlockRegistry::builtin();
        let (ctx, mut col) = setup(&reg);
        let mut mask = CarveMask::new(32);
        let water = reg.require("water").unwrap();
        {
            let mut w = CarveWriter::new(&ctx, &mut col, &mut mask);
            assert!(w.try_carve(16, 0, 3));
            assert!(w.try_carve(16, 1, 3));
            assert_eq!(w.edited(), 2);
        }
        assert_eq!(col.block_at(16, 0, 3), water);
        assert_eq!(col.block_at(16, 1, 3), Block::AIR);
        assert_eq!(col.postprocess, vec![(16, 0, 3)]);
        assert_eq!(mask.carved_count(), 2);
    }

    #[test]
    fn fluids_are_replaced_like_solid_blocks() {
        let reg = BlockRegistry::builtin();
        let (ctx, mut col) = setup(&reg);
        let water = reg.require("water").unwrap();
        let lava = reg.require("lava").unwrap();
        col.set_block(16, 4, 0, water);
        col.set_block(16, -4, 0, lava);
        let mut mask = CarveMask::new(32);
        {
            let mut w = CarveWriter::new(&ctx, &mut col, &mut mask);
            assert!(w.try_carve(16, 4, 0));
            assert!(w.try_carve(16, -4, 0));
        }
        assert_eq!(col.block_at(16, 4, 0), Block::AIR);
        assert_eq!(col.block_at(16, -4, 0), water);
        assert_eq!(col.postprocess, vec![(16, -4, 0)]);
    }

    #[test]
    fn skips_in_rule_order() {
        let reg = BlockRegistry::builtin();
        let (ctx, mut col) = setup(&reg);
        let bedrock = reg.require("bedrock").unwrap();
        col.set_block(17, 5, 0, bedrock);
        col.set_block(18, 5, 0, Block::AIR);
        let mut mask = CarveMask::new(32);
        mask.set(3, 21, 0);
        let mut w = CarveWriter::new(&ctx, &mut col, &mut mask);
        // other chunk
        assert!(!w.try_carve(0, 5, 0));
        // below and above the generation range
        assert!(!w.try_carve(16, -17, 0));
        assert!(!w.try_carve(16, 16, 0));
        // already claimed (local y 21 is world y 5)
        assert!(!w.try_carve(19, 5, 0));
        assert!(!w.try_carve(18, 5, 0));
        assert!(!w.try_carve(17, 5, 0));
        assert_eq!(w.edited(), 0);
        assert_eq!(w.mask().carved_count(), 1);
    }
}
