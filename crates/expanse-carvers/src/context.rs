use expanse_blocks::{Block, BlockRegistry};

use crate::error::CarverConfigError;

/// World-level facts every carver consults: the generation bounds, sea
/// level, and the blocks written into carved space.
#[derive(Clone, Copy, Debug)]
pub struct CarveContext<'r> {
    pub min_gen_y: i32,
    pub gen_depth: i32,
    pub sea_level: i32,
    pub air: Block,
    pub liquid: Block,
    pub registry: &'r BlockRegistry,
}

impl<'r> CarveContext<'r> {
    /// Ravines keep this many levels below the top of the world uncarved.
    pub const TOP_MARGIN: i32 = 7;

    pub fn new(
        registry: &'r BlockRegistry,
        min_gen_y: i32,
        gen_depth: i32,
        sea_level: i32,
        liquid: &str,
    ) -> Result<Self, CarverConfigError> {
        if gen_depth <= Self::TOP_MARGIN + 2 {
            return Err(CarverConfigError::GenDepth(gen_depth));
        }
        let liquid = registry
            .block_by_name(liquid)
            .ok_or_else(|| CarverConfigError::UnknownBlock(liquid.to_string()))?;
        Ok(Self { min_gen_y, gen_depth, sea_level, air: Block::AIR, liquid, registry })
    }

    /// Highest generated level.
    #[inline]
    pub fn top_y(&self) -> i32 {
        self.min_gen_y + self.gen_depth - 1
    }

    #[inline]
    pub fn contains_y(&self, y: i32) -> bool {
        y >= self.min_gen_y && y < self.min_gen_y + self.gen_depth
    }
}
