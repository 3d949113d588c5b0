//! Footprints carved once a source chunk has started a carver.

mod canyon;
mod pit;

use expanse_chunk::{ChunkAccess, ChunkPos};

use crate::random::RandomSource;
use crate::writer::CarveWriter;

pub use canyon::{CanyonScaling, CanyonShape, CanyonStart};
pub use pit::PitShape;

/// Carvers look this many chunks around a target at most.
pub const MAX_REACH_CHUNKS: i32 = 32;

pub trait FootprintShape {
    /// Largest Chebyshev distance, in chunks, between a source chunk and a
    /// chunk its footprint can touch.
    fn reach_chunks(&self) -> i32;

    /// Draws the footprint for a run started in `source` and carves the part
    /// of it that falls inside the writer's chunk.
    fn carve<R, C>(&self, writer: &mut CarveWriter<'_, C>, source: ChunkPos, rng: &mut R)
    where
        R: RandomSource,
        C: ChunkAccess + ?Sized;
}
