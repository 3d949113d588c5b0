//! Chunk columns and the chunk-access seam used by carvers.
#![forbid(unsafe_code)]

mod pos;

use expanse_blocks::Block;

pub use pos::ChunkPos;

/// Block access for one chunk column during generation.
///
/// Coordinates are world coordinates; callers only pass positions that lie
/// inside `pos()` horizontally and inside `[min_y, min_y + height)` vertically.
pub trait ChunkAccess {
    fn pos(&self) -> ChunkPos;
    fn min_y(&self) -> i32;
    fn height(&self) -> i32;
    fn block_at(&self, wx: i32, wy: i32, wz: i32) -> Block;
    fn set_block(&mut self, wx: i32, wy: i32, wz: i32, block: Block);
    fn mark_for_postprocess(&mut self, wx: i32, wy: i32, wz: i32);
}

/// Dense 16 × height × 16 column, y-major like the mesher buffers.
#[derive(Clone, Debug)]
pub struct ChunkColumn {
    pub pos: ChunkPos,
    pub min_y: i32,
    pub sy: usize,
    pub blocks: Vec<Block>,
    pub postprocess: Vec<(i32, i32, i32)>,
}

impl ChunkColumn {
    pub const SX: usize = ChunkPos::SIZE as usize;
    pub const SZ: usize = ChunkPos::SIZE as usize;

    pub fn empty(pos: ChunkPos, min_y: i32, sy: usize) -> Self {
        Self::from_blocks_local(pos, min_y, sy, Vec::new())
    }

    /// Builds a column whose block at every level is chosen by `layer(wy)`.
    pub fn layered(pos: ChunkPos, min_y: i32, sy: usize, layer: impl Fn(i32) -> Block) -> Self {
        let mut blocks = Vec::with_capacity(Self::SX * sy * Self::SZ);
        for y in 0..sy {
            let block = layer(min_y + y as i32);
            blocks.extend(std::iter::repeat_n(block, Self::SX * Self::SZ));
        }
        Self::from_blocks_local(pos, min_y, sy, blocks)
    }

    pub fn from_blocks_local(pos: ChunkPos, min_y: i32, sy: usize, blocks: Vec<Block>) -> Self {
        let mut b = blocks;
        let expect = Self::SX * sy * Self::SZ;
        if b.len() != expect {
            b.resize(expect, Block::AIR);
        }
        ChunkColumn {
            pos,
            min_y,
            sy,
            blocks: b,
            postprocess: Vec::new(),
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * Self::SZ + z) * Self::SX + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, block: Block) {
        let i = self.idx(x, y, z);
        self.blocks[i] = block;
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        if wy < self.min_y || wy >= self.min_y + self.sy as i32 {
            return false;
        }
        self.pos.local_xz(wx, wz).is_some()
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        if !self.contains_world(wx, wy, wz) {
            return None;
        }
        let (lx, lz) = self.pos.local_xz(wx, wz)?;
        let ly = (wy - self.min_y) as usize;
        Some(self.get_local(lx, ly, lz))
    }

    pub fn count_matching(&self, pred: impl Fn(Block) -> bool) -> usize {
        self.blocks.iter().filter(|b| pred(**b)).count()
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|b| *b == Block::AIR)
    }
}

impl ChunkAccess for ChunkColumn {
    fn pos(&self) -> ChunkPos {
        self.pos
    }

    fn min_y(&self) -> i32 {
        self.min_y
    }

    fn height(&self) -> i32 {
        self.sy as i32
    }

    fn block_at(&self, wx: i32, wy: i32, wz: i32) -> Block {
        self.get_world(wx, wy, wz).unwrap_or(Block::AIR)
    }

    fn set_block(&mut self, wx: i32, wy: i32, wz: i32, block: Block) {
        if !self.contains_world(wx, wy, wz) {
            return;
        }
        let lx = (wx - self.pos.min_block_x()) as usize;
        let lz = (wz - self.pos.min_block_z()) as usize;
        let ly = (wy - self.min_y) as usize;
        self.set_local(lx, ly, lz, block);
    }

    fn mark_for_postprocess(&mut self, wx: i32, wy: i32, wz: i32) {
        self.postprocess.push((wx, wy, wz));
    }
}
