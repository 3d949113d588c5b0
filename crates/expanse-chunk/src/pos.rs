use serde::{Deserialize, Serialize};

/// Horizontal chunk coordinate; a chunk spans the full generation height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkPos {
    pub const SIZE: i32 = 16;

    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn from_block(wx: i32, wz: i32) -> Self {
        Self {
            cx: wx.div_euclid(Self::SIZE),
            cz: wz.div_euclid(Self::SIZE),
        }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn min_block_x(self) -> i32 {
        self.cx * Self::SIZE
    }

    #[inline]
    pub fn min_block_z(self) -> i32 {
        self.cz * Self::SIZE
    }

    #[inline]
    pub fn middle_block_x(self) -> i32 {
        self.min_block_x() + Self::SIZE / 2
    }

    #[inline]
    pub fn middle_block_z(self) -> i32 {
        self.min_block_z() + Self::SIZE / 2
    }

    /// Local x/z of a world column, or `None` when it lies in another chunk.
    #[inline]
    pub fn local_xz(self, wx: i32, wz: i32) -> Option<(usize, usize)> {
        let lx = wx - self.min_block_x();
        let lz = wz - self.min_block_z();
        if (0..Self::SIZE).contains(&lx) && (0..Self::SIZE).contains(&lz) {
            Some((lx as usize, lz as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn chebyshev_distance(self, other: ChunkPos) -> i32 {
        (self.cx - other.cx).abs().max((self.cz - other.cz).abs())
    }
}

impl From<(i32, i32)> for ChunkPos {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkPos> for (i32, i32) {
    fn from(value: ChunkPos) -> Self {
        (value.cx, value.cz)
    }
}
