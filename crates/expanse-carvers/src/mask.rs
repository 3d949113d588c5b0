/// One bit per voxel of a chunk column, set once a carver has claimed it.
///
/// Local coordinates: x and z in `0..16`, y in `0..depth` counted from the
/// bottom of the generation range. Bits are never cleared.
#[derive(Clone, Debug)]
pub struct CarveMask {
    depth: usize,
    bits: Vec<u64>,
    carved: usize,
}

impl CarveMask {
    pub const SX: usize = 16;
    pub const SZ: usize = 16;

    pub fn new(depth: usize) -> Self {
        let len = Self::SX * depth * Self::SZ;
        Self { depth, bits: vec![0; len.div_ceil(64)], carved: 0 }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        (0..Self::SX as i32).contains(&x)
            && (0..self.depth as i32).contains(&y)
            && (0..Self::SZ as i32).contains(&z)
    }

    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * Self::SZ + z) * Self::SX + x
    }

    /// Callers check [`contains`](Self::contains) first.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        let i = self.idx(x, y, z);
        self.bits[i >> 6] & (1u64 << (i & 63)) != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize) {
        let i = self.idx(x, y, z);
        let word = &mut self.bits[i >> 6];
        let bit = 1u64 << (i & 63);
        if *word & bit == 0 {
            *word |= bit;
            self.carved += 1;
        }
    }

    #[inline]
    pub fn carved_count(&self) -> usize {
        self.carved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_sticky_and_counted_once() {
        let mut m = CarveMask::new(4);
        assert!(!m.get(15, 3, 15));
        m.set(15, 3, 15);
        m.set(15, 3, 15);
        assert!(m.get(15, 3, 15));
        assert!(!m.get(14, 3, 15));
        assert_eq!(m.carved_count(), 1);
    }

    #[test]
    fn contains_checks_every_axis() {
        let m = CarveMask::new(8);
        assert!(m.contains(0, 0, 0));
        assert!(m.contains(15, 7, 15));
        assert!(!m.contains(16, 0, 0));
        assert!(!m.contains(0, 8, 0));
        assert!(!m.contains(0, 0, -1));
    }
}
