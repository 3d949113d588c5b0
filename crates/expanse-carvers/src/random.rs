use serde::{Deserialize, Serialize};

/// A seeded random stream. The order in which a carver draws from it is
/// part of its output: two runs with the same seed and draw order carve the
/// same voxels.
pub trait RandomSource {
    fn from_seed(seed: i64) -> Self
    where
        Self: Sized;

    /// Uniform in `0..bound`; `bound` must be positive.
    fn next_int(&mut self, bound: i32) -> i32;
    /// Uniform in `[0, 1)`.
    fn next_float(&mut self) -> f32;
    /// Uniform in `[0, 1)`.
    fn next_double(&mut self) -> f64;
    fn next_long(&mut self) -> i64;

    /// Uniform in `min..=max`; returns `min` when the range is empty.
    fn next_int_between(&mut self, min: i32, max: i32) -> i32 {
        if min >= max { min } else { min + self.next_int(max - min + 1) }
    }

    fn float_between(&mut self, min: f32, max: f32) -> f32 {
        self.next_float() * (max - min) + min
    }

    /// Independent stream seeded from this one.
    fn fork(&mut self) -> Self
    where
        Self: Sized,
    {
        let seed = self.next_long();
        Self::from_seed(seed)
    }
}

/// The 48-bit linear congruential generator worlds are seeded with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyRandom {
    seed: i64,
}

impl LegacyRandom {
    const MULTIPLIER: i64 = 0x5_DEEC_E66D;
    const ADDEND: i64 = 0xB;
    const MASK: i64 = (1 << 48) - 1;

    pub fn new(seed: i64) -> Self {
        Self { seed: (seed ^ Self::MULTIPLIER) & Self::MASK }
    }

    /// Stream for large features started in chunk `(chunk_x, chunk_z)`.
    pub fn large_feature(world_seed: i64, chunk_x: i32, chunk_z: i32) -> Self {
        let mut rng = Self::new(world_seed);
        let a = rng.next_long();
        let b = rng.next_long();
        let mixed = i64::from(chunk_x).wrapping_mul(a) ^ i64::from(chunk_z).wrapping_mul(b) ^ world_seed;
        Self::new(mixed)
    }

    #[inline]
    fn next_bits(&mut self, bits: u32) -> i32 {
        self.seed = self.seed.wrapping_mul(Self::MULTIPLIER).wrapping_add(Self::ADDEND) & Self::MASK;
        (self.seed >> (48 - bits)) as i32
    }
}

impl RandomSource for LegacyRandom {
    fn from_seed(seed: i64) -> Self {
        Self::new(seed)
    }

    fn next_int(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive, got {bound}");
        if bound <= 0 {
            return 0;
        }
        if bound & bound.wrapping_neg() == bound {
            return ((i64::from(bound) * i64::from(self.next_bits(31))) >> 31) as i32;
        }
        loop {
            let bits = self.next_bits(31);
            let val = bits % bound;
            // reject the partial bucket at the top of the range
            if bits.checked_sub(val).and_then(|v| v.checked_add(bound - 1)).is_some() {
                return val;
            }
        }
    }

    fn next_float(&mut self) -> f32 {
        self.next_bits(24) as f32 / (1u32 << 24) as f32
    }

    fn next_double(&mut self) -> f64 {
        let hi = i64::from(self.next_bits(26)) << 27;
        let lo = i64::from(self.next_bits(27));
        (hi + lo) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn next_long(&mut self) -> i64 {
        let hi = i64::from(self.next_bits(32)) << 32;
        hi.wrapping_add(i64::from(self.next_bits(32)))
    }
}

/// Float sampler used by carver parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FloatProvider {
    Constant { value: f32 },
    Uniform { min_inclusive: f32, max_exclusive: f32 },
    /// Sum of two uniform draws; flat between the two slopes for `plateau`.
    Trapezoid { min: f32, max: f32, plateau: f32 },
}

impl FloatProvider {
    pub fn constant(value: f32) -> Self {
        FloatProvider::Constant { value }
    }

    pub fn uniform(min_inclusive: f32, max_exclusive: f32) -> Self {
        FloatProvider::Uniform { min_inclusive, max_exclusive }
    }

    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        match *self {
            FloatProvider::Constant { value } => value,
            FloatProvider::Uniform { min_inclusive, max_exclusive } => {
                min_inclusive + rng.next_float() * (max_exclusive - min_inclusive)
            }
            FloatProvider::Trapezoid { min, max, plateau } => {
                let span = max - min;
                let slope = (span - plateau) / 2.0;
                let rest = span - slope;
                min + rng.next_float() * rest + rng.next_float() * slope
            }
        }
    }

    pub fn min_value(&self) -> f32 {
        match *self {
            FloatProvider::Constant { value } => value,
            FloatProvider::Uniform { min_inclusive, .. } => min_inclusive,
            FloatProvider::Trapezoid { min, .. } => min,
        }
    }

    pub fn max_value(&self) -> f32 {
        match *self {
            FloatProvider::Constant { value } => value,
            FloatProvider::Uniform { max_exclusive, .. } => max_exclusive,
            FloatProvider::Trapezoid { max, .. } => max,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let finite = [self.min_value(), self.max_value()].iter().all(|v| v.is_finite());
        if !finite {
            return Err("bounds must be finite".to_string());
        }
        match *self {
            FloatProvider::Constant { .. } => Ok(()),
            FloatProvider::Uniform { min_inclusive, max_exclusive } if min_inclusive >= max_exclusive => {
                Err(format!("uniform range {min_inclusive}..{max_exclusive} is empty"))
            }
            FloatProvider::Trapezoid { min, max, plateau } if min > max || plateau < 0.0 || plateau > max - min => {
                Err(format!("trapezoid {min}..{max} cannot hold plateau {plateau}"))
            }
            _ => Ok(()),
        }
    }
}

/// Inclusive integer range sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min_inclusive: i32,
    pub max_inclusive: i32,
}

impl IntRange {
    pub const fn new(min_inclusive: i32, max_inclusive: i32) -> Self {
        Self { min_inclusive, max_inclusive }
    }

    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> i32 {
        rng.next_int_between(self.min_inclusive, self.max_inclusive)
    }
}
