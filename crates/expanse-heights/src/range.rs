use serde::{Deserialize, Serialize};

use crate::error::ScaleRangeError;

/// Linear projection from the original world height range onto a taller one.
///
/// Values are scaled about the origin, not about `old_min`: `scale(0) == 0`
/// for every range. Results saturate at the new bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleRange {
    old_min: i32,
    old_max: i32,
    new_min: i32,
    new_max: i32,
}

impl ScaleRange {
    pub fn new(old_min: i32, old_max: i32, new_min: i32, new_max: i32) -> Result<Self, ScaleRangeError> {
        if old_max <= old_min {
            return Err(ScaleRangeError::EmptyOldRange { min: old_min, max: old_max });
        }
        if new_max <= new_min {
            return Err(ScaleRangeError::EmptyNewRange { min: new_min, max: new_max });
        }
        Ok(Self { old_min, old_max, new_min, new_max })
    }

    #[inline]
    pub fn old_min(&self) -> i32 {
        self.old_min
    }

    #[inline]
    pub fn old_max(&self) -> i32 {
        self.old_max
    }

    #[inline]
    pub fn new_min(&self) -> i32 {
        self.new_min
    }

    #[inline]
    pub fn new_max(&self) -> i32 {
        self.new_max
    }

    /// `round(y * new_span / old_span)`, rounded half away from zero on the
    /// exact quotient, then clamped into `[new_min, new_max]`.
    pub fn scale(&self, y: i32) -> i32 {
        let old_span = i64::from(self.old_max) - i64::from(self.old_min);
        let new_span = i64::from(self.new_max) - i64::from(self.new_min);
        let scaled = div_round_half_away(i64::from(y) * new_span, old_span);
        scaled.clamp(i64::from(self.new_min), i64::from(self.new_max)) as i32
    }
}

impl Default for ScaleRange {
    fn default() -> Self {
        ScaleProfile::Expanse.range()
    }
}

// den > 0
fn div_round_half_away(num: i64, den: i64) -> i64 {
    let q = num / den;
    let r = num % den;
    if 2 * r.abs() >= den { q + num.signum() } else { q }
}

/// Named target ranges shipped with the generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleProfile {
    /// -64..320 → -256..2288
    #[default]
    Expanse,
    /// -64..320 → -256..2000
    ExpanseHeights,
}

impl ScaleProfile {
    pub const OLD_MIN: i32 = -64;
    pub const OLD_MAX: i32 = 320;

    pub fn range(self) -> ScaleRange {
        let (new_min, new_max) = match self {
            ScaleProfile::Expanse => (-256, 2288),
            ScaleProfile::ExpanseHeights => (-256, 2000),
        };
        ScaleRange { old_min: Self::OLD_MIN, old_max: Self::OLD_MAX, new_min, new_max }
    }
}
