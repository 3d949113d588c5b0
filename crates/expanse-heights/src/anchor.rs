use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AnchorWireError;
use crate::range::ScaleRange;

pub const ABSOLUTE: &str = "absolute";
pub const ABOVE_BOTTOM: &str = "above_bottom";
pub const BELOW_TOP: &str = "below_top";

/// Keys in the order they are consulted when an object carries several.
pub const ANCHOR_KEYS: [&str; 3] = [ABSOLUTE, ABOVE_BOTTOM, BELOW_TOP];

/// A vertical position in one of the three reference frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AnchorRepr", into = "AnchorRepr")]
pub enum HeightAnchor {
    Absolute(i32),
    AboveBottom(i32),
    BelowTop(i32),
}

impl HeightAnchor {
    /// Absolute Y of this anchor in the old world range.
    pub fn normalize(self, range: &ScaleRange) -> i32 {
        match self {
            HeightAnchor::Absolute(y) => y,
            HeightAnchor::AboveBottom(y) => range.old_min().saturating_add(y),
            HeightAnchor::BelowTop(y) => range.old_max().saturating_sub(y),
        }
    }

    pub fn rescaled(self, range: &ScaleRange) -> HeightAnchor {
        HeightAnchor::Absolute(range.scale(self.normalize(range)))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnchorRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    absolute: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    above_bottom: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    below_top: Option<i32>,
}

impl TryFrom<AnchorRepr> for HeightAnchor {
    type Error = AnchorWireError;

    fn try_from(repr: AnchorRepr) -> Result<Self, Self::Error> {
        match (repr.absolute, repr.above_bottom, repr.below_top) {
            (Some(y), None, None) => Ok(HeightAnchor::Absolute(y)),
            (None, Some(y), None) => Ok(HeightAnchor::AboveBottom(y)),
            (None, None, Some(y)) => Ok(HeightAnchor::BelowTop(y)),
            (None, None, None) => Err(AnchorWireError::NoKey),
            _ => Err(AnchorWireError::Ambiguous),
        }
    }
}

impl From<HeightAnchor> for AnchorRepr {
    fn from(anchor: HeightAnchor) -> Self {
        let mut repr = AnchorRepr { absolute: None, above_bottom: None, below_top: None };
        match anchor {
            HeightAnchor::Absolute(y) => repr.absolute = Some(y),
            HeightAnchor::AboveBottom(y) => repr.above_bottom = Some(y),
            HeightAnchor::BelowTop(y) => repr.below_top = Some(y),
        }
        repr
    }
}

/// What an object in a configuration tree looks like to the rewriter.
///
/// Decided before anything is mutated so a malformed anchor leaves its
/// object exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnchorShape {
    NotAnchor,
    Anchor(HeightAnchor),
    Malformed { key: &'static str },
}

impl AnchorShape {
    pub fn classify(map: &Map<String, Value>) -> AnchorShape {
        let Some(key) = ANCHOR_KEYS.iter().copied().find(|k| map.contains_key(*k)) else {
            return AnchorShape::NotAnchor;
        };
        let Some(y) = map.get(key).and_then(anchor_value) else {
            return AnchorShape::Malformed { key };
        };
        let anchor = match key {
            ABSOLUTE => HeightAnchor::Absolute(y),
            ABOVE_BOTTOM => HeightAnchor::AboveBottom(y),
            _ => HeightAnchor::BelowTop(y),
        };
        AnchorShape::Anchor(anchor)
    }
}

/// Integers fitting `i32`, or finite floats truncated toward zero.
fn anchor_value(value: &Value) -> Option<i32> {
    let Value::Number(n) = value else {
        return None;
    };
    if n.is_f64() {
        let f = n.as_f64()?.trunc();
        if !f.is_finite() || f < f64::from(i32::MIN) || f > f64::from(i32::MAX) {
            return None;
        }
        return Some(f as i32);
    }
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).ok();
    }
    n.as_u64().and_then(|u| i32::try_from(u).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn absolute_wins_over_other_keys() {
        let m = obj(json!({"below_top": 4, "absolute": 12, "above_bottom": 9}));
        assert_eq!(AnchorShape::classify(&m), AnchorShape::Anchor(HeightAnchor::Absolute(12)));
    }

    #[test]
    fn only_the_winning_key_is_validated() {
        let m = obj(json!({"above_bottom": 9, "below_top": "high"}));
        assert_eq!(AnchorShape::classify(&m), AnchorShape::Anchor(HeightAnchor::AboveBottom(9)));
        let m = obj(json!({"absolute": "high", "below_top": 9}));
        assert_eq!(AnchorShape::classify(&m), AnchorShape::Malformed { key: ABSOLUTE });
    }

    #[test]
    fn values_outside_i32_are_malformed() {
        let m = obj(json!({"absolute": 3_000_000_000i64}));
        assert_eq!(AnchorShape::classify(&m), AnchorShape::Malformed { key: ABSOLUTE });
        let m = obj(json!({"absolute": 1e12}));
        assert_eq!(AnchorShape::classify(&m), AnchorShape::Malformed { key: ABSOLUTE });
        let m = obj(json!({"absolute": null}));
        assert_eq!(AnchorShape::classify(&m), AnchorShape::Malformed { key: ABSOLUTE });
    }

    #[test]
    fn floats_truncate_toward_zero() {
        let m = obj(json!({"below_top": -7.9}));
        assert_eq!(AnchorShape::classify(&m), AnchorShape::Anchor(HeightAnchor::BelowTop(-7)));
    }

    #[test]
    fn wire_format_requires_exactly_one_key() {
        let a: HeightAnchor = serde_json::from_value(json!({"above_bottom": 8})).unwrap();
        assert_eq!(a, HeightAnchor::AboveBottom(8));
        assert!(serde_json::from_value::<HeightAnchor>(json!({})).is_err());
        assert!(serde_json::from_value::<HeightAnchor>(json!({"absolute": 1, "below_top": 2})).is_err());
        assert!(serde_json::from_value::<HeightAnchor>(json!({"absolute": 1, "extra": 2})).is_err());
        assert_eq!(serde_json::to_value(HeightAnchor::BelowTop(3)).unwrap(), json!({"below_top": 3}));
    }
}
