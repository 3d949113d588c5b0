//! Codecs between stored placement definitions and configuration trees.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ConfigNode;
use crate::anchor::HeightAnchor;
use crate::error::CodecError;
use crate::rescale::PlacementCodec;

pub const HEIGHT_RANGE: &str = "minecraft:height_range";

/// Identity codec for registries that already store raw trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeCodec;

impl PlacementCodec<ConfigNode> for TreeCodec {
    fn encode(&self, definition: &ConfigNode) -> Result<ConfigNode, CodecError> {
        Ok(definition.clone())
    }

    fn decode(&self, node: ConfigNode) -> Result<ConfigNode, CodecError> {
        Ok(node)
    }
}

/// A placed feature: the feature it places and its placement modifier chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedFeature {
    pub feature: ConfigNode,
    #[serde(default)]
    pub placement: Vec<ConfigNode>,
}

impl PlacedFeature {
    /// Height providers of every `height_range` modifier, in chain order.
    pub fn height_ranges(&self) -> Result<Vec<HeightProvider>, CodecError> {
        let mut out = Vec::new();
        for (index, modifier) in self.placement.iter().enumerate() {
            if modifier.get("type").and_then(Value::as_str) != Some(HEIGHT_RANGE) {
                continue;
            }
            let parsed: HeightRangeModifier = serde_json::from_value(modifier.clone())
                .map_err(|e| CodecError::InvalidModifier { index, reason: e.to_string() })?;
            parsed
                .height
                .validate()
                .map_err(|reason| CodecError::InvalidModifier { index, reason })?;
            out.push(parsed.height);
        }
        Ok(out)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightRangeModifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub height: HeightProvider,
}

/// Height provider of a `height_range` modifier; a bare anchor is a constant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeightProvider {
    Constant(HeightAnchor),
    Typed(TypedHeight),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TypedHeight {
    #[serde(rename = "minecraft:constant")]
    Constant { value: HeightAnchor },
    #[serde(rename = "minecraft:uniform")]
    Uniform { min_inclusive: HeightAnchor, max_inclusive: HeightAnchor },
    #[serde(rename = "minecraft:biased_to_bottom")]
    BiasedToBottom {
        min_inclusive: HeightAnchor,
        max_inclusive: HeightAnchor,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inner: Option<u32>,
    },
    #[serde(rename = "minecraft:very_biased_to_bottom")]
    VeryBiasedToBottom {
        min_inclusive: HeightAnchor,
        max_inclusive: HeightAnchor,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inner: Option<u32>,
    },
    #[serde(rename = "minecraft:trapezoid")]
    Trapezoid {
        min_inclusive: HeightAnchor,
        max_inclusive: HeightAnchor,
        #[serde(default)]
        plateau: i32,
    },
}

impl HeightProvider {
    fn validate(&self) -> Result<(), String> {
        let (min, max) = match self {
            HeightProvider::Constant(_) => return Ok(()),
            HeightProvider::Typed(TypedHeight::Constant { .. }) => return Ok(()),
            HeightProvider::Typed(TypedHeight::Uniform { min_inclusive, max_inclusive })
            | HeightProvider::Typed(TypedHeight::BiasedToBottom { min_inclusive, max_inclusive, .. })
            | HeightProvider::Typed(TypedHeight::VeryBiasedToBottom { min_inclusive, max_inclusive, .. })
            | HeightProvider::Typed(TypedHeight::Trapezoid { min_inclusive, max_inclusive, .. }) => {
                (min_inclusive, max_inclusive)
            }
        };
        if let HeightProvider::Typed(TypedHeight::BiasedToBottom { inner: Some(0), .. })
        | HeightProvider::Typed(TypedHeight::VeryBiasedToBottom { inner: Some(0), .. }) = self
        {
            return Err("inner must be at least 1".to_string());
        }
        // Only frames that agree can be compared without knowing the world height.
        match (min, max) {
            (HeightAnchor::Absolute(a), HeightAnchor::Absolute(b)) if a > b => {
                Err(format!("empty height range: min {a} above max {b}"))
            }
            _ => Ok(()),
        }
    }
}

/// Typed codec that refuses to hand back a definition whose
/// `height_range` modifiers no longer parse.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlacedFeatureCodec;

impl PlacementCodec<PlacedFeature> for PlacedFeatureCodec {
    fn encode(&self, definition: &PlacedFeature) -> Result<ConfigNode, CodecError> {
        Ok(serde_json::to_value(definition)?)
    }

    fn decode(&self, node: ConfigNode) -> Result<PlacedFeature, CodecError> {
        let feature: PlacedFeature = serde_json::from_value(node)?;
        feature.height_ranges()?;
        Ok(feature)
    }
}
