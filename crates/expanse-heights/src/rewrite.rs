use serde_json::{Map, Value};

use crate::ConfigNode;
use crate::anchor::{ABSOLUTE, ANCHOR_KEYS, AnchorShape};
use crate::range::ScaleRange;

/// Rewrites every anchor object below `node` into a scaled `absolute` anchor.
///
/// Returns whether anything changed. Every object and array element is
/// visited, including the children of objects that were themselves rewritten.
/// Malformed anchors are left exactly as they were.
pub fn rewrite(node: &mut ConfigNode, range: &ScaleRange) -> bool {
    match node {
        Value::Object(map) => {
            let mut changed = rewrite_anchor(map, range);
            for (_, child) in map.iter_mut() {
                changed |= rewrite(child, range);
            }
            changed
        }
        Value::Array(items) => items
            .iter_mut()
            .fold(false, |changed, item| rewrite(item, range) | changed),
        _ => false,
    }
}

fn rewrite_anchor(map: &mut Map<String, Value>, range: &ScaleRange) -> bool {
    match AnchorShape::classify(map) {
        AnchorShape::Anchor(anchor) => {
            let y = range.scale(anchor.normalize(range));
            map.retain(|k, _| !ANCHOR_KEYS.contains(&k.as_str()));
            map.insert(ABSOLUTE.to_string(), Value::from(y));
            true
        }
        AnchorShape::Malformed { key } => {
            log::debug!("leaving malformed {key} anchor untouched");
            false
        }
        AnchorShape::NotAnchor => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::ScaleProfile;
    use serde_json::json;

    #[test]
    fn rewritten_anchor_keeps_sibling_order() {
        let range = ScaleProfile::Expanse.range();
        let mut node = json!({"kind": "x", "above_bottom": 256, "tail": 1});
        assert!(rewrite(&mut node, &range));
        let keys: Vec<_> = node.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["kind", "tail", "absolute"]);
        assert_eq!(node["absolute"], json!(1272));
    }

    #[test]
    fn nested_anchor_inside_anchor_is_rewritten() {
        let range = ScaleProfile::Expanse.range();
        let mut node = json!({"absolute": 0, "inner": {"below_top": 64}});
        assert!(rewrite(&mut node, &range));
        assert_eq!(node, json!({"inner": {"absolute": 1696}, "absolute": 0}));
    }
}
