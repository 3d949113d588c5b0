use expanse_heights::{HeightAnchor, ScaleProfile, ScaleRange, rewrite};
use expanse_heights::anchor::{ABOVE_BOTTOM, BELOW_TOP};
use expanse_heights::AnchorShape;
use proptest::prelude::*;
use serde_json::{Value, json};

#[test]
fn worked_examples_under_expanse_profile() {
    let range = ScaleProfile::Expanse.range();
    assert_eq!(HeightAnchor::AboveBottom(256).normalize(&range), 192);
    assert_eq!(range.scale(192), 1272);
    assert_eq!(HeightAnchor::BelowTop(64).normalize(&range), 256);
    assert_eq!(range.scale(256), 1696);
    assert_eq!(HeightAnchor::Absolute(17).normalize(&range), 17);
}

#[test]
fn scaling_is_about_the_origin() {
    let range = ScaleProfile::Expanse.range();
    assert_eq!(range.scale(0), 0);
    // 2544 / 384 = 6.625
    assert_eq!(range.scale(1), 7);
    assert_eq!(range.scale(-1), -7);
    assert_eq!(range.scale(3), 20);
    // 320 * 6.625 stays below the new top
    assert_eq!(range.scale(320), 2120);
}

#[test]
fn results_saturate_at_new_bounds() {
    let range = ScaleProfile::Expanse.range();
    assert_eq!(range.scale(-64), -256);
    assert_eq!(range.scale(i32::MIN), -256);
    assert_eq!(range.scale(400), 2288);
    assert_eq!(range.scale(i32::MAX), 2288);
}

#[test]
fn heights_profile_uses_shorter_top() {
    let range = ScaleProfile::ExpanseHeights.range();
    assert_eq!(range.scale(192), 1128);
    assert_eq!(range.scale(1000), 2000);
}

#[test]
fn rewrite_turns_relative_anchors_absolute() {
    let range = ScaleProfile::Expanse.range();
    let mut tree = json!({
        "type": "minecraft:height_range",
        "height": {
            "type": "minecraft:trapezoid",
            "min_inclusive": {"above_bottom": 256},
            "max_inclusive": {"below_top": 64}
        }
    });
    assert!(rewrite(&mut tree, &range));
    assert_eq!(tree["height"]["min_inclusive"], json!({"absolute": 1272}));
    assert_eq!(tree["height"]["max_inclusive"], json!({"absolute": 1696}));
    assert_eq!(tree["height"]["type"], json!("minecraft:trapezoid"));
}

#[test]
fn malformed_anchor_is_left_alone() {
    let range = ScaleProfile::Expanse.range();
    let original = json!({"min_inclusive": {"above_bottom": "deep", "below_top": 5}});
    let mut tree = original.clone();
    assert!(!rewrite(&mut tree, &range));
    assert_eq!(tree, original);
}

#[test]
fn arrays_are_walked_past_their_first_change() {
    let range = ScaleProfile::Expanse.range();
    let mut tree = json!([{"absolute": 1}, {"absolute": 2}, [{"below_top": 0}]]);
    assert!(rewrite(&mut tree, &range));
    assert_eq!(tree, json!([{"absolute": 7}, {"absolute": 13}, [{"absolute": 2120}]]));
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("absolute"),
        Just(ABOVE_BOTTOM),
        Just(BELOW_TOP),
        Just("height"),
        Just("min_inclusive"),
        Just("type"),
    ]
    .prop_map(String::from)
}

fn arb_node() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        (-600i32..600).prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::from),
        (-600.0f64..600.0).prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 0..5)
                .prop_map(|kv| Value::Object(kv.into_iter().collect())),
        ]
    })
}

fn shapes(node: &Value, out: &mut Vec<AnchorShape>) {
    match node {
        Value::Object(map) => {
            out.push(AnchorShape::classify(map));
            map.values().for_each(|v| shapes(v, out));
        }
        Value::Array(items) => items.iter().for_each(|v| shapes(v, out)),
        _ => {}
    }
}

fn has_relative_keys(node: &Value) -> bool {
    match node {
        Value::Object(map) => {
            let anchored = matches!(AnchorShape::classify(map), AnchorShape::Anchor(_));
            (anchored && (map.contains_key(ABOVE_BOTTOM) || map.contains_key(BELOW_TOP)))
                || map.values().any(has_relative_keys)
        }
        Value::Array(items) => items.iter().any(has_relative_keys),
        _ => false,
    }
}

proptest! {
    #[test]
    fn scale_is_monotone(a in any::<i32>(), b in any::<i32>()) {
        let range = ScaleProfile::Expanse.range();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(range.scale(lo) <= range.scale(hi));
    }

    #[test]
    fn scale_stays_within_new_bounds(
        y in any::<i32>(),
        old_min in -4096i32..0, old_span in 1i32..4096,
        new_min in -8192i32..0, new_span in 1i32..8192,
    ) {
        let range = ScaleRange::new(old_min, old_min + old_span, new_min, new_min + new_span).unwrap();
        let s = range.scale(y);
        prop_assert!(s >= range.new_min() && s <= range.new_max());
        prop_assert_eq!(range.scale(0), 0);
    }

    // Every well-formed anchor ends up absolute and inside the new range.
    #[test]
    fn rewrite_leaves_no_relative_anchor(tree in arb_node()) {
        let range = ScaleProfile::Expanse.range();
        let mut rewritten = tree.clone();
        rewrite(&mut rewritten, &range);
        prop_assert!(!has_relative_keys(&rewritten));
        let mut after = Vec::new();
        shapes(&rewritten, &mut after);
        for shape in after {
            if let AnchorShape::Anchor(anchor) = shape {
                match anchor {
                    HeightAnchor::Absolute(y) => prop_assert!((-256..=2288).contains(&y)),
                    other => prop_assert!(false, "relative anchor survived: {:?}", other),
                }
            }
        }
    }

    // Trees without well-formed anchors come back untouched and unflagged.
    #[test]
    fn rewrite_flags_exactly_anchor_bearing_trees(tree in arb_node()) {
        let range = ScaleProfile::Expanse.range();
        let mut before = Vec::new();
        shapes(&tree, &mut before);
        let anchored = before.iter().any(|s| matches!(s, AnchorShape::Anchor(_)));
        let mut rewritten = tree.clone();
        let changed = rewrite(&mut rewritten, &range);
        prop_assert_eq!(changed, anchored);
        if !changed {
            prop_assert_eq!(rewritten, tree);
        }
    }
}
