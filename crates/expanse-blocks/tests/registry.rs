use expanse_blocks::{Block, BlockConfigError, BlockRegistry};
use proptest::prelude::*;

#[test]
fn builtin_reserves_zero_for_air() {
    let reg = BlockRegistry::builtin();
    assert_eq!(reg.id_by_name("air"), Some(0));
    assert!(reg.is_air(Block::AIR));
    let stone = reg.require("stone").unwrap();
    assert!(!reg.is_air(stone));
    assert!(reg.is_carvable(stone));
}

#[test]
fn builtin_flags_fluids_and_bedrock() {
    let reg = BlockRegistry::builtin();
    let water = reg.require("water").unwrap();
    let lava = reg.require("lava").unwrap();
    let bedrock = reg.require("bedrock").unwrap();
    assert!(reg.is_fluid(water));
    assert!(reg.is_fluid(lava));
    assert!(reg.is_carvable(water));
    assert!(reg.is_carvable(lava));
    assert!(!reg.is_carvable(bedrock));
    assert!(!reg.is_fluid(bedrock));
}

#[test]
fn toml_table_assigns_ids_in_order() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "stone"

        [[blocks]]
        name = "brine"
        fluid = true

        [[blocks]]
        name = "obsidian"
        id = 9
        carvable = false
    "#,
    )
    .unwrap();
    assert_eq!(reg.id_by_name("stone"), Some(1));
    assert_eq!(reg.id_by_name("brine"), Some(2));
    assert_eq!(reg.id_by_name("obsidian"), Some(9));
    assert!(reg.is_fluid(Block::new(2)));
    assert!(!reg.is_carvable(Block::new(9)));
    // gaps between explicit ids stay unknown
    assert!(reg.get(5).is_none());
    assert!(!reg.is_carvable(Block::new(5)));
    assert_eq!(reg.name_of(Block::new(5)), "unknown");
}

#[test]
fn duplicate_names_are_rejected() {
    let err = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "stone"
        [[blocks]]
        name = "stone"
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, BlockConfigError::DuplicateName(ref n) if n == "stone"));
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "stone"
        id = 3
        [[blocks]]
        name = "dirt"
        id = 3
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, BlockConfigError::DuplicateId { id: 3, .. }));
}

#[test]
fn air_cannot_move() {
    let err = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "air"
        id = 4
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, BlockConfigError::AirSlot(_)));

    let err = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "stone"
        id = 0
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, BlockConfigError::AirSlot(ref n) if n == "stone"));
}

#[test]
fn require_reports_missing_block() {
    let reg = BlockRegistry::builtin();
    let err = reg.require("netherrack").unwrap_err();
    assert!(matches!(err, BlockConfigError::Missing(ref n) if n == "netherrack"));
}

proptest! {
    // Every named block resolves back to a type carrying the same name and id
    #[test]
    fn names_round_trip_through_ids(count in 1usize..40) {
        let mut src = String::new();
        for i in 0..count {
            src.push_str(&format!("[[blocks]]\nname = \"b{}\"\n", i));
        }
        let reg = BlockRegistry::from_toml_str(&src).unwrap();
        for i in 0..count {
            let name = format!("b{}", i);
            let id = reg.id_by_name(&name).unwrap();
            prop_assert!(id > 0);
            let ty = reg.get(id).unwrap();
            prop_assert_eq!(&ty.name, &name);
            prop_assert_eq!(ty.id, id);
        }
    }
}
