#![cfg(feature = "arguments")]
//! Integration tests for argument keys and packs.

use actkit::arguments::{
    ArgumentError, ArgumentKey, ArgumentPack, KeyValue, as_arguments, unpackly,
};
use rstest::rstest;

fn sample() -> ArgumentPack<i32> {
    ArgumentPack::new(
        vec![10, 20, 30],
        [("scale".to_string(), 2), ("offset".to_string(), 1)],
    )
}

// =============================================================================
// Lookup
// =============================================================================

#[rstest]
fn test_lookup_by_key() {
    let pack = sample();
    assert_eq!(pack.get(&ArgumentKey::position(1)), Ok(20));
    assert_eq!(pack.get(&ArgumentKey::keyword("scale")), Ok(2));
    assert_eq!(pack.keyword("offset"), Ok(&1));
    assert_eq!(pack.positional_at(2), Ok(&30));
}

#[rstest]
fn test_missing_key_uses_default() {
    let pack = sample();
    let key = ArgumentKey::keyword("limit").with_default(100);

    assert_eq!(pack.get(&key), Ok(100));
    assert!(!pack.contains(&key));
}

#[rstest]
fn test_missing_key_without_default() {
    let pack = sample();
    assert_eq!(
        pack.get(&ArgumentKey::position(7)),
        Err(ArgumentError::MissingKey {
            key: "7".to_string()
        })
    );
    assert_eq!(
        pack.keyword("limit"),
        Err(ArgumentError::MissingKey {
            key: "limit".to_string()
        })
    );
}

#[rstest]
#[case(KeyValue::Position(0), true)]
#[case(KeyValue::Name("x".to_string()), false)]
fn test_key_kind_must_match(#[case] value: KeyValue, #[case] is_keyword: bool) {
    assert!(matches!(
        ArgumentKey::<i32>::new(value, is_keyword),
        Err(ArgumentError::KeyKindMismatch { .. })
    ));
}

// =============================================================================
// Keys
// =============================================================================

#[rstest]
fn test_keys_list_positions_then_names() {
    let pack = sample();
    let keys = pack.keys();

    assert_eq!(
        keys.values(),
        vec![
            KeyValue::Position(0),
            KeyValue::Position(1),
            KeyValue::Position(2),
            KeyValue::from("offset"),
            KeyValue::from("scale"),
        ]
    );
    assert!(keys.contains(&ArgumentKey::keyword("scale")));
}

// =============================================================================
// Transformations
// =============================================================================

#[rstest]
fn test_merge_appends_and_overrides() {
    let pack = sample();
    let other = ArgumentPack::new(vec![40], [("scale".to_string(), 3)]);
    let merged = &pack | &other;

    assert_eq!(merged.args(), &[10, 20, 30, 40]);
    assert_eq!(merged["scale"], 3);
    assert_eq!(merged["offset"], 1);
}

#[rstest]
fn test_expand_with() {
    let pack = sample();
    let expanded = pack.expand_with([50], [("limit".to_string(), 9)]);

    assert_eq!(expanded.len(), 7);
    assert_eq!(expanded[3], 50);
    assert_eq!(expanded["limit"], 9);
}

#[rstest]
fn test_only_with_projects() {
    let pack = sample();
    let keys = [
        ArgumentKey::position(2),
        ArgumentKey::position(0),
        ArgumentKey::keyword("scale"),
    ];
    let projected = pack.only_with(&keys).unwrap();

    assert_eq!(projected.args(), &[30, 10]);
    assert_eq!(projected.kwargs().len(), 1);
}

#[rstest]
fn test_only_with_reports_missing() {
    let pack = sample();
    let keys = [ArgumentKey::keyword("limit")];

    assert!(pack.only_with(&keys).is_err());
}

#[rstest]
fn test_without_removes() {
    let pack = sample();
    let keys = [ArgumentKey::position(0), ArgumentKey::keyword("offset")];
    let reduced = pack.without(&keys);

    assert_eq!(reduced.args(), &[20, 30]);
    assert_eq!(format!("{reduced}"), "20, 30, scale=2");
}

#[rstest]
#[case(&[20], "10, 30, offset=1, scale=2")]
#[case(&[2, 10], "20, 30, offset=1")]
#[case(&[99], "10, 20, 30, offset=1, scale=2")]
fn test_without_values_removes_matching_arguments(#[case] values: &[i32], #[case] expected: &str) {
    let pack = sample();

    assert_eq!(format!("{}", pack.without_values(values)), expected);
}

// =============================================================================
// Calling
// =============================================================================

#[rstest]
fn test_call_spreads_arguments() {
    let pack = sample();
    let total = pack.call(|args, kwargs| args.iter().sum::<i32>() * kwargs["scale"] + kwargs["offset"]);

    assert_eq!(total, 121);
}

#[rstest]
fn test_unpackly_adapts_function() {
    let pack = sample();
    let count = unpackly(|args: &[i32], kwargs| args.len() + kwargs.len());

    assert_eq!(count(&pack), 5);
}

#[rstest]
fn test_as_arguments_accepts_vectors() {
    let pack = as_arguments(vec!["a", "b"]);

    assert_eq!(pack, ArgumentPack::positional(["a", "b"]));
    assert_eq!(as_arguments(pack.clone()), pack);
}

#[rstest]
fn test_display() {
    let pack = sample();
    assert_eq!(format!("{pack}"), "10, 20, 30, offset=1, scale=2");
    assert_eq!(format!("{}", ArgumentPack::<i32>::empty()), "");
}
