#![cfg(feature = "flag")]
//! Property-based tests for the algebra of flags.
//!
//! - **Identity**: `x | nothing == x`
//! - **Membership**: `(x | y) == x` and `(x | y) == y`
//! - **Cancellation**: `x - x == nothing`, `(x | y) - y == x` for `x != y`
//! - **Repetition**: `(x * n).len() == n` for `n >= 0`

use actkit::flag::{Flag, flag, flag_sum, flag_to};
use proptest::prelude::*;

fn value_flag(value: i32) -> Flag<i32> {
    Flag::value(value).unwrap()
}

// =============================================================================
// Union
// =============================================================================

proptest! {
    /// `nothing` is the identity of `|` on both sides
    #[test]
    fn prop_nothing_is_identity(value in any::<i32>()) {
        let x = value_flag(value);

        prop_assert!((x.clone() | Flag::nothing()) == x);
        prop_assert!((Flag::nothing() | x.clone()) == x);
        prop_assert_eq!((x | Flag::nothing()).len(), 1);
    }

    /// A union equals each of its components
    #[test]
    fn prop_union_equals_components(first in any::<i32>(), second in any::<i32>()) {
        let union = value_flag(first) | value_flag(second);

        prop_assert!(union == value_flag(first));
        prop_assert!(union == value_flag(second));
        prop_assert_eq!(union.len(), 2);
    }

    /// A union equals nothing outside its components
    #[test]
    fn prop_union_rejects_strangers(first in 0..100_i32, second in 0..100_i32, stranger in 100..200_i32) {
        let union = value_flag(first) | value_flag(second);

        prop_assert!(union != value_flag(stranger));
    }

    /// Atoms of a sum come back in order
    #[test]
    fn prop_sum_atoms_keep_order(values in prop::collection::vec(any::<i32>(), 0..8)) {
        let sum = flag_to(values.clone()).unwrap();
        let atoms: Vec<i32> = sum
            .atoms()
            .filter_map(|atom| match atom.point() {
                actkit::flag::FlagPoint::Value(value) => Some(*value),
                actkit::flag::FlagPoint::Flag(_) => None,
            })
            .collect();

        prop_assert_eq!(atoms, values);
    }
}

// =============================================================================
// Subtraction
// =============================================================================

proptest! {
    /// Subtracting a flag from itself leaves nothing
    #[test]
    fn prop_self_subtraction(value in any::<i32>()) {
        let x = value_flag(value);

        prop_assert!((&x - &x).is_nothing());
    }

    /// Subtracting a component undoes the union
    #[test]
    fn prop_union_then_subtract(first in 0..100_i32, second in 100..200_i32) {
        let x = value_flag(first);
        let y = value_flag(second);

        let reduced = (x.clone() | y.clone()) - y;

        prop_assert!(reduced == x);
        prop_assert_eq!(reduced.len(), 1);
    }

    /// Subtracting an absent flag changes nothing
    #[test]
    fn prop_subtract_absent(values in prop::collection::vec(0..100_i32, 1..6), absent in 100..200_i32) {
        let sum = flag_to(values.clone()).unwrap();

        prop_assert_eq!((&sum - &value_flag(absent)).len(), values.len());
    }
}

// =============================================================================
// Repetition
// =============================================================================

proptest! {
    /// Repetition multiplies the component count
    #[test]
    fn prop_times_len(name in "[a-z]{1,8}", times in 0_i64..6) {
        let repeated = flag(&name) * times;

        prop_assert_eq!(repeated.len(), usize::try_from(times).unwrap());
    }

    /// Non-positive repetition yields nothing
    #[test]
    fn prop_non_positive_times(name in "[a-z]{1,8}", times in -5_i64..=0) {
        prop_assert!((flag(&name) * times).is_nothing());
    }

    /// A sum of nominal flags has one component per flag
    #[test]
    fn prop_sum_len(names in prop::collection::vec("[a-z]{1,8}", 0..6)) {
        let sum = flag_sum(names.iter().map(|name| flag(name)));

        prop_assert_eq!(sum.len(), names.len());
    }
}
