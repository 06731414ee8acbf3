//! Property-based tests for the sorted linked-list set.
//!
//! All of these run single-threaded: the list is only well-defined without
//! concurrent mutation, and these properties pin down exactly that sequential
//! contract. A `BTreeSet` serves as the reference model.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tracegen::IntSet;

/// Values strictly between the sentinels; the sentinels themselves are
/// reserved and never belong to the value domain.
fn value() -> impl Strategy<Value = i64> {
    (i64::MIN + 1)..i64::MAX
}

/// A mixed add/remove/contains workload over a small value range, so
/// duplicates and absent-value removals actually occur.
fn op_sequence() -> impl Strategy<Value = Vec<(u8, i64)>> {
    prop::collection::vec((0u8..3, 1i64..64), 0..400)
}

proptest! {
    /// `len()` equals successful adds minus successful removes, always.
    #[test]
    fn len_tracks_successful_mutations(ops in op_sequence()) {
        let set = IntSet::new();
        let mut expected: i64 = 0;
        for (op, v) in ops {
            match op {
                0 => {
                    if set.add(v) {
                        expected += 1;
                    }
                }
                1 => {
                    if set.remove(v) {
                        expected -= 1;
                    }
                }
                _ => {
                    let _ = set.contains(v);
                }
            }
        }
        prop_assert_eq!(set.len() as i64, expected);
    }

    /// A fresh value is visible right after `add` and gone right after
    /// `remove`, with no intervening mutation.
    #[test]
    fn add_remove_round_trip(v in value()) {
        let set = IntSet::new();
        prop_assert!(set.add(v));
        prop_assert!(set.contains(v));
        prop_assert!(set.remove(v));
        prop_assert!(!set.contains(v));
    }

    /// A second `add` of a live value fails and leaves the size unchanged.
    #[test]
    fn duplicate_add_is_rejected(v in value(), extra in prop::collection::btree_set(1i64..1000, 0..20)) {
        let set = IntSet::new();
        for &e in &extra {
            set.add(e);
        }
        let _ = set.add(v);
        let before = set.len();
        prop_assert!(!set.add(v));
        prop_assert_eq!(set.len(), before);
    }

    /// The list agrees with a `BTreeSet` model across arbitrary workloads.
    #[test]
    fn agrees_with_btreeset_model(ops in op_sequence()) {
        let set = IntSet::new();
        let mut model = BTreeSet::new();
        for (op, v) in ops {
            match op {
                0 => prop_assert_eq!(set.add(v), model.insert(v)),
                1 => prop_assert_eq!(set.remove(v), model.remove(&v)),
                _ => prop_assert_eq!(set.contains(v), model.contains(&v)),
            }
        }
        prop_assert_eq!(set.len(), model.len());
        for v in &model {
            prop_assert!(set.contains(*v));
        }
    }
}
