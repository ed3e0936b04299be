//! Integration tests for Set.
//!
//! Mirrors the union / intersection / difference / subset scenarios on
//! consecutive integer sets, and checks that no operand is mutated.

use guarded_collections::Set;
use rstest::rstest;

/// Builds `{start, ..., start + count - 1}`.
fn populate(count: i32, start: i32) -> Set<i32> {
    let set = Set::new();
    for value in start..start + count {
        set.add(value);
    }
    set
}

fn set_of(values: &[i32]) -> Set<i32> {
    values.iter().copied().collect()
}

#[rstest]
fn test_union() {
    let first = populate(3, 0);
    let second = populate(2, 3);

    let union = first.union(&second);

    assert_eq!(union.size(), 5);
    assert_eq!(union, set_of(&[0, 1, 2, 3, 4]));
    assert_eq!(first.size(), 3);
    assert_eq!(second.size(), 2);
}

#[rstest]
fn test_union_with_overlap_has_no_duplicates() {
    let union = populate(3, 0).union(&populate(3, 1));
    assert_eq!(union.size(), 4);
}

#[rstest]
fn test_intersection() {
    let first = populate(3, 0);
    let second = populate(2, 0);

    let intersection = first.intersection(&second);

    assert_eq!(intersection.size(), 2);
    assert_eq!(intersection, set_of(&[0, 1]));
    assert_eq!(first.size(), 3);
    assert_eq!(second.size(), 2);
}

#[rstest]
fn test_difference() {
    let first = populate(3, 0);
    let second = populate(2, 0);

    let difference = first.difference(&second);

    assert_eq!(difference.size(), 1);
    assert_eq!(difference, set_of(&[2]));
    assert!(second.difference(&first).is_empty());
    assert_eq!(first.size(), 3);
    assert_eq!(second.size(), 2);
}

#[rstest]
fn test_subset() {
    let first = populate(3, 0);
    let second = populate(2, 0);

    assert!(!first.subset(&second));
    assert_eq!(first.size(), 3);
    assert_eq!(second.size(), 2);

    assert!(populate(2, 0).subset(&second));
    assert!(populate(1, 0).subset(&second));
    assert!(Set::new().subset(&second));
    assert!(Set::<i32>::new().subset(&Set::new()));
}

#[rstest]
fn test_results_are_independent_of_operands() {
    let first = populate(2, 0);
    let second = populate(2, 1);
    let union = first.union(&second);

    first.clear();
    second.add(100);

    assert_eq!(union, set_of(&[0, 1, 2]));
}

#[rstest]
fn test_items_snapshot_contains_every_element() {
    let set = populate(4, 10);
    let mut items = set.items();
    items.sort_unstable();
    assert_eq!(items, vec![10, 11, 12, 13]);
}

#[rstest]
fn test_add_chaining_and_idempotence() {
    let set = Set::new();
    set.add("x").add("y").add("x");
    assert_eq!(set.size(), 2);
    assert!(set.has(&"x"));
    assert!(set.delete(&"x"));
    assert!(!set.has(&"x"));
}
