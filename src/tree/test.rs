//! Scenario and property tests for [`Index`] (spec §8).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::test_support::{TaggedSequence, VecSequence};

fn sorted_values(seq: &VecSequence, idx: &Index) -> Vec<i64> {
    idx.iter().map(|p| seq.0[p]).collect()
}

fn walk_and_check_invariants(idx: &Index) {
    fn visit(idx: &Index, cur: Option<usize>, parent: Option<usize>) -> i32 {
        let cur = match cur {
            Some(c) => c,
            None => return 0,
        };
        let node = idx.arena.hard_get(cur);
        assert_eq!(node.parent, parent, "parent pointer mismatch at {cur}");
        let lh = visit(idx, node.left, Some(cur));
        let rh = visit(idx, node.right, Some(cur));
        assert!((lh - rh).abs() <= 1, "AVL balance violated at {cur}");
        let h = core::cmp::max(lh, rh) + 1;
        assert_eq!(node.height as i32, h, "cached height stale at {cur}");
        h
    }
    visit(idx, idx.root, None);

    if idx.is_empty() {
        assert!(idx.root.is_none() && idx.min.is_none() && idx.max.is_none());
        return;
    }

    // Dense arena: every index 0..len() is reachable exactly once in-order.
    let visited: Vec<usize> = idx.iter().collect();
    let mut sorted = visited.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..idx.len()).collect::<Vec<_>>());

    assert_eq!(idx.min(), *visited.first().unwrap());
    assert_eq!(idx.max(), *visited.last().unwrap());
}

// --- S1: insert into an empty index ------------------------------------

#[test]
fn s1_insert_into_empty_index() {
    let mut seq = VecSequence::from(vec![]);
    let mut idx = Index::new();

    seq.0.push(42);
    idx.insert(&mut seq);

    assert_eq!(idx.len(), 1);
    assert_eq!(idx.min(), 0);
    assert_eq!(idx.max(), 0);
    assert_eq!(sorted_values(&seq, &idx), vec![42]);
}

// --- S2: stable insertion of duplicates ---------------------------------

#[test]
fn s2_duplicate_inserts_preserve_relative_order() {
    let mut seq = TaggedSequence::from(vec![]);
    let mut idx = Index::new();

    for (k, tag) in [(5, 0), (3, 1), (5, 2), (3, 3), (5, 4)] {
        seq.0.push((k, tag));
        idx.insert(&mut seq);
    }

    let order: Vec<(i64, usize)> = idx.iter().map(|p| seq.0[p]).collect();
    assert_eq!(order, vec![(3, 1), (3, 3), (5, 0), (5, 2), (5, 4)]);
}

// --- S3: delete the minimum / maximum ------------------------------------

#[test]
fn s3_delete_min_then_max() {
    let mut seq = VecSequence::from(vec![]);
    let mut idx = Index::new();
    for v in [3, 1, 4, 1, 5, 9, 2, 6] {
        seq.0.push(v);
        idx.insert(&mut seq);
    }
    walk_and_check_invariants(&idx);

    let min_pos = idx.min();
    idx.delete(&mut seq, min_pos);
    walk_and_check_invariants(&idx);
    assert_eq!(idx.len(), 7);

    let max_pos = idx.max();
    let result = idx.delete(&mut seq, max_pos);
    assert_eq!(result, idx.len());
    walk_and_check_invariants(&idx);
    assert_eq!(idx.len(), 6);
}

// --- S4: delete a two-child node reports the in-order successor ---------

#[test]
fn s4_delete_two_child_node_reports_successor() {
    let mut seq = VecSequence::from(vec![]);
    let mut idx = Index::new();
    for v in [50, 30, 70, 20, 40, 60, 80] {
        seq.0.push(v);
        idx.insert(&mut seq);
    }
    walk_and_check_invariants(&idx);

    let root_value_pos = idx.search(|p| seq.0[p] >= 50);
    assert_eq!(seq.0[root_value_pos], 50);

    let successor_pos = idx.delete(&mut seq, root_value_pos);
    walk_and_check_invariants(&idx);
    assert_eq!(seq.0[successor_pos], 60);
    assert_eq!(idx.len(), 6);
    assert_eq!(sorted_values(&seq, &idx), vec![20, 30, 40, 60, 70, 80]);
}

// --- S5: init_sorted builds the documented balanced shape ---------------

#[test]
fn s5_init_sorted_height_matches_ceil_log2() {
    let mut idx = Index::new();
    idx.init_sorted(13);
    walk_and_check_invariants(&idx);
    assert_eq!(idx.arena.hard_get(idx.root.unwrap()).height, 4);
    assert_eq!(idx.len(), 13);
    assert_eq!(idx.min(), 0);
    assert_eq!(idx.max(), 12);
}

// --- S6: stable_sort is a stable, in-place sort --------------------------

#[test]
fn s6_stable_sort_is_stable() {
    let mut seq = TaggedSequence::from(vec![
        (3, 0),
        (1, 1),
        (3, 2),
        (2, 3),
        (1, 4),
        (3, 5),
        (2, 6),
    ]);
    stable_sort(&mut seq);
    assert_eq!(
        seq.0,
        vec![(1, 1), (1, 4), (2, 3), (2, 6), (3, 0), (3, 2), (3, 5)]
    );
}

#[test]
fn stable_sort_on_empty_and_singleton_sequences() {
    let mut empty = VecSequence::from(vec![]);
    stable_sort(&mut empty);
    assert!(empty.0.is_empty());

    let mut one = VecSequence::from(vec![7]);
    stable_sort(&mut one);
    assert_eq!(one.0, vec![7]);
}

#[test]
fn search_and_search_last_on_empty_index() {
    let idx = Index::new();
    assert_eq!(idx.search(|_| true), 0);
    assert_eq!(idx.search_last(|_| true), -1);
}

#[test]
fn next_and_prev_bracket_the_index() {
    let mut seq = VecSequence::from(vec![]);
    let mut idx = Index::new();
    for v in [10, 20, 30] {
        seq.0.push(v);
        idx.insert(&mut seq);
    }
    assert_eq!(idx.next(-1), idx.min());
    assert_eq!(idx.next(idx.max() as isize), idx.len());
    assert_eq!(idx.prev(idx.len() as isize), idx.max() as isize);
    assert_eq!(idx.prev(idx.min() as isize), -1);
}

#[test]
fn insert_before_matches_comparator_insert_for_sorted_input() {
    let mut seq = VecSequence::from(vec![]);
    let mut idx = Index::new();
    for v in [1, 2, 3, 4, 5] {
        seq.0.push(v);
        idx.insert_before(idx.len());
    }
    walk_and_check_invariants(&idx);
    assert_eq!(sorted_values(&seq, &idx), vec![1, 2, 3, 4, 5]);
}

#[test]
fn drain_sorts_the_sequence_in_place() {
    let mut seq = VecSequence::from(vec![5, 2, 8, 1, 9, 3]);
    let mut idx = Index::new();
    idx.init(&mut seq);
    idx.drain(&mut seq);
    assert_eq!(seq.0, vec![1, 2, 3, 5, 8, 9]);
    assert!(idx.is_empty());
}

#[test]
fn deleting_the_last_node_clears_min_and_max() {
    let mut seq = VecSequence::from(vec![]);
    let mut idx = Index::new();
    seq.0.push(7);
    idx.insert(&mut seq);

    idx.delete(&mut seq, 0);

    assert!(idx.is_empty());
    assert!(idx.root.is_none());
    assert!(idx.min.is_none());
    assert!(idx.max.is_none());
}

#[test]
fn drain_empties_a_singleton_without_panicking() {
    let mut seq = VecSequence::from(vec![1]);
    let mut idx = Index::new();
    idx.init(&mut seq);
    idx.drain(&mut seq);
    assert_eq!(seq.0, vec![1]);
    assert!(idx.is_empty());
    assert!(idx.max.is_none());
}

#[cfg(feature = "fallible")]
#[test]
fn try_init_sorted_reports_capacity_exceeded() {
    let mut idx = Index::new();
    assert!(idx.try_init_sorted(5).is_ok());
    assert_eq!(idx.len(), 5);
}

#[cfg(feature = "fallible")]
#[test]
fn try_insert_reports_capacity_exceeded() {
    // MAX_NODES is too large to build directly in a test; exercise the
    // `Result` plumbing against a synthetic near-boundary instead by
    // checking the Ok path and the Display message shape.
    let mut seq = VecSequence::from(vec![1]);
    let mut idx = Index::new();
    assert!(idx.try_insert(&mut seq).is_ok());
    assert_eq!(
        format!("{}", crate::IndexError::CapacityExceeded),
        format!("index capacity exceeded (max {} nodes)", crate::MAX_NODES)
    );
}

// --- Property / fuzz-style tests (spec §8 invariants 1-6) ---------------
//
// Mirrors the reference crate's `logical_fuzz` approach: a seeded PRNG
// drives a stream of random insert/delete operations against a `Vec`
// oracle, checking the tree's reported order and structural invariants
// after every step.

fn fuzz_round(seed: u64, ops: usize) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut seq = VecSequence::from(vec![]);
    let mut idx = Index::new();

    for _ in 0..ops {
        let do_insert = idx.is_empty() || rng.gen_bool(0.6);
        if do_insert {
            seq.0.push(rng.gen_range(0, 1_000));
            idx.insert(&mut seq);
        } else {
            let pos = rng.gen_range(0, idx.len());
            idx.delete(&mut seq, pos);
        }
        walk_and_check_invariants(&idx);

        let expected = {
            let mut v = seq.0.clone();
            v.sort_unstable();
            v
        };
        let actual = sorted_values(&seq, &idx);
        assert_eq!(actual, expected, "seed {seed} diverged after an op");
    }
}

#[test]
fn fuzz_small_sequences() {
    for seed in 0..12 {
        fuzz_round(seed, 60);
    }
}

#[test]
fn fuzz_larger_sequences() {
    for seed in 100..104 {
        fuzz_round(seed, 300);
    }
}
