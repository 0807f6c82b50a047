//! The external, order-preserving AVL index (spec §2-§4, §6).
//!
//! [`Index`] owns nothing but arena scalars and node records; it never
//! stores or clones an element. Every operation that needs to compare or
//! move elements borrows a caller-supplied [`Sequence`] for the duration of
//! that single call (spec §5).

use alloc::vec::Vec;
use core::cmp::max;

#[allow(unused_imports)]
use micromath::F32Ext;
use smallnum::SmallUnsigned;

use crate::arena::NodeArena;
use crate::error::IndexError;
use crate::iter::Iter;
use crate::node::{Direction, Node};
use crate::sequence::Sequence;
use crate::MAX_NODES;

/// A self-balancing AVL index over `0..len()` positions of a caller-owned
/// [`Sequence`]. See the crate docs for the full contract.
pub struct Index {
    pub(crate) arena: NodeArena,
    pub(crate) root: Option<usize>,
    pub(crate) min: Option<usize>,
    pub(crate) max: Option<usize>,
}

impl Index {
    /// An empty index.
    pub fn new() -> Self {
        Index {
            arena: NodeArena::new(),
            root: None,
            min: None,
            max: None,
        }
    }

    /// An empty index with arena storage reserved for `cap` nodes up front
    /// (spec §5: "capacity hints... honored when possible to avoid
    /// reallocation").
    pub fn with_capacity(cap: usize) -> Self {
        Index {
            arena: NodeArena::with_capacity(cap),
            root: None,
            min: None,
            max: None,
        }
    }

    /// Number of indexed positions.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// `true` if no positions are indexed.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// In-order first position.
    ///
    /// # Panics
    /// Panics if the index is empty.
    pub fn min(&self) -> usize {
        self.min
            .unwrap_or_else(|| panic!("min: called on an empty index"))
    }

    /// In-order last position.
    ///
    /// # Panics
    /// Panics if the index is empty.
    pub fn max(&self) -> usize {
        self.max
            .unwrap_or_else(|| panic!("max: called on an empty index"))
    }

    /// Reset to empty, keeping (not shrinking) arena capacity.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.min = None;
        self.max = None;
    }

    /// In-order iterator over indexed positions.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    // Predicate search --------------------------------------------------

    /// First in-order position where `pred` holds, or `len()` if none does
    /// (spec §4.2). `pred` must be monotone (false, then true) for a
    /// meaningful result.
    pub fn search<F>(&self, pred: F) -> usize
    where
        F: Fn(usize) -> bool,
    {
        let root = match self.root {
            Some(r) => r,
            None => return self.len(),
        };
        let mut now = root;
        let mut last_true = self.len();
        loop {
            if pred(now) {
                last_true = now;
                match self.arena.hard_get(now).left {
                    Some(l) => now = l,
                    None => return now,
                }
            } else {
                match self.arena.hard_get(now).right {
                    Some(r) => now = r,
                    None => return last_true,
                }
            }
        }
    }

    /// Last in-order position where `pred` holds, or `-1` if none does
    /// (spec §4.2).
    pub fn search_last<F>(&self, pred: F) -> isize
    where
        F: Fn(usize) -> bool,
    {
        let root = match self.root {
            Some(r) => r,
            None => return -1,
        };
        let mut now = root;
        let mut last_true: isize = -1;
        loop {
            if pred(now) {
                last_true = now as isize;
                match self.arena.hard_get(now).right {
                    Some(r) => now = r,
                    None => return now as isize,
                }
            } else {
                match self.arena.hard_get(now).left {
                    Some(l) => now = l,
                    None => return last_true,
                }
            }
        }
    }

    // In-order navigation -------------------------------------------------

    /// In-order successor of `i`. `i == -1` returns the minimum; `i ==
    /// len()` or `i == max()` returns `len()` (spec §4.3).
    pub fn next(&self, i: isize) -> usize {
        let n = self.len() as isize;
        assert!(i >= -1 && i <= n, "next: index {i} out of range [-1, {n}]");
        if n == 0 {
            return 0;
        }
        if i == n || Some(i as usize) == self.max {
            return n as usize;
        }
        if i == -1 {
            return self.min.expect("next: non-empty index has no min");
        }
        let mut idx = i as usize;
        if let Some(r) = self.arena.hard_get(idx).right {
            let mut cur = r;
            while let Some(l) = self.arena.hard_get(cur).left {
                cur = l;
            }
            return cur;
        }
        loop {
            match self.arena.hard_get(idx).parent {
                Some(p) => {
                    if self.dir_of(idx, p) == Direction::Left {
                        return p;
                    }
                    idx = p;
                }
                None => unreachable!("index corrupted: next() exhausted parents without a turn"),
            }
        }
    }

    /// In-order predecessor of `i`. `i == len()` returns the maximum; `i ==
    /// -1` or `i == min()` returns `-1` (spec §4.3, symmetric to `next`).
    pub fn prev(&self, i: isize) -> isize {
        let n = self.len() as isize;
        assert!(i >= -1 && i <= n, "prev: index {i} out of range [-1, {n}]");
        if n == 0 {
            return -1;
        }
        if i == -1 || Some(i as usize) == self.min {
            return -1;
        }
        if i == n {
            return self.max.expect("prev: non-empty index has no max") as isize;
        }
        let mut idx = i as usize;
        if let Some(l) = self.arena.hard_get(idx).left {
            let mut cur = l;
            while let Some(r) = self.arena.hard_get(cur).right {
                cur = r;
            }
            return cur as isize;
        }
        loop {
            match self.arena.hard_get(idx).parent {
                Some(p) => {
                    if self.dir_of(idx, p) == Direction::Right {
                        return p as isize;
                    }
                    idx = p;
                }
                None => unreachable!("index corrupted: prev() exhausted parents without a turn"),
            }
        }
    }

    // Insertion -----------------------------------------------------------

    /// Insert the element the caller just appended to `seq` (now at
    /// `seq.len() - 1`) into the index, choosing its position by
    /// comparator (spec §4.4). Equal keys are placed to the right of any
    /// equal predecessor, so repeated `insert` calls implement a stable
    /// sort.
    ///
    /// # Panics
    /// Panics if the index already holds [`MAX_NODES`] positions.
    pub fn insert<S: Sequence>(&mut self, seq: &mut S) {
        self.insert_impl(seq)
            .unwrap_or_else(|e| panic!("insert: {e}"))
    }

    /// Fallible form of [`Index::insert`], available with the `fallible`
    /// feature.
    #[cfg(feature = "fallible")]
    pub fn try_insert<S: Sequence>(&mut self, seq: &mut S) -> Result<(), IndexError> {
        self.insert_impl(seq)
    }

    fn insert_impl<S: Sequence>(&mut self, seq: &mut S) -> Result<(), IndexError> {
        let n_old = self.len();
        if n_old >= MAX_NODES {
            return Err(IndexError::CapacityExceeded);
        }
        let ix = self.arena.push(Node::new());
        debug_assert_eq!(ix, n_old, "insert: arena index must equal prior size");

        if ix == 0 {
            self.root = Some(0);
            self.min = Some(0);
            self.max = Some(0);
            return Ok(());
        }

        let mut cur = self.root.expect("insert: non-empty index must have a root");
        let dir = loop {
            let d = if seq.less(ix, cur) {
                Direction::Left
            } else {
                Direction::Right
            };
            match self.arena.hard_get(cur).link(d) {
                Some(next) => cur = next,
                None => break d,
            }
        };

        self.arena.hard_get_mut(cur).set_link(dir, Some(ix));
        self.arena.hard_get_mut(ix).parent = Some(cur);
        match dir {
            Direction::Right if self.max == Some(cur) => self.max = Some(ix),
            Direction::Left if self.min == Some(cur) => self.min = Some(ix),
            _ => {}
        }

        self.rebalance_from(Some(cur));
        self.debug_assert_height_bound();
        Ok(())
    }

    /// Insert the caller's new arena-tail element as the in-order
    /// predecessor of `position`, bypassing the comparator (spec §4.4).
    /// Unchecked fast path: the caller guarantees this preserves order.
    ///
    /// # Panics
    /// Panics if the index already holds [`MAX_NODES`] positions, or if
    /// `position` isn't `0` on an empty index.
    pub fn insert_before(&mut self, position: usize) {
        self.insert_before_impl(position)
            .unwrap_or_else(|e| panic!("insert_before: {e}"))
    }

    /// Fallible form of [`Index::insert_before`], available with the
    /// `fallible` feature.
    #[cfg(feature = "fallible")]
    pub fn try_insert_before(&mut self, position: usize) -> Result<(), IndexError> {
        self.insert_before_impl(position)
    }

    fn insert_before_impl(&mut self, position: usize) -> Result<(), IndexError> {
        let n_old = self.len();
        if n_old >= MAX_NODES {
            return Err(IndexError::CapacityExceeded);
        }
        let ix = self.arena.push(Node::new());

        if ix == 0 {
            assert_eq!(
                position, 0,
                "insert_before: empty index accepts only position 0"
            );
            self.root = Some(0);
            self.min = Some(0);
            self.max = Some(0);
            return Ok(());
        }

        let (parent, dir) = if position == n_old {
            (self.max.expect("insert_before: non-empty index has a max"), Direction::Right)
        } else {
            match self.arena.hard_get(position).left {
                None => (position, Direction::Left),
                Some(left) => {
                    let mut pred = left;
                    while let Some(r) = self.arena.hard_get(pred).right {
                        pred = r;
                    }
                    (pred, Direction::Right)
                }
            }
        };

        self.arena.hard_get_mut(parent).set_link(dir, Some(ix));
        self.arena.hard_get_mut(ix).parent = Some(parent);
        match dir {
            Direction::Right if self.max == Some(parent) => self.max = Some(ix),
            Direction::Left if self.min == Some(parent) => self.min = Some(ix),
            _ => {}
        }

        self.rebalance_from(Some(parent));
        self.debug_assert_height_bound();
        Ok(())
    }

    // Deletion --------------------------------------------------------------

    /// Remove the position at `ix` and return the in-order successor
    /// position (renumbered by compaction if necessary), or `len()` (the
    /// post-delete size) if `ix` was the maximum (spec §4.5, §8 property 5).
    ///
    /// # Panics
    /// Panics if the index is empty or `ix` is out of range.
    pub fn delete<S: Sequence>(&mut self, seq: &mut S, ix: usize) -> usize {
        assert!(!self.is_empty(), "delete: called on an empty index");
        assert!(ix < self.len(), "delete: index {ix} out of range");

        let successor = self.next(ix as isize);
        let has_successor = successor != self.len();

        let node = *self.arena.hard_get(ix);
        let (unlink_ix, report) = if node.left.is_some() && node.right.is_some() {
            // Two children: the structural successor has at most one
            // child (it can't have a left child, by definition). Swap the
            // Sequence content so the kept value ends up at `ix`, then
            // unlink the successor's (now-redundant) node record instead.
            debug_assert!(has_successor, "two-children node must have a successor");
            seq.swap(ix, successor);
            (successor, Some(ix))
        } else {
            (ix, if has_successor { Some(successor) } else { None })
        };

        let report = self.splice_and_compact(unlink_ix, report);
        report.unwrap_or_else(|| self.len())
    }

    /// Remove the position at `ix` and return the in-order predecessor
    /// position (renumbered by compaction if necessary), or `-1` if `ix`
    /// was the minimum (spec §4.5).
    ///
    /// # Panics
    /// Panics if the index is empty or `ix` is out of range.
    pub fn delete_and_prev<S: Sequence>(&mut self, seq: &mut S, ix: usize) -> isize {
        assert!(!self.is_empty(), "delete_and_prev: called on an empty index");
        assert!(ix < self.len(), "delete_and_prev: index {ix} out of range");

        let predecessor = self.prev(ix as isize);
        let has_predecessor = predecessor != -1;

        let node = *self.arena.hard_get(ix);
        let (unlink_ix, report) = if node.left.is_some() && node.right.is_some() {
            debug_assert!(
                has_predecessor,
                "two-children node must have a predecessor"
            );
            let predecessor = predecessor as usize;
            seq.swap(ix, predecessor);
            (predecessor, Some(ix))
        } else {
            (
                ix,
                if has_predecessor {
                    Some(predecessor as usize)
                } else {
                    None
                },
            )
        };

        let report = self.splice_and_compact(unlink_ix, report);
        report.map(|p| p as isize).unwrap_or(-1)
    }

    /// Phase A (structural unlink) + Phase B (arena compaction) + Phase C
    /// (rebalance), shared by `delete` and `delete_and_prev` (spec §4.5).
    /// `unlink_ix` names the arena slot to remove (at most one child);
    /// `report` is the caller-visible result index, rewritten if
    /// compaction moves it.
    fn splice_and_compact(&mut self, unlink_ix: usize, mut report: Option<usize>) -> Option<usize> {
        let node = *self.arena.hard_get(unlink_ix);
        debug_assert!(
            node.left.is_none() || node.right.is_none(),
            "splice target must have at most one child"
        );
        let single_child = node.left.or(node.right);

        let mut rebalance_from = match node.parent {
            None => {
                self.root = single_child;
                if let Some(c) = single_child {
                    self.arena.hard_get_mut(c).parent = None;
                }
                // AVL invariant: a root with only one child has a
                // child-less surviving subtree (see DESIGN.md), so the
                // surviving child (if any) is trivially the new min/max on
                // its side.
                match (node.left, node.right) {
                    (None, None) => {
                        // Last remaining node: the index becomes empty.
                        self.min = None;
                        self.max = None;
                    }
                    (None, Some(_)) => {
                        if self.min == Some(unlink_ix) {
                            self.min = single_child.or(self.root);
                        }
                    }
                    (Some(_), None) => {
                        if self.max == Some(unlink_ix) {
                            self.max = single_child.or(self.root);
                        }
                    }
                    (Some(_), Some(_)) => unreachable!(),
                }
                self.root
            }
            Some(parent) => {
                let pdir = self.dir_of(unlink_ix, parent);
                self.arena.hard_get_mut(parent).set_link(pdir, single_child);
                if node.left.is_none() {
                    // Removed node had at most a right child.
                    match single_child {
                        Some(r) => {
                            self.arena.hard_get_mut(r).parent = Some(parent);
                            if self.min == Some(unlink_ix) {
                                self.min = Some(r);
                            }
                        }
                        None => {
                            if self.max == Some(unlink_ix) {
                                self.max = Some(parent);
                            }
                            if self.min == Some(unlink_ix) {
                                self.min = Some(parent);
                            }
                        }
                    }
                } else {
                    // Removed node had only a left child.
                    match single_child {
                        Some(l) => {
                            self.arena.hard_get_mut(l).parent = Some(parent);
                            if self.max == Some(unlink_ix) {
                                self.max = Some(l);
                            }
                        }
                        None => {
                            if self.max == Some(unlink_ix) {
                                self.max = Some(parent);
                            }
                        }
                    }
                }
                Some(parent)
            }
        };

        // Phase B: compact the arena tail into the vacated slot.
        if let Some(moved_from) = self.arena.compact_remove(unlink_ix) {
            self.fixlinks(moved_from, unlink_ix);
            if self.root == Some(moved_from) {
                self.root = Some(unlink_ix);
            }
            if self.min == Some(moved_from) {
                self.min = Some(unlink_ix);
            }
            if self.max == Some(moved_from) {
                self.max = Some(unlink_ix);
            }
            if report == Some(moved_from) {
                report = Some(unlink_ix);
            }
            if rebalance_from == Some(moved_from) {
                rebalance_from = Some(unlink_ix);
            }
        }

        self.rebalance_from(rebalance_from);
        self.debug_assert_height_bound();
        report
    }

    /// Repoint a relocated node's parent/children after compaction moved
    /// the record formerly at `from` into `to` (spec §4.5 Phase B).
    fn fixlinks(&mut self, from: usize, to: usize) {
        let node = *self.arena.hard_get(to);
        match node.parent {
            Some(parent) => {
                let dir = if self.arena.hard_get(parent).right == Some(from) {
                    Direction::Right
                } else if self.arena.hard_get(parent).left == Some(from) {
                    Direction::Left
                } else {
                    unreachable!("index corrupted: relocated node's parent disagrees");
                };
                self.arena.hard_get_mut(parent).set_link(dir, Some(to));
            }
            None => {
                debug_assert_eq!(self.root, Some(from), "index corrupted: relocated root mismatch");
            }
        }
        if let Some(l) = node.left {
            debug_assert_eq!(self.arena.hard_get(l).parent, Some(from));
            self.arena.hard_get_mut(l).parent = Some(to);
        }
        if let Some(r) = node.right {
            debug_assert_eq!(self.arena.hard_get(r).parent, Some(from));
            self.arena.hard_get_mut(r).parent = Some(to);
        }
    }

    // Drain / bulk build ------------------------------------------------

    /// Repeatedly delete the maximum until the index is empty, leaving
    /// `seq` sorted in ascending order (spec §4.7).
    pub fn drain<S: Sequence>(&mut self, seq: &mut S) {
        while let Some(m) = self.max {
            self.delete(seq, m);
        }
    }

    /// Reset and bulk-build from an unordered `Sequence` via `len()`
    /// sequential comparator inserts (spec §4.8).
    pub fn init<S: Sequence>(&mut self, seq: &mut S) {
        self.clear();
        let n = seq.len();
        self.arena = NodeArena::with_capacity(n);
        for _ in 0..n {
            self.insert(seq);
        }
    }

    /// Fallible form of [`Index::init`], available with the `fallible`
    /// feature.
    #[cfg(feature = "fallible")]
    pub fn try_init<S: Sequence>(&mut self, seq: &mut S) -> Result<(), IndexError> {
        self.clear();
        let n = seq.len();
        self.arena = NodeArena::with_capacity(n);
        for _ in 0..n {
            self.insert_impl(seq)?;
        }
        Ok(())
    }

    /// Reset and build a perfectly balanced tree over `0..n`, asserting
    /// (without checking) that the caller's Sequence is already sorted
    /// (spec §4.9). O(n), no comparator calls.
    ///
    /// # Panics
    /// Panics if `n` exceeds [`MAX_NODES`].
    pub fn init_sorted(&mut self, n: usize) {
        self.init_sorted_impl(n)
            .unwrap_or_else(|e| panic!("init_sorted: {e}"))
    }

    /// Fallible form of [`Index::init_sorted`], available with the
    /// `fallible` feature.
    #[cfg(feature = "fallible")]
    pub fn try_init_sorted(&mut self, n: usize) -> Result<(), IndexError> {
        self.init_sorted_impl(n)
    }

    fn init_sorted_impl(&mut self, n: usize) -> Result<(), IndexError> {
        self.clear();
        if n == 0 {
            return Ok(());
        }
        if n > MAX_NODES {
            return Err(IndexError::CapacityExceeded);
        }

        self.arena = NodeArena::with_capacity(n);
        for _ in 0..n {
            self.arena.push(Node::new());
        }
        self.min = Some(0);
        self.max = Some(n - 1);

        // Iterative (recursion-free) in-place build: a worklist of ranges
        // `[low, high]`, each contributing one node whose arena index
        // equals its sorted position (spec §4.9's `m = a + (b-a)/2` split).
        struct Frame {
            low: usize,
            high: usize,
            mid: usize,
            parent: Option<usize>,
            dir: Option<Direction>,
        }

        let root_mid = n / 2;
        let mut stack = Vec::new();
        stack.push(Frame {
            low: 0,
            high: n - 1,
            mid: root_mid,
            parent: None,
            dir: None,
        });
        self.root = Some(root_mid);

        while let Some(f) = stack.pop() {
            if let (Some(p), Some(d)) = (f.parent, f.dir) {
                self.arena.hard_get_mut(p).set_link(d, Some(f.mid));
            }
            self.arena.hard_get_mut(f.mid).parent = f.parent;

            let size = f.high - f.low + 1;
            self.arena.hard_get_mut(f.mid).height = bit_length(size);

            if f.low < f.mid {
                let child_high = f.mid - 1;
                let child_mid = f.low + (child_high - f.low) / 2;
                stack.push(Frame {
                    low: f.low,
                    high: child_high,
                    mid: child_mid,
                    parent: Some(f.mid),
                    dir: Some(Direction::Left),
                });
            }
            if f.mid < f.high {
                let child_low = f.mid + 1;
                let child_mid = child_low + (f.high - child_low) / 2;
                stack.push(Frame {
                    low: child_low,
                    high: f.high,
                    mid: child_mid,
                    parent: Some(f.mid),
                    dir: Some(Direction::Right),
                });
            }
        }

        self.debug_assert_height_bound();
        Ok(())
    }

    // Internal helpers --------------------------------------------------

    /// Which side of `parent` holds `child` (spec §4.1's `dir`).
    fn dir_of(&self, child: usize, parent: usize) -> Direction {
        let p = self.arena.hard_get(parent);
        if p.left == Some(child) {
            Direction::Left
        } else if p.right == Some(child) {
            Direction::Right
        } else {
            unreachable!("index corrupted: {child} is not a child of {parent}")
        }
    }

    /// Height of the subtree rooted at `idx` (0 for an empty subtree).
    /// `Node::height` is a narrow `u8`; `SmallUnsigned::usize` is the
    /// reference crate's idiom for widening it without a bare `as` cast.
    fn height_of(&self, idx: Option<usize>) -> i32 {
        idx.map(|i| self.arena.hard_get(i).height.usize() as i32)
            .unwrap_or(0)
    }

    fn fix_height(&mut self, ix: usize) {
        let (l, r) = {
            let node = self.arena.hard_get(ix);
            (self.height_of(node.left), self.height_of(node.right))
        };
        self.arena.hard_get_mut(ix).height = (max(l, r) + 1) as u8;
    }

    /// Climb from `cur` to the root, fixing heights and rotating away any
    /// AVL imbalance (spec §4.6).
    fn rebalance_from(&mut self, mut cur: Option<usize>) {
        while let Some(c) = cur {
            let (lh, rh, parent) = {
                let node = self.arena.hard_get(c);
                (self.height_of(node.left), self.height_of(node.right), node.parent)
            };

            if (lh - rh).abs() <= 1 {
                self.arena.hard_get_mut(c).height = (max(lh, rh) + 1) as u8;
                cur = parent;
                continue;
            }

            let dir = if rh > lh + 1 {
                Direction::Right
            } else {
                Direction::Left
            };
            let child = self
                .arena
                .hard_get(c)
                .link(dir)
                .expect("rebalance: invariant violation, imbalanced node missing heavy child");

            let inner = self.height_of(self.arena.hard_get(child).link(dir.opposite()));
            let outer = self.height_of(self.arena.hard_get(child).link(dir));
            if outer < inner {
                self.rotate(child, dir.opposite());
            }
            self.rotate(c, dir);
            cur = self.arena.hard_get(c).parent;
        }
    }

    /// Rotate `ix` in direction `dir` (spec §4.6).
    fn rotate(&mut self, ix: usize, dir: Direction) {
        let p = self.arena.hard_get(ix).parent;
        let ch = self
            .arena
            .hard_get(ix)
            .link(dir)
            .expect("rotate: wrong rotation direction, child is empty");

        let ch_opp = self.arena.hard_get(ch).link(dir.opposite());
        self.arena.hard_get_mut(ix).set_link(dir, ch_opp);
        if let Some(c) = ch_opp {
            self.arena.hard_get_mut(c).parent = Some(ix);
        }

        self.arena.hard_get_mut(ch).set_link(dir.opposite(), Some(ix));
        self.arena.hard_get_mut(ix).parent = Some(ch);
        self.arena.hard_get_mut(ch).parent = p;

        self.fix_height(ix);
        self.fix_height(ch);

        match p {
            Some(pp) => {
                let pdir = if self.arena.hard_get(pp).right == Some(ix) {
                    Direction::Right
                } else {
                    Direction::Left
                };
                self.arena.hard_get_mut(pp).set_link(pdir, Some(ch));
                self.fix_height(pp);
            }
            None => self.root = Some(ch),
        }
    }

    /// Debug-only sanity check: the maintained root height never exceeds
    /// the AVL worst-case bound of `~1.44 * log2(n + 2)` (DESIGN NOTES).
    /// Uses `micromath`'s floating point `log2` approximation, with a
    /// deliberate `+ 1` of slack to absorb the approximation error — this
    /// is a coarse sanity net, not an exact formula.
    fn debug_assert_height_bound(&self) {
        #[cfg(debug_assertions)]
        {
            if let Some(root) = self.root {
                let n = self.len();
                let bound = avl_height_bound(n);
                let actual = self.arena.hard_get(root).height;
                debug_assert!(
                    actual as usize <= bound,
                    "index corrupted: height {actual} exceeds AVL bound {bound} for {n} nodes"
                );
            }
        }
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort `seq` in place, stably, by building a full AVL index from the
/// comparator and draining it (spec §6 free function).
pub fn stable_sort<S: Sequence>(seq: &mut S) {
    let mut index = Index::with_capacity(seq.len());
    index.init(seq);
    index.drain(seq);
}

fn bit_length(n: usize) -> u8 {
    debug_assert!(n > 0);
    (usize::BITS - n.leading_zeros()) as u8
}

/// `1.4405 * log2(n + 2) - 0.328`, floored — the standard asymptotic AVL
/// worst-case height bound, with a `+1` slack term against the
/// floating-point approximation.
fn avl_height_bound(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let bound = 1.4405_f32 * ((n + 2) as f32).log2() - 0.328;
    bound.floor() as usize + 1
}

#[cfg(test)]
mod test;
