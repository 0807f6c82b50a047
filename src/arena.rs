//! A dense arena: node records live at exactly the same index as the
//! `Sequence` position they're bound to (spec §3, invariant 7). Unlike a
//! general-purpose arena allocator there is no free list and no `Option`
//! hole left behind by removal — `remove` always compacts the tail into the
//! vacated slot so indices stay a dense prefix `0..len`.

use smallvec::SmallVec;

use super::node::Node;

/// Small inline capacity before the arena spills to the heap. Chosen to
/// cover trivially small sequences without a `SmallVec` reallocation.
const INLINE_CAP: usize = 8;

type ArenaVec = SmallVec<[Node; INLINE_CAP]>;

/// Dense node storage backing an [`crate::Index`].
pub(crate) struct NodeArena {
    arena: ArenaVec,
}

impl NodeArena {
    pub(crate) fn new() -> Self {
        NodeArena {
            arena: ArenaVec::new(),
        }
    }

    pub(crate) fn with_capacity(cap: usize) -> Self {
        NodeArena {
            arena: ArenaVec::with_capacity(cap),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Append a node at the tail, returning its (new) arena index.
    pub(crate) fn push(&mut self, node: Node) -> usize {
        self.arena.push(node);
        self.arena.len() - 1
    }

    /// Get a reference to a node at a known-good index.
    /// This function can panic. If the index might be invalid, use `get` instead.
    pub(crate) fn hard_get(&self, idx: usize) -> &Node {
        match self.arena.get(idx) {
            Some(node) => node,
            None => panic!("index corrupted: arena access past last index ({idx})"),
        }
    }

    /// Get a mutable reference to a node at a known-good index.
    /// This function can panic. If the index might be invalid, use `get_mut` instead.
    pub(crate) fn hard_get_mut(&mut self, idx: usize) -> &mut Node {
        let len = self.arena.len();
        match self.arena.get_mut(idx) {
            Some(node) => node,
            None => panic!("index corrupted: arena access past last index ({idx} >= {len})"),
        }
    }

    /// Remove the node at `idx`, compacting the arena tail into the vacated
    /// slot (spec §4.5 Phase B). Returns the arena index whose record moved
    /// — the caller must re-point that node's parent/children and rewrite
    /// any cached index (`root`/`min`/`max`/reported successor) that
    /// referred to it. Returns `None` if `idx` was already the tail (no
    /// record moved, the arena simply shrank by one).
    pub(crate) fn compact_remove(&mut self, idx: usize) -> Option<usize> {
        debug_assert!(idx < self.arena.len(), "compact_remove: index out of range");
        let last = self.arena.len() - 1;
        if idx != last {
            let moved = self.arena[last];
            self.arena[idx] = moved;
            self.arena.truncate(last);
            Some(last)
        } else {
            self.arena.truncate(last);
            None
        }
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}
