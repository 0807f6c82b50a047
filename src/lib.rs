/*!
An external, order-preserving AVL index over a caller-owned sequence.

Most tree crates own their elements. This one doesn't: an [`Index`] holds
only arena scalars (`parent`/`left`/`right`/`height`), one record per
[`Sequence`] position, and calls back into the caller's comparator and swap
to do anything involving the actual elements. That split is what makes a
single `Index` usable both as a conventional ordered index and as the
engine behind an in-place, stable [`stable_sort`].

### About

* Embedded-friendly: `#![no_std]` by default (`std` feature opts back in).
* Safe: `#![forbid(unsafe_code)]`, including all dependencies.
* External: no element is ever stored, cloned, or compared outside of a
  caller-supplied [`Sequence`] borrowed for the duration of one call.
* Dense: arena indices are always a dense prefix `0..len()`, kept that way
  across removal by compacting the arena tail into the vacated slot.
* Stable: equal elements (per `Sequence::less`) keep their relative order
  across repeated `insert` calls.

### Usage

```rust
use ext_avl_index::{stable_sort, Sequence};

struct Ints(Vec<i32>);

impl Sequence for Ints {
    fn len(&self) -> usize {
        self.0.len()
    }
    fn less(&self, i: usize, j: usize) -> bool {
        self.0[i] < self.0[j]
    }
    fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }
}

let mut v = Ints(vec![5, 3, 1, 4, 2]);
stable_sort(&mut v);
assert_eq!(v.0, vec![1, 2, 3, 4, 5]);
```

Or drive an [`Index`] directly to keep a live ordered view over a sequence
that's mutated incrementally:

```rust
use ext_avl_index::{Index, Sequence};

struct Ints(Vec<i32>);

impl Sequence for Ints {
    fn len(&self) -> usize { self.0.len() }
    fn less(&self, i: usize, j: usize) -> bool { self.0[i] < self.0[j] }
    fn swap(&mut self, i: usize, j: usize) { self.0.swap(i, j); }
}

let mut seq = Ints(vec![10, 20, 30]);
let mut idx = Index::new();
idx.init(&mut seq);

seq.0.push(15);
idx.insert(&mut seq);

assert_eq!(idx.iter().map(|p| seq.0[p]).collect::<Vec<_>>(), vec![10, 15, 20, 30]);
```

### Trusted Dependencies

This library has three dependencies, each of which have no dependencies of
their own (e.g. exactly three total dependencies).

* [`smallvec`](https://crates.io/crates/smallvec) - `#![no_std]`,
  `#![forbid(unsafe_code)]`-compatible alternative to `Vec` with inline
  small-size storage.
* [`micromath`](https://crates.io/crates/micromath) - `#![no_std]`,
  `#![forbid(unsafe_code)]` floating point approximations.
* [`smallnum`](https://crates.io/crates/smallnum) - `#![no_std]`,
  `#![forbid(unsafe_code)]` integer abstraction.

Because this library and all dependencies are `#![forbid(unsafe_code)]`, no
3rd-party `unsafe` code is introduced into your project.

### Fallibility

For embedded use cases prioritizing robustness, enable the `fallible`
feature: every growth operation (`insert`, `insert_before`, `init`,
`init_sorted`) gains a `try_*` counterpart that returns
[`Result<_, IndexError>`] instead of panicking when the index's
[`MAX_NODES`] capacity would be exceeded.

### Algorithmic Complexity

Space complexity is always `O(n)`, with no element ever copied or cloned
outside of the caller's own `Sequence::swap`. Time complexity:

| Operation | Average Case | Worst Case |
| --- | --- | --- |
| `search` / `search_last` | `O(log n)` | `O(log n)` |
| `next` / `prev` | Amortized `O(1)` | `O(log n)` |
| `insert` / `insert_before` | `O(log n)` | `O(log n)` |
| `delete` / `delete_and_prev` | `O(log n)` | `O(log n)` |
| `init` (comparator bulk build) | `O(n log n)` | `O(n log n)` |
| `init_sorted` (pre-sorted bulk build) | `O(n)` | `O(n)` |

### License and Contributing

Licensed under the [MIT license](LICENSE).
*/

#![forbid(unsafe_code)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod arena;
mod error;
mod iter;
mod node;
mod sequence;
mod tree;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::error::IndexError;
pub use crate::iter::Iter;
pub use crate::sequence::Sequence;
pub use crate::tree::{stable_sort, Index};

/// Largest number of positions an [`Index`] can hold: `2^30 - 1`.
///
/// Bounds the AVL `height` field (a `u8`) comfortably below its range even
/// at maximum capacity, and keeps arena-index arithmetic well clear of
/// `usize` overflow on 32-bit targets.
pub const MAX_NODES: usize = (1 << 30) - 1;
