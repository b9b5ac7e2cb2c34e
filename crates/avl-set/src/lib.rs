//! Ordered set backed by an AVL tree with subtree-size bookkeeping.
//!
//! Nodes live in an index-addressed [`Arena`]; every "pointer" (left, right
//! and the non-owning parent back-reference) is an `Option<u32>` slot index.
//! Parent links make cursor movement O(1) amortised without a stack, and the
//! cached subtree size gives O(log n) rank/select.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] link trait, [`AvlNodeLike`], [`AvlNode`] record |
//! [`arena`] | [`Arena`] slot storage with a free list |
//! [`util`] | `first`, `last`, `next`, `prev` over parent links |
//! [`avl::util`] | Rotations, `rebalance`, insert/erase engine, queries, validation |
//! [`avl`] | [`AvlSet`], [`Cursor`], [`Iter`], [`IntoIter`] |
//! [`error`] | [`AvlSetError`] |
//!
//! # Example
//!
//! ```
//! use avl_set::AvlSet;
//!
//! let mut set: AvlSet<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
//!
//! let c = set.lower_bound(&6);
//! assert_eq!(set.get(c), Some(&7));
//! assert_eq!(set.rank(&7), 4);
//! assert_eq!(set.select(0), Some(&1));
//!
//! assert!(set.remove(&5));
//! assert!(!set.contains(&5));
//! ```

pub mod arena;
pub mod avl;
pub mod error;
pub mod types;
pub mod util;

pub use arena::Arena;
pub use avl::{AvlSet, Cursor, IntoIter, Iter};
pub use error::AvlSetError;
pub use types::{AvlNode, AvlNodeLike, Node};
pub use util::{first, last, next, prev};
