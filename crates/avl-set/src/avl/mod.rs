//! AVL set and its cursor/iterator types.

pub mod cursor;
pub mod set;
pub mod util;

pub use cursor::{Cursor, IntoIter, Iter};
pub use set::AvlSet;
