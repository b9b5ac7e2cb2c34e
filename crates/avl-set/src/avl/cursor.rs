use std::iter::FusedIterator;

use crate::arena::Arena;
use crate::types::AvlNode;
use crate::util::{next, prev};

/// Position inside an [`AvlSet`](super::AvlSet).
///
/// The past-the-end position is its own variant, so it can never be confused
/// with a stored element. Any mutation of the set invalidates outstanding
/// cursors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// At the node in this arena slot.
    At(u32),
    /// One past the maximum.
    End,
}

impl Cursor {
    pub(crate) fn from_index(idx: Option<u32>) -> Self {
        match idx {
            Some(i) => Cursor::At(i),
            None => Cursor::End,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Cursor::End)
    }

    /// Arena slot of the node, or `None` at the end.
    pub fn index(&self) -> Option<u32> {
        match *self {
            Cursor::At(i) => Some(i),
            Cursor::End => None,
        }
    }
}

/// Borrowing in-order iterator; walks parent links from both ends.
pub struct Iter<'a, T> {
    pub(crate) arena: &'a Arena<AvlNode<T>>,
    pub(crate) front: Option<u32>,
    pub(crate) back: Option<u32>,
    pub(crate) remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let curr = self.front?;
        self.remaining -= 1;
        let arena = self.arena;
        self.front = next(arena, curr);
        Some(&arena[curr].v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let curr = self.back?;
        self.remaining -= 1;
        let arena = self.arena;
        self.back = prev(arena, curr);
        Some(&arena[curr].v)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Owning in-order iterator.
///
/// The slot order is computed up front, so nodes can be taken out of the
/// arena without relinking anything.
pub struct IntoIter<T> {
    pub(crate) arena: Arena<AvlNode<T>>,
    pub(crate) order: std::vec::IntoIter<u32>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let idx = self.order.next()?;
        self.arena.free(idx).map(|n| n.v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        let idx = self.order.next_back()?;
        self.arena.free(idx).map(|n| n.v)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
