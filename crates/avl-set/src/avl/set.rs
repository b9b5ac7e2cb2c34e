use std::fmt::{self, Debug};

use log::debug;

use super::cursor::{Cursor, IntoIter, Iter};
use super::util::{self, Search};
use crate::arena::Arena;
use crate::error::AvlSetError;
use crate::types::AvlNode;
use crate::util::{first, last, next, prev};

/// Ordered set of unique values kept in an AVL tree.
///
/// Nodes live in an [`Arena`] and refer to each other by slot index. Every
/// node caches its height and subtree size, which makes [`rank`](Self::rank)
/// and [`select`](Self::select) logarithmic.
///
/// Positions are expressed as [`Cursor`]s; `Cursor::End` is the
/// past-the-end position.
pub struct AvlSet<T> {
    root: Option<u32>,
    arena: Arena<AvlNode<T>>,
}

impl<T> AvlSet<T> {
    pub fn new() -> Self {
        Self {
            root: None,
            arena: Arena::new(),
        }
    }

    pub fn len(&self) -> usize {
        util::size(&self.arena, self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Tree height; 0 for an empty set.
    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root) as usize
    }

    /// Value stored at the tree root.
    pub fn root(&self) -> Option<&T> {
        self.root.map(|i| &self.arena[i].v)
    }

    /// Releases every node. Clearing an empty set does nothing.
    pub fn clear(&mut self) {
        if self.root.is_none() {
            return;
        }
        debug!("clearing set of {} nodes", self.arena.len());
        self.root = None;
        self.arena.clear();
    }

    pub fn first(&self) -> Option<&T> {
        first(&self.arena, self.root).map(|i| &self.arena[i].v)
    }

    pub fn last(&self) -> Option<&T> {
        last(&self.arena, self.root).map(|i| &self.arena[i].v)
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let idx = first(&self.arena, self.root)?;
        self.erase_node(idx)
    }

    pub fn pop_last(&mut self) -> Option<T> {
        let idx = last(&self.arena, self.root)?;
        self.erase_node(idx)
    }

    /// Position of the minimum, or `End` when empty.
    pub fn begin(&self) -> Cursor {
        Cursor::from_index(first(&self.arena, self.root))
    }

    pub fn end(&self) -> Cursor {
        Cursor::End
    }

    /// Value under `cursor`; `None` at the end.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        let idx = cursor.index()?;
        self.arena.get(idx).map(|n| &n.v)
    }

    /// Successor position. Advancing `End`, or a cursor whose slot has been
    /// vacated, yields `End`.
    pub fn next_cursor(&self, cursor: Cursor) -> Cursor {
        match cursor {
            Cursor::At(i) if self.arena.get(i).is_some() => {
                Cursor::from_index(next(&self.arena, i))
            }
            _ => Cursor::End,
        }
    }

    /// Predecessor position. Retreating from `End` lands on the maximum.
    ///
    /// # Errors
    ///
    /// [`AvlSetError::OutOfRange`] when retreating from the first element,
    /// from `End` of an empty set, or from a cursor whose slot has been
    /// vacated.
    pub fn prev_cursor(&self, cursor: Cursor) -> Result<Cursor, AvlSetError> {
        let idx = match cursor {
            Cursor::At(i) if self.arena.get(i).is_none() => None,
            Cursor::At(i) => prev(&self.arena, i),
            Cursor::End => last(&self.arena, self.root),
        };
        idx.map(Cursor::At).ok_or(AvlSetError::OutOfRange)
    }

    /// Value of 0-based rank `k`.
    pub fn select(&self, k: usize) -> Option<&T> {
        util::select(&self.arena, self.root, k).map(|i| &self.arena[i].v)
    }

    /// Position of the value of 0-based rank `k`, or `End` when `k >= len()`.
    pub fn select_cursor(&self, k: usize) -> Cursor {
        Cursor::from_index(util::select(&self.arena, self.root, k))
    }

    /// Removes the value under `cursor` and returns it. `End` is a no-op.
    pub fn remove_at(&mut self, cursor: Cursor) -> Option<T> {
        let idx = cursor.index()?;
        self.arena.get(idx)?;
        self.erase_node(idx)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            front: first(&self.arena, self.root),
            back: last(&self.arena, self.root),
            remaining: self.len(),
        }
    }

    fn erase_node(&mut self, idx: u32) -> Option<T> {
        let (root, freed) = util::erase(&mut self.arena, idx);
        self.root = root;
        freed.map(|n| n.v)
    }
}

impl<T: Ord> AvlSet<T> {
    /// Adds `value`. Returns `false`, keeping the stored value and dropping
    /// the argument, when an equal value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        match util::search(&self.arena, self.root, &value) {
            Search::Found(_) => false,
            Search::Vacant { parent, left } => {
                let n = self.arena.alloc(AvlNode::new(value));
                self.root = util::attach(&mut self.arena, n, parent, left);
                true
            }
        }
    }

    /// Like [`insert`](Self::insert), but reports allocation failure. On
    /// error the set is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<bool, AvlSetError> {
        match util::search(&self.arena, self.root, &value) {
            Search::Found(_) => Ok(false),
            Search::Vacant { parent, left } => {
                let n = self.arena.try_alloc(AvlNode::new(value))?;
                self.root = util::attach(&mut self.arena, n, parent, left);
                Ok(true)
            }
        }
    }

    /// Removes `value`; returns whether it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the stored value equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let idx = util::find(&self.arena, self.root, value)?;
        self.erase_node(idx)
    }

    pub fn contains(&self, value: &T) -> bool {
        util::find(&self.arena, self.root, value).is_some()
    }

    /// Position of `value`, or `End` when absent.
    pub fn find(&self, value: &T) -> Cursor {
        Cursor::from_index(util::find(&self.arena, self.root, value))
    }

    /// Position of the smallest element `>= value`.
    pub fn lower_bound(&self, value: &T) -> Cursor {
        Cursor::from_index(util::lower_bound(&self.arena, self.root, value))
    }

    /// Position of the smallest element `> value`.
    pub fn upper_bound(&self, value: &T) -> Cursor {
        Cursor::from_index(util::upper_bound(&self.arena, self.root, value))
    }

    /// Upper bound of the value under `cursor`; `End` stays `End`.
    pub fn upper_bound_at(&self, cursor: Cursor) -> Cursor {
        match self.get(cursor) {
            Some(value) => self.upper_bound(value),
            None => Cursor::End,
        }
    }

    /// Number of elements strictly less than `value`.
    pub fn rank(&self, value: &T) -> usize {
        util::rank(&self.arena, self.root, value)
    }

    /// Checks every structural invariant of the tree.
    pub fn assert_valid(&self) -> Result<(), String> {
        util::assert_avl_tree(&self.arena, self.root)?;
        if self.len() != self.arena.len() {
            return Err(format!(
                "Arena holds {} nodes, tree reaches {}",
                self.arena.len(),
                self.len()
            ));
        }
        Ok(())
    }
}

impl<T: Clone> AvlSet<T> {
    /// Shape-preserving deep copy that reports allocation failure.
    ///
    /// All storage is reserved before the first node is copied, so a failure
    /// leaves nothing half-built.
    pub fn try_clone(&self) -> Result<Self, AvlSetError> {
        let arena = Arena::try_with_capacity(self.len())?;
        let mut stack = Vec::new();
        stack.try_reserve_exact(self.height() + 1)?;
        Ok(self.copy_into(arena, stack))
    }

    /// Replaces the contents with a copy of `other`.
    ///
    /// The copy is fully built before the current nodes are released; on
    /// error `self` is untouched.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), AvlSetError> {
        let fresh = other.try_clone()?;
        debug!("assigning set of {} nodes over {}", fresh.len(), self.len());
        *self = fresh;
        Ok(())
    }

    /// Pre-order copy with an explicit stack; `arena` and `stack` must
    /// already have room for every node and for `height + 1` entries.
    fn copy_into(
        &self,
        mut arena: Arena<AvlNode<T>>,
        mut stack: Vec<(u32, Option<u32>, bool)>,
    ) -> Self {
        let mut root = None;
        if let Some(src_root) = self.root {
            stack.push((src_root, None, false));
        }
        while let Some((src, parent, is_left)) = stack.pop() {
            let node = &self.arena[src];
            let dst = arena.alloc(AvlNode {
                p: parent,
                l: None,
                r: None,
                v: node.v.clone(),
                height: node.height,
                size: node.size,
            });
            match parent {
                Some(p) if is_left => arena[p].l = Some(dst),
                Some(p) => arena[p].r = Some(dst),
                None => root = Some(dst),
            }
            if let Some(r) = node.r {
                stack.push((r, Some(dst), false));
            }
            if let Some(l) = node.l {
                stack.push((l, Some(dst), true));
            }
        }
        debug!("copied set of {} nodes", arena.len());
        Self { root, arena }
    }
}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for AvlSet<T> {
    fn clone(&self) -> Self {
        let arena = Arena::with_capacity(self.len());
        let stack = Vec::with_capacity(self.height() + 1);
        self.copy_into(arena, stack)
    }

    fn clone_from(&mut self, source: &Self) {
        let fresh = source.clone();
        *self = fresh;
    }
}

impl<T: Debug> Debug for AvlSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Debug> AvlSet<T> {
    /// Multi-line dump of the tree shape with cached heights and sizes.
    pub fn print(&self) -> String {
        util::print(&self.arena, self.root, "")
    }
}

impl<T: PartialEq> PartialEq for AvlSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlSet<T> {}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for AvlSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlSet<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for AvlSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let mut order = Vec::with_capacity(self.len());
        let mut curr = first(&self.arena, self.root);
        while let Some(i) = curr {
            order.push(i);
            curr = next(&self.arena, i);
        }
        IntoIter {
            arena: self.arena,
            order: order.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_preserves_slot_shape_compactly() {
        let mut set: AvlSet<i32> = (0..20).collect();
        for v in (0..20).step_by(2) {
            set.remove(&v);
        }
        let copy = set.try_clone().unwrap();
        assert_eq!(copy.arena.len(), 10);
        assert_eq!(copy.root, Some(0));
        assert_eq!(copy.height(), set.height());
        assert_eq!(copy.root(), set.root());
        copy.assert_valid().unwrap();
        assert_eq!(copy, set);
    }

    #[test]
    fn remove_at_ignores_stale_slot() {
        let mut set = AvlSet::from([1, 2, 3]);
        let c = set.find(&3);
        assert_eq!(set.remove_at(c), Some(3));
        assert_eq!(set.remove_at(c), None);
        assert_eq!(set.len(), 2);
    }
}
