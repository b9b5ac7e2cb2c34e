//! Index-addressed node storage.
//!
//! Vacated slots are chained into a free list and handed out again by the
//! next allocation, so indices stay small and stable for the lifetime of a
//! node.

use std::ops::{Index, IndexMut};

use crate::error::AvlSetError;

/// Number of distinct `u32` slot indices.
const SLOT_LIMIT: usize = (u32::MAX as usize).saturating_add(1);

#[derive(Debug)]
enum Slot<N> {
    Occupied(N),
    Vacant { next: Option<u32> },
}

#[derive(Debug)]
pub struct Arena<N> {
    slots: Vec<Slot<N>>,
    free: Option<u32>,
    len: usize,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: None,
            len: 0,
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, AvlSetError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        Ok(Self {
            slots,
            free: None,
            len: 0,
        })
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `node`, reusing a vacant slot when one exists.
    ///
    /// # Panics
    ///
    /// When every `u32` slot index is already in use.
    pub fn alloc(&mut self, node: N) -> u32 {
        if self.free.is_none() && self.slots.len() >= SLOT_LIMIT {
            panic!("{}", AvlSetError::SlotsExhausted);
        }
        self.len += 1;
        match self.free {
            Some(idx) => {
                let slot = &mut self.slots[idx as usize];
                if let Slot::Vacant { next } = *slot {
                    self.free = next;
                }
                *slot = Slot::Occupied(node);
                idx
            }
            None => {
                let idx = self.slots.len() as u32;
                self.slots.push(Slot::Occupied(node));
                idx
            }
        }
    }

    /// Like [`alloc`](Self::alloc), but reports a failed reservation instead
    /// of aborting. On error nothing is stored.
    pub fn try_alloc(&mut self, node: N) -> Result<u32, AvlSetError> {
        self.try_alloc_within(node, SLOT_LIMIT)
    }

    fn try_alloc_within(&mut self, node: N, limit: usize) -> Result<u32, AvlSetError> {
        if self.free.is_none() {
            if self.slots.len() >= limit {
                return Err(AvlSetError::SlotsExhausted);
            }
            self.slots.try_reserve(1)?;
        }
        Ok(self.alloc(node))
    }

    /// Vacates slot `idx` and returns its node, or `None` if it was already
    /// vacant or out of bounds.
    pub fn free(&mut self, idx: u32) -> Option<N> {
        let slot = self.slots.get_mut(idx as usize)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let prev = std::mem::replace(slot, Slot::Vacant { next: self.free });
        self.free = Some(idx);
        self.len -= 1;
        match prev {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, idx: u32) -> Option<&N> {
        match self.slots.get(idx as usize)? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut N> {
        match self.slots.get_mut(idx as usize)? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    /// Mutable access to two distinct occupied slots at once.
    pub fn pair_mut(&mut self, a: u32, b: u32) -> Option<(&mut N, &mut N)> {
        if a == b {
            return None;
        }
        let (lo, hi, flipped) = if a < b { (a, b, false) } else { (b, a, true) };
        if hi as usize >= self.slots.len() {
            return None;
        }
        let (head, tail) = self.slots.split_at_mut(hi as usize);
        let x = match head.get_mut(lo as usize)? {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => return None,
        };
        let y = match tail.first_mut()? {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => return None,
        };
        if flipped {
            Some((y, x))
        } else {
            Some((x, y))
        }
    }

    /// Drops every node and forgets all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

impl<N> Index<u32> for Arena<N> {
    type Output = N;

    fn index(&self, idx: u32) -> &N {
        match self.get(idx) {
            Some(node) => node,
            None => panic!("arena slot {idx} is vacant"),
        }
    }
}

impl<N> IndexMut<u32> for Arena<N> {
    fn index_mut(&mut self, idx: u32) -> &mut N {
        match self.get_mut(idx) {
            Some(node) => node,
            None => panic!("arena slot {idx} is vacant"),
        }
    }
}
