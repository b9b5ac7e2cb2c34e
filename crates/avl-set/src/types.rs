//! Node trait definitions.
//!
//! Each "pointer" is an `Option<u32>` index into an [`Arena`](crate::Arena).
//! Tree-manipulation functions take the arena and work with indices, so the
//! parent back-reference never owns anything.

/// Tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// AVL node with cached height and subtree size.
pub trait AvlNodeLike: Node {
    type Value;

    fn value(&self) -> &Self::Value;
    fn value_mut(&mut self) -> &mut Self::Value;
    /// Height of the subtree rooted here; a leaf has height 1.
    fn height(&self) -> i32;
    fn set_height(&mut self, height: i32);
    /// Number of nodes in the subtree rooted here, this one included.
    fn size(&self) -> usize;
    fn set_size(&mut self, size: usize);
}

#[derive(Clone, Debug)]
pub struct AvlNode<T> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub v: T,
    pub height: i32,
    pub size: usize,
}

impl<T> AvlNode<T> {
    /// Detached leaf.
    pub fn new(v: T) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            v,
            height: 1,
            size: 1,
        }
    }
}

impl<T> Node for AvlNode<T> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<T> AvlNodeLike for AvlNode<T> {
    type Value = T;

    fn value(&self) -> &T {
        &self.v
    }

    fn value_mut(&mut self) -> &mut T {
        &mut self.v
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_height(&mut self, height: i32) {
        self.height = height;
    }

    fn size(&self) -> usize {
        self.size
    }

    fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}
