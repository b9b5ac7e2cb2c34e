use std::cmp::Ordering;
use std::fmt::Debug;

use log::trace;

use crate::arena::Arena;
use crate::types::AvlNodeLike;
use crate::util::{first, get_l, get_p, get_r, last, next, set_l, set_p, set_r};

/// Height of an optional subtree; an absent subtree has height 0.
#[inline]
pub fn height<N: AvlNodeLike>(arena: &Arena<N>, n: Option<u32>) -> i32 {
    n.map_or(0, |i| arena[i].height())
}

/// Node count of an optional subtree; an absent subtree has size 0.
#[inline]
pub fn size<N: AvlNodeLike>(arena: &Arena<N>, n: Option<u32>) -> usize {
    n.map_or(0, |i| arena[i].size())
}

/// Balance factor, `height(left) - height(right)`; 0 for an absent node.
pub fn child_diff<N: AvlNodeLike>(arena: &Arena<N>, n: Option<u32>) -> i32 {
    match n {
        Some(i) => height(arena, get_l(arena, i)) - height(arena, get_r(arena, i)),
        None => 0,
    }
}

/// Recomputes the cached height and size of `n` from its children.
pub fn update<N: AvlNodeLike>(arena: &mut Arena<N>, n: u32) {
    let l = get_l(arena, n);
    let r = get_r(arena, n);
    let h = height(arena, l).max(height(arena, r)) + 1;
    let s = size(arena, l) + size(arena, r) + 1;
    let node = &mut arena[n];
    node.set_height(h);
    node.set_size(s);
}

fn hang_left<N: AvlNodeLike>(arena: &mut Arena<N>, a: u32, b: Option<u32>) {
    set_l(arena, a, b);
    if let Some(b) = b {
        set_p(arena, b, Some(a));
    }
}

fn hang_right<N: AvlNodeLike>(arena: &mut Arena<N>, a: u32, b: Option<u32>) {
    set_r(arena, a, b);
    if let Some(b) = b {
        set_p(arena, b, Some(a));
    }
}

/// Puts `new` into the child slot of `parent` that `old` occupied.
fn replace_child<N: AvlNodeLike>(arena: &mut Arena<N>, parent: Option<u32>, old: u32, new: u32) {
    set_p(arena, new, parent);
    if let Some(p) = parent {
        if get_l(arena, p) == Some(old) {
            set_l(arena, p, Some(new));
        } else {
            set_r(arena, p, Some(new));
        }
    }
}

/// Promotes the right child of `a`. Returns the new local root.
pub fn rotate_left<N: AvlNodeLike>(arena: &mut Arena<N>, a: u32) -> u32 {
    let Some(b) = get_r(arena, a) else {
        return a;
    };
    let parent = get_p(arena, a);
    let bl = get_l(arena, b);
    hang_right(arena, a, bl);
    hang_left(arena, b, Some(a));
    replace_child(arena, parent, a, b);
    update(arena, a);
    update(arena, b);
    b
}

/// Promotes the left child of `a`. Returns the new local root.
pub fn rotate_right<N: AvlNodeLike>(arena: &mut Arena<N>, a: u32) -> u32 {
    let Some(b) = get_l(arena, a) else {
        return a;
    };
    let parent = get_p(arena, a);
    let br = get_r(arena, b);
    hang_left(arena, a, br);
    hang_right(arena, b, Some(a));
    replace_child(arena, parent, a, b);
    update(arena, a);
    update(arena, b);
    b
}

/// Right-left double rotation: `a.r.l` becomes the local root.
pub fn strong_rotate_left<N: AvlNodeLike>(arena: &mut Arena<N>, a: u32) -> u32 {
    if let Some(r) = get_r(arena, a) {
        rotate_right(arena, r);
    }
    rotate_left(arena, a)
}

/// Left-right double rotation: `a.l.r` becomes the local root.
pub fn strong_rotate_right<N: AvlNodeLike>(arena: &mut Arena<N>, a: u32) -> u32 {
    if let Some(l) = get_l(arena, a) {
        rotate_left(arena, l);
    }
    rotate_right(arena, a)
}

/// Restores the AVL balance at `a`, assuming its children are balanced and
/// their caches are current. Returns the node now in `a`'s position.
///
/// When the heavy child is itself perfectly balanced (child diff 0) a single
/// rotation is used; only a child leaning toward its sibling gets the double
/// rotation.
pub fn rebalance<N: AvlNodeLike>(arena: &mut Arena<N>, a: u32) -> u32 {
    let diff = child_diff(arena, Some(a));
    if diff.abs() < 2 {
        return a;
    }
    if diff > 0 {
        let b = get_l(arena, a);
        if child_diff(arena, b) >= 0 {
            trace!("rebalance: rotate right at {a}");
            rotate_right(arena, a)
        } else {
            trace!("rebalance: left-right rotation at {a}");
            strong_rotate_right(arena, a)
        }
    } else {
        let b = get_r(arena, a);
        if child_diff(arena, b) <= 0 {
            trace!("rebalance: rotate left at {a}");
            rotate_left(arena, a)
        } else {
            trace!("rebalance: right-left rotation at {a}");
            strong_rotate_left(arena, a)
        }
    }
}

/// Walks from `start` to the root, calling [`update`] then [`rebalance`] at
/// every level. Returns the (possibly new) root.
pub fn retrace<N: AvlNodeLike>(arena: &mut Arena<N>, start: Option<u32>) -> Option<u32> {
    let mut curr = start?;
    loop {
        update(arena, curr);
        let top = rebalance(arena, curr);
        match get_p(arena, top) {
            Some(p) => curr = p,
            None => return Some(top),
        }
    }
}

/// Outcome of a key descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Search {
    /// The value is stored at this node.
    Found(u32),
    /// The value is absent; a new leaf would hang here. `parent` is `None`
    /// only for an empty tree.
    Vacant { parent: Option<u32>, left: bool },
}

pub fn search<N>(arena: &Arena<N>, root: Option<u32>, value: &N::Value) -> Search
where
    N: AvlNodeLike,
    N::Value: Ord,
{
    let Some(mut curr) = root else {
        return Search::Vacant {
            parent: None,
            left: false,
        };
    };
    loop {
        let (next, left) = match value.cmp(arena[curr].value()) {
            Ordering::Equal => return Search::Found(curr),
            Ordering::Less => (get_l(arena, curr), true),
            Ordering::Greater => (get_r(arena, curr), false),
        };
        match next {
            Some(next) => curr = next,
            None => {
                return Search::Vacant {
                    parent: Some(curr),
                    left,
                }
            }
        }
    }
}

/// Hangs the detached leaf `n` at a vacant position found by [`search`] and
/// rebalances up to the root. Returns the new root.
pub fn attach<N: AvlNodeLike>(
    arena: &mut Arena<N>,
    n: u32,
    parent: Option<u32>,
    left: bool,
) -> Option<u32> {
    let Some(p) = parent else {
        set_p(arena, n, None);
        return Some(n);
    };
    if left {
        hang_left(arena, p, Some(n));
    } else {
        hang_right(arena, p, Some(n));
    }
    retrace(arena, Some(p))
}

/// Removes the value stored at `n` from the tree rooted at `root`.
///
/// The value is pushed down by swapping it with the in-order predecessor
/// (or successor when there is no left subtree) until it sits in a leaf;
/// that leaf is unlinked and freed. The node freed is therefore not
/// necessarily `n`. Returns the new root and the freed node, which carries
/// the removed value.
pub fn erase<N: AvlNodeLike>(arena: &mut Arena<N>, n: u32) -> (Option<u32>, Option<N>) {
    let mut curr = n;
    loop {
        let swap_with = if let Some(l) = get_l(arena, curr) {
            last(arena, Some(l))
        } else if let Some(r) = get_r(arena, curr) {
            first(arena, Some(r))
        } else {
            break;
        };
        let Some(other) = swap_with else {
            break;
        };
        if let Some((x, y)) = arena.pair_mut(curr, other) {
            std::mem::swap(x.value_mut(), y.value_mut());
        }
        curr = other;
    }

    let parent = get_p(arena, curr);
    if let Some(p) = parent {
        if get_l(arena, p) == Some(curr) {
            set_l(arena, p, None);
        } else {
            set_r(arena, p, None);
        }
    }
    let freed = arena.free(curr);
    (retrace(arena, parent), freed)
}

pub fn find<N>(arena: &Arena<N>, root: Option<u32>, value: &N::Value) -> Option<u32>
where
    N: AvlNodeLike,
    N::Value: Ord,
{
    match search(arena, root, value) {
        Search::Found(i) => Some(i),
        Search::Vacant { .. } => None,
    }
}

/// Smallest node with value `>= value`.
pub fn lower_bound<N>(arena: &Arena<N>, root: Option<u32>, value: &N::Value) -> Option<u32>
where
    N: AvlNodeLike,
    N::Value: Ord,
{
    bound(arena, root, |v| v >= value)
}

/// Smallest node with value `> value`.
pub fn upper_bound<N>(arena: &Arena<N>, root: Option<u32>, value: &N::Value) -> Option<u32>
where
    N: AvlNodeLike,
    N::Value: Ord,
{
    bound(arena, root, |v| v > value)
}

/// Leftmost node satisfying a predicate that is monotone in value order.
fn bound<N, F>(arena: &Arena<N>, root: Option<u32>, qualifies: F) -> Option<u32>
where
    N: AvlNodeLike,
    F: Fn(&N::Value) -> bool,
{
    let mut curr = root;
    let mut best = None;
    while let Some(i) = curr {
        if qualifies(arena[i].value()) {
            best = Some(i);
            curr = get_l(arena, i);
        } else {
            curr = get_r(arena, i);
        }
    }
    best
}

/// Number of values strictly less than `value`.
pub fn rank<N>(arena: &Arena<N>, root: Option<u32>, value: &N::Value) -> usize
where
    N: AvlNodeLike,
    N::Value: Ord,
{
    let mut curr = root;
    let mut below = 0;
    while let Some(i) = curr {
        let l = get_l(arena, i);
        match value.cmp(arena[i].value()) {
            Ordering::Less => curr = l,
            Ordering::Equal => return below + size(arena, l),
            Ordering::Greater => {
                below += size(arena, l) + 1;
                curr = get_r(arena, i);
            }
        }
    }
    below
}

/// Node holding the value of 0-based rank `k`.
pub fn select<N: AvlNodeLike>(arena: &Arena<N>, root: Option<u32>, mut k: usize) -> Option<u32> {
    let mut curr = root;
    while let Some(i) = curr {
        let l = get_l(arena, i);
        let ls = size(arena, l);
        match k.cmp(&ls) {
            Ordering::Less => curr = l,
            Ordering::Equal => return Some(i),
            Ordering::Greater => {
                k -= ls + 1;
                curr = get_r(arena, i);
            }
        }
    }
    None
}

fn tree_height<N: AvlNodeLike>(arena: &Arena<N>, node: Option<u32>) -> i32 {
    match node {
        Some(i) => 1 + tree_height(arena, get_l(arena, i)).max(tree_height(arena, get_r(arena, i))),
        None => 0,
    }
}

fn tree_size<N: AvlNodeLike>(arena: &Arena<N>, node: Option<u32>) -> usize {
    match node {
        Some(i) => 1 + tree_size(arena, get_l(arena, i)) + tree_size(arena, get_r(arena, i)),
        None => 0,
    }
}

/// Checks links, cached heights and sizes, balance and strict ordering.
pub fn assert_avl_tree<N>(arena: &Arena<N>, root: Option<u32>) -> Result<(), String>
where
    N: AvlNodeLike,
    N::Value: Ord,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena.get(root).is_none() {
        return Err(format!("Root {root} is not allocated"));
    }
    if get_p(arena, root).is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate_node<N: AvlNodeLike>(arena: &Arena<N>, node: u32) -> Result<(), String> {
        let l = get_l(arena, node);
        let r = get_r(arena, node);

        for (child, side) in [(l, "left"), (r, "right")] {
            if let Some(c) = child {
                if arena.get(c).is_none() {
                    return Err(format!("Node {node} links to vacant {side} child {c}"));
                }
                if get_p(arena, c) != Some(node) {
                    return Err(format!("Broken parent link on {side} child of {node}"));
                }
                validate_node(arena, c)?;
            }
        }

        let expected_height = 1 + tree_height(arena, l).max(tree_height(arena, r));
        let actual_height = arena[node].height();
        if actual_height != expected_height {
            return Err(format!(
                "Height mismatch at {node}: expected {expected_height}, got {actual_height}"
            ));
        }
        let expected_size = 1 + tree_size(arena, l) + tree_size(arena, r);
        let actual_size = arena[node].size();
        if actual_size != expected_size {
            return Err(format!(
                "Size mismatch at {node}: expected {expected_size}, got {actual_size}"
            ));
        }
        if child_diff(arena, Some(node)).abs() > 1 {
            return Err(format!("AVL balance violated at {node}"));
        }
        Ok(())
    }

    validate_node(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if arena[prev].value() >= arena[i].value() {
                return Err("Node order violated".to_string());
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Debug printer.
pub fn print<N>(arena: &Arena<N>, node: Option<u32>, tab: &str) -> String
where
    N: AvlNodeLike,
    N::Value: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i];
            let left = print(arena, n.l(), &format!("{tab}  "));
            let right = print(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [h={}, s={}] {:?}\n{tab}L={left}\n{tab}R={right}",
                n.height(),
                n.size(),
                n.value()
            )
        }
    }
}
