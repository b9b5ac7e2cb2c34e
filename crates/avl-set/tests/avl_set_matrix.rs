use avl_set::{Arena, AvlNode, AvlSet, AvlSetError, Cursor};

fn values(set: &AvlSet<i32>) -> Vec<i32> {
    set.iter().copied().collect()
}

#[test]
fn avl_set_smoke_matrix() {
    let mut set = AvlSet::<i32>::new();
    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
    assert!(!set.contains(&1));

    for v in [5, 3, 8, 1, 4, 7, 9] {
        assert!(set.insert(v));
        set.assert_valid().unwrap();
    }
    assert_eq!(values(&set), vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(set.len(), 7);
    assert!(set.contains(&4));
    assert!(!set.contains(&6));
    assert_eq!(set.first(), Some(&1));
    assert_eq!(set.last(), Some(&9));
    assert_eq!(format!("{set:?}"), "{1, 3, 4, 5, 7, 8, 9}");
}

#[test]
fn avl_set_ascending_insert_height_matrix() {
    let set: AvlSet<i32> = (1..=7).collect();
    assert_eq!(set.height(), 3);
    assert_eq!(set.root(), Some(&4));
    set.assert_valid().unwrap();

    let big: AvlSet<i32> = (0..1023).collect();
    assert_eq!(big.height(), 10);
    big.assert_valid().unwrap();
}

#[test]
fn avl_set_duplicate_insert_matrix() {
    let mut set = AvlSet::from([10, 20, 30, 40]);
    let before = set.print();
    assert!(!set.insert(30));
    assert_eq!(set.len(), 4);
    assert_eq!(set.print(), before);
    assert_eq!(set.try_insert(10), Ok(false));
    assert_eq!(set.try_insert(25), Ok(true));
    assert_eq!(values(&set), vec![10, 20, 25, 30, 40]);
}

#[derive(Debug, Clone)]
struct Tagged(i32, &'static str);

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Tagged {}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

#[test]
fn avl_set_duplicate_keeps_original_matrix() {
    let mut set = AvlSet::new();
    set.insert(Tagged(1, "first"));
    assert!(!set.insert(Tagged(1, "second")));
    assert_eq!(set.first().map(|t| t.1), Some("first"));
    assert_eq!(set.take(&Tagged(1, "")).map(|t| t.1), Some("first"));
    assert!(set.is_empty());
}

#[test]
fn avl_set_erase_matrix() {
    let mut set: AvlSet<i32> = (1..=7).collect();
    assert_eq!(set.root(), Some(&4));
    assert!(set.remove(&4));
    assert_eq!(set.root(), Some(&3));
    assert_eq!(set.len(), 6);
    set.assert_valid().unwrap();

    assert!(!set.remove(&4));
    assert!(!set.remove(&100));
    assert_eq!(set.len(), 6);

    assert!(set.remove(&3));
    assert!(set.insert(3));
    assert!(set.contains(&3));
    assert_eq!(set.len(), 6);
    set.assert_valid().unwrap();

    for v in [1, 2, 3, 5, 6, 7] {
        assert!(set.remove(&v));
        set.assert_valid().unwrap();
    }
    assert!(set.is_empty());
    assert_eq!(set.root(), None);
    assert!(!set.remove(&1));
}

#[test]
fn avl_set_ladder_insert_delete_matrix() {
    let mut set = AvlSet::<i32>::new();
    for i in 0..300 {
        set.insert(i);
        set.assert_valid().unwrap();
    }
    assert_eq!(set.len(), 300);

    for i in (0..300).step_by(3) {
        assert!(set.remove(&i));
        set.assert_valid().unwrap();
    }

    for i in 0..300 {
        assert_eq!(set.contains(&i), i % 3 != 0);
    }
    assert_eq!(set.len(), 200);
}

#[test]
fn avl_set_bounds_matrix() {
    let set = AvlSet::from([1, 3, 5, 7]);
    assert_eq!(set.get(set.lower_bound(&4)), Some(&5));
    assert_eq!(set.get(set.lower_bound(&5)), Some(&5));
    assert_eq!(set.get(set.upper_bound(&5)), Some(&7));
    assert_eq!(set.upper_bound(&7), Cursor::End);
    assert_eq!(set.lower_bound(&8), Cursor::End);
    assert_eq!(set.get(set.lower_bound(&i32::MIN)), Some(&1));

    let three = set.find(&3);
    assert_eq!(set.get(set.upper_bound_at(three)), Some(&5));
    assert_eq!(set.upper_bound_at(set.end()), Cursor::End);
    assert_eq!(set.find(&4), Cursor::End);

    let empty = AvlSet::<i32>::new();
    assert_eq!(empty.lower_bound(&0), Cursor::End);
    assert_eq!(empty.upper_bound(&0), Cursor::End);
}

#[test]
fn avl_set_rank_select_matrix() {
    let set: AvlSet<i32> = (0..50).map(|i| i * 2).collect();
    assert_eq!(set.select(0), set.first());
    assert_eq!(set.rank(set.first().unwrap()), 0);

    for k in 0..50 {
        let v = *set.select(k).unwrap();
        assert_eq!(v, k as i32 * 2);
        assert_eq!(set.rank(&v), k);
        assert_eq!(set.rank(&(v + 1)), k + 1);
        assert_eq!(set.get(set.select_cursor(k)), Some(&v));
    }
    assert_eq!(set.select(50), None);
    assert_eq!(set.select_cursor(50), Cursor::End);
    assert_eq!(set.rank(&-1), 0);
    assert_eq!(set.rank(&1000), 50);
}

#[test]
fn avl_set_pop_matrix() {
    let mut set = AvlSet::from([4, 2, 6]);
    assert_eq!(set.pop_first(), Some(2));
    assert_eq!(set.pop_last(), Some(6));
    assert_eq!(set.pop_last(), Some(4));
    assert_eq!(set.pop_first(), None);
    assert!(set.is_empty());
}

#[test]
fn avl_set_clear_matrix() {
    let mut set = AvlSet::<i32>::new();
    set.clear();
    assert!(set.is_empty());

    set.extend([3, 1, 2]);
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.begin(), Cursor::End);
    set.clear();

    set.insert(9);
    assert_eq!(values(&set), vec![9]);
    set.assert_valid().unwrap();
}

#[test]
fn avl_set_copy_matrix() {
    let original: AvlSet<i32> = (0..40).collect();
    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert_eq!(copy.root(), original.root());
    assert_eq!(copy.height(), original.height());
    for k in 0..40 {
        assert_eq!(copy.select(k), original.select(k));
    }

    copy.remove(&10);
    copy.insert(100);
    assert!(original.contains(&10));
    assert!(!original.contains(&100));
    assert_ne!(copy, original);
    original.assert_valid().unwrap();
    copy.assert_valid().unwrap();

    let mut target = AvlSet::from([-1, -2]);
    target.assign_from(&original).unwrap();
    assert_eq!(target, original);
    target.insert(-5);
    assert!(!original.contains(&-5));

    let mut other = AvlSet::from([7]);
    other.clone_from(&copy);
    assert_eq!(other, copy);

    let empty = AvlSet::<i32>::new();
    target.assign_from(&empty).unwrap();
    assert!(target.is_empty());
    assert_eq!(empty.try_clone(), Ok(AvlSet::new()));
}

#[test]
fn avl_set_owned_iteration_matrix() {
    let set = AvlSet::from(["pear".to_string(), "apple".to_string(), "fig".to_string()]);
    let forward: Vec<String> = set.clone().into_iter().collect();
    assert_eq!(forward, vec!["apple", "fig", "pear"]);

    let mut it = set.into_iter();
    assert_eq!(it.len(), 3);
    assert_eq!(it.next_back().as_deref(), Some("pear"));
    assert_eq!(it.next().as_deref(), Some("apple"));
    assert_eq!(it.next().as_deref(), Some("fig"));
    assert_eq!(it.next(), None);
}

#[test]
fn avl_set_error_display_matrix() {
    assert_eq!(AvlSetError::OutOfRange.to_string(), "cursor out of range");
    assert_eq!(
        AvlSetError::SlotsExhausted.to_string(),
        "arena slot indices exhausted"
    );
}

#[test]
fn avl_set_allocation_failure_matrix() {
    let err = Arena::<u64>::try_with_capacity(usize::MAX).unwrap_err();
    assert!(matches!(err, AvlSetError::AllocationFailed(_)), "{err:?}");
    assert!(
        err.to_string().starts_with("node allocation failed: "),
        "{err}"
    );

    let err = Arena::<AvlNode<i32>>::try_with_capacity(usize::MAX).unwrap_err();
    assert!(matches!(err, AvlSetError::AllocationFailed(_)));

    // Reusing freed slots never has to grow storage.
    let mut arena = Arena::new();
    let a = arena.try_alloc(AvlNode::new(1)).unwrap();
    arena.try_alloc(AvlNode::new(2)).unwrap();
    assert_eq!(arena.free(a).map(|n| n.v), Some(1));
    assert_eq!(arena.try_alloc(AvlNode::new(3)), Ok(a));
    assert_eq!(arena.len(), 2);
}
