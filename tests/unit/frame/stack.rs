use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn pops_in_reverse_push_order() {
    let mut s = Stack::new();
    for i in 0..5 {
        s.push(i);
    }
    assert_eq!(s.peek(), Some(&4));
    assert_eq!(s.bottom(), Some(&0));
    let popped: Vec<i32> = std::iter::from_fn(|| s.pop()).collect();
    assert_eq!(popped, vec![4, 3, 2, 1, 0]);
    assert!(s.is_empty());
    assert_eq!(s.pop(), None);
}

#[test]
fn teardown_drops_remaining_items_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut s = Stack::new();
    for _ in 0..3 {
        s.push(DropCounter(Arc::clone(&drops)));
    }

    drop(s.pop());
    assert_eq!(drops.load(Ordering::SeqCst), 1);

    drop(s);
    assert_eq!(drops.load(Ordering::SeqCst), 3);
}

#[test]
fn clear_drops_everything() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut s = Stack::new();
    s.push(DropCounter(Arc::clone(&drops)));
    s.push(DropCounter(Arc::clone(&drops)));
    s.clear();
    assert_eq!(drops.load(Ordering::SeqCst), 2);
    assert_eq!(s.len(), 0);
}

#[test]
fn tagged_pops_reject_and_restore_wrong_variant() {
    let mut s: Stack<StackItem<u8>> = Stack::new();
    s.push(StackItem::Step(7));
    s.push(StackItem::Data(Box::new(String::from("state"))));

    let err = s.pop_step("image").unwrap_err();
    assert!(err.to_string().contains("stack mismatch:"));
    assert_eq!(s.len(), 2);

    assert!(s.pop_data::<u32>("image").is_err());
    assert_eq!(s.len(), 2);

    let data = s.pop_data::<String>("image").unwrap().unwrap();
    assert_eq!(*data, "state");
    assert_eq!(s.pop_step("image").unwrap(), Some(7));
    assert_eq!(s.pop_step("image").unwrap(), None);
}
