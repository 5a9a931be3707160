//! Intrusive doubly linked list backed by `SlotArena`.
//!
//! Stores list nodes in a `SlotArena` and links them by `SlotId`, so a caller
//! can keep the handle returned by `push_front` and later splice or unlink
//! that node in O(1) without walking the list.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! ## Performance
//! - `push_front`, `pop_front`, `pop_back`: O(1)
//! - `move_to_front`, `remove`: O(1)
//! - `iter`, `iter_ids`: O(n)
use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list whose nodes are addressed by stable [`SlotId`]s.
///
/// The front is the most recently pushed or promoted node; the back is the
/// oldest.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` names a live node.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Value at the back (oldest end) of the list.
    pub fn back(&self) -> Option<&T> {
        self.get(self.tail?)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Node handles from front to back.
    pub fn iter_ids(&self) -> IntrusiveListIdIter<'_, T> {
        IntrusiveListIdIter {
            list: self,
            cursor: self.head,
        }
    }

    /// Values from front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.iter_ids().filter_map(|id| self.get(id))
    }

    /// Links a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_front(id);
        id
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.remove(self.head?)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.remove(self.tail?)
    }

    /// Unlinks `id` and returns its value; `None` if it is not live.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves `id` to the front; returns `false` if it is not live.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.head == Some(id) {
            return true;
        }
        if self.unlink(id).is_none() {
            return false;
        }
        self.link_front(id);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Detaches `id` from its neighbours, leaving the node in the arena.
    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let node = self.arena.get_mut(id)?;
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }
        Some(())
    }

    /// Attaches an already-detached node at the front.
    fn link_front(&mut self, id: SlotId) {
        let old_head = self.head.replace(id);
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|h| self.arena.get_mut(h)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
    }

    /// Asserts that forward and backward walks agree with `len()`.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.head.is_none(), self.tail.is_none(), "head/tail disagree");

        let mut forward = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        let mut expected_prev = None;
        while let Some(id) = cursor {
            assert!(forward.len() < self.len(), "forward walk overruns len");
            let Some(node) = self.arena.get(id) else {
                panic!("link to freed slot {}", id.index());
            };
            assert_eq!(node.prev, expected_prev, "broken prev link");
            forward.push(id);
            expected_prev = Some(id);
            cursor = node.next;
        }
        assert_eq!(forward.len(), self.len(), "unreachable nodes");
        assert_eq!(self.tail, forward.last().copied(), "stale tail");

        let mut backward = self.tail;
        for &id in forward.iter().rev() {
            assert_eq!(backward, Some(id), "backward walk diverges");
            backward = self.arena.get(id).and_then(|node| node.prev);
        }
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over node handles from front to back.
pub struct IntrusiveListIdIter<'a, T> {
    list: &'a IntrusiveList<T>,
    cursor: Option<SlotId>,
}

impl<T> Iterator for IntrusiveListIdIter<'_, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<SlotId> {
        let id = self.cursor?;
        self.cursor = self.list.arena.get(id).and_then(|node| node.next);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = IntrusiveList::new();
        let oldest = list.push_front(1);
        list.push_front(2);
        let newest = list.push_front(3);
        assert_eq!(values(&list), vec![3, 2, 1]);
        assert_eq!(list.front_id(), Some(newest));
        assert_eq!(list.back_id(), Some(oldest));
        assert_eq!(list.back(), Some(&1));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_from_tail_and_middle() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "c", "b"]);
        assert_eq!(list.back_id(), Some(b));

        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!["c", "a", "b"]);
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_on_head_is_noop() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        let head = list.push_front(2);
        assert!(list.move_to_front(head));
        assert_eq!(values(&list), vec![2, 1]);
        list.debug_validate_invariants();
    }

    #[test]
    fn single_node_moves_and_pops() {
        let mut list = IntrusiveList::new();
        let only = list.push_front('x');
        assert!(list.move_to_front(only));
        assert_eq!(list.front_id(), list.back_id());
        assert_eq!(list.pop_front(), Some('x'));
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_unlinks_middle_node() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        let mid = list.push_front(2);
        list.push_front(3);

        assert_eq!(list.remove(mid), Some(2));
        assert!(!list.contains(mid));
        assert!(!list.move_to_front(mid));
        assert_eq!(list.remove(mid), None);
        assert_eq!(values(&list), vec![3, 1]);
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_from_both_ends() {
        let mut list = IntrusiveList::with_capacity(3);
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_front(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut list = IntrusiveList::new();
        let id = list.push_front(10);
        if let Some(v) = list.get_mut(id) {
            *v += 5;
        }
        assert_eq!(list.get(id), Some(&15));
    }

    #[test]
    fn clear_resets_links() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert!(list.front_id().is_none());
        assert!(list.back_id().is_none());
        assert_eq!(list.iter_ids().count(), 0);
        list.debug_validate_invariants();
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::VecDeque;

        proptest! {
            /// Property: the list matches a VecDeque model after any op sequence
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_deque_model(
                ops in prop::collection::vec((0u8..4, any::<u16>()), 0..100)
            ) {
                let mut list = IntrusiveList::new();
                let mut model: VecDeque<(SlotId, u16)> = VecDeque::new();

                for (op, value) in ops {
                    match op % 4 {
                        0 => {
                            let id = list.push_front(value);
                            model.push_front((id, value));
                        }
                        1 => {
                            if !model.is_empty() {
                                let pos = value as usize % model.len();
                                let entry = model.remove(pos).unwrap();
                                prop_assert!(list.move_to_front(entry.0));
                                model.push_front(entry);
                            }
                        }
                        2 => {
                            if !model.is_empty() {
                                let pos = value as usize % model.len();
                                let (id, v) = model.remove(pos).unwrap();
                                prop_assert_eq!(list.remove(id), Some(v));
                            }
                        }
                        3 => {
                            prop_assert_eq!(list.pop_back(), model.pop_back().map(|(_, v)| v));
                        }
                        _ => unreachable!(),
                    }

                    list.debug_validate_invariants();
                    let expected: Vec<u16> = model.iter().map(|&(_, v)| v).collect();
                    prop_assert_eq!(values(&list), expected);
                }
            }
        }
    }
}
