//! Node storage: a slab with stable keys and a LIFO free list.
//!
//! The arena owns every node slot; the list owns the arena. Keys stay valid
//! until their node is removed, and removed slots are recycled most-recently-
//! freed first. Growth is fallible (`try_insert` reports exhaustion instead
//! of aborting), which is where the container's allocation-failure contract
//! lives.

use crate::node::{Node, NodeKey};

enum Slot<'a, T> {
    Vacant { next_free: NodeKey },
    Occupied(Node<'a, T>),
}

pub(crate) struct NodeArena<'a, T> {
    slots: Vec<Slot<'a, T>>,
    free_head: NodeKey,
    live: usize,
}

impl<'a, T> NodeArena<'a, T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: NodeKey::NONE,
            live: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: NodeKey::NONE,
            live: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Inserts a node, reusing a vacant slot when one is available.
    ///
    /// Returns `None` when storage cannot grow: the key space is exhausted
    /// or the allocator refused the extra slot. The arena is unchanged in
    /// that case.
    pub(crate) fn try_insert(&mut self, node: Node<'a, T>) -> Option<NodeKey> {
        if self.free_head.is_some() {
            let key = self.free_head;
            let slot = &mut self.slots[key.index()];
            self.free_head = match slot {
                Slot::Vacant { next_free } => *next_free,
                // Free-list invariant: free_head always points at a vacant slot.
                Slot::Occupied(_) => unreachable!("occupied slot on free list"),
            };
            *slot = Slot::Occupied(node);
            self.live += 1;
            return Some(key);
        }

        if self.slots.len() >= u32::MAX as usize {
            return None;
        }
        if self.slots.try_reserve(1).is_err() {
            return None;
        }

        let key = NodeKey::from_index(self.slots.len());
        self.slots.push(Slot::Occupied(node));
        self.live += 1;
        Some(key)
    }

    /// Removes and returns the node at `key`, if occupied.
    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<Node<'a, T>> {
        let slot = match self.slots.get_mut(key.index()) {
            Some(slot @ Slot::Occupied(_)) => slot,
            _ => return None,
        };

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let node = match std::mem::replace(slot, vacant) {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("matched occupied above"),
        };

        self.free_head = key;
        self.live -= 1;
        Some(node)
    }

    #[inline]
    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<'a, T>> {
        match self.slots.get(key.index()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node<'a, T>> {
        match self.slots.get_mut(key.index()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Drops every slot and resets the free list.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = NodeKey::NONE;
        self.live = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueRef;

    fn node(v: &u64) -> Node<'_, u64> {
        Node::new(ValueRef::new(v))
    }

    #[test]
    fn insert_get_remove() {
        let v = 42u64;
        let mut arena = NodeArena::new();

        let key = arena.try_insert(node(&v)).unwrap();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(key).unwrap().value, ValueRef::new(&v));

        let removed = arena.remove(key).unwrap();
        assert_eq!(removed.value, ValueRef::new(&v));
        assert!(arena.get(key).is_none());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn slot_reuse_is_lifo() {
        let (a, b, c) = (1u64, 2u64, 3u64);
        let mut arena = NodeArena::new();

        let k0 = arena.try_insert(node(&a)).unwrap();
        let _k1 = arena.try_insert(node(&b)).unwrap();

        arena.remove(k0);

        let k2 = arena.try_insert(node(&c)).unwrap();
        assert_eq!(k2, k0);
    }

    #[test]
    fn double_remove_returns_none() {
        let v = 9u64;
        let mut arena = NodeArena::new();

        let key = arena.try_insert(node(&v)).unwrap();
        assert!(arena.remove(key).is_some());
        assert!(arena.remove(key).is_none());
    }

    #[test]
    fn stale_and_sentinel_keys_miss() {
        let v = 5u64;
        let mut arena = NodeArena::new();
        arena.try_insert(node(&v)).unwrap();

        assert!(arena.get(NodeKey::NONE).is_none());
        assert!(arena.get(NodeKey::from_index(100)).is_none());
        assert!(arena.remove(NodeKey::NONE).is_none());
    }

    #[test]
    fn clear_resets() {
        let pool: Vec<u64> = (0..8).collect();
        let mut arena = NodeArena::new();

        for v in &pool {
            arena.try_insert(node(v)).unwrap();
        }
        assert_eq!(arena.len(), 8);

        arena.clear();
        assert_eq!(arena.len(), 0);
        assert!(arena.get(NodeKey::from_index(0)).is_none());
    }

    #[test]
    fn get_mut_updates_in_place() {
        let (a, b) = (1u64, 2u64);
        let mut arena = NodeArena::new();

        let key = arena.try_insert(node(&a)).unwrap();
        arena.get_mut(key).unwrap().value = ValueRef::new(&b);

        assert_eq!(arena.get(key).unwrap().value, ValueRef::new(&b));
    }
}
