//! Forked value search: two scan workers, one from each end.
//!
//! A long identity search splits at the midpoint. The front worker walks
//! forward from the head over the first `len / 2` nodes; the back worker
//! walks backward from the tail over the rest. Both reuse the plain
//! [`seek::scan`] loop, with its stop probe wired to one shared
//! [`RaceSlot`]: each step they check whether the other side has already
//! published and give up the moment it has.
//!
//! When the needle occurs in both halves, which occurrence wins is a race
//! and may differ across calls. That non-determinism is part of the
//! contract; the slot's first-write-wins discipline only guarantees the
//! settled answer is never overwritten.
//!
//! Scanning is read-only — the links are never touched, so the slot is the
//! only shared mutable state and the chain needs no locking. Mutation stays
//! on the calling thread, excluded by `&mut self` on the list's API.

use std::thread;

use strand_slot::RaceSlot;

#[cfg(feature = "logging")]
use tracing::trace;

use crate::arena::NodeArena;
use crate::node::NodeKey;
use crate::seek::{self, Direction};
use crate::value::ValueRef;

/// Runs the two-worker search and returns the settled result.
///
/// Blocks until both workers have joined. If either worker fails to spawn
/// the search reports `None` outright — a half-covered scan must not pass
/// for an exhaustive one, so there is no sequential fallback and any result
/// the surviving worker produced is discarded.
pub(crate) fn search<'a, T: Sync>(
    arena: &NodeArena<'a, T>,
    head: NodeKey,
    tail: NodeKey,
    len: usize,
    needle: ValueRef<'a, T>,
) -> Option<NodeKey> {
    let front_half = len / 2;
    let back_half = len - front_half;

    #[cfg(feature = "logging")]
    trace!(len, front_half, back_half, "forking value search");

    let slot: RaceSlot<NodeKey> = RaceSlot::new();

    let complete = thread::scope(|scope| {
        let slot = &slot;

        let front = thread::Builder::new()
            .name("scan-front".into())
            .spawn_scoped(scope, move || {
                let hit = seek::scan(arena, head, Direction::Forward, front_half, needle, || {
                    slot.is_settled()
                });
                if let Some(key) = hit {
                    slot.publish(key);
                }
            });
        if front.is_err() {
            return false;
        }

        let back = thread::Builder::new()
            .name("scan-back".into())
            .spawn_scoped(scope, move || {
                let hit = seek::scan(arena, tail, Direction::Backward, back_half, needle, || {
                    slot.is_settled()
                });
                if let Some(key) = hit {
                    slot.publish(key);
                }
            });

        // The scope joins whatever was spawned on exit.
        back.is_ok()
    });

    if !complete {
        #[cfg(feature = "logging")]
        trace!("scan worker failed to start; reporting not-found");
        return None;
    }

    slot.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RefList, ValueRef};

    const LONG: usize = 600;

    fn forked_list<'a>(pool: &'a [u64]) -> RefList<'a, u64> {
        let mut list = RefList::with_capacity(pool.len());
        for v in pool {
            list.try_push_back(ValueRef::new(v)).unwrap();
        }
        // Force the forked path even for short lists.
        list.set_inline_search_max(0);
        list
    }

    #[test]
    fn finds_target_in_front_half() {
        let pool: Vec<u64> = (0..LONG as u64).collect();
        let list = forked_list(&pool);

        let key = list.find(ValueRef::new(&pool[3])).unwrap();
        assert_eq!(list.value(key), ValueRef::new(&pool[3]));
    }

    #[test]
    fn finds_target_in_back_half() {
        let pool: Vec<u64> = (0..LONG as u64).collect();
        let list = forked_list(&pool);

        let key = list.find(ValueRef::new(&pool[LONG - 3])).unwrap();
        assert_eq!(list.value(key), ValueRef::new(&pool[LONG - 3]));
    }

    #[test]
    fn finds_targets_at_boundaries() {
        let pool: Vec<u64> = (0..LONG as u64).collect();
        let list = forked_list(&pool);

        // Endpoints and both sides of the split.
        for i in [0, LONG / 2 - 1, LONG / 2, LONG - 1] {
            let key = list.find(ValueRef::new(&pool[i])).unwrap();
            assert_eq!(list.value(key), ValueRef::new(&pool[i]), "index {i}");
        }
    }

    #[test]
    fn every_position_findable() {
        let pool: Vec<u64> = (0..LONG as u64).collect();
        let list = forked_list(&pool);

        for v in &pool {
            let key = list.find(ValueRef::new(v)).unwrap();
            assert_eq!(list.value(key), ValueRef::new(v));
        }
    }

    #[test]
    fn absent_value_is_none() {
        let pool: Vec<u64> = (0..LONG as u64).collect();
        let outsider = 7u64;
        let list = forked_list(&pool);

        assert!(list.find(ValueRef::new(&outsider)).is_none());
    }

    #[test]
    fn duplicate_in_both_halves_yields_some_match() {
        let pool: Vec<u64> = (0..LONG as u64).collect();
        let dup = 99u64;
        let mut list = RefList::new();

        // Same object near the head and near the tail.
        list.try_push_back(ValueRef::new(&dup)).unwrap();
        for v in &pool {
            list.try_push_back(ValueRef::new(v)).unwrap();
        }
        list.try_push_back(ValueRef::new(&dup)).unwrap();
        list.set_inline_search_max(0);

        let front_key = list.node_at(0).unwrap();
        let back_key = list.node_at(list.len() - 1).unwrap();

        // Membership only: either occurrence may win, and the winner may
        // vary across runs.
        for _ in 0..50 {
            let key = list.find(ValueRef::new(&dup)).unwrap();
            assert!(key == front_key || key == back_key);
            assert_eq!(list.value(key), ValueRef::new(&dup));
        }
    }

    #[test]
    fn null_needle_matches_stored_null() {
        let pool: Vec<u64> = (0..LONG as u64).collect();
        let mut list = RefList::new();

        for v in &pool[..LONG / 2] {
            list.try_push_back(ValueRef::new(v)).unwrap();
        }
        list.try_push_back(ValueRef::NULL).unwrap();
        for v in &pool[LONG / 2..] {
            list.try_push_back(ValueRef::new(v)).unwrap();
        }
        list.set_inline_search_max(0);

        let key = list.find(ValueRef::NULL).unwrap();
        assert!(list.value(key).is_null());
    }

    #[test]
    fn short_lists_stay_inline() {
        let pool: Vec<u64> = (0..10).collect();
        let mut list = RefList::new();
        for v in &pool {
            list.try_push_back(ValueRef::new(v)).unwrap();
        }

        // Default threshold: 10 <= 50, searched on the calling thread, and
        // the first occurrence wins deterministically.
        assert_eq!(list.inline_search_max(), crate::INLINE_SEARCH_MAX);
        let key = list.find(ValueRef::new(&pool[4])).unwrap();
        assert_eq!(list.value(key), ValueRef::new(&pool[4]));
    }

    #[test]
    fn search_does_not_disturb_the_chain() {
        let pool: Vec<u64> = (0..LONG as u64).collect();
        let list = forked_list(&pool);

        list.find(ValueRef::new(&pool[123]));

        for (i, v) in pool.iter().enumerate() {
            assert_eq!(list.at(i), ValueRef::new(v));
        }
        assert_eq!(list.len(), LONG);
    }
}
