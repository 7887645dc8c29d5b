//! The list proper: validity stamp, endpoints, and every public operation.
//!
//! # Validity
//!
//! A `RefList` carries a stamp written at construction and checked on entry
//! to every operation. A retired value (see [`RefList::retire`]) fails the
//! check and every operation degrades to its neutral result — `false`, `0`,
//! `None`, or a null handle — with no side effects. Nothing past the stamp
//! is ever touched on a failed check.
//!
//! # Example
//!
//! ```
//! use strand_list::{RefList, ValueRef};
//!
//! let values = [1u32, 2, 3, 4];
//! let mut list = RefList::new();
//!
//! for v in &values {
//!     list.try_push_back(ValueRef::new(v)).unwrap();
//! }
//!
//! assert_eq!(list.len(), 4);
//! assert_eq!(list.at(1).get(), Some(&values[1]));
//!
//! list.remove_at(0);
//! assert_eq!(list.position(ValueRef::new(&values[2])), Some(1));
//! ```

use std::fmt;

#[cfg(feature = "logging")]
use tracing::trace;

use crate::arena::NodeArena;
use crate::error::ListError;
use crate::node::{Node, NodeKey};
use crate::seek::{self, Direction};
use crate::value::ValueRef;

#[cfg(feature = "concurrent-search")]
use crate::forked;

/// Stamp marking a constructed, live list.
const STAMP: u32 = u32::from_le_bytes(*b"List");

/// Largest list still value-searched on the calling thread.
///
/// Only consulted by `concurrent-search` builds; see
/// [`RefList::set_inline_search_max`].
pub const INLINE_SEARCH_MAX: usize = 50;

/// A doubly-linked list of caller-owned values.
///
/// Values are stored as [`ValueRef`] handles — nullable, non-owning, and
/// compared by identity. Nodes live in an arena owned by the list and are
/// addressed by stable [`NodeKey`]s, so removal from anywhere is O(1) and a
/// stale key is a miss, not a fault.
///
/// Mutation is single-threaded by contract (`&mut self`); with the
/// `concurrent-search` feature, long value searches fork into two read-only
/// scan workers.
pub struct RefList<'a, T> {
    stamp: u32,
    len: usize,
    head: NodeKey,
    tail: NodeKey,
    arena: NodeArena<'a, T>,
    inline_search_max: usize,
}

impl<'a, T> RefList<'a, T> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            stamp: STAMP,
            len: 0,
            head: NodeKey::NONE,
            tail: NodeKey::NONE,
            arena: NodeArena::new(),
            inline_search_max: INLINE_SEARCH_MAX,
        }
    }

    /// Creates an empty list with room for `capacity` nodes pre-allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            ..Self::new()
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Returns `true` while the validity stamp is intact.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.stamp == STAMP
    }

    /// Idempotent re-initialization.
    ///
    /// A live list is cleared in place; a retired one is rebuilt from
    /// scratch, stamp rewritten. Either way the result is a valid, empty
    /// list.
    pub fn reset(&mut self) {
        if self.is_valid() {
            self.clear();
        } else {
            *self = Self::new();
        }
    }

    /// Tears the list down in place.
    ///
    /// Drops every node (never the referenced values) and invalidates the
    /// stamp: every later operation on this value reports its neutral
    /// result until [`reset`](RefList::reset) revives it. Idempotent.
    pub fn retire(&mut self) {
        if !self.is_valid() {
            return;
        }

        #[cfg(feature = "logging")]
        trace!(len = self.len, "retiring list");

        self.clear();
        self.arena.clear();
        self.stamp = 0;
    }

    /// Retires and frees the list behind `handle`, leaving `None`.
    ///
    /// Safe no-op on an already-`None` handle.
    ///
    /// # Example
    ///
    /// ```
    /// use strand_list::RefList;
    ///
    /// let mut handle = Some(Box::new(RefList::<u32>::new()));
    /// RefList::destroy(&mut handle);
    /// assert!(handle.is_none());
    ///
    /// RefList::destroy(&mut handle); // Still fine.
    /// ```
    pub fn destroy(handle: &mut Option<Box<Self>>) {
        if let Some(list) = handle.as_deref_mut() {
            list.retire();
        }
        *handle = None;
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Returns the number of stored values, `0` for a retired list.
    #[inline]
    pub fn len(&self) -> usize {
        if self.is_valid() {
            self.len
        } else {
            0
        }
    }

    /// Returns `true` if the list is valid and holds no values.
    ///
    /// On a retired list this is `false` — the neutral bool, not an answer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_valid() && self.len == 0
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Appends a value, returning the new node's key.
    ///
    /// The value is stored as-is; [`ValueRef::NULL`] is a legal value. A
    /// failed push leaves size and links unchanged.
    ///
    /// # Errors
    ///
    /// [`ListError::Invalid`] on a retired list, [`ListError::NoSpace`] when
    /// node storage cannot grow.
    pub fn try_push_back(&mut self, value: ValueRef<'a, T>) -> Result<NodeKey, ListError> {
        if !self.is_valid() {
            return Err(ListError::Invalid);
        }

        let mut node = Node::new(value);
        node.prev = self.tail;
        let key = self.arena.try_insert(node).ok_or(ListError::NoSpace)?;

        match self.arena.get_mut(self.tail) {
            Some(tail) => tail.next = key,
            None => self.head = key,
        }

        self.tail = key;
        self.len += 1;
        Ok(key)
    }

    /// Detaches and returns the last value.
    ///
    /// `None` on an empty or retired list. `Some(ValueRef::NULL)` is a real
    /// pop of a stored null, not absence.
    pub fn pop_back(&mut self) -> Option<ValueRef<'a, T>> {
        if !self.is_valid() {
            return None;
        }

        let node = self.arena.remove(self.tail)?;

        self.tail = node.prev;
        match self.arena.get_mut(node.prev) {
            Some(prev) => prev.next = NodeKey::NONE,
            None => self.head = NodeKey::NONE,
        }

        self.len -= 1;
        Some(node.value)
    }

    /// Unlinks and frees the node at `key` in O(1).
    ///
    /// Returns `false` for the sentinel, a stale key, or a retired list.
    pub fn remove(&mut self, key: NodeKey) -> bool {
        if !self.is_valid() {
            return false;
        }

        let node = match self.arena.remove(key) {
            Some(node) => node,
            None => return false,
        };

        match self.arena.get_mut(node.prev) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match self.arena.get_mut(node.next) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }

        self.len -= 1;
        true
    }

    /// Removes the node at the given position; `false` if out of range.
    pub fn remove_at(&mut self, index: usize) -> bool {
        let located = self.node_at(index);
        self.remove_located(located)
    }

    /// Overwrites the value at `index`.
    ///
    /// No-op (`false`) if the index is out of range or `value` is null;
    /// storing null is the business of [`try_push_back`], not of an
    /// in-place overwrite.
    ///
    /// [`try_push_back`]: RefList::try_push_back
    pub fn set_at(&mut self, index: usize, value: ValueRef<'a, T>) -> bool {
        if value.is_null() {
            return false;
        }

        let key = match self.node_at(index) {
            Some(key) => key,
            None => return false,
        };
        match self.arena.get_mut(key) {
            Some(node) => {
                node.value = value;
                true
            }
            None => false,
        }
    }

    /// Pops the tail until the list is empty; O(len).
    ///
    /// Neutral no-op on a retired list.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns the key of the node at the given zero-based position.
    ///
    /// Walks from whichever endpoint is closer — never more than `len / 2`
    /// links; equal distances walk from the head. `None` when
    /// `index >= len`.
    pub fn node_at(&self, index: usize) -> Option<NodeKey> {
        if !self.is_valid() || index >= self.len {
            return None;
        }

        let key = if self.len - index >= index {
            seek::advance(&self.arena, self.head, Direction::Forward, index)
        } else {
            seek::advance(
                &self.arena,
                self.tail,
                Direction::Backward,
                self.len - 1 - index,
            )
        };

        if key.is_none() {
            None
        } else {
            Some(key)
        }
    }

    /// Returns the value at the given position, or null when out of range.
    #[inline]
    pub fn at(&self, index: usize) -> ValueRef<'a, T> {
        match self.node_at(index) {
            Some(key) => self.value(key),
            None => ValueRef::NULL,
        }
    }

    /// Returns the first value, or null on an empty or retired list.
    #[inline]
    pub fn front(&self) -> ValueRef<'a, T> {
        if !self.is_valid() {
            return ValueRef::NULL;
        }
        match self.arena.get(self.head) {
            Some(node) => node.value,
            None => ValueRef::NULL,
        }
    }

    /// Returns the last value, or null on an empty or retired list.
    #[inline]
    pub fn back(&self) -> ValueRef<'a, T> {
        if !self.is_valid() {
            return ValueRef::NULL;
        }
        match self.arena.get(self.tail) {
            Some(node) => node.value,
            None => ValueRef::NULL,
        }
    }

    /// Reads the value held by the node at `key`; null for stale keys.
    #[inline]
    pub fn value(&self, key: NodeKey) -> ValueRef<'a, T> {
        if !self.is_valid() {
            return ValueRef::NULL;
        }
        match self.arena.get(key) {
            Some(node) => node.value,
            None => ValueRef::NULL,
        }
    }

    /// Returns the zero-based position of the first node whose value
    /// identity-equals `value`.
    ///
    /// Always a head-to-tail scan. Searching for null is legal and matches a
    /// node explicitly holding null.
    pub fn position(&self, value: ValueRef<'a, T>) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }

        let mut cur = self.head;
        let mut at = 0;
        while let Some(node) = self.arena.get(cur) {
            if node.value == value {
                return Some(at);
            }
            cur = node.next;
            at += 1;
        }
        None
    }

    /// Returns an iterator over values, front to back.
    ///
    /// Empty on a retired list.
    pub fn iter(&self) -> Iter<'_, 'a, T> {
        let (front, back) = if self.is_valid() {
            (self.head, self.tail)
        } else {
            (NodeKey::NONE, NodeKey::NONE)
        };
        Iter {
            arena: &self.arena,
            front,
            back,
        }
    }

    // ========================================================================
    // Search configuration
    // ========================================================================

    /// The largest list still value-searched on the calling thread.
    #[inline]
    pub fn inline_search_max(&self) -> usize {
        self.inline_search_max
    }

    /// Sets the size above which `concurrent-search` builds fork value
    /// searches. Inert in single-threaded builds.
    #[inline]
    pub fn set_inline_search_max(&mut self, max: usize) {
        self.inline_search_max = max;
    }

    // ========================================================================
    // Shared search plumbing
    // ========================================================================

    fn find_linear(&self, value: ValueRef<'a, T>) -> Option<NodeKey> {
        seek::scan(
            &self.arena,
            self.head,
            Direction::Forward,
            usize::MAX,
            value,
            || false,
        )
    }

    fn remove_located(&mut self, located: Option<NodeKey>) -> bool {
        match located {
            Some(key) => self.remove(key),
            None => false,
        }
    }

    fn replace_located(&mut self, located: Option<NodeKey>, value: ValueRef<'a, T>) -> bool {
        let key = match located {
            Some(key) => key,
            None => return false,
        };
        match self.arena.get_mut(key) {
            Some(node) => {
                node.value = value;
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Value search - single-threaded builds
// =============================================================================

#[cfg(not(feature = "concurrent-search"))]
impl<'a, T> RefList<'a, T> {
    /// Returns the first node (head to tail) whose value identity-equals
    /// `value`. Searching for null matches a node explicitly holding null.
    pub fn find(&self, value: ValueRef<'a, T>) -> Option<NodeKey> {
        if !self.is_valid() {
            return None;
        }
        self.find_linear(value)
    }

    /// Removes the first node whose value identity-equals `value`.
    ///
    /// No-op (`false`) when absent or when `value` is null.
    pub fn remove_by_value(&mut self, value: ValueRef<'a, T>) -> bool {
        if !self.is_valid() || value.is_null() {
            return false;
        }
        let located = self.find_linear(value);
        self.remove_located(located)
    }

    /// Overwrites the value of the first node identity-matching `old`.
    ///
    /// Returns `false` when `old` is absent or either argument is null.
    pub fn replace(&mut self, old: ValueRef<'a, T>, new: ValueRef<'a, T>) -> bool {
        if !self.is_valid() || old.is_null() || new.is_null() {
            return false;
        }
        let located = self.find_linear(old);
        self.replace_located(located, new)
    }
}

// =============================================================================
// Value search - concurrent builds
//
// Identical surface, but the search may fork. The workers observe `&T`
// borrows from another thread, hence `T: Sync`.
// =============================================================================

#[cfg(feature = "concurrent-search")]
impl<'a, T: Sync> RefList<'a, T> {
    /// Returns a node whose value identity-equals `value`.
    ///
    /// Lists no longer than [`inline_search_max`] are scanned head to tail
    /// on the calling thread and yield the first match. Longer lists fork
    /// into two workers, one from each end; when the value occurs more than
    /// once, which occurrence wins is a race and may vary across calls.
    /// Searching for null matches a node explicitly holding null.
    ///
    /// [`inline_search_max`]: RefList::inline_search_max
    pub fn find(&self, value: ValueRef<'a, T>) -> Option<NodeKey> {
        if !self.is_valid() {
            return None;
        }
        if self.len <= self.inline_search_max {
            return self.find_linear(value);
        }
        forked::search(&self.arena, self.head, self.tail, self.len, value)
    }

    /// Removes a node whose value identity-equals `value` (located as by
    /// [`find`](RefList::find)).
    ///
    /// No-op (`false`) when absent or when `value` is null.
    pub fn remove_by_value(&mut self, value: ValueRef<'a, T>) -> bool {
        if !self.is_valid() || value.is_null() {
            return false;
        }
        let located = self.find(value);
        self.remove_located(located)
    }

    /// Overwrites the value of a node identity-matching `old` (located as by
    /// [`find`](RefList::find)).
    ///
    /// Returns `false` when `old` is absent or either argument is null.
    pub fn replace(&mut self, old: ValueRef<'a, T>, new: ValueRef<'a, T>) -> bool {
        if !self.is_valid() || old.is_null() || new.is_null() {
            return false;
        }
        let located = self.find(old);
        self.replace_located(located, new)
    }
}

impl<T> Default for RefList<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RefList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefList")
            .field("len", &self.len)
            .field("valid", &self.is_valid())
            .finish()
    }
}

// =============================================================================
// Deque - the bound operation handles
// =============================================================================

/// The list's operations as a capability, detached from the concrete type.
///
/// Implemented once, by [`RefList`]; call sites that only need the core
/// operations can hold `&mut dyn Deque` and stay ignorant of the container.
///
/// # Example
///
/// ```
/// use strand_list::{Deque, RefList, ValueRef};
///
/// fn drain<'a>(deque: &mut dyn Deque<'a, u32>) {
///     while !deque.is_empty() {
///         deque.pop_back();
///     }
/// }
///
/// let v = 1u32;
/// let mut list = RefList::new();
/// list.try_push_back(ValueRef::new(&v)).unwrap();
///
/// drain(&mut list);
/// assert!(list.is_empty());
/// ```
pub trait Deque<'a, T> {
    /// First value, or null when empty.
    fn front(&self) -> ValueRef<'a, T>;
    /// Last value, or null when empty.
    fn back(&self) -> ValueRef<'a, T>;
    /// Appends a value; `false` on failure.
    fn push_back(&mut self, value: ValueRef<'a, T>) -> bool;
    /// Drops the last value, if any.
    fn pop_back(&mut self);
    /// `true` when the container is valid and empty.
    fn is_empty(&self) -> bool;
    /// Removes every value.
    fn clear(&mut self);
    /// Value at a zero-based position, or null when out of range.
    fn at(&self, index: usize) -> ValueRef<'a, T>;
}

impl<'a, T> Deque<'a, T> for RefList<'a, T> {
    fn front(&self) -> ValueRef<'a, T> {
        RefList::front(self)
    }

    fn back(&self) -> ValueRef<'a, T> {
        RefList::back(self)
    }

    fn push_back(&mut self, value: ValueRef<'a, T>) -> bool {
        self.try_push_back(value).is_ok()
    }

    fn pop_back(&mut self) {
        RefList::pop_back(self);
    }

    fn is_empty(&self) -> bool {
        RefList::is_empty(self)
    }

    fn clear(&mut self) {
        RefList::clear(self);
    }

    fn at(&self, index: usize) -> ValueRef<'a, T> {
        RefList::at(self, index)
    }
}

// =============================================================================
// Iteration
// =============================================================================

/// Iterator over values, front to back.
pub struct Iter<'l, 'a, T> {
    arena: &'l NodeArena<'a, T>,
    front: NodeKey,
    back: NodeKey,
}

impl<'l, 'a, T> Iterator for Iter<'l, 'a, T> {
    type Item = ValueRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.front)?;

        // Check if the ends met in the middle.
        if self.front == self.back {
            self.front = NodeKey::NONE;
            self.back = NodeKey::NONE;
        } else {
            self.front = node.next;
        }

        Some(node.value)
    }
}

impl<'l, 'a, T> DoubleEndedIterator for Iter<'l, 'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.back)?;

        if self.front == self.back {
            self.front = NodeKey::NONE;
            self.back = NodeKey::NONE;
        } else {
            self.back = node.prev;
        }

        Some(node.value)
    }
}
