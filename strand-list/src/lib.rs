//! A doubly-linked list for caller-owned values, compared by identity.
//!
//! This crate inverts the usual ownership model: the list never owns,
//! inspects, copies, or drops what it stores. Values go in as
//! [`ValueRef`] — nullable, non-owning handles whose equality is the
//! address, not the contents — and the caller keeps full ownership and
//! lifetime responsibility. What the list does own is its chain: nodes live
//! in an internal arena and are addressed by stable [`NodeKey`]s, so
//! removing from the middle is O(1) and a stale key degrades to a miss
//! instead of a dangling pointer.
//!
//! # Quick Start
//!
//! ```
//! use strand_list::{RefList, ValueRef};
//!
//! let values = [10u64, 20, 30, 40];
//! let mut list = RefList::new();
//!
//! for v in &values {
//!     list.try_push_back(ValueRef::new(v)).unwrap();
//! }
//!
//! // Indexed reads walk from the nearer end.
//! assert_eq!(list.at(1).get(), Some(&values[1]));
//!
//! // Search is by identity, never by contents.
//! let other_20 = 20u64;
//! assert_eq!(list.position(ValueRef::new(&values[1])), Some(1));
//! assert_eq!(list.position(ValueRef::new(&other_20)), None);
//! ```
//!
//! # Validity
//!
//! Every list carries a validity stamp checked on entry to every operation.
//! [`RefList::retire`] (and [`RefList::destroy`], which also nulls the
//! caller's handle) invalidates it; from then on each operation returns its
//! neutral value — `false`, `0`, `None`, a null handle — and touches
//! nothing. [`RefList::reset`] revives a retired list.
//!
//! # Forked search
//!
//! With the `concurrent-search` feature, [`RefList::find`] on a list larger
//! than its inline threshold (default 50) forks into two scan workers — one
//! forward from the head, one backward from the tail — racing into a single
//! write-once slot. Workers probe the slot every step and stop as soon as
//! the other side has published. For a value stored at several positions,
//! which occurrence wins is a race and may vary across calls. Mutation
//! remains single-threaded; the workers only read.
//!
//! # Feature Flags
//!
//! - `concurrent-search` - fork long value searches into two scan workers
//!   (adds a `T: Sync` bound on the search operations)
//! - `logging` (default) - trace-level diagnostics via `tracing`

#![warn(missing_docs)]

mod arena;
mod error;
mod list;
mod node;
mod seek;
mod value;

#[cfg(feature = "concurrent-search")]
mod forked;

pub use error::ListError;
pub use list::{Deque, Iter, RefList, INLINE_SEARCH_MAX};
pub use node::NodeKey;
pub use value::ValueRef;
