//! Sequential walks over the node chain.
//!
//! Index lookups and identity scans share these two loops. The forked search
//! workers reuse [`scan`] as well, wiring its stop probe to their shared
//! result slot; single-threaded callers pass a probe that never fires.

use crate::arena::NodeArena;
use crate::node::NodeKey;
use crate::value::ValueRef;

/// Walk direction over the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Head to tail, following `next`.
    Forward,
    /// Tail to head, following `prev`.
    Backward,
}

impl Direction {
    #[inline]
    fn step(self, prev: NodeKey, next: NodeKey) -> NodeKey {
        match self {
            Direction::Forward => next,
            Direction::Backward => prev,
        }
    }
}

/// Advances `steps` links from `start`, returning the key reached.
///
/// Returns the sentinel if the chain runs out first.
pub(crate) fn advance<T>(
    arena: &NodeArena<'_, T>,
    start: NodeKey,
    dir: Direction,
    steps: usize,
) -> NodeKey {
    let mut cur = start;
    for _ in 0..steps {
        cur = match arena.get(cur) {
            Some(node) => dir.step(node.prev, node.next),
            None => return NodeKey::NONE,
        };
    }
    cur
}

/// Scans at most `limit` nodes from `start`, returning the first whose value
/// identity-equals `needle`.
///
/// `quit` is probed before each node; once it reports `true` the scan gives
/// up immediately and returns `None` — the cooperative early exit used by
/// racing workers.
pub(crate) fn scan<'a, T>(
    arena: &NodeArena<'a, T>,
    start: NodeKey,
    dir: Direction,
    limit: usize,
    needle: ValueRef<'a, T>,
    mut quit: impl FnMut() -> bool,
) -> Option<NodeKey> {
    let mut cur = start;
    let mut seen = 0;

    while seen < limit {
        if quit() {
            return None;
        }
        let node = arena.get(cur)?;
        if node.value == needle {
            return Some(cur);
        }
        cur = dir.step(node.prev, node.next);
        seen += 1;
    }

    None
}
