//! Error types.

use thiserror::Error;

/// Why a mutation was rejected.
///
/// Lookups never return errors; absence is `None` or a null handle. Errors
/// exist only where the caller handed over something to store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// The list's validity stamp did not match: the value was retired, or
    /// was never properly initialized. Nothing was touched.
    #[error("list is retired or was never initialized")]
    Invalid,

    /// Node storage could not grow (allocator refusal or key-space
    /// exhaustion). Size and links are unchanged.
    #[error("node storage exhausted")]
    NoSpace,
}
