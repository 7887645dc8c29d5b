//! Nullable, non-owning value handles compared by identity.

use std::fmt;
use std::ptr;

/// A nullable, non-owning reference to caller data.
///
/// The list stores these handles without ever inspecting, copying, or
/// dropping what they point at; callers keep ownership, and the `'a` borrow
/// keeps the data alive for as long as the handle can be stored.
///
/// Equality is **identity**: two handles are equal when they point at the
/// same object, or are both [`NULL`](ValueRef::NULL). Contents are never
/// compared, so callers may store duplicate-content values distinguished
/// only by address.
///
/// # Example
///
/// ```
/// use strand_list::ValueRef;
///
/// let a = 5u32;
/// let b = 5u32;
///
/// // Same contents, different objects: not equal.
/// assert_ne!(ValueRef::new(&a), ValueRef::new(&b));
/// assert_eq!(ValueRef::new(&a), ValueRef::new(&a));
///
/// // NULL is a first-class value.
/// assert_eq!(ValueRef::<u32>::NULL, ValueRef::NULL);
/// assert_ne!(ValueRef::new(&a), ValueRef::NULL);
/// ```
pub struct ValueRef<'a, T>(Option<&'a T>);

impl<'a, T> ValueRef<'a, T> {
    /// The null handle.
    pub const NULL: Self = Self(None);

    /// Wraps a borrow of caller data.
    #[inline]
    pub const fn new(value: &'a T) -> Self {
        Self(Some(value))
    }

    /// Returns the underlying borrow, or `None` for the null handle.
    #[inline]
    pub const fn get(self) -> Option<&'a T> {
        self.0
    }

    /// Returns `true` for the null handle.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0.is_none()
    }
}

impl<'a, T> From<&'a T> for ValueRef<'a, T> {
    #[inline]
    fn from(value: &'a T) -> Self {
        Self::new(value)
    }
}

// Manual impls: the handle is Copy regardless of T.
impl<T> Clone for ValueRef<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ValueRef<'_, T> {}

impl<T> Default for ValueRef<'_, T> {
    fn default() -> Self {
        Self::NULL
    }
}

impl<T> PartialEq for ValueRef<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => ptr::eq(a, b),
            _ => false,
        }
    }
}

impl<T> Eq for ValueRef<'_, T> {}

impl<T> fmt::Debug for ValueRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(r) => write!(f, "ValueRef({:p})", r),
            None => write!(f, "ValueRef(null)"),
        }
    }
}
