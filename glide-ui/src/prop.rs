//! Comparable callback handles.
//!
//! ## Usage
//!
//! Store notification handlers in control args and controllers without
//! forcing deep closure comparisons.

use std::{fmt, sync::Arc};

/// Stable, comparable slot handle for any shared callable trait object.
///
/// `Slot` compares by identity (`Arc::ptr_eq`).
pub struct Slot<F: ?Sized> {
    inner: Arc<F>,
}

impl<F: ?Sized> Slot<F> {
    /// Create a slot from a shared callable trait object.
    pub fn from_shared(handler: Arc<F>) -> Self {
        Self { inner: handler }
    }

    /// Read the current callable.
    pub fn shared(&self) -> Arc<F> {
        Arc::clone(&self.inner)
    }
}

impl<F: ?Sized> Clone for Slot<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ?Sized> PartialEq for Slot<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<F: ?Sized> Eq for Slot<F> {}

/// Stable, comparable callback handle for `Fn(T) -> R`.
///
/// This is what value-change and active-state handlers are stored as.
///
/// ```
/// use std::sync::{Arc, atomic::{AtomicU32, Ordering}};
/// use glide_ui::CallbackWith;
///
/// let seen = Arc::new(AtomicU32::new(0));
/// let sink = seen.clone();
/// let on_change = CallbackWith::new(move |v: f32| sink.store(v.to_bits(), Ordering::SeqCst));
/// on_change.call(0.5);
/// assert_eq!(f32::from_bits(seen.load(Ordering::SeqCst)), 0.5);
/// ```
pub struct CallbackWith<T, R = ()> {
    slot: Slot<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(handler)),
        }
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) -> R {
        let handler = self.slot.shared();
        handler(value)
    }
}

impl<T: 'static> CallbackWith<T> {
    /// A callback that ignores its argument.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }
}

impl<T: 'static> Default for CallbackWith<T> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallbackWith")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn callbacks_compare_by_identity() {
        let a: CallbackWith<bool> = CallbackWith::noop();
        let b = a.clone();
        let c: CallbackWith<bool> = CallbackWith::noop();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn callback_with_forwards_argument() {
        let total = Arc::new(AtomicUsize::new(0));
        let sink = total.clone();
        let cb: CallbackWith<usize> = CallbackWith::new(move |n| {
            sink.fetch_add(n, Ordering::SeqCst);
        });
        cb.call(3);
        cb.clone().call(4);
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }
}
