//! Surface-wide pointer listeners.
//!
//! A drag routinely leaves the bounds of the control that started it, so the
//! control needs move and release events from the whole input surface while
//! the drag lasts. [`InputSurface`] is the registry of those surface-wide
//! listeners. Attaching returns a [`ListenerGuard`]; the listener stays
//! registered exactly as long as the guard lives, which makes detaching on
//! every exit path (release, focus loss, teardown) automatic.
//!
//! ```
//! use glide_ui::input_surface::InputSurface;
//!
//! let surface = InputSurface::new();
//! {
//!     let _guard = surface.attach("volume-slider");
//!     assert_eq!(surface.listener_count(), 1);
//! }
//! assert_eq!(surface.listener_count(), 0);
//! ```

use std::{fmt, sync::Arc};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};
use tracing::trace;

new_key_type! {
    /// Identifies one attached listener.
    struct ListenerKey;
}

#[derive(Default)]
struct SurfaceState {
    listeners: SlotMap<ListenerKey, &'static str>,
}

/// Shared registry of surface-wide pointer listeners.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct InputSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl InputSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener owned by `owner` and returns the guard keeping it
    /// attached.
    pub fn attach(&self, owner: &'static str) -> ListenerGuard {
        let key = self.state.lock().listeners.insert(owner);
        trace!(owner, ?key, "surface listener attached");
        ListenerGuard {
            key,
            state: Arc::clone(&self.state),
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }
}

impl fmt::Debug for InputSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSurface")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a surface listener attached until dropped.
pub struct ListenerGuard {
    key: ListenerKey,
    state: Arc<Mutex<SurfaceState>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(owner) = self.state.lock().listeners.remove(self.key) {
            trace!(owner, key = ?self.key, "surface listener detached");
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_detach_independently() {
        let surface = InputSurface::new();
        let a = surface.attach("a");
        let b = surface.attach("b");
        assert_eq!(surface.listener_count(), 2);
        assert_ne!(a.key, b.key);

        drop(a);
        assert_eq!(surface.listener_count(), 1);

        drop(b);
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn clones_share_one_registry() {
        let surface = InputSurface::new();
        let other = surface.clone();
        let _guard = other.attach("slider");
        assert_eq!(surface.listener_count(), 1);
    }
}
