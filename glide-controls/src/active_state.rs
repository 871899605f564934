//! Propagation of "being adjusted" state through nested controls.
//!
//! Every composite level owns an [`ActiveScope`]. Children report
//! [`ActiveScope::notify_active`] / [`ActiveScope::notify_inactive`] and the
//! scope counts outstanding activations. The active marker is asserted while
//! the count is above zero, and only the `0 → 1` and `1 → 0` edges are
//! forwarded to the parent scope, so every level sees a balanced stream no
//! matter how many children activate independently (focus and drag on the
//! same slider, or a slider and a mute button in the same panel).
//!
//! A scope refuses to hide itself while it is active.
//!
//! ```
//! use glide_controls::active_state::ActiveScope;
//!
//! let bar = ActiveScope::root("control-bar");
//! let panel = ActiveScope::child(&bar, "volume-panel");
//!
//! panel.notify_active();
//! panel.notify_active();
//! assert_eq!(panel.active_count(), 2);
//! assert_eq!(bar.active_count(), 1);
//! assert!(!bar.try_hide());
//!
//! panel.notify_inactive();
//! assert!(bar.is_active());
//! panel.notify_inactive();
//! assert!(!bar.is_active());
//! assert!(bar.try_hide());
//! ```

use std::{fmt, sync::Arc};

use glide_ui::CallbackWith;
use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::{debug, warn};

#[derive(Default)]
struct ScopeState {
    active_count: usize,
    hidden: bool,
    listeners: SmallVec<[CallbackWith<bool>; 2]>,
}

/// Reference-counted active flag of one composite level.
pub struct ActiveScope {
    name: &'static str,
    parent: Option<Arc<ActiveScope>>,
    state: Mutex<ScopeState>,
}

impl ActiveScope {
    /// Creates a scope without a parent.
    pub fn root(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            parent: None,
            state: Mutex::new(ScopeState::default()),
        })
    }

    /// Creates a scope forwarding its edges to `parent`.
    pub fn child(parent: &Arc<ActiveScope>, name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            parent: Some(Arc::clone(parent)),
            state: Mutex::new(ScopeState::default()),
        })
    }

    /// Creates a child of `parent` when given, a root otherwise.
    pub fn child_or_root(parent: Option<&Arc<ActiveScope>>, name: &'static str) -> Arc<Self> {
        match parent {
            Some(parent) => Self::child(parent, name),
            None => Self::root(name),
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The scope edges are forwarded to.
    pub fn parent(&self) -> Option<&Arc<ActiveScope>> {
        self.parent.as_ref()
    }

    /// Registers a handler called with `true` on the `0 → 1` edge and with
    /// `false` on the `1 → 0` edge.
    pub fn on_active_changed(&self, handler: CallbackWith<bool>) {
        self.state.lock().listeners.push(handler);
    }

    /// Whether at least one activation is outstanding.
    pub fn is_active(&self) -> bool {
        self.state.lock().active_count > 0
    }

    /// Number of outstanding activations.
    pub fn active_count(&self) -> usize {
        self.state.lock().active_count
    }

    /// Records one activation.
    pub fn notify_active(&self) {
        let listeners = {
            let mut state = self.state.lock();
            state.active_count += 1;
            if state.active_count != 1 {
                return;
            }
            // An active scope is always shown.
            state.hidden = false;
            state.listeners.clone()
        };
        debug!(scope = self.name, "scope became active");
        self.dispatch(&listeners, true);
        if let Some(parent) = &self.parent {
            parent.notify_active();
        }
    }

    /// Releases one activation. A release without a matching activation is
    /// ignored.
    pub fn notify_inactive(&self) {
        let listeners = {
            let mut state = self.state.lock();
            if state.active_count == 0 {
                warn!(scope = self.name, "inactive notification without a matching activation");
                return;
            }
            state.active_count -= 1;
            if state.active_count != 0 {
                return;
            }
            state.listeners.clone()
        };
        debug!(scope = self.name, "scope became inactive");
        self.dispatch(&listeners, false);
        if let Some(parent) = &self.parent {
            parent.notify_inactive();
        }
    }

    /// Hides the scope unless it is active. Returns whether it is hidden
    /// afterwards.
    pub fn try_hide(&self) -> bool {
        let mut state = self.state.lock();
        if state.active_count > 0 {
            debug!(scope = self.name, count = state.active_count, "hide refused while active");
            return false;
        }
        state.hidden = true;
        true
    }

    /// Shows the scope.
    pub fn show(&self) {
        self.state.lock().hidden = false;
    }

    /// Whether the last [`ActiveScope::try_hide`] succeeded and nothing has
    /// shown the scope since.
    pub fn is_hidden(&self) -> bool {
        self.state.lock().hidden
    }

    fn dispatch(&self, listeners: &[CallbackWith<bool>], active: bool) {
        for listener in listeners {
            listener.call(active);
        }
    }
}

impl fmt::Debug for ActiveScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveScope")
            .field("name", &self.name)
            .field("active_count", &self.active_count())
            .field("parent", &self.parent.as_ref().map(|parent| parent.name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(scope: &ActiveScope) -> Arc<Mutex<Vec<bool>>> {
        let edges = Arc::new(Mutex::new(Vec::new()));
        let sink = edges.clone();
        scope.on_active_changed(CallbackWith::new(move |active: bool| sink.lock().push(active)));
        edges
    }

    #[test]
    fn only_edges_reach_listeners_and_parents() {
        let root = ActiveScope::root("root");
        let child = ActiveScope::child(&root, "child");
        let root_edges = recorder(&root);
        let child_edges = recorder(&child);

        child.notify_active();
        child.notify_active();
        child.notify_inactive();
        assert_eq!(root.active_count(), 1);
        child.notify_inactive();

        assert_eq!(*child_edges.lock(), vec![true, false]);
        assert_eq!(*root_edges.lock(), vec![true, false]);
    }

    #[test]
    fn siblings_keep_parent_active_until_both_finish() {
        let panel = ActiveScope::root("panel");
        let slider = ActiveScope::child(&panel, "slider");
        let mute = ActiveScope::child(&panel, "mute");

        slider.notify_active();
        mute.notify_active();
        assert_eq!(panel.active_count(), 2);

        slider.notify_inactive();
        assert!(panel.is_active());
        assert!(!panel.try_hide());

        mute.notify_inactive();
        assert!(!panel.is_active());
        assert!(panel.try_hide());
        assert!(panel.is_hidden());
    }

    #[test]
    fn edges_chain_through_several_levels() {
        let bar = ActiveScope::root("bar");
        let panel = ActiveScope::child(&bar, "panel");
        let slider = ActiveScope::child(&panel, "slider");
        let bar_edges = recorder(&bar);

        slider.notify_active();
        assert!(bar.is_active());
        slider.notify_inactive();
        assert_eq!(*bar_edges.lock(), vec![true, false]);
    }

    #[test]
    fn unmatched_inactive_is_ignored() {
        let scope = ActiveScope::root("scope");
        let edges = recorder(&scope);
        scope.notify_inactive();
        assert_eq!(scope.active_count(), 0);
        assert!(edges.lock().is_empty());
    }

    #[test]
    fn activation_shows_a_hidden_scope() {
        let scope = ActiveScope::root("scope");
        assert!(scope.try_hide());
        scope.notify_active();
        assert!(!scope.is_hidden());
        scope.notify_inactive();
        assert!(!scope.is_hidden());
        scope.show();
        assert!(!scope.is_hidden());
    }
}
