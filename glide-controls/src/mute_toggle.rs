//! Button toggling mute, with restoration of the remembered volume.

use std::sync::Arc;

use tracing::debug;

use crate::{active_state::ActiveScope, value_model::ValueModel};

/// Lowest volume a mute toggle restores to.
pub const MIN_RESTORE_VOLUME: f32 = 0.1;

/// Coarse loudness level, e.g. for picking an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VolumeLevel {
    /// Muted or at zero.
    Muted,
    /// Below one third.
    Low,
    /// Below two thirds.
    Medium,
    /// Two thirds and above.
    High,
}

impl VolumeLevel {
    /// Level of an effective value.
    pub fn from_effective(effective: f32) -> Self {
        if effective <= 0.0 {
            Self::Muted
        } else if effective < 0.33 {
            Self::Low
        } else if effective < 0.67 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Mute button sharing the panel's [`ActiveScope`] with its sibling slider.
#[derive(Debug)]
pub struct MuteToggle {
    scope: Arc<ActiveScope>,
    focused: bool,
}

impl MuteToggle {
    /// Creates a toggle whose focus counts toward `parent`.
    pub fn new(parent: Option<&Arc<ActiveScope>>) -> Self {
        Self {
            scope: ActiveScope::child_or_root(parent, "mute-toggle"),
            focused: false,
        }
    }

    /// Toggles mute.
    ///
    /// At zero volume pressing the toggle brings the sound back instead: the
    /// remembered value is restored (never below [`MIN_RESTORE_VOLUME`]) and
    /// the model is unmuted.
    pub fn press(&self, model: &mut ValueModel) {
        if model.value() == 0.0 {
            model.restore_last_volume();
            if model.value() < MIN_RESTORE_VOLUME {
                model.set(MIN_RESTORE_VOLUME);
            }
            model.set_muted(false);
            debug!(value = model.value(), "mute toggle restored volume");
        } else {
            let muted = !model.is_muted();
            model.set_muted(muted);
            debug!(muted, "mute toggled");
        }
    }

    /// Loudness level for the model's effective value.
    pub fn level(&self, model: &ValueModel) -> VolumeLevel {
        VolumeLevel::from_effective(model.get())
    }

    /// The toggle gained focus.
    pub fn on_focus(&mut self) {
        if !self.focused {
            self.focused = true;
            self.scope.notify_active();
        }
    }

    /// The toggle lost focus.
    pub fn on_blur(&mut self) {
        if self.focused {
            self.focused = false;
            self.scope.notify_inactive();
        }
    }

    /// Returns `true` if the toggle holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Drop for MuteToggle {
    fn drop(&mut self) {
        self.on_blur();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_toggles_mute_above_zero() {
        let toggle = MuteToggle::new(None);
        let mut model = ValueModel::new(0.5);
        toggle.press(&mut model);
        assert!(model.is_muted());
        assert_eq!(model.value(), 0.5);
        toggle.press(&mut model);
        assert!(!model.is_muted());
    }

    #[test]
    fn press_at_zero_restores_remembered_volume() {
        let toggle = MuteToggle::new(None);
        let mut model = ValueModel::new(0.6);
        model.set(0.0);
        model.set_muted(true);

        toggle.press(&mut model);
        assert!(!model.is_muted());
        assert_eq!(model.get(), 0.6);
    }

    #[test]
    fn restoration_has_a_floor() {
        let toggle = MuteToggle::new(None);
        let mut model = ValueModel::new(0.02);
        model.set(0.0);
        toggle.press(&mut model);
        assert_eq!(model.get(), MIN_RESTORE_VOLUME);
    }

    #[test]
    fn levels_follow_effective_value() {
        let toggle = MuteToggle::new(None);
        let mut model = ValueModel::new(0.2);
        assert_eq!(toggle.level(&model), VolumeLevel::Low);
        model.set(0.5);
        assert_eq!(toggle.level(&model), VolumeLevel::Medium);
        model.set(0.9);
        assert_eq!(toggle.level(&model), VolumeLevel::High);
        model.set_muted(true);
        assert_eq!(toggle.level(&model), VolumeLevel::Muted);
    }

    #[test]
    fn focus_counts_toward_parent() {
        let panel = ActiveScope::root("panel");
        let mut toggle = MuteToggle::new(Some(&panel));
        toggle.on_focus();
        toggle.on_focus();
        assert_eq!(panel.active_count(), 1);
        drop(toggle);
        assert!(!panel.is_active());
    }
}
