//! The scalar value behind a range control.
//!
//! [`ValueModel`] owns the stored value, the muted flag and the memory of the
//! last non-zero value. The value that is displayed and reported is the
//! *effective* value, `0.0` while muted and the stored value otherwise. It is
//! computed on demand by [`ValueModel::get`] and never stored separately.
//!
//! # Last non-zero memory
//!
//! Outside of an interaction, setting the value to exactly `0.0` from a
//! non-zero value records the previous value immediately. While an
//! interaction is open (between [`ValueModel::begin_interaction`] and
//! [`ValueModel::end_interaction`]) intermediate values are not recorded;
//! when the interaction ends at `0.0` the value it started from is recorded
//! instead.
//!
//! ```
//! use glide_controls::value_model::ValueModel;
//!
//! let mut model = ValueModel::new(0.6);
//! model.set(0.0);
//! assert_eq!(model.last_non_zero_value(), 0.6);
//! model.restore_last_volume();
//! assert_eq!(model.get(), 0.6);
//! ```

use glide_ui::CallbackWith;
use tracing::trace;

/// Remembered value before anything has been recorded.
pub const DEFAULT_LAST_NON_ZERO_VALUE: f32 = 1.0;

/// Clamps into `[0, 1]`, mapping NaN to `0.0`.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Percentage projection of an effective value, rounded to the nearest
/// integer.
pub fn percentage(effective: f32) -> u8 {
    (clamp_unit(effective) * 100.0).round() as u8
}

/// Stored value, muted flag and last non-zero memory of one control.
#[derive(Debug, Clone)]
pub struct ValueModel {
    value: f32,
    muted: bool,
    last_non_zero_value: f32,
    /// Stored value at the start of the open interaction, if any.
    interaction_start: Option<f32>,
    on_change: CallbackWith<f32>,
}

impl Default for ValueModel {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ValueModel {
    /// Creates an unmuted model holding `value` (clamped).
    pub fn new(value: f32) -> Self {
        Self {
            value: clamp_unit(value),
            muted: false,
            last_non_zero_value: DEFAULT_LAST_NON_ZERO_VALUE,
            interaction_start: None,
            on_change: CallbackWith::noop(),
        }
    }

    /// Sets the muted flag at construction time.
    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Sets the handler notified with the effective value after every change.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }

    /// Replaces the change handler with a shared callback.
    pub fn set_on_change(&mut self, on_change: CallbackWith<f32>) {
        self.on_change = on_change;
    }

    /// The effective value: `0.0` while muted, the stored value otherwise.
    pub fn get(&self) -> f32 {
        if self.muted { 0.0 } else { self.value }
    }

    /// The stored value, ignoring the muted flag.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whether the model is muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// The value restored by [`ValueModel::restore_last_volume`].
    pub fn last_non_zero_value(&self) -> f32 {
        self.last_non_zero_value
    }

    /// Effective value as a rounded percentage.
    pub fn percentage(&self) -> u8 {
        percentage(self.get())
    }

    /// Whether an interaction is open.
    pub fn is_interacting(&self) -> bool {
        self.interaction_start.is_some()
    }

    /// Stores `value` clamped to `[0, 1]`.
    ///
    /// Returns `true` and notifies the change handler when the stored value
    /// changed. Setting the current value again is silent.
    pub fn set(&mut self, value: f32) -> bool {
        let next = clamp_unit(value);
        if next == self.value {
            return false;
        }
        if next == 0.0 && self.interaction_start.is_none() {
            self.last_non_zero_value = self.value;
        }
        trace!(from = self.value, to = next, "value set");
        self.value = next;
        self.notify();
        true
    }

    /// Sets the muted flag without touching the stored value or the
    /// remembered value. Returns `true` when the flag changed.
    pub fn set_muted(&mut self, muted: bool) -> bool {
        if self.muted == muted {
            return false;
        }
        trace!(muted, "muted set");
        self.muted = muted;
        self.notify();
        true
    }

    /// Overrides the remembered value. Non-positive or NaN input is ignored;
    /// values above `1.0` are clamped.
    pub fn set_last_non_zero_value(&mut self, value: f32) {
        if value > 0.0 {
            self.last_non_zero_value = value.min(1.0);
        }
    }

    /// Restores the remembered value when the stored value is exactly `0.0`.
    /// Returns `true` if the value was restored.
    pub fn restore_last_volume(&mut self) -> bool {
        if self.value != 0.0 {
            return false;
        }
        let restored = self.last_non_zero_value;
        trace!(restored, "last value restored");
        self.value = restored;
        self.notify();
        true
    }

    /// Opens an interaction. Nested calls keep the original start value.
    pub fn begin_interaction(&mut self) {
        if self.interaction_start.is_none() {
            self.interaction_start = Some(self.value);
        }
    }

    /// Closes the open interaction, recording its start value when it ended
    /// at `0.0`. Does nothing if no interaction is open.
    pub fn end_interaction(&mut self) {
        let Some(start) = self.interaction_start.take() else {
            return;
        };
        if self.value == 0.0 && start > 0.0 {
            trace!(start, "interaction ended at zero");
            self.last_non_zero_value = start;
        }
    }

    /// Replaces the whole state with values reported by another writer.
    ///
    /// The remembered value is taken as-is (subject to the same validation as
    /// [`ValueModel::set_last_non_zero_value`]) because the other writer owns
    /// its own memory. Returns `true` and notifies when the stored value or
    /// the muted flag changed.
    pub fn sync(&mut self, value: f32, muted: bool, last_non_zero_value: f32) -> bool {
        self.set_last_non_zero_value(last_non_zero_value);
        let value = clamp_unit(value);
        if value == self.value && muted == self.muted {
            return false;
        }
        self.value = value;
        self.muted = muted;
        self.notify();
        true
    }

    fn notify(&self) {
        self.on_change.call(self.get());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    fn recording_model(value: f32) -> (ValueModel, Arc<Mutex<Vec<f32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let model = ValueModel::new(value).on_change(move |v| sink.lock().push(v));
        (model, seen)
    }

    #[test]
    fn set_clamps_out_of_range_values() {
        let mut model = ValueModel::new(0.5);
        model.set(-5.0);
        assert_eq!(model.get(), 0.0);
        model.set(5.0);
        assert_eq!(model.get(), 1.0);
        model.set(f32::NAN);
        assert_eq!(model.get(), 0.0);
        assert_eq!(ValueModel::new(7.0).value(), 1.0);
    }

    #[test]
    fn clamping_holds_for_a_sweep_of_inputs() {
        let mut model = ValueModel::default();
        for i in -200..=200 {
            model.set(i as f32 * 0.037);
            let v = model.get();
            assert!((0.0..=1.0).contains(&v), "{v} escaped the unit range");
        }
    }

    #[test]
    fn mute_projects_to_zero_without_touching_value() {
        let mut model = ValueModel::new(0.42);
        model.set_muted(true);
        assert_eq!(model.get(), 0.0);
        assert_eq!(model.value(), 0.42);
        assert_eq!(model.last_non_zero_value(), DEFAULT_LAST_NON_ZERO_VALUE);

        model.set_muted(false);
        assert_eq!(model.get(), 0.42);
    }

    #[test]
    fn setting_zero_remembers_previous_value() {
        let mut model = ValueModel::new(0.6);
        model.set(0.0);
        assert_eq!(model.last_non_zero_value(), 0.6);
        assert!(model.restore_last_volume());
        assert_eq!(model.get(), 0.6);
    }

    #[test]
    fn restore_is_a_no_op_above_zero() {
        let mut model = ValueModel::new(0.3);
        model.set_last_non_zero_value(0.9);
        assert!(!model.restore_last_volume());
        assert_eq!(model.get(), 0.3);
    }

    #[test]
    fn interaction_defers_memory_until_it_ends() {
        let mut model = ValueModel::new(0.7);
        model.begin_interaction();
        model.set(0.2);
        model.set(0.0);
        assert_eq!(model.last_non_zero_value(), DEFAULT_LAST_NON_ZERO_VALUE);

        model.end_interaction();
        assert_eq!(model.last_non_zero_value(), 0.7);
        assert!(!model.is_interacting());
    }

    #[test]
    fn interaction_ending_above_zero_keeps_memory() {
        let mut model = ValueModel::new(0.7);
        model.begin_interaction();
        model.set(0.0);
        model.set(0.4);
        model.end_interaction();
        assert_eq!(model.last_non_zero_value(), DEFAULT_LAST_NON_ZERO_VALUE);
    }

    #[test]
    fn notifies_effective_value_only_on_change() {
        let (mut model, seen) = recording_model(0.5);
        model.set(0.5);
        model.set(0.8);
        model.set_muted(true);
        model.set_muted(true);
        model.set(0.3);
        model.set_muted(false);
        assert_eq!(*seen.lock(), vec![0.8, 0.0, 0.0, 0.3]);
    }

    #[test]
    fn sync_adopts_external_state() {
        let (mut model, seen) = recording_model(0.5);
        assert!(model.sync(0.25, true, 0.75));
        assert_eq!(model.value(), 0.25);
        assert!(model.is_muted());
        assert_eq!(model.last_non_zero_value(), 0.75);
        assert!(!model.sync(0.25, true, 0.75));
        assert_eq!(*seen.lock(), vec![0.0]);
    }

    #[test]
    fn remembered_value_rejects_non_positive_input() {
        let mut model = ValueModel::new(0.5);
        model.set_last_non_zero_value(0.0);
        model.set_last_non_zero_value(-1.0);
        model.set_last_non_zero_value(f32::NAN);
        assert_eq!(model.last_non_zero_value(), DEFAULT_LAST_NON_ZERO_VALUE);
        model.set_last_non_zero_value(4.0);
        assert_eq!(model.last_non_zero_value(), 1.0);
    }

    #[test]
    fn percentage_rounds_effective_value() {
        let mut model = ValueModel::new(0.425);
        assert_eq!(model.percentage(), 43);
        model.set_muted(true);
        assert_eq!(model.percentage(), 0);
    }
}
