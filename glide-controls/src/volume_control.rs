//! The volume panel: a slider and a mute toggle over one [`ValueModel`].
//!
//! [`VolumeControl`] owns the model and is its only writer. Every change it
//! makes is written through to the host's [`PlayerVolume`]; changes the host
//! makes elsewhere arrive as [`PlayerEvent`]s and are read back without being
//! written again.
//!
//! ## Usage
//!
//! ```
//! use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
//! use glide_controls::{
//!     player::{MemoryPlayer, PlayerVolume, StaticSupport},
//!     volume_control::{VolumeControl, VolumeControlArgs},
//! };
//! use glide_ui::{InputSurface, Key, NamedKey};
//!
//! let player = Arc::new(MemoryPlayer::default());
//! let active = Arc::new(AtomicBool::new(false));
//! let flag = active.clone();
//! let args = VolumeControlArgs::default()
//!     .on_active_state_changed(move |is_active| flag.store(is_active, Ordering::SeqCst));
//!
//! let mut control = VolumeControl::new(
//!     args,
//!     player.clone(),
//!     &StaticSupport::default(),
//!     InputSurface::new(),
//!     None,
//! )
//! .unwrap();
//!
//! control.on_focus();
//! assert!(active.load(Ordering::SeqCst));
//! control.on_key(&Key::Named(NamedKey::ArrowDown));
//! assert_eq!(player.volume(), 0.9);
//! assert_eq!(control.accessibility_report().text_value, "90%");
//! ```

use std::sync::Arc;

use derive_setters::Setters;
use glide_ui::{
    AccessibilityNode, CallbackWith, CursorEvent, CursorEventContent, InputSurface, Instant, Key,
    KeyboardState, accesskit::Action,
};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    accessibility_report::{AccessibilityReport, AccessibilityReporter, report},
    active_state::ActiveScope,
    error::ConfigError,
    mute_toggle::{MuteToggle, VolumeLevel},
    player::{FeatureSupport, PlayerEvent, PlayerVolume},
    slider::{SliderArgs, SliderController},
    value_model::ValueModel,
};

/// Arguments for a [`VolumeControl`].
#[derive(Clone, Default, Setters)]
pub struct VolumeControlArgs {
    /// Configuration of the volume slider.
    pub slider: SliderArgs,
    /// Called with the effective value after every change.
    #[setters(skip)]
    pub on_value_changed: CallbackWith<f32>,
    /// Called when the slider becomes active or inactive.
    #[setters(skip)]
    pub on_active_state_changed: CallbackWith<bool>,
    /// Called when the accessibility report changes.
    #[setters(skip)]
    pub on_accessibility_report_changed: CallbackWith<AccessibilityReport>,
    /// Called when the panel is shown or hidden by a capability change.
    #[setters(skip)]
    pub on_visibility_changed: CallbackWith<bool>,
}

impl VolumeControlArgs {
    /// Sets the value-change handler.
    pub fn on_value_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.on_value_changed = CallbackWith::new(handler);
        self
    }

    /// Sets the active-state handler.
    pub fn on_active_state_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_active_state_changed = CallbackWith::new(handler);
        self
    }

    /// Sets the accessibility report handler.
    pub fn on_accessibility_report_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(AccessibilityReport) + Send + Sync + 'static,
    {
        self.on_accessibility_report_changed = CallbackWith::new(handler);
        self
    }

    /// Sets the visibility handler.
    pub fn on_visibility_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_visibility_changed = CallbackWith::new(handler);
        self
    }

    /// Checks that the arguments describe a usable control.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.slider.validate()
    }
}

/// Volume slider plus mute toggle, wired to a host player.
pub struct VolumeControl {
    args: VolumeControlArgs,
    player: Arc<dyn PlayerVolume>,
    model: ValueModel,
    panel: Arc<ActiveScope>,
    slider: SliderController,
    mute_toggle: MuteToggle,
    reporter: Arc<Mutex<AccessibilityReporter>>,
    visible: bool,
    mute_visible: bool,
}

impl VolumeControl {
    /// Builds the control from the player's current state.
    ///
    /// `parent` is the scope of the composite the panel lives in (typically
    /// the control bar), which is kept active while the panel is.
    pub fn new(
        args: VolumeControlArgs,
        player: Arc<dyn PlayerVolume>,
        support: &dyn FeatureSupport,
        surface: InputSurface,
        parent: Option<&Arc<ActiveScope>>,
    ) -> Result<Self, ConfigError> {
        args.validate()?;

        let mut model = ValueModel::new(player.volume()).muted(player.is_muted());
        model.set_last_non_zero_value(player.last_volume());

        let reporter = Arc::new(Mutex::new(AccessibilityReporter::primed(&model)));
        model.set_on_change(Self::fan_out(&args, Arc::clone(&reporter)));

        let panel = ActiveScope::child_or_root(parent, "volume-panel");
        let slider = SliderController::new(args.slider.clone(), surface, Some(&panel))?;
        slider.scope().on_active_changed(args.on_active_state_changed.clone());
        let mute_toggle = MuteToggle::new(Some(&panel));

        let visible = support.is_volume_control_supported();
        let mute_visible = support.is_mute_control_supported();
        debug!(visible, mute_visible, "volume control created");

        Ok(Self {
            args,
            player,
            model,
            panel,
            slider,
            mute_toggle,
            reporter,
            visible,
            mute_visible,
        })
    }

    fn fan_out(
        args: &VolumeControlArgs,
        reporter: Arc<Mutex<AccessibilityReporter>>,
    ) -> CallbackWith<f32> {
        let on_value_changed = args.on_value_changed.clone();
        let on_report = args.on_accessibility_report_changed.clone();
        CallbackWith::new(move |effective: f32| {
            on_value_changed.call(effective);
            let report = reporter.lock().observe_effective(effective);
            if let Some(report) = report {
                on_report.call(report);
            }
        })
    }

    /// Effective value: `0.0` while muted.
    pub fn value(&self) -> f32 {
        self.model.get()
    }

    /// The model behind the control.
    pub fn model(&self) -> &ValueModel {
        &self.model
    }

    /// Whether the model is muted.
    pub fn is_muted(&self) -> bool {
        self.model.is_muted()
    }

    /// Effective value as a rounded percentage.
    pub fn percentage(&self) -> u8 {
        self.model.percentage()
    }

    /// Coarse loudness level.
    pub fn volume_level(&self) -> VolumeLevel {
        self.mute_toggle.level(&self.model)
    }

    /// Current accessibility report.
    pub fn accessibility_report(&self) -> AccessibilityReport {
        report(&self.model)
    }

    /// The last report handed to the report handler, or the initial one.
    pub fn last_reported(&self) -> Option<AccessibilityReport> {
        self.reporter.lock().last().cloned()
    }

    /// Accessibility node of the slider.
    pub fn accessibility_node(&self) -> AccessibilityNode {
        let node = self
            .accessibility_report()
            .to_node(self.args.slider.accessibility_label.as_deref());
        if self.visible { node } else { node.hidden() }
    }

    /// Whether the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the mute toggle is shown.
    pub fn is_mute_visible(&self) -> bool {
        self.mute_visible
    }

    /// Whether the slider or the mute toggle is being interacted with.
    pub fn is_active(&self) -> bool {
        self.panel.is_active()
    }

    /// The panel's active scope, for sibling widgets deciding whether to
    /// auto-hide.
    pub fn panel_scope(&self) -> &Arc<ActiveScope> {
        &self.panel
    }

    /// The slider controller.
    pub fn slider(&self) -> &SliderController {
        &self.slider
    }

    /// When [`VolumeControl::tick`] next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slider.next_deadline()
    }

    /// Starts a slider gesture. See [`SliderController::on_press_start`].
    pub fn on_press_start(&mut self, event: &CursorEvent) -> bool {
        self.update(|slider, model| slider.on_press_start(event, model))
    }

    /// Feeds a drag position. See [`SliderController::on_move`].
    pub fn on_move(&mut self, event: &CursorEvent) -> bool {
        self.update(|slider, model| slider.on_move(event, model))
    }

    /// Ends a slider gesture. See [`SliderController::on_release`].
    pub fn on_release(&mut self) -> bool {
        self.update(|slider, model| slider.on_release(model))
    }

    /// Routes any pointer event to the matching handler.
    pub fn dispatch_cursor_event(&mut self, event: &CursorEvent) -> bool {
        match event.content {
            CursorEventContent::Pressed(_) => self.on_press_start(event),
            CursorEventContent::Moved => self.on_move(event),
            CursorEventContent::Released(_) => self.on_release(),
        }
    }

    /// Delivers due trailing drag positions.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.update(|slider, model| slider.tick(now, model))
    }

    /// Unmutes and raises the volume by one step.
    pub fn step_forward(&mut self) -> bool {
        self.update(|slider, model| slider.step_forward(model))
    }

    /// Unmutes and lowers the volume by one step.
    pub fn step_back(&mut self) -> bool {
        self.update(|slider, model| slider.step_back(model))
    }

    /// Handles a key press on the focused slider.
    pub fn on_key(&mut self, key: &Key) -> bool {
        self.update(|slider, model| slider.on_key(key, model))
    }

    /// Handles every queued key press in order. Returns how many were used.
    ///
    /// The queue only keeps the most recent presses, so hosts should drain it
    /// every frame; presses pushed out of a full queue never reach the slider.
    pub fn process_keys(&mut self, keyboard: &mut KeyboardState) -> usize {
        if keyboard.is_empty() {
            return 0;
        }
        keyboard
            .take_events()
            .into_iter()
            .filter(|key| self.on_key(key))
            .count()
    }

    /// Handles an action requested by an assistive technology.
    pub fn on_accessibility_action(&mut self, action: Action) -> bool {
        self.update(|slider, model| slider.on_accessibility_action(action, model))
    }

    /// The slider gained focus.
    pub fn on_focus(&mut self) {
        self.slider.on_focus();
    }

    /// The slider lost focus.
    pub fn on_blur(&mut self) {
        self.update(|slider, model| slider.on_blur(model));
    }

    /// Presses the mute toggle.
    pub fn toggle_mute(&mut self) {
        self.mute_toggle.press(&mut self.model);
        self.commit();
    }

    /// The mute toggle gained focus.
    pub fn on_mute_focus(&mut self) {
        self.mute_toggle.on_focus();
    }

    /// The mute toggle lost focus.
    pub fn on_mute_blur(&mut self) {
        self.mute_toggle.on_blur();
    }

    /// Reflects a change the host made to the player.
    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        trace!(?event, "player event");
        self.model.sync(
            self.player.volume(),
            self.player.is_muted(),
            self.player.last_volume(),
        );
    }

    /// Re-evaluates capability support, e.g. after the media source changed.
    pub fn refresh_support(&mut self, support: &dyn FeatureSupport) {
        self.mute_visible = support.is_mute_control_supported();
        let visible = support.is_volume_control_supported();
        if visible != self.visible {
            debug!(visible, "volume control visibility changed");
            self.visible = visible;
            self.args.on_visibility_changed.call(visible);
        }
    }

    /// Tears the control down mid-gesture: cancels pending drag positions,
    /// releases surface listeners and balances every active notification.
    pub fn teardown(&mut self) {
        self.slider.teardown(&mut self.model);
        self.mute_toggle.on_blur();
        self.commit();
    }

    fn update<R>(&mut self, f: impl FnOnce(&mut SliderController, &mut ValueModel) -> R) -> R {
        let result = f(&mut self.slider, &mut self.model);
        self.commit();
        result
    }

    /// Writes the model's state through to the player where it differs.
    fn commit(&self) {
        let player = &self.player;
        let model = &self.model;
        if player.volume() != model.value() {
            player.set_volume(model.value());
        }
        if player.is_muted() != model.is_muted() {
            player.set_muted(model.is_muted());
        }
        if player.last_volume() != model.last_non_zero_value() {
            player.set_last_volume(model.last_non_zero_value());
        }
    }
}

impl std::fmt::Debug for VolumeControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeControl")
            .field("value", &self.model.value())
            .field("muted", &self.model.is_muted())
            .field("visible", &self.visible)
            .field("slider", &self.slider)
            .finish()
    }
}
