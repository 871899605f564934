//! Press/drag/release state machine of a continuous-value slider.
//!
//! ## Usage
//!
//! Feed pointer, key, focus and accessibility input into a
//! [`SliderController`] together with the [`ValueModel`] it adjusts, and pump
//! [`SliderController::tick`] from the frame loop so throttled drag positions
//! are delivered.
//!
//! ```
//! use std::time::Duration;
//! use glide_controls::{
//!     slider::{SliderArgs, SliderController},
//!     value_model::ValueModel,
//! };
//! use glide_ui::{
//!     CursorEvent, InputSurface, Instant, PointerSource, PressKeyEventType, PxPosition,
//! };
//!
//! let surface = InputSurface::new();
//! let mut slider = SliderController::new(SliderArgs::default(), surface.clone(), None).unwrap();
//! let mut model = ValueModel::new(0.5);
//! let mouse = PointerSource::Mouse(PressKeyEventType::Left);
//! let now = Instant::now();
//!
//! let press = CursorEvent::pressed(now, PxPosition::from_raw(30, 0), mouse);
//! slider.on_press_start(&press, &mut model);
//! assert_eq!(model.get(), 0.3);
//! assert_eq!(surface.listener_count(), 1);
//!
//! let drag = CursorEvent::moved(now + Duration::from_millis(40), PxPosition::from_raw(80, 0));
//! slider.on_move(&drag, &mut model);
//! assert_eq!(model.get(), 0.8);
//!
//! slider.on_release(&mut model);
//! assert_eq!(model.get(), 0.8);
//! assert_eq!(surface.listener_count(), 0);
//! ```

use std::{sync::Arc, time::Duration};

use derive_setters::Setters;
use glide_ui::{
    CallbackWith, CursorEvent, CursorEventContent, InputSurface, Instant, Key, ListenerGuard,
    PxPosition, accesskit::Action,
};
use tracing::{debug, trace};

use crate::{
    active_state::ActiveScope,
    error::ConfigError,
    gesture_sampler::{DEFAULT_SAMPLE_INTERVAL, GestureSampler, MAX_SAMPLE_INTERVAL},
    value_model::ValueModel,
};

use interaction::{
    StepAction, accessibility_action, cursor_progress, key_action, round_step, snap_fraction,
};

pub use layout::{SliderOrientation, TrackLayout};

mod interaction;
mod layout;

/// Default keyboard step.
pub const DEFAULT_STEP: f32 = 0.1;

/// Owner name of the surface listener held during a drag.
const SURFACE_LISTENER: &str = "slider";

/// Arguments for a [`SliderController`].
#[derive(Clone, Setters)]
pub struct SliderArgs {
    /// Axis of the track.
    pub orientation: SliderOrientation,
    /// Track geometry used to project pointer positions.
    pub track: TrackLayout,
    /// Amount added or removed by one keyboard step.
    pub step: f32,
    /// Number of discrete stops between 0.0 and 1.0 for pointer input.
    ///
    /// When greater than 0, pointer values snap to `steps + 2` evenly spaced
    /// positions (including both ends).
    pub steps: usize,
    /// Minimum interval between processed drag positions.
    pub sample_interval: Duration,
    /// Called with `true` when the slider becomes active (pressed, dragged or
    /// focused) and with `false` when it no longer is.
    #[setters(skip)]
    pub on_active_change: CallbackWith<bool>,
    /// Optional accessibility label read by assistive technologies.
    #[setters(strip_option, into)]
    pub accessibility_label: Option<String>,
}

impl SliderArgs {
    /// Sets the active-change handler.
    pub fn on_active_change<F>(mut self, on_active_change: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_active_change = CallbackWith::new(on_active_change);
        self
    }

    /// Sets the active-change handler using a shared callback.
    pub fn on_active_change_shared(
        mut self,
        on_active_change: impl Into<CallbackWith<bool>>,
    ) -> Self {
        self.on_active_change = on_active_change.into();
        self
    }

    /// Checks that the arguments describe a usable slider.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.step.is_finite() || self.step <= 0.0 || self.step > 1.0 {
            return Err(ConfigError::InvalidStep(self.step));
        }
        if self.sample_interval.is_zero() || self.sample_interval > MAX_SAMPLE_INTERVAL {
            return Err(ConfigError::InvalidSampleInterval(self.sample_interval));
        }
        self.track.validate()
    }
}

impl Default for SliderArgs {
    fn default() -> Self {
        Self {
            orientation: SliderOrientation::default(),
            track: TrackLayout::default(),
            step: DEFAULT_STEP,
            steps: 0,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            on_active_change: CallbackWith::noop(),
            accessibility_label: None,
        }
    }
}

/// Whether a pointer gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No gesture; no surface listener is held.
    #[default]
    Idle,
    /// Pressed or dragging; exactly one surface listener is held.
    Active,
}

/// Controller for a continuous-value slider.
pub struct SliderController {
    args: SliderArgs,
    state: GestureState,
    sampler: GestureSampler,
    surface: InputSurface,
    listener: Option<ListenerGuard>,
    scope: Arc<ActiveScope>,
    focused: bool,
}

impl SliderController {
    /// Creates an idle controller.
    ///
    /// The controller's active scope forwards its edges to `parent` when
    /// given.
    pub fn new(
        args: SliderArgs,
        surface: InputSurface,
        parent: Option<&Arc<ActiveScope>>,
    ) -> Result<Self, ConfigError> {
        args.validate()?;
        let scope = ActiveScope::child_or_root(parent, "slider");
        scope.on_active_changed(args.on_active_change.clone());
        Ok(Self {
            sampler: GestureSampler::new(args.sample_interval),
            args,
            state: GestureState::Idle,
            surface,
            listener: None,
            scope,
            focused: false,
        })
    }

    /// The arguments the controller was built from.
    pub fn args(&self) -> &SliderArgs {
        &self.args
    }

    /// Current gesture state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Returns `true` while a pointer gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state == GestureState::Active
    }

    /// Returns `true` while the slider is dragged or focused.
    pub fn is_active(&self) -> bool {
        self.scope.is_active()
    }

    /// Returns `true` if the slider holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The slider's own active scope.
    pub fn scope(&self) -> &Arc<ActiveScope> {
        &self.scope
    }

    /// When [`SliderController::tick`] next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sampler.next_deadline()
    }

    /// Value a pointer at `position` maps to, or `None` for an empty track.
    pub fn value_at(&self, position: PxPosition) -> Option<f32> {
        cursor_progress(position, &self.args.track, self.args.orientation)
            .map(|progress| snap_fraction(progress, self.args.steps))
    }

    /// Effective value of `model` as a rounded percentage.
    pub fn percentage(&self, model: &ValueModel) -> u8 {
        model.percentage()
    }

    /// Starts a gesture on a primary press.
    ///
    /// Returns `false` when the event is not a primary press and was ignored.
    /// A press while already active restarts tracking from the new position.
    pub fn on_press_start(&mut self, event: &CursorEvent, model: &mut ValueModel) -> bool {
        let CursorEventContent::Pressed(source) = event.content else {
            return false;
        };
        if !source.is_primary() {
            trace!(?source, "ignoring non-primary press");
            return false;
        }

        let starting = self.state == GestureState::Idle;
        if starting {
            self.listener = Some(self.surface.attach(SURFACE_LISTENER));
            self.state = GestureState::Active;
            model.begin_interaction();
            debug!(position = ?event.position, "slider gesture started");
        } else {
            debug!(position = ?event.position, "slider press while active, restarting tracking");
            self.sampler.cancel();
        }

        // Grabbing the slider always means the user wants to hear something.
        model.set_muted(false);
        if let Some(position) = self.sampler.sample(event.position, event.timestamp) {
            self.apply_position(position, model);
        }

        if starting {
            self.scope.notify_active();
        }
        true
    }

    /// Routes a move through the sampler. Returns `true` if the value was
    /// updated by this call. Ignored while idle.
    pub fn on_move(&mut self, event: &CursorEvent, model: &mut ValueModel) -> bool {
        if self.state == GestureState::Idle {
            return false;
        }
        match self.sampler.sample(event.position, event.timestamp) {
            Some(position) => self.apply_position(position, model),
            None => false,
        }
    }

    /// Ends the gesture, applying the last deferred position first.
    ///
    /// Reaching zero does not restore the remembered value here; the value
    /// the gesture started from is remembered and restored by a later unmute.
    pub fn on_release(&mut self, model: &mut ValueModel) -> bool {
        if self.state == GestureState::Idle {
            return false;
        }
        if let Some(position) = self.sampler.flush() {
            self.apply_position(position, model);
        }
        self.end_gesture();
        model.end_interaction();
        debug!(value = model.value(), "slider gesture ended");
        self.scope.notify_inactive();
        true
    }

    /// Delivers a due trailing drag position. Returns `true` if the value was
    /// updated.
    pub fn tick(&mut self, now: Instant, model: &mut ValueModel) -> bool {
        match self.sampler.poll(now) {
            Some(position) if self.state == GestureState::Active => {
                self.apply_position(position, model)
            }
            _ => false,
        }
    }

    /// Unmutes and raises the value by one step.
    pub fn step_forward(&mut self, model: &mut ValueModel) -> bool {
        self.step(StepAction::Forward, model)
    }

    /// Unmutes and lowers the value by one step.
    pub fn step_back(&mut self, model: &mut ValueModel) -> bool {
        self.step(StepAction::Back, model)
    }

    /// Handles a key press. Returns `false` for keys the slider does not use.
    pub fn on_key(&mut self, key: &Key, model: &mut ValueModel) -> bool {
        match key_action(key) {
            Some(action) => {
                self.step(action, model);
                true
            }
            None => false,
        }
    }

    /// Handles an action requested by an assistive technology.
    pub fn on_accessibility_action(&mut self, action: Action, model: &mut ValueModel) -> bool {
        match accessibility_action(action) {
            Some(action) => {
                self.step(action, model);
                true
            }
            None => false,
        }
    }

    /// The slider gained focus.
    pub fn on_focus(&mut self) {
        if self.focused {
            return;
        }
        self.focused = true;
        self.scope.notify_active();
    }

    /// The slider lost focus. Any gesture in progress ends with it.
    pub fn on_blur(&mut self, model: &mut ValueModel) {
        self.on_release(model);
        if !self.focused {
            return;
        }
        self.focused = false;
        self.scope.notify_inactive();
    }

    /// Tears the controller down: drops any pending drag position, releases
    /// the surface listener, closes the gesture's interaction on `model` and
    /// balances every active notification. The controller is idle and
    /// unfocused afterwards.
    ///
    /// Dropping the controller releases the listener and the notifications
    /// too, but cannot reach the model; call this first when a gesture may
    /// be in progress.
    pub fn teardown(&mut self, model: &mut ValueModel) {
        let dragging = self.is_dragging();
        self.release();
        if dragging {
            model.end_interaction();
        }
    }

    fn release(&mut self) {
        self.sampler.cancel();
        if self.state == GestureState::Active {
            self.end_gesture();
            self.scope.notify_inactive();
        }
        if self.focused {
            self.focused = false;
            self.scope.notify_inactive();
        }
    }

    fn end_gesture(&mut self) {
        self.listener = None;
        self.state = GestureState::Idle;
    }

    fn apply_position(&self, position: PxPosition, model: &mut ValueModel) -> bool {
        match self.value_at(position) {
            Some(value) => {
                trace!(?position, value, "pointer sample applied");
                model.set(value)
            }
            None => false,
        }
    }

    fn step(&self, action: StepAction, model: &mut ValueModel) -> bool {
        let unmuted = model.set_muted(false);
        let target = match action {
            StepAction::Forward => round_step(model.value() + self.args.step),
            StepAction::Back => round_step(model.value() - self.args.step),
            StepAction::ToMin => 0.0,
            StepAction::ToMax => 1.0,
        };
        trace!(?action, target, "slider step");
        model.set(target) || unmuted
    }
}

impl Drop for SliderController {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for SliderController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderController")
            .field("state", &self.state)
            .field("focused", &self.focused)
            .field("pending", &self.sampler.has_pending())
            .finish()
    }
}
