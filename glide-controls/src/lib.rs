//! Continuous-value controls for glide-ui.
//!
//! The centerpiece is the volume panel: a horizontal slider and a mute
//! toggle that share one [`ValueModel`]. The crate is split along the seams
//! a host needs to reach into:
//!
//! - [`value_model`]: the clamped value, the muted flag and the remembered
//!   last non-zero value
//! - [`gesture_sampler`]: leading/trailing throttle for drag positions
//! - [`slider`]: the press/drag/release state machine plus keyboard and
//!   assistive-technology stepping
//! - [`active_state`]: reference-counted "being interacted with" scopes that
//!   keep parent composites from auto-hiding
//! - [`accessibility_report`]: numeric and text values for assistive
//!   technologies
//! - [`mute_toggle`]: the mute button and its restore rule
//! - [`player`]: the host-side volume capability the panel writes through to
//! - [`volume_control`]: everything above wired together
//!
//! All types are driven from the input thread. Nothing blocks and nothing
//! spawns; deferred drag positions are delivered when the host calls
//! `tick` with the current time.

pub mod accessibility_report;
pub mod active_state;
pub mod error;
pub mod gesture_sampler;
pub mod mute_toggle;
pub mod player;
pub mod slider;
pub mod value_model;
pub mod volume_control;

pub use crate::{
    accessibility_report::{AccessibilityReport, AccessibilityReporter},
    active_state::ActiveScope,
    error::ConfigError,
    gesture_sampler::GestureSampler,
    mute_toggle::{MuteToggle, VolumeLevel},
    player::{FeatureSupport, MemoryPlayer, PlayerEvent, PlayerVolume, StaticSupport},
    slider::{SliderArgs, SliderController, SliderOrientation, TrackLayout},
    value_model::ValueModel,
    volume_control::{VolumeControl, VolumeControlArgs},
};
