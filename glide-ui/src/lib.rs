//! glide-ui provides the primitives glide controls are built on.
//!
//! The crate contains no controls itself. It supplies:
//!
//! - [`px`]: physical pixel coordinates for pointer positions
//! - [`cursor`]: press, move and release events with their pointer source
//! - [`keyboard_state`]: keys relevant to range controls
//! - [`timer`]: a cancellable queue of scheduled payloads, pumped by the
//!   host's frame loop
//! - [`input_surface`]: surface-wide pointer listeners held by guards
//! - [`accessibility`]: semantic node descriptions built on AccessKit
//! - [`prop`]: comparable callback handles
//!
//! Everything here runs on the thread that dispatches input; nothing blocks
//! and nothing sleeps. Time only moves when the host passes a new [`Instant`].

pub mod accessibility;
pub mod cursor;
pub mod input_surface;
pub mod keyboard_state;
pub mod prop;
pub mod px;
pub mod timer;

pub use accesskit;

#[cfg(not(target_family = "wasm"))]
pub use std::time::Instant;
#[cfg(target_family = "wasm")]
pub use web_time::Instant;

pub use crate::{
    accessibility::AccessibilityNode,
    cursor::{CursorEvent, CursorEventContent, PointerSource, PressKeyEventType},
    input_surface::{InputSurface, ListenerGuard},
    keyboard_state::{Key, KeyboardState, NamedKey},
    prop::CallbackWith,
    px::{Px, PxPosition},
    timer::{TimerKey, TimerQueue},
};
