//! Pointer and touch event types.
//!
//! Controls consume pointer input as a small set of semantic events: a press
//! with its source, a move to a new position, and a release. Mouse buttons and
//! touch contacts are unified through [`PointerSource`] so a control can ask a
//! single question, [`PointerSource::is_primary`], before reacting to a press.
//!
//! # Usage
//!
//! ```
//! use glide_ui::{Instant, PxPosition};
//! use glide_ui::cursor::{CursorEvent, CursorEventContent, PointerSource, PressKeyEventType};
//!
//! let press = CursorEvent {
//!     timestamp: Instant::now(),
//!     position: PxPosition::from_raw(40, 8),
//!     content: CursorEventContent::Pressed(PointerSource::Mouse(PressKeyEventType::Left)),
//! };
//! assert!(matches!(press.content, CursorEventContent::Pressed(source) if source.is_primary()));
//! ```

use crate::{Instant, PxPosition};

/// Mouse button that produced a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressKeyEventType {
    /// The primary mouse button (typically left button).
    Left,
    /// The secondary mouse button (typically right button).
    Right,
    /// The middle mouse button (typically scroll wheel click).
    Middle,
}

/// Where a press came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    /// A mouse button.
    Mouse(PressKeyEventType),
    /// A touch contact. `active_touches` counts every finger currently down,
    /// including the one that produced this event.
    Touch {
        /// Number of simultaneous touch points.
        active_touches: u32,
    },
}

impl PointerSource {
    /// Primary mouse button or a single-finger touch.
    pub fn is_primary(&self) -> bool {
        match self {
            Self::Mouse(button) => *button == PressKeyEventType::Left,
            Self::Touch { active_touches } => *active_touches == 1,
        }
    }
}

/// Content of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEventContent {
    /// A button was pressed or a touch started.
    Pressed(PointerSource),
    /// The pointer moved.
    Moved,
    /// A button was released or a touch ended.
    Released(PointerSource),
}

/// A pointer event with its timestamp and position relative to the control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorEvent {
    /// When the event was observed.
    pub timestamp: Instant,
    /// Position relative to the control origin. May lie outside the control.
    pub position: PxPosition,
    /// What happened.
    pub content: CursorEventContent,
}

impl CursorEvent {
    /// Builds a press event.
    pub fn pressed(timestamp: Instant, position: PxPosition, source: PointerSource) -> Self {
        Self {
            timestamp,
            position,
            content: CursorEventContent::Pressed(source),
        }
    }

    /// Builds a move event.
    pub fn moved(timestamp: Instant, position: PxPosition) -> Self {
        Self {
            timestamp,
            position,
            content: CursorEventContent::Moved,
        }
    }

    /// Builds a release event.
    pub fn released(timestamp: Instant, position: PxPosition, source: PointerSource) -> Self {
        Self {
            timestamp,
            position,
            content: CursorEventContent::Released(source),
        }
    }
}
