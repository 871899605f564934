use glide_ui::Px;

use crate::error::ConfigError;

/// Axis the slider track runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderOrientation {
    /// Left is `0.0`, right is `1.0`.
    #[default]
    Horizontal,
    /// Bottom is `0.0`, top is `1.0`.
    Vertical,
}

/// Extent of the track along the slider's axis, relative to the control
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackLayout {
    /// Coordinate where the track begins (left edge, or top edge when
    /// vertical).
    pub start: Px,
    /// Length of the track.
    pub extent: Px,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            start: Px::ZERO,
            extent: Px(100),
        }
    }
}

impl TrackLayout {
    /// A track starting at `start` and running for `extent` pixels.
    pub const fn new(start: Px, extent: Px) -> Self {
        Self { start, extent }
    }

    /// Track of a control `length` pixels long along its axis, leaving room
    /// for half the handle plus `handle_gap` at both ends so the handle
    /// center can reach either end.
    pub fn from_component(length: Px, handle_width: Px, handle_gap: Px) -> Self {
        let half_handle = handle_width.to_f32() / 2.0;
        let start = handle_gap.to_f32() + half_handle;
        let extent = (length.to_f32() - start * 2.0).max(0.0);
        Self {
            start: Px::saturating_from_f32(start),
            extent: Px::saturating_from_f32(extent),
        }
    }

    /// Coordinate where the track ends.
    pub fn end(&self) -> Px {
        self.start.saturating_add(self.extent)
    }

    /// Length of the filled part of the track for `value`.
    pub fn active_extent(&self, value: f32) -> Px {
        let clamped = value.clamp(0.0, 1.0);
        Px::saturating_from_f32(self.extent.to_f32() * clamped)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.extent.0 <= 0 {
            return Err(ConfigError::EmptyTrack(self.extent));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_track_leaves_room_for_handle() {
        let track = TrackLayout::from_component(Px(120), Px(4), Px(6));
        assert_eq!(track.start, Px(8));
        assert_eq!(track.extent, Px(104));
        assert_eq!(track.end(), Px(112));
    }

    #[test]
    fn tiny_component_has_empty_track() {
        let track = TrackLayout::from_component(Px(10), Px(8), Px(6));
        assert_eq!(track.extent, Px::ZERO);
        assert!(track.validate().is_err());
    }

    #[test]
    fn active_extent_is_clamped() {
        let track = TrackLayout::new(Px(0), Px(200));
        assert_eq!(track.active_extent(0.25), Px(50));
        assert_eq!(track.active_extent(3.0), Px(200));
    }
}
