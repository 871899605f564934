use glide_ui::{Key, NamedKey, PxPosition, accesskit::Action};

use super::{SliderOrientation, TrackLayout};

/// Rounding applied to keyboard steps so repeated `0.1` increments land on
/// exact tenths instead of accumulating float error.
const STEP_PRECISION: f32 = 1_000_000.0;

/// Discrete adjustment requested by a key or an assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepAction {
    Forward,
    Back,
    ToMin,
    ToMax,
}

pub(crate) fn snap_fraction(value: f32, steps: usize) -> f32 {
    if steps == 0 {
        return value.clamp(0.0, 1.0);
    }
    let denom = steps as f32 + 1.0;
    let step = 1.0 / denom;
    ((value / step).round() * step).clamp(0.0, 1.0)
}

pub(crate) fn round_step(value: f32) -> f32 {
    (value * STEP_PRECISION).round() / STEP_PRECISION
}

/// Normalized progress (0.0..=1.0) of `position` along the track. Returns
/// `None` for an empty track.
pub(crate) fn cursor_progress(
    position: PxPosition,
    track: &TrackLayout,
    orientation: SliderOrientation,
) -> Option<f32> {
    if track.extent.0 <= 0 {
        return None;
    }
    let extent = track.extent.to_f32();
    let fraction = match orientation {
        SliderOrientation::Horizontal => (position.x.to_f32() - track.start.to_f32()) / extent,
        SliderOrientation::Vertical => 1.0 - (position.y.to_f32() - track.start.to_f32()) / extent,
    };
    Some(fraction.clamp(0.0, 1.0))
}

pub(crate) fn key_action(key: &Key) -> Option<StepAction> {
    match key {
        Key::Named(NamedKey::ArrowRight | NamedKey::ArrowUp) => Some(StepAction::Forward),
        Key::Named(NamedKey::ArrowLeft | NamedKey::ArrowDown) => Some(StepAction::Back),
        Key::Named(NamedKey::Home) => Some(StepAction::ToMin),
        Key::Named(NamedKey::End) => Some(StepAction::ToMax),
        _ => None,
    }
}

pub(crate) fn accessibility_action(action: Action) -> Option<StepAction> {
    match action {
        Action::Increment => Some(StepAction::Forward),
        Action::Decrement => Some(StepAction::Back),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use glide_ui::Px;

    use super::*;

    #[test]
    fn horizontal_progress_is_linear_and_clamped() {
        let track = TrackLayout::new(Px(10), Px(100));
        let at = |x| PxPosition::from_raw(x, 999);
        let h = SliderOrientation::Horizontal;
        assert_eq!(cursor_progress(at(10), &track, h), Some(0.0));
        assert_eq!(cursor_progress(at(40), &track, h), Some(0.3));
        assert_eq!(cursor_progress(at(110), &track, h), Some(1.0));
        assert_eq!(cursor_progress(at(-500), &track, h), Some(0.0));
        assert_eq!(cursor_progress(at(5000), &track, h), Some(1.0));
    }

    #[test]
    fn vertical_progress_grows_upwards() {
        let track = TrackLayout::new(Px(0), Px(50));
        let at = |y| PxPosition::from_raw(-3, y);
        let v = SliderOrientation::Vertical;
        assert_eq!(cursor_progress(at(50), &track, v), Some(0.0));
        assert_eq!(cursor_progress(at(0), &track, v), Some(1.0));
        assert_eq!(cursor_progress(at(10), &track, v), Some(0.8));
    }

    #[test]
    fn empty_track_has_no_progress() {
        let track = TrackLayout::new(Px(0), Px(0));
        assert_eq!(
            cursor_progress(PxPosition::ZERO, &track, SliderOrientation::Horizontal),
            None
        );
    }

    #[test]
    fn snapping_uses_evenly_spaced_ticks() {
        assert_eq!(snap_fraction(0.37, 0), 0.37);
        assert_eq!(snap_fraction(0.3, 3), 0.25);
        assert_eq!(snap_fraction(0.4, 3), 0.5);
        assert_eq!(snap_fraction(1.2, 3), 1.0);
    }

    #[test]
    fn keys_map_to_steps() {
        assert_eq!(key_action(&Key::Named(NamedKey::ArrowUp)), Some(StepAction::Forward));
        assert_eq!(key_action(&Key::Named(NamedKey::ArrowLeft)), Some(StepAction::Back));
        assert_eq!(key_action(&Key::Named(NamedKey::End)), Some(StepAction::ToMax));
        assert_eq!(key_action(&Key::Named(NamedKey::Space)), None);
        assert_eq!(key_action(&Key::Character('m')), None);
        assert_eq!(accessibility_action(Action::Increment), Some(StepAction::Forward));
        assert_eq!(accessibility_action(Action::Click), None);
    }
}
