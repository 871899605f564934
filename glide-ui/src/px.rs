//! Physical pixel coordinates for pointer input.
//!
//! Pointer positions delivered to controls are expressed in physical pixels
//! relative to the control's own origin: x grows to the right, y grows
//! downward. Negative coordinates are valid, since a drag keeps reporting
//! positions after it leaves the control's bounds.
//!
//! ```
//! use glide_ui::px::{Px, PxPosition};
//!
//! let track_start = Px(8);
//! let handle = PxPosition::new(track_start.saturating_add(Px(52)), Px(-3));
//! assert_eq!(handle, PxPosition::from_raw(60, -3));
//! assert_eq!(Px::saturating_from_f32(f32::NAN), Px::ZERO);
//! ```

/// A physical pixel coordinate value.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// The value as `f32`, for projecting onto a track.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Converts from `f32`, truncating toward zero and saturating at the
    /// `i32` bounds. NaN maps to zero.
    pub fn saturating_from_f32(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(i32::MIN as f32, i32::MAX as f32) as i32)
    }

    /// Saturating addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

/// A pointer position in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxPosition {
    /// Horizontal coordinate.
    pub x: Px,
    /// Vertical coordinate.
    pub y: Px,
}

impl PxPosition {
    /// The control origin.
    pub const ZERO: Self = Self { x: Px(0), y: Px(0) };

    /// A position from typed coordinates.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// A position from raw integer coordinates.
    pub const fn from_raw(x: i32, y: i32) -> Self {
        Self { x: Px(x), y: Px(y) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_conversion_saturates_and_truncates() {
        assert_eq!(Px::saturating_from_f32(f32::MAX), Px(i32::MAX));
        assert_eq!(Px::saturating_from_f32(f32::MIN), Px(i32::MIN));
        assert_eq!(Px::saturating_from_f32(100.5), Px(100));
        assert_eq!(Px::saturating_from_f32(-100.5), Px(-100));
        assert_eq!(Px::saturating_from_f32(f32::NAN), Px::ZERO);
    }

    #[test]
    fn addition_saturates_at_the_bounds() {
        assert_eq!(Px(i32::MAX).saturating_add(Px(1)), Px(i32::MAX));
        assert_eq!(Px(i32::MIN).saturating_add(Px(-1)), Px(i32::MIN));
        assert_eq!(Px(8).saturating_add(Px(-10)), Px(-2));
    }
}
