//! Configuration errors.

use std::time::Duration;

use glide_ui::Px;
use thiserror::Error;

/// Rejected control configuration.
///
/// Runtime input is never an error: out-of-range values clamp and
/// unsupported presses are ignored. Only the arguments a control is built
/// from are validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The keyboard step is not a usable fraction of the range.
    #[error("keyboard step must be finite and within (0, 1], got {0}")]
    InvalidStep(f32),
    /// The drag sample interval is zero or longer than
    /// [`MAX_SAMPLE_INTERVAL`](crate::gesture_sampler::MAX_SAMPLE_INTERVAL).
    #[error("gesture sample interval must be within (0s, 1s], got {0:?}")]
    InvalidSampleInterval(Duration),
    /// The track has no length to project pointer positions onto.
    #[error("track extent must be positive, got {0:?}")]
    EmptyTrack(Px),
}
