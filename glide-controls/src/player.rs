//! Collaborators owned by the host player.
//!
//! Controls never own the player's state. They read and write it through
//! [`PlayerVolume`], learn about changes made elsewhere through
//! [`PlayerEvent`], and ask [`FeatureSupport`] whether they should be shown at
//! all.

use parking_lot::RwLock;

/// Accessor and mutator for the player's volume state.
pub trait PlayerVolume: Send + Sync {
    /// Current volume in `[0, 1]`.
    fn volume(&self) -> f32;
    /// Sets the volume.
    fn set_volume(&self, volume: f32);
    /// Whether the player is muted.
    fn is_muted(&self) -> bool;
    /// Sets the muted flag.
    fn set_muted(&self, muted: bool);
    /// Volume remembered before the player last went silent.
    fn last_volume(&self) -> f32;
    /// Sets the remembered volume.
    fn set_last_volume(&self, volume: f32);
}

/// A change the host observed on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The volume changed.
    VolumeChanged,
    /// The muted flag changed.
    MutedChanged,
}

/// Capability checks deciding whether controls are shown.
///
/// The answer only affects visibility. Value handling works the same whether
/// or not a control is supported.
pub trait FeatureSupport {
    /// Whether the volume can be changed programmatically.
    fn is_volume_control_supported(&self) -> bool;

    /// Whether the player can be muted programmatically.
    fn is_mute_control_supported(&self) -> bool {
        true
    }
}

/// Fixed capability answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSupport {
    /// Answer for [`FeatureSupport::is_volume_control_supported`].
    pub volume: bool,
    /// Answer for [`FeatureSupport::is_mute_control_supported`].
    pub mute: bool,
}

impl Default for StaticSupport {
    fn default() -> Self {
        Self {
            volume: true,
            mute: true,
        }
    }
}

impl FeatureSupport for StaticSupport {
    fn is_volume_control_supported(&self) -> bool {
        self.volume
    }

    fn is_mute_control_supported(&self) -> bool {
        self.mute
    }
}

/// Snapshot of a player's volume state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSnapshot {
    /// Volume in `[0, 1]`.
    pub volume: f32,
    /// Muted flag.
    pub muted: bool,
    /// Remembered volume.
    pub last_volume: f32,
}

impl Default for VolumeSnapshot {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
            last_volume: 1.0,
        }
    }
}

/// In-memory [`PlayerVolume`], for hosts without a media backend and for
/// tests.
#[derive(Debug, Default)]
pub struct MemoryPlayer {
    state: RwLock<VolumeSnapshot>,
}

impl MemoryPlayer {
    /// Creates a player holding `snapshot`.
    pub fn new(snapshot: VolumeSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> VolumeSnapshot {
        *self.state.read()
    }
}

impl PlayerVolume for MemoryPlayer {
    fn volume(&self) -> f32 {
        self.state.read().volume
    }

    fn set_volume(&self, volume: f32) {
        self.state.write().volume = volume;
    }

    fn is_muted(&self) -> bool {
        self.state.read().muted
    }

    fn set_muted(&self, muted: bool) {
        self.state.write().muted = muted;
    }

    fn last_volume(&self) -> f32 {
        self.state.read().last_volume
    }

    fn set_last_volume(&self, volume: f32) {
        self.state.write().last_volume = volume;
    }
}
