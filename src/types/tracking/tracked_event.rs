use crate::types::metrics::MetricsEvent;
use crate::types::sound::{Sound, SoundId};
use crate::types::tracking::PlaybackState;
use serde::Serialize;

/// A human-readable tracking push waiting in the data layer queue.
#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(tag = "type", content = "content")]
pub enum TrackedEvent {
    /// `audioTracking(state, sound)` on the data layer.
    Audio {
        playback_state: PlaybackState,
        sound: Sound,
    },
    /// Interstitial audio, pushed as an `Audio Bumper` event.
    Bumper {
        playback_state: PlaybackState,
        sound: Sound,
    },
    /// `audioErrorTracking(kind, details)` on the data layer.
    AudioError {
        sound_id: Option<SoundId>,
        error_type: String,
        error_details: String,
    },
    /// A `Persistent Player` event for the metrics service.
    Player {
        sound_id: Option<SoundId>,
        event: MetricsEvent,
    },
}

impl TrackedEvent {
    pub fn sound_id(&self) -> Option<&SoundId> {
        match self {
            TrackedEvent::Audio { sound, .. } | TrackedEvent::Bumper { sound, .. } => {
                Some(&sound.id)
            }
            TrackedEvent::AudioError { sound_id, .. } | TrackedEvent::Player { sound_id, .. } => {
                sound_id.as_ref()
            }
        }
    }
    pub fn is_pause(&self) -> bool {
        match self {
            TrackedEvent::Audio { playback_state, .. }
            | TrackedEvent::Bumper { playback_state, .. } => {
                *playback_state == PlaybackState::Pause
            }
            TrackedEvent::Player { event, .. } => event.action.contains("Pause"),
            TrackedEvent::AudioError { .. } => false,
        }
    }
    pub fn is_finish(&self) -> bool {
        match self {
            TrackedEvent::Audio { playback_state, .. }
            | TrackedEvent::Bumper { playback_state, .. } => {
                *playback_state == PlaybackState::End
            }
            TrackedEvent::Player { event, .. } => event.action.contains("Finish"),
            TrackedEvent::AudioError { .. } => false,
        }
    }
}
