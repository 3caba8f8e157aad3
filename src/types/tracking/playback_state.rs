use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// `Playback State` values accepted by the data layer audio tracking.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, Debug)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlaybackState {
    Play,
    Pause,
    Resume,
    End,
    Schedule,
}
