use crate::types::sound::Sound;
use crate::types::tracking::{CodecFailure, SoundFailure};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Lifecycle events of the host audio player.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionPlayer {
    AudioPlayed(Sound),
    AudioPaused(Sound),
    AudioEnded(Sound),
    AudioPositionWillChange(Sound),
    AudioWillRewind(Sound),
    AudioWillFastForward(Sound),
    CurrentSoundChanged {
        current: Sound,
        previous: Option<Sound>,
    },
    CurrentSoundInterrupted(Sound),
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionTrack {
    AllCodecFailures {
        failures: Vec<CodecFailure>,
        sound: Option<Sound>,
    },
    SoundFailure(SoundFailure),
    DismissAutoplayNotification,
    AddToQueue {
        story: Value,
        region: Option<String>,
    },
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionDataLayer {
    Push(Map<String, Value>),
    PushValue {
        key: String,
        value: Value,
    },
    Clear(Vec<String>),
    Trigger(String),
    SetLoggedIn(bool),
    SetMemberStatus(String),
    SetPageTitle(String),
    SendPageView,
    Send404,
    /// Validated against the `Playback State` allow-list, unknown types are ignored.
    AudioTracking {
        tracking_type: String,
        sound: Sound,
    },
    ErrorTracking {
        event: String,
        path: String,
    },
    AudioErrorTracking {
        error_type: String,
        error_details: String,
    },
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionDataPipeline {
    ReportItemView(Map<String, Value>),
    /// Validated against the listen action allow-list, unknown types are ignored.
    ReportListenAction {
        action_type: String,
        payload: Map<String, Value>,
    },
    SetCurrentReferrer(Option<String>),
}

/// Action messages
///
/// Those messages are meant to be dispatched only by the host application and
/// handled by this crate.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum Action {
    Player(ActionPlayer),
    Track(ActionTrack),
    DataLayer(ActionDataLayer),
    DataPipeline(ActionDataPipeline),
    /// The page is about to unload.
    WindowClose,
    /// The host is tearing the analytics model down.
    Destroy,
}
