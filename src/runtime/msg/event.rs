use crate::runtime::EnvError;
use crate::types::listen::ListenActionType;
use serde::Serialize;

/// Event messages
///
/// Those messages are meant to be dispatched by this crate and handled by the host.
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "event", content = "args")]
pub enum Event {
    ListenActionReported {
        action: ListenActionType,
        delta: i64,
    },
    ItemViewReported,
    LegacyActionReported {
        path: String,
    },
    StreamSwitched {
        from: String,
        to: String,
    },
    PlayerPinged {
        is_playing: bool,
    },
    Error {
        error: EnvError,
        source: Box<Event>,
    },
}
