use crate::types::sound::SoundId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::EnumString;

/// Playback-state transition reported to the data pipeline.
///
/// Parsed from the short names used by the player integration (`forward_15`,
/// `close`, ...) and serialized with the downstream wire vocabulary
/// (`skip_15_forward`, `window_close`, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Debug)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ListenActionType {
    Start,
    Pause,
    Resume,
    #[serde(rename = "skip_15_forward")]
    #[strum(serialize = "forward_15")]
    Forward15,
    #[serde(rename = "skip_15_back")]
    #[strum(serialize = "back_15")]
    Back15,
    #[serde(rename = "window_close")]
    Close,
    Finish,
    #[serde(rename = "set_position")]
    Position,
    Interrupt,
}

impl ListenActionType {
    pub fn wire_name(&self) -> &'static str {
        match self {
            ListenActionType::Start => "start",
            ListenActionType::Pause => "pause",
            ListenActionType::Resume => "resume",
            ListenActionType::Forward15 => "skip_15_forward",
            ListenActionType::Back15 => "skip_15_back",
            ListenActionType::Close => "window_close",
            ListenActionType::Finish => "finish",
            ListenActionType::Position => "set_position",
            ListenActionType::Interrupt => "interrupt",
        }
    }
    pub fn is_start_or_resume(&self) -> bool {
        matches!(self, ListenActionType::Start | ListenActionType::Resume)
    }
}

/// A listen action waiting in the debounce queue.
#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListenAction {
    pub sound_id: SoundId,
    pub action_type: ListenActionType,
    pub payload: Map<String, Value>,
}
