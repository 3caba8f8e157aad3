use crate::types::sound::PlayContext;
use derivative::Derivative;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of a sound in the host player, its resolved url.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From, Debug)]
#[serde(transparent)]
pub struct SoundId(pub String);

impl From<&str> for SoundId {
    fn from(id: &str) -> Self {
        SoundId(id.to_owned())
    }
}

#[derive(Derivative, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[derivative(Default)]
#[serde(rename_all = "camelCase")]
pub enum ContentModelType {
    /// On-demand audio
    #[derivative(Default)]
    Story,
    /// Live stream
    Stream,
    /// Interstitial audio played between queued stories
    Bumper,
    #[serde(other)]
    Unknown,
}

#[derive(Default, Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SoundMetadata {
    #[serde(default)]
    pub content_model_type: ContentModelType,
    /// The story, stream or bumper entity, opaque to this crate.
    #[serde(default)]
    pub content_model: Value,
    #[serde(default)]
    pub content_id: Option<String>,
    #[serde(default)]
    pub play_context: Option<PlayContext>,
    /// Only sounds carrying this mapping are reported as listen actions.
    #[serde(default)]
    pub analytics: Option<Map<String, Value>>,
    #[serde(default)]
    pub from_click: bool,
    #[serde(default)]
    pub autoplay_choice: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Sound {
    pub id: SoundId,
    /// Playback position in milliseconds.
    #[serde(default)]
    pub position: u64,
    #[serde(default)]
    pub has_played: bool,
    #[serde(default)]
    pub metadata: SoundMetadata,
}

impl Sound {
    pub fn content_model_type(&self) -> ContentModelType {
        self.metadata.content_model_type
    }
    pub fn play_context(&self) -> Option<&PlayContext> {
        self.metadata.play_context.as_ref()
    }
    /// Identity of the content behind the sound: the explicit content id,
    /// falling back to the content model's `id`.
    pub fn content_identity(&self) -> Option<String> {
        self.metadata
            .content_id
            .to_owned()
            .or_else(|| self.content_field("/id"))
    }
    /// A string field of the content model, addressed by JSON pointer.
    pub fn content_field(&self, pointer: &str) -> Option<String> {
        content_field(&self.metadata.content_model, pointer)
    }
}

pub fn content_field(content_model: &Value, pointer: &str) -> Option<String> {
    match content_model.pointer(pointer) {
        Some(Value::String(value)) => Some(value.to_owned()),
        Some(Value::Number(value)) => Some(value.to_string()),
        Some(Value::Bool(value)) => Some(value.to_string()),
        _ => None,
    }
}
