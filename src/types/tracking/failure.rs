use serde::{Deserialize, Serialize};

/// A connection the player tried and abandoned before settling on a url.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CodecFailure {
    pub connection_name: String,
    pub error: String,
    pub url: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SoundFailure {
    pub message: String,
    #[serde(default)]
    pub failures: Vec<CodecFailure>,
}
