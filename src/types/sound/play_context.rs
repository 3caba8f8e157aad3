use serde::{Deserialize, Serialize};

/// Where in the host UI a sound was started from.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(from = "String", into = "String")]
pub enum PlayContext {
    Nav,
    Queue,
    History,
    Discover,
    ContinuousPlay,
    Other(String),
}

impl PlayContext {
    pub fn as_str(&self) -> &str {
        match self {
            PlayContext::Nav => "nav",
            PlayContext::Queue => "queue",
            PlayContext::History => "history",
            PlayContext::Discover => "discover",
            PlayContext::ContinuousPlay => "Continuous Play",
            PlayContext::Other(context) => context,
        }
    }
    /// Region label used by region-scoped player events, e.g. `Continuous Play` -> `ContinuousPlay`.
    pub fn region(&self) -> String {
        classify(self.as_str())
    }
    /// Suffix appended to stream labels.
    pub fn label(&self) -> String {
        match self {
            PlayContext::ContinuousPlay => self.as_str().to_owned(),
            PlayContext::Nav => "Navigation".to_owned(),
            _ => classify(self.as_str()),
        }
    }
}

impl From<String> for PlayContext {
    fn from(context: String) -> Self {
        match context.as_str() {
            "nav" => PlayContext::Nav,
            "queue" => PlayContext::Queue,
            "history" => PlayContext::History,
            "discover" => PlayContext::Discover,
            "Continuous Play" => PlayContext::ContinuousPlay,
            _ => PlayContext::Other(context),
        }
    }
}

impl From<PlayContext> for String {
    fn from(context: PlayContext) -> Self {
        match context {
            PlayContext::Other(context) => context,
            context => context.as_str().to_owned(),
        }
    }
}

/// Upper camel case: `my play_context-name` -> `MyPlayContextName`.
pub fn classify(value: &str) -> String {
    value
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == '.')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
