use serde::{Deserialize, Serialize};

/// Adapter of the host metrics service an event is routed to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum MetricsAdapter {
    GoogleAnalytics,
    NprAnalytics,
}

#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MetricsEvent {
    pub category: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
}

impl MetricsEvent {
    pub fn new(category: impl Into<String>, action: impl Into<String>) -> Self {
        MetricsEvent {
            category: category.into(),
            action: action.into(),
            ..Default::default()
        }
    }
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
    pub fn value(mut self, value: u64) -> Self {
        self.value = Some(value);
        self
    }
}
