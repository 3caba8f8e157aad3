use serde::{Deserialize, Serialize};

/// Per-page values merged into every data pipeline request.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsContext {
    pub browser_id: Option<String>,
    /// Current page location.
    pub url: String,
    /// `document.referrer` of the page.
    pub external_referrer: Option<String>,
}
