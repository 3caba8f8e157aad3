use crate::constants::{
    CLIENT_SLUG, DEBOUNCE_MS, ITEM_VIEW_PATH, LEGACY_API_URL, LISTEN_ACTION_PATH,
    PLATFORM_EVENTS_API_URL, SESSION_PING_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Base url of the data pipeline (`platformEventsAPI`).
    pub platform_events_api: Url,
    /// Base url of the legacy listen/view counters.
    pub legacy_api: Url,
    pub client_slug: String,
    pub site_id: Option<u64>,
    pub item_view_path: String,
    pub listen_action_path: String,
    /// Quiet period of both debounce queues, in milliseconds.
    pub debounce_ms: u64,
    /// Interval of the persistent player ping, in milliseconds.
    pub session_ping_ms: u64,
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
    pub fn session_ping(&self) -> Duration {
        Duration::from_millis(self.session_ping_ms)
    }
    pub fn item_view_url(&self) -> String {
        join_path(&self.platform_events_api, &self.item_view_path)
    }
    pub fn listen_action_url(&self) -> String {
        join_path(&self.platform_events_api, &self.listen_action_path)
    }
    pub fn legacy_url(&self, path: &str) -> String {
        join_path(&self.legacy_api, path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            platform_events_api: PLATFORM_EVENTS_API_URL.to_owned(),
            legacy_api: LEGACY_API_URL.to_owned(),
            client_slug: CLIENT_SLUG.to_owned(),
            site_id: None,
            item_view_path: ITEM_VIEW_PATH.to_owned(),
            listen_action_path: LISTEN_ACTION_PATH.to_owned(),
            debounce_ms: DEBOUNCE_MS,
            session_ping_ms: SESSION_PING_MS,
        }
    }
}

fn join_path(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
