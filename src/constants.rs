use lazy_static::lazy_static;
use url::Url;

pub const ITEM_VIEW_PATH: &str = "v1/events/viewed";
pub const LISTEN_ACTION_PATH: &str = "v1/events/listened";
pub const CLIENT_SLUG: &str = "nypr-metrics";
pub const DEBOUNCE_MS: u64 = 100;
pub const SESSION_PING_MS: u64 = 1000 * 60 * 2;
pub const PLAYER_EVENT_CATEGORY: &str = "Persistent Player";
pub const ENGAGEMENT_CATEGORY: &str = "Engagement";
pub const AUDIO_BUMPER_EVENT: &str = "Audio Bumper";
pub const AUDIO_ERROR_EVENT: &str = "audioError";
pub const PLAYBACK_STATE_KEY: &str = "Playback State";
pub const MEMBER_STATUSES: &[&str] = &["Nonmember", "One-Time Donor", "Sustainer"];
pub const PLAYBACK_SOURCES: &[&str] = &["discover", "Continuous Play", "queue"];

lazy_static! {
    pub static ref PLATFORM_EVENTS_API_URL: Url =
        Url::parse("https://api.wnyc.org").expect("PLATFORM_EVENTS_API_URL parse failed");
    pub static ref LEGACY_API_URL: Url =
        Url::parse("https://www.wnyc.org").expect("LEGACY_API_URL parse failed");
}
