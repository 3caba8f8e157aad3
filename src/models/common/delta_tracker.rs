use crate::types::listen::ListenActionType;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Milliseconds of listening between consecutive listen actions.
///
/// A single marker is shared by every sound.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeltaTracker {
    pub last_marker: Option<DateTime<Utc>>,
    pub did_pause: bool,
}

impl DeltaTracker {
    pub fn update(&mut self, action_type: ListenActionType, now: DateTime<Utc>) -> i64 {
        let delta = if action_type.is_start_or_resume() {
            self.did_pause = false;
            0
        } else if self.did_pause {
            0
        } else {
            self.last_marker
                .map(|marker| now.signed_duration_since(marker).num_milliseconds().max(0))
                .unwrap_or_default()
        };
        self.last_marker = Some(now);
        if action_type == ListenActionType::Pause {
            self.did_pause = true;
        };
        delta
    }
}
