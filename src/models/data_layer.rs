use crate::constants::{
    AUDIO_BUMPER_EVENT, AUDIO_ERROR_EVENT, MEMBER_STATUSES, PLAYBACK_SOURCES, PLAYBACK_STATE_KEY,
};
use crate::runtime::msg::{Action, ActionDataLayer, Internal, Msg};
use crate::runtime::{Effects, Env, Update};
use crate::types::sound::{ContentModelType, Sound};
use crate::types::tracking::{PlaybackState, TrackedEvent};
use derivative::Derivative;
use itertools::Itertools;
use serde::Serialize;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::str::FromStr;

/// Pushes entries into the tag-manager data layer.
///
/// When the host has no data layer, entries land in `fallback` instead.
#[derive(Derivative, Serialize)]
#[derivative(Default(bound = ""), Clone(bound = ""), Debug(bound = ""))]
pub struct DataLayer<E: Env> {
    pub fallback: Vec<Map<String, Value>>,
    #[serde(skip)]
    env: PhantomData<E>,
}

impl<E: Env + 'static> Update<E> for DataLayer<E> {
    fn update(&mut self, msg: &Msg) -> Effects {
        match msg {
            Msg::Action(Action::DataLayer(action)) => {
                match action {
                    ActionDataLayer::Push(entry) => self.push(entry.to_owned()),
                    ActionDataLayer::PushValue { key, value } => {
                        self.push_value(key, value.to_owned())
                    }
                    ActionDataLayer::Clear(keys) => self.clear(keys),
                    ActionDataLayer::Trigger(event) => self.trigger(event),
                    ActionDataLayer::SetLoggedIn(logged_in) => self.set_logged_in(*logged_in),
                    ActionDataLayer::SetMemberStatus(status) => self.set_member_status(status),
                    ActionDataLayer::SetPageTitle(title) => self.set_page_title(title),
                    ActionDataLayer::SendPageView => self.send_page_view(),
                    ActionDataLayer::Send404 => self.send_404(),
                    ActionDataLayer::AudioTracking {
                        tracking_type,
                        sound,
                    } => self.audio_tracking(tracking_type, sound),
                    ActionDataLayer::ErrorTracking { event, path } => {
                        self.error_tracking(event, path)
                    }
                    ActionDataLayer::AudioErrorTracking {
                        error_type,
                        error_details,
                    } => self.audio_error_tracking(error_type, error_details),
                };
                Effects::none().unchanged()
            }
            Msg::Internal(Internal::TrackedEventFlushed(event)) => {
                match event {
                    TrackedEvent::Audio {
                        playback_state,
                        sound,
                    } => self.push_audio_event(*playback_state, sound),
                    TrackedEvent::Bumper {
                        playback_state,
                        sound,
                    } => self.push_bumper_event(*playback_state, sound),
                    TrackedEvent::AudioError {
                        error_type,
                        error_details,
                        ..
                    } => self.audio_error_tracking(error_type, error_details),
                    TrackedEvent::Player { .. } => {}
                };
                Effects::none().unchanged()
            }
            _ => Effects::none().unchanged(),
        }
    }
}

impl<E: Env> DataLayer<E> {
    pub fn push(&mut self, entry: Map<String, Value>) {
        if let Err(error) = E::data_layer_push(&entry) {
            tracing::warn!("{}", error.message());
            self.fallback.push(entry);
        };
    }
    pub fn push_value(&mut self, key: &str, value: Value) {
        let mut entry = Map::new();
        entry.insert(key.to_owned(), value);
        self.push(entry);
    }
    /// Unsets the keys by pushing them as `null`.
    pub fn clear(&mut self, keys: &[String]) {
        self.push(
            keys.iter()
                .unique()
                .map(|key| (key.to_owned(), Value::Null))
                .collect(),
        );
    }
    pub fn trigger(&mut self, event: &str) {
        self.push_value("event", Value::from(event));
    }
    pub fn set_logged_in(&mut self, logged_in: bool) {
        self.push_value("Logged In", Value::from(logged_in.to_string()));
    }
    pub fn set_member_status(&mut self, status: &str) {
        if !MEMBER_STATUSES.contains(&status) {
            tracing::trace!("ignoring unknown member status {}", status);
            return;
        };
        self.push_value("Member Status", Value::from(status));
    }
    pub fn set_page_title(&mut self, title: &str) {
        self.push_value("Page Title", Value::from(title));
    }
    pub fn send_page_view(&mut self) {
        self.trigger("Page View");
    }
    pub fn send_404(&mut self) {
        self.trigger("404");
    }
    /// Tracks a playback state change, ignoring types outside the allow-list.
    pub fn audio_tracking(&mut self, tracking_type: &str, sound: &Sound) {
        match PlaybackState::from_str(tracking_type) {
            Ok(playback_state) if sound.content_model_type() == ContentModelType::Bumper => {
                self.push_bumper_event(playback_state, sound)
            }
            Ok(playback_state) => self.push_audio_event(playback_state, sound),
            Err(_) => tracing::trace!("ignoring unknown audio tracking type {}", tracking_type),
        };
    }
    pub fn error_tracking(&mut self, event: &str, path: &str) {
        let mut entry = Map::new();
        entry.insert("event".to_owned(), Value::from(event));
        entry.insert("Bad URL Path".to_owned(), Value::from(path));
        self.push(entry);
    }
    pub fn audio_error_tracking(&mut self, error_type: &str, error_details: &str) {
        let mut entry = Map::new();
        entry.insert("event".to_owned(), Value::from(AUDIO_ERROR_EVENT));
        entry.insert("errorType".to_owned(), Value::from(error_type));
        entry.insert("errorDetails".to_owned(), Value::from(error_details));
        self.push(entry);
    }
    fn push_audio_event(&mut self, playback_state: PlaybackState, sound: &Sound) {
        let mut entry = audio_event(sound);
        entry.insert(
            PLAYBACK_STATE_KEY.to_owned(),
            Value::from(playback_state.to_string()),
        );
        self.push(entry);
    }
    fn push_bumper_event(&mut self, playback_state: PlaybackState, sound: &Sound) {
        let mut entry = Map::new();
        entry.insert("event".to_owned(), Value::from(AUDIO_BUMPER_EVENT));
        entry.insert(
            PLAYBACK_STATE_KEY.to_owned(),
            Value::from(playback_state.to_string()),
        );
        entry.insert("Playback Source".to_owned(), playback_source(sound));
        self.push(entry);
    }
}

fn playback_source(sound: &Sound) -> Value {
    match sound.play_context() {
        Some(context) if PLAYBACK_SOURCES.contains(&context.as_str()) => {
            Value::from(context.as_str())
        }
        _ => Value::Null,
    }
}

fn audio_event(sound: &Sound) -> Map<String, Value> {
    let mut entry = Map::new();
    match sound.content_model_type() {
        ContentModelType::Story => {
            entry.insert("event".to_owned(), Value::from("On Demand Audio Playback"));
            entry.insert(
                "Audio Story Title".to_owned(),
                Value::from(sound.content_field("/title")),
            );
            entry.insert(
                "Audio Show Title".to_owned(),
                Value::from(sound.content_field("/showTitle")),
            );
        }
        ContentModelType::Stream => {
            entry.insert("event".to_owned(), Value::from("Livestream Audio Playback"));
            entry.insert(
                "Audio Story Title".to_owned(),
                Value::from(sound.content_field("/currentShow/episodeTitle")),
            );
            entry.insert(
                "Audio Show Title".to_owned(),
                Value::from(sound.content_field("/currentShow/showTitle")),
            );
            entry.insert(
                "Audio Stream Name".to_owned(),
                Value::from(sound.content_field("/name")),
            );
        }
        ContentModelType::Bumper | ContentModelType::Unknown => return entry,
    };
    entry.insert("Playback Source".to_owned(), playback_source(sound));
    entry
}
