use crate::models::analytics_model::AnalyticsModel;
use crate::runtime::msg::{Action, ActionPlayer};
use crate::runtime::{Runtime, RuntimeAction, RuntimeEvent};
use crate::types::config::Config;
use crate::types::sound::{ContentModelType, PlayContext, Sound, SoundId, SoundMetadata};
use crate::unit_tests::TestEnv;
use futures::channel::mpsc::Receiver;
use serde_json::{json, Map, Value};

pub const LISTEN_ACTION_URL: &str = "https://api.wnyc.org/v1/events/listened";
pub const ITEM_VIEW_URL: &str = "https://api.wnyc.org/v1/events/viewed";

pub fn runtime() -> (Runtime<TestEnv, AnalyticsModel<TestEnv>>, Receiver<RuntimeEvent>) {
    runtime_with_config(Config::default())
}

pub fn runtime_with_config(
    config: Config,
) -> (Runtime<TestEnv, AnalyticsModel<TestEnv>>, Receiver<RuntimeEvent>) {
    let (model, effects) = AnalyticsModel::<TestEnv>::new(config);
    Runtime::<TestEnv, _>::new(model, effects, 1000)
}

pub fn dispatch_player(
    runtime: &Runtime<TestEnv, AnalyticsModel<TestEnv>>,
    action: ActionPlayer,
) {
    runtime.dispatch(RuntimeAction::from(Action::Player(action)));
}

pub fn analytics(cms_id: &str) -> Map<String, Value> {
    match json!({ "cms_id": cms_id, "item_type": "episode" }) {
        Value::Object(analytics) => analytics,
        _ => unreachable!(),
    }
}

pub fn story(id: &str) -> Sound {
    Sound {
        id: SoundId::from(id),
        position: 0,
        has_played: false,
        metadata: SoundMetadata {
            content_model_type: ContentModelType::Story,
            content_model: json!({
                "id": id,
                "title": format!("Story {id}"),
                "showTitle": "The Show",
                "analyticsCode": format!("code_{id}"),
                "audio": format!("https://audio.wnyc.org/{id}.mp3"),
            }),
            content_id: Some(id.to_owned()),
            play_context: Some(PlayContext::Queue),
            analytics: Some(analytics(id)),
            from_click: false,
            autoplay_choice: None,
        },
    }
}

pub fn stream(id: &str, name: &str) -> Sound {
    Sound {
        id: SoundId::from(format!("https://stream.wnyc.org/{id}")),
        position: 0,
        has_played: false,
        metadata: SoundMetadata {
            content_model_type: ContentModelType::Stream,
            content_model: json!({
                "id": id,
                "name": name,
                "currentShow": { "showTitle": "Morning Edition", "episodeTitle": "Today" },
            }),
            content_id: Some(id.to_owned()),
            play_context: Some(PlayContext::Nav),
            analytics: Some(analytics(id)),
            from_click: true,
            autoplay_choice: None,
        },
    }
}

pub fn bumper(id: &str) -> Sound {
    Sound {
        id: SoundId::from(id),
        position: 0,
        has_played: false,
        metadata: SoundMetadata {
            content_model_type: ContentModelType::Bumper,
            content_model: Value::Null,
            content_id: None,
            play_context: Some(PlayContext::ContinuousPlay),
            analytics: None,
            from_click: false,
            autoplay_choice: Some("wnyc-fm939".to_owned()),
        },
    }
}
