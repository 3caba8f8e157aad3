use crate::runtime::msg::{Action, ActionDataPipeline, ActionPlayer};
use crate::types::sound::{ContentModelType, PlayContext};

#[test]
fn deserialize_player_action() {
    let action = serde_json::from_str::<Action>(
        r#"{
            "action": "Player",
            "args": {
                "action": "AudioPlayed",
                "args": {
                    "id": "https://audio.wnyc.org/story.mp3",
                    "position": 1500,
                    "metadata": {
                        "contentModelType": "story",
                        "contentModel": { "title": "Story" },
                        "playContext": "Continuous Play",
                        "analytics": { "cms_id": 1 }
                    }
                }
            }
        }"#,
    )
    .unwrap();
    match action {
        Action::Player(ActionPlayer::AudioPlayed(sound)) => {
            assert_eq!(sound.position, 1500);
            assert!(!sound.has_played);
            assert_eq!(sound.content_model_type(), ContentModelType::Story);
            assert_eq!(sound.play_context(), Some(&PlayContext::ContinuousPlay));
            assert_eq!(sound.content_field("/title"), Some("Story".to_owned()));
            assert!(!sound.metadata.from_click);
        }
        action => panic!("unexpected action {:?}", action),
    }
}

#[test]
fn deserialize_unknown_content_model_type() {
    let action = serde_json::from_str::<Action>(
        r#"{
            "action": "Player",
            "args": {
                "action": "AudioPaused",
                "args": { "id": "ad.mp3", "metadata": { "contentModelType": "promo" } }
            }
        }"#,
    )
    .unwrap();
    match action {
        Action::Player(ActionPlayer::AudioPaused(sound)) => {
            assert_eq!(sound.content_model_type(), ContentModelType::Unknown);
            assert_eq!(sound.metadata.analytics, None);
        }
        action => panic!("unexpected action {:?}", action),
    }
}

#[test]
fn deserialize_report_listen_action() {
    let action = serde_json::from_str::<Action>(
        r#"{
            "action": "DataPipeline",
            "args": {
                "action": "ReportListenAction",
                "args": { "action_type": "back_15", "payload": { "cms_id": "1" } }
            }
        }"#,
    )
    .unwrap();
    assert!(matches!(
        action,
        Action::DataPipeline(ActionDataPipeline::ReportListenAction { action_type, .. })
            if action_type == "back_15"
    ));
}
