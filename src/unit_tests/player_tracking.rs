use crate::runtime::msg::{Action, ActionPlayer, ActionTrack, Event};
use crate::runtime::RuntimeAction;
use crate::types::metrics::{MetricsAdapter, MetricsEvent};
use crate::unit_tests::{bumper, core_events, dispatch_player, runtime, story, stream, TestEnv};
use serde_json::json;
use std::time::Duration;

fn player_events() -> Vec<(String, Option<String>)> {
    TestEnv::metrics(MetricsAdapter::GoogleAnalytics)
        .into_iter()
        .filter(|event| event.category == "Persistent Player")
        .map(|event| (event.action, event.label))
        .collect()
}

fn player_event(action: &str, label: &str) -> (String, Option<String>) {
    (action.to_owned(), Some(label.to_owned()))
}

#[test]
fn stream_switch_is_reported_once() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, mut rx) = runtime();
    let fm = stream("wnyc-fm939", "WNYC 93.9 FM");
    let am = stream("wnyc-am820", "AM 820");
    dispatch_player(
        &runtime,
        ActionPlayer::CurrentSoundChanged {
            current: am.to_owned(),
            previous: Some(fm.to_owned()),
        },
    );
    assert_eq!(
        player_events(),
        vec![player_event("Switched Stream to Stream", "from WNYC 93.9 FM to AM 820")],
        "reported without waiting for the quiet period"
    );
    assert_eq!(
        TestEnv::metrics(MetricsAdapter::NprAnalytics),
        vec![MetricsEvent::new("Engagement", "Stream_Change").label("Streaming_AM 820")]
    );
    dispatch_player(
        &runtime,
        ActionPlayer::CurrentSoundChanged {
            current: am.to_owned(),
            previous: Some(am.to_owned()),
        },
    );
    dispatch_player(
        &runtime,
        ActionPlayer::CurrentSoundChanged {
            current: am,
            previous: Some(story("a")),
        },
    );
    TestEnv::advance(Duration::from_millis(100));
    let switches = core_events(&mut rx)
        .into_iter()
        .filter(|event| matches!(event, Event::StreamSwitched { .. }))
        .collect::<Vec<_>>();
    assert_eq!(
        switches,
        vec![Event::StreamSwitched {
            from: "WNYC 93.9 FM".to_owned(),
            to: "AM 820".to_owned(),
        }]
    );
    assert_eq!(player_events().len(), 1);
}

#[test]
fn launched_stream_only_for_a_new_stream() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, _rx) = runtime();
    let fm = stream("wnyc-fm939", "WNYC 93.9 FM");
    dispatch_player(&runtime, ActionPlayer::AudioPlayed(fm.to_owned()));
    dispatch_player(&runtime, ActionPlayer::AudioPaused(fm.to_owned()));
    dispatch_player(&runtime, ActionPlayer::AudioPlayed(fm));
    TestEnv::advance(Duration::from_millis(100));
    assert_eq!(
        player_events(),
        vec![player_event("Launched Stream", "WNYC 93.9 FM|Navigation")]
    );
    assert_eq!(
        TestEnv::metrics(MetricsAdapter::NprAnalytics)
            .into_iter()
            .map(|event| event.action)
            .collect::<Vec<_>>(),
        vec!["Stream_Play", "Stream_Pause", "Stream_Play"]
    );
}

#[test]
fn story_play_events() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, _rx) = runtime();
    dispatch_player(&runtime, ActionPlayer::AudioPlayed(story("a")));
    TestEnv::advance(Duration::from_millis(100));
    dispatch_player(&runtime, ActionPlayer::AudioPlayed(story("a")));
    TestEnv::advance(Duration::from_millis(100));
    assert_eq!(
        player_events(),
        vec![
            player_event("Played Story from Queue", "The Show|Story a"),
            player_event("Played Story \"Story a\"", "Queue:code_a"),
            player_event("Played Story \"Story a\"", "Queue:code_a"),
        ]
    );
    assert_eq!(
        TestEnv::metrics(MetricsAdapter::NprAnalytics),
        vec![
            MetricsEvent::new("Engagement", "On_demand_audio_play")
                .label("https://audio.wnyc.org/a.mp3");
            2
        ]
    );
}

#[test]
fn region_labelled_events_without_region_are_dropped() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, _rx) = runtime();
    let mut sound = story("a");
    sound.metadata.play_context = None;
    dispatch_player(&runtime, ActionPlayer::AudioPlayed(sound.to_owned()));
    dispatch_player(&runtime, ActionPlayer::AudioEnded(sound));
    runtime.dispatch(RuntimeAction::from(Action::Track(ActionTrack::AddToQueue {
        story: json!({ "analyticsCode": "code_b" }),
        region: None,
    })));
    TestEnv::advance(Duration::from_millis(100));
    assert!(player_events().is_empty());
    let mut sound = story("a");
    sound.metadata.from_click = true;
    dispatch_player(&runtime, ActionPlayer::AudioEnded(sound));
    runtime.dispatch(RuntimeAction::from(Action::Track(ActionTrack::AddToQueue {
        story: json!({ "analyticsCode": "code_b" }),
        region: Some("Homepage".to_owned()),
    })));
    TestEnv::advance(Duration::from_millis(100));
    assert_eq!(
        player_events(),
        vec![
            player_event("Finished Story", "Queue:code_a"),
            player_event("Add Story to Queue", "Homepage:code_b"),
        ]
    );
}

#[test]
fn bumper_events() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, _rx) = runtime();
    dispatch_player(&runtime, ActionPlayer::AudioPlayed(bumper("bumper")));
    dispatch_player(&runtime, ActionPlayer::AudioPaused(bumper("bumper")));
    TestEnv::advance(Duration::from_millis(100));
    dispatch_player(
        &runtime,
        ActionPlayer::CurrentSoundChanged {
            current: story("a"),
            previous: Some(bumper("bumper")),
        },
    );
    runtime.dispatch(RuntimeAction::from(Action::Track(
        ActionTrack::DismissAutoplayNotification,
    )));
    TestEnv::advance(Duration::from_millis(100));
    assert_eq!(
        player_events(),
        vec![
            player_event("Continuous Play Notification", "Audio Bumper"),
            player_event("Paused Bumper", "wnyc-fm939|Continuous Play"),
            player_event("Launched Queue", "Continuous Play"),
            player_event("Continuous Play Notification", "Click to Close Notification"),
        ]
    );
}

#[test]
fn session_ping_is_registered_once_and_stops_after_destroy() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, mut rx) = runtime();
    assert_eq!(TestEnv::pending_timers(), 1);
    TestEnv::advance(Duration::from_secs(60));
    dispatch_player(&runtime, ActionPlayer::AudioPlayed(story("a")));
    dispatch_player(&runtime, ActionPlayer::AudioPaused(story("a")));
    dispatch_player(&runtime, ActionPlayer::AudioPlayed(story("a")));
    TestEnv::advance(Duration::from_secs(60));
    TestEnv::advance(Duration::from_secs(120));
    runtime.dispatch(RuntimeAction::from(Action::Destroy));
    TestEnv::advance(Duration::from_secs(600));
    let pings = TestEnv::metrics(MetricsAdapter::GoogleAnalytics)
        .into_iter()
        .filter(|event| event.action == "2 Minute Ping")
        .map(|event| event.value)
        .collect::<Vec<_>>();
    assert_eq!(pings, vec![Some(1), Some(1)]);
    let pinged = core_events(&mut rx)
        .into_iter()
        .filter(|event| matches!(event, Event::PlayerPinged { .. }))
        .count();
    assert_eq!(pinged, 2);
    assert_eq!(TestEnv::pending_timers(), 0);
}

#[test]
fn session_ping_reports_idle_player() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (_runtime, _rx) = runtime();
    TestEnv::advance(Duration::from_secs(120));
    assert_eq!(
        TestEnv::metrics(MetricsAdapter::GoogleAnalytics),
        vec![MetricsEvent::new("Persistent Player", "2 Minute Ping").value(0)]
    );
}
