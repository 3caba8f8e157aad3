use crate::constants::{ENGAGEMENT_CATEGORY, PLAYER_EVENT_CATEGORY};
use crate::models::common::{debounce_effect, Batched, DebouncedQueue};
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionPlayer, ActionTrack, Event, Internal, Msg};
use crate::runtime::{Effect, Effects, Env, UpdateWithCtx};
use crate::types::metrics::{MetricsAdapter, MetricsEvent};
use crate::types::sound::{content_field, ContentModelType, PlayContext, Sound, SoundId};
use crate::types::tracking::{CodecFailure, PlaybackState, SoundFailure, TrackedEvent};
use serde_json::Value;
use std::time::Duration;

impl Batched for TrackedEvent {
    type Key = SoundId;

    fn batch_key(&self) -> Option<&SoundId> {
        self.sound_id()
    }
    fn is_superseded_by(&self, later: &Self) -> bool {
        self.is_pause() && later.is_finish()
    }
}

/// Turns player lifecycle events into data layer pushes and `Persistent Player`
/// metrics events, batched in a queue independent from the listen actions.
#[derive(Clone, PartialEq, Debug)]
pub struct PlayerTracking {
    pub queue: DebouncedQueue<TrackedEvent>,
    pub session_ping: Duration,
}

impl PlayerTracking {
    pub fn new(quiet_period: Duration, session_ping: Duration) -> Self {
        PlayerTracking {
            queue: DebouncedQueue::new(quiet_period),
            session_ping,
        }
    }
}

impl<E: Env + 'static> UpdateWithCtx<E> for PlayerTracking {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Player(action)) => {
                let events = player_events::<E>(action, ctx);
                let switch_effects = match action {
                    ActionPlayer::CurrentSoundChanged {
                        current,
                        previous: Some(previous),
                    } => stream_switch::<E>(previous, current),
                    _ => Effects::none().unchanged(),
                };
                enqueue::<E>(&mut self.queue, events).join(switch_effects)
            }
            Msg::Action(Action::Track(action)) => {
                enqueue::<E>(&mut self.queue, track_events(action))
            }
            Msg::Action(Action::Destroy) => {
                self.queue.destroy();
                Effects::none().unchanged()
            }
            Msg::Internal(Internal::TrackingQueueElapsed(generation)) => {
                let events = self.queue.flush(*generation);
                tracing::debug!("flushing {} tracked events", events.len());
                Effects::msgs(
                    events
                        .into_iter()
                        .map(|event| Msg::Internal(Internal::TrackedEventFlushed(event)))
                        .collect(),
                )
                .unchanged()
            }
            Msg::Internal(Internal::TrackedEventFlushed(TrackedEvent::Player { event, .. })) => {
                E::track_metrics_event(MetricsAdapter::GoogleAnalytics, event.to_owned());
                Effects::none().unchanged()
            }
            Msg::Internal(Internal::PlayerPing) if !ctx.destroyed => {
                let minutes = self.session_ping.as_secs() / 60;
                E::track_metrics_event(
                    MetricsAdapter::GoogleAnalytics,
                    MetricsEvent::new(PLAYER_EVENT_CATEGORY, format!("{minutes} Minute Ping"))
                        .value(u64::from(ctx.is_playing)),
                );
                Effects::msg(Msg::Event(Event::PlayerPinged {
                    is_playing: ctx.is_playing,
                }))
                .join(Effects::one(ping_effect::<E>(self.session_ping)))
                .unchanged()
            }
            Msg::Internal(Internal::PlayerPing) => {
                tracing::debug!("player ping stopped");
                Effects::none().unchanged()
            }
            _ => Effects::none().unchanged(),
        }
    }
}

/// Timer effect for the next session ping.
pub fn ping_effect<E: Env + 'static>(interval: Duration) -> Effect {
    debounce_effect::<E>(interval, Msg::Internal(Internal::PlayerPing))
}

/// Enqueues all events of one dispatch and arms a single flush timer for them.
fn enqueue<E: Env + 'static>(
    queue: &mut DebouncedQueue<TrackedEvent>,
    events: Vec<TrackedEvent>,
) -> Effects {
    let generation = events
        .into_iter()
        .filter_map(|event| queue.enqueue(event))
        .last();
    match generation {
        Some(generation) => Effects::one(debounce_effect::<E>(
            queue.quiet_period(),
            Msg::Internal(Internal::TrackingQueueElapsed(generation)),
        )),
        _ => Effects::none().unchanged(),
    }
}

fn player_events<E: Env>(action: &ActionPlayer, ctx: &Ctx) -> Vec<TrackedEvent> {
    match action {
        ActionPlayer::AudioPlayed(sound) => match sound.content_model_type() {
            ContentModelType::Story => on_demand_play::<E>(sound, ctx),
            ContentModelType::Stream => stream_play::<E>(sound, ctx),
            ContentModelType::Bumper => vec![
                player_event(
                    Some(sound),
                    MetricsEvent::new(PLAYER_EVENT_CATEGORY, "Continuous Play Notification")
                        .label("Audio Bumper"),
                ),
                TrackedEvent::Bumper {
                    playback_state: PlaybackState::Play,
                    sound: sound.to_owned(),
                },
            ],
            ContentModelType::Unknown => vec![],
        },
        ActionPlayer::AudioPaused(sound) => match sound.content_model_type() {
            ContentModelType::Story => {
                track_npr::<E>(
                    MetricsEvent::new(ENGAGEMENT_CATEGORY, "On_demand_audio_pause"),
                    sound.content_field("/audio"),
                );
                vec![audio_event(PlaybackState::Pause, sound)]
            }
            ContentModelType::Stream => {
                track_npr::<E>(
                    MetricsEvent::new(ENGAGEMENT_CATEGORY, "Stream_Pause"),
                    Some(streaming_label(sound)),
                );
                vec![audio_event(PlaybackState::Pause, sound)]
            }
            ContentModelType::Bumper => {
                let autoplay_choice = sound
                    .metadata
                    .autoplay_choice
                    .as_deref()
                    .unwrap_or_default();
                vec![
                    player_event(
                        Some(sound),
                        MetricsEvent::new(PLAYER_EVENT_CATEGORY, "Paused Bumper")
                            .label(format!("{autoplay_choice}|Continuous Play")),
                    ),
                    TrackedEvent::Bumper {
                        playback_state: PlaybackState::Pause,
                        sound: sound.to_owned(),
                    },
                ]
            }
            ContentModelType::Unknown => vec![],
        },
        ActionPlayer::AudioEnded(sound) => match sound.content_model_type() {
            ContentModelType::Story => {
                let region = sound.play_context().map(PlayContext::region);
                region_event(
                    sound,
                    "Finished Story",
                    region.as_deref(),
                    &sound.metadata.content_model,
                )
                .into_iter()
                .chain(std::iter::once(audio_event(PlaybackState::End, sound)))
                .collect()
            }
            ContentModelType::Stream => vec![audio_event(PlaybackState::End, sound)],
            ContentModelType::Bumper => vec![TrackedEvent::Bumper {
                playback_state: PlaybackState::End,
                sound: sound.to_owned(),
            }],
            ContentModelType::Unknown => vec![],
        },
        ActionPlayer::CurrentSoundChanged {
            current,
            previous: Some(previous),
        } if previous.content_model_type() == ContentModelType::Bumper
            && current.play_context() == Some(&PlayContext::Queue) =>
        {
            vec![player_event(
                Some(current),
                MetricsEvent::new(PLAYER_EVENT_CATEGORY, "Launched Queue")
                    .label("Continuous Play"),
            )]
        }
        _ => vec![],
    }
}

fn on_demand_play<E: Env>(sound: &Sound, ctx: &Ctx) -> Vec<TrackedEvent> {
    let story = &sound.metadata.content_model;
    let has_played = ctx.has_played(sound);
    track_npr::<E>(
        MetricsEvent::new(ENGAGEMENT_CATEGORY, "On_demand_audio_play"),
        sound.content_field("/audio"),
    );
    let mut events = vec![];
    if !has_played
        && matches!(
            sound.play_context(),
            Some(PlayContext::Queue) | Some(PlayContext::History)
        )
    {
        let show_title = content_field(story, "/showTitle")
            .or_else(|| content_field(story, "/headers/brand/title"))
            .unwrap_or_default();
        let story_title = content_field(story, "/title").unwrap_or_default();
        events.push(player_event(
            Some(sound),
            MetricsEvent::new(PLAYER_EVENT_CATEGORY, "Played Story from Queue")
                .label(format!("{show_title}|{story_title}")),
        ));
    };
    if !sound.metadata.from_click {
        let title = content_field(story, "/title").unwrap_or_default();
        let region = sound.play_context().map(PlayContext::region);
        events.extend(region_event(
            sound,
            &format!("Played Story \"{title}\""),
            region.as_deref(),
            story,
        ));
    };
    let playback_state = if has_played {
        PlaybackState::Resume
    } else {
        PlaybackState::Play
    };
    events.push(audio_event(playback_state, sound));
    events
}

fn stream_play<E: Env>(sound: &Sound, ctx: &Ctx) -> Vec<TrackedEvent> {
    let mut events = vec![];
    let previous_identity = ctx
        .last_played
        .as_ref()
        .and_then(|last_played| last_played.content_identity());
    let is_new_stream = sound.content_identity() != previous_identity;
    if is_new_stream {
        let name = sound.content_field("/name").unwrap_or_default();
        let label = match sound.play_context() {
            Some(context)
                if matches!(context, PlayContext::Nav | PlayContext::ContinuousPlay) =>
            {
                format!("{name}|{}", context.label())
            }
            _ => name,
        };
        events.push(player_event(
            Some(sound),
            MetricsEvent::new(PLAYER_EVENT_CATEGORY, "Launched Stream").label(label),
        ));
    };
    track_npr::<E>(
        MetricsEvent::new(ENGAGEMENT_CATEGORY, "Stream_Play"),
        Some(streaming_label(sound)),
    );
    let playback_state = if is_new_stream {
        PlaybackState::Play
    } else {
        PlaybackState::Resume
    };
    events.push(audio_event(playback_state, sound));
    events
}

/// Switching between two different streams is reported right away.
fn stream_switch<E: Env>(previous: &Sound, current: &Sound) -> Effects {
    if previous.content_model_type() != ContentModelType::Stream
        || current.content_model_type() != ContentModelType::Stream
        || previous.content_identity() == current.content_identity()
    {
        return Effects::none().unchanged();
    };
    let from = previous.content_field("/name").unwrap_or_default();
    let to = current.content_field("/name").unwrap_or_default();
    E::track_metrics_event(
        MetricsAdapter::GoogleAnalytics,
        MetricsEvent::new(PLAYER_EVENT_CATEGORY, "Switched Stream to Stream")
            .label(format!("from {from} to {to}")),
    );
    track_npr::<E>(
        MetricsEvent::new(ENGAGEMENT_CATEGORY, "Stream_Change"),
        Some(streaming_label(current)),
    );
    Effects::msg(Msg::Event(Event::StreamSwitched { from, to })).unchanged()
}

fn track_events(action: &ActionTrack) -> Vec<TrackedEvent> {
    match action {
        ActionTrack::AllCodecFailures { failures, sound } => failures
            .iter()
            .flat_map(|failure| codec_failure(failure, sound.as_ref()))
            .collect(),
        ActionTrack::SoundFailure(SoundFailure { message, failures }) => {
            std::iter::once(player_event(
                None,
                MetricsEvent::new(PLAYER_EVENT_CATEGORY, "Sound Error").label(message.to_owned()),
            ))
            .chain(std::iter::once(TrackedEvent::AudioError {
                sound_id: None,
                error_type: "Sound Error".to_owned(),
                error_details: message.to_owned(),
            }))
            .chain(
                failures
                    .iter()
                    .flat_map(|failure| codec_failure(failure, None)),
            )
            .collect()
        }
        ActionTrack::DismissAutoplayNotification => vec![player_event(
            None,
            MetricsEvent::new(PLAYER_EVENT_CATEGORY, "Continuous Play Notification")
                .label("Click to Close Notification"),
        )],
        ActionTrack::AddToQueue { story, region } => {
            let region = region.as_deref().filter(|region| !region.is_empty());
            match region {
                Some(region) => {
                    let code = content_field(story, "/analyticsCode").unwrap_or_default();
                    vec![player_event(
                        None,
                        MetricsEvent::new(PLAYER_EVENT_CATEGORY, "Add Story to Queue")
                            .label(format!("{region}:{code}")),
                    )]
                }
                None => vec![],
            }
        }
    }
}

fn codec_failure(failure: &CodecFailure, sound: Option<&Sound>) -> Vec<TrackedEvent> {
    let good_url = match sound {
        Some(sound) => format!("good url: {}", sound.id),
        None => "no successful url".to_owned(),
    };
    let details = format!(
        "reason: {} | bad url: {} | {}",
        failure.error, failure.url, good_url
    );
    let sound_id = sound.map(|sound| sound.id.to_owned());
    vec![
        TrackedEvent::Player {
            sound_id: sound_id.to_owned(),
            event: MetricsEvent::new(
                PLAYER_EVENT_CATEGORY,
                format!("Codec Failure | {}", failure.connection_name),
            )
            .label(details.to_owned()),
        },
        TrackedEvent::AudioError {
            sound_id,
            error_type: "Codec Failure".to_owned(),
            error_details: details,
        },
    ]
}

/// A region-labelled event, dropped when the region is missing.
fn region_event(
    sound: &Sound,
    action: &str,
    region: Option<&str>,
    story: &Value,
) -> Option<TrackedEvent> {
    let region = region.filter(|region| !region.is_empty())?;
    let code = content_field(story, "/analyticsCode").unwrap_or_default();
    Some(player_event(
        Some(sound),
        MetricsEvent::new(PLAYER_EVENT_CATEGORY, action).label(format!("{region}:{code}")),
    ))
}

fn player_event(sound: Option<&Sound>, event: MetricsEvent) -> TrackedEvent {
    TrackedEvent::Player {
        sound_id: sound.map(|sound| sound.id.to_owned()),
        event,
    }
}

fn audio_event(playback_state: PlaybackState, sound: &Sound) -> TrackedEvent {
    TrackedEvent::Audio {
        playback_state,
        sound: sound.to_owned(),
    }
}

fn streaming_label(sound: &Sound) -> String {
    format!(
        "Streaming_{}",
        sound.content_field("/name").unwrap_or_default()
    )
}

fn track_npr<E: Env>(event: MetricsEvent, label: Option<String>) {
    let event = match label {
        Some(label) => event.label(label),
        None => event,
    };
    E::track_metrics_event(MetricsAdapter::NprAnalytics, event);
}
