use crate::models::common::{debounce_effect, Batched, DebouncedQueue};
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionPlayer, Internal, Msg};
use crate::runtime::{Effects, Env, UpdateWithCtx};
use crate::types::listen::{ListenAction, ListenActionType};
use crate::types::sound::{ContentModelType, Sound, SoundId};
use serde_json::{Map, Value};
use std::time::Duration;

impl Batched for ListenAction {
    type Key = SoundId;

    fn batch_key(&self) -> Option<&SoundId> {
        Some(&self.sound_id)
    }
    fn is_superseded_by(&self, later: &Self) -> bool {
        self.action_type == ListenActionType::Pause
            && later.action_type == ListenActionType::Finish
    }
}

/// Turns player lifecycle events into listen actions and batches them for the
/// data pipeline.
#[derive(Clone, PartialEq, Debug)]
pub struct ListenAnalytics {
    pub queue: DebouncedQueue<ListenAction>,
}

impl ListenAnalytics {
    pub fn new(quiet_period: Duration) -> Self {
        ListenAnalytics {
            queue: DebouncedQueue::new(quiet_period),
        }
    }
}

impl<E: Env + 'static> UpdateWithCtx<E> for ListenAnalytics {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Player(action)) => match listen_action_type(action, ctx) {
                Some((sound, action_type)) => enqueue::<E>(&mut self.queue, sound, action_type),
                _ => Effects::none().unchanged(),
            },
            Msg::Action(Action::WindowClose) => {
                flush_synchronously(&mut self.queue, ctx.current_sound.as_ref())
            }
            Msg::Action(Action::Destroy) => {
                self.queue.destroy();
                Effects::none().unchanged()
            }
            Msg::Internal(Internal::ListenQueueElapsed(generation)) => {
                let actions = self.queue.flush(*generation);
                tracing::debug!("flushing {} listen actions", actions.len());
                Effects::msgs(
                    actions
                        .into_iter()
                        .map(|action| Msg::Internal(Internal::ListenActionFlushed(action)))
                        .collect(),
                )
                .unchanged()
            }
            _ => Effects::none().unchanged(),
        }
    }
}

/// Classifies a player event by content type into the listen action it reports.
fn listen_action_type<'a>(
    action: &'a ActionPlayer,
    ctx: &Ctx,
) -> Option<(&'a Sound, ListenActionType)> {
    let action_type = match action {
        ActionPlayer::AudioPlayed(sound) => match sound.content_model_type() {
            ContentModelType::Story if ctx.has_played(sound) => ListenActionType::Resume,
            ContentModelType::Story | ContentModelType::Stream => ListenActionType::Start,
            ContentModelType::Bumper | ContentModelType::Unknown => return None,
        },
        ActionPlayer::AudioPaused(sound) => match sound.content_model_type() {
            ContentModelType::Unknown => return None,
            _ => ListenActionType::Pause,
        },
        ActionPlayer::AudioEnded(sound) => match sound.content_model_type() {
            ContentModelType::Story | ContentModelType::Stream => ListenActionType::Finish,
            ContentModelType::Bumper | ContentModelType::Unknown => return None,
        },
        ActionPlayer::AudioPositionWillChange(_) => ListenActionType::Position,
        ActionPlayer::AudioWillRewind(_) => ListenActionType::Back15,
        ActionPlayer::AudioWillFastForward(_) => ListenActionType::Forward15,
        ActionPlayer::CurrentSoundInterrupted(sound) => match sound.content_model_type() {
            ContentModelType::Story | ContentModelType::Stream => ListenActionType::Interrupt,
            ContentModelType::Bumper | ContentModelType::Unknown => return None,
        },
        ActionPlayer::CurrentSoundChanged { .. } => return None,
    };
    let sound = match action {
        ActionPlayer::AudioPlayed(sound)
        | ActionPlayer::AudioPaused(sound)
        | ActionPlayer::AudioEnded(sound)
        | ActionPlayer::AudioPositionWillChange(sound)
        | ActionPlayer::AudioWillRewind(sound)
        | ActionPlayer::AudioWillFastForward(sound)
        | ActionPlayer::CurrentSoundInterrupted(sound) => sound,
        ActionPlayer::CurrentSoundChanged { current, .. } => current,
    };
    Some((sound, action_type))
}

/// The queued record for a sound, `None` for sounds without an analytics payload.
fn listen_action(sound: &Sound, action_type: ListenActionType) -> Option<ListenAction> {
    let analytics = match &sound.metadata.analytics {
        Some(analytics) => analytics,
        _ => {
            tracing::trace!("sound {} is not analytics eligible", sound.id);
            return None;
        }
    };
    let mut payload = Map::new();
    payload.insert(
        "current_audio_position".to_owned(),
        Value::from(sound.position),
    );
    payload.extend(analytics.to_owned());
    Some(ListenAction {
        sound_id: sound.id.to_owned(),
        action_type,
        payload,
    })
}

fn enqueue<E: Env + 'static>(
    queue: &mut DebouncedQueue<ListenAction>,
    sound: &Sound,
    action_type: ListenActionType,
) -> Effects {
    let generation = match listen_action(sound, action_type) {
        Some(action) => queue.enqueue(action),
        _ => return Effects::none().unchanged(),
    };
    match generation {
        Some(generation) => Effects::one(debounce_effect::<E>(
            queue.quiet_period(),
            Msg::Internal(Internal::ListenQueueElapsed(generation)),
        )),
        _ => Effects::none().unchanged(),
    }
}

/// Delivers the buffered actions, then the close of the current sound.
///
/// The close bypasses the queue and its suppression.
fn flush_synchronously(
    queue: &mut DebouncedQueue<ListenAction>,
    current_sound: Option<&Sound>,
) -> Effects {
    let close = current_sound.and_then(|sound| listen_action(sound, ListenActionType::Close));
    Effects::msgs(
        queue
            .drain()
            .into_iter()
            .chain(close)
            .map(|action| Msg::Internal(Internal::ListenActionFlushed(action)))
            .collect(),
    )
    .unchanged()
}
