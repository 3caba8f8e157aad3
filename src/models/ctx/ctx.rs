use crate::models::common::eq_update;
use crate::runtime::msg::{Action, ActionPlayer, Msg};
use crate::runtime::{Effects, Env, Update};
use crate::types::config::Config;
use crate::types::sound::{Sound, SoundId};
use serde::Serialize;
use std::collections::HashSet;

/// Player state shared by the coordinators.
///
/// Updated after the coordinators, so while handling a message they observe
/// the state from before it.
#[derive(Default, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Ctx {
    pub config: Config,
    pub current_sound: Option<Sound>,
    /// The sound behind the most recent `AudioPlayed`.
    pub last_played: Option<Sound>,
    pub is_playing: bool,
    #[serde(skip)]
    pub played: HashSet<SoundId>,
    pub destroyed: bool,
}

impl Ctx {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
    /// Whether the sound already played once in this page lifetime.
    pub fn has_played(&self, sound: &Sound) -> bool {
        sound.has_played || self.played.contains(&sound.id)
    }
    /// Keeps the live position of the current sound, other sounds are ignored.
    fn refresh_current_sound(&mut self, sound: &Sound) -> Effects {
        match &self.current_sound {
            Some(current_sound) if current_sound.id == sound.id => {
                eq_update(&mut self.current_sound, Some(sound.to_owned()))
            }
            _ => Effects::none().unchanged(),
        }
    }
}

impl<E: Env + 'static> Update<E> for Ctx {
    fn update(&mut self, msg: &Msg) -> Effects {
        match msg {
            Msg::Action(Action::Player(ActionPlayer::AudioPlayed(sound))) => {
                self.played.insert(sound.id.to_owned());
                let current_sound_effects =
                    eq_update(&mut self.current_sound, Some(sound.to_owned()));
                let last_played_effects = eq_update(&mut self.last_played, Some(sound.to_owned()));
                let is_playing_effects = eq_update(&mut self.is_playing, true);
                current_sound_effects
                    .join(last_played_effects)
                    .join(is_playing_effects)
            }
            Msg::Action(Action::Player(ActionPlayer::AudioPaused(sound)))
            | Msg::Action(Action::Player(ActionPlayer::AudioEnded(sound)))
            | Msg::Action(Action::Player(ActionPlayer::CurrentSoundInterrupted(sound))) => {
                let current_sound_effects = self.refresh_current_sound(sound);
                let is_playing_effects = eq_update(&mut self.is_playing, false);
                current_sound_effects.join(is_playing_effects)
            }
            Msg::Action(Action::Player(ActionPlayer::AudioPositionWillChange(sound)))
            | Msg::Action(Action::Player(ActionPlayer::AudioWillRewind(sound)))
            | Msg::Action(Action::Player(ActionPlayer::AudioWillFastForward(sound))) => {
                self.refresh_current_sound(sound)
            }
            Msg::Action(Action::Player(ActionPlayer::CurrentSoundChanged { current, .. })) => {
                eq_update(&mut self.current_sound, Some(current.to_owned()))
            }
            Msg::Action(Action::Destroy) => eq_update(&mut self.destroyed, true),
            _ => Effects::none().unchanged(),
        }
    }
}
