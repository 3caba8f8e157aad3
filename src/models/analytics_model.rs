use crate::models::ctx::Ctx;
use crate::models::data_layer::DataLayer;
use crate::models::data_pipeline::DataPipeline;
use crate::models::listen_analytics::ListenAnalytics;
use crate::models::player_tracking::{ping_effect, PlayerTracking};
use crate::runtime::msg::Msg;
use crate::runtime::{Effects, Env, Model, Update, UpdateWithCtx};
use crate::types::config::Config;
use derivative::Derivative;

/// The root model driven by the runtime.
///
/// Coordinators are updated before `ctx`, so they observe the player state
/// from before the message being handled.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct AnalyticsModel<E: Env> {
    pub ctx: Ctx,
    pub listen_analytics: ListenAnalytics,
    pub player_tracking: PlayerTracking,
    pub data_pipeline: DataPipeline,
    pub data_layer: DataLayer<E>,
}

impl<E: Env + 'static> AnalyticsModel<E> {
    /// Builds the model together with the effects to run once, the session ping.
    pub fn new(config: Config) -> (Self, Effects) {
        let model = AnalyticsModel {
            listen_analytics: ListenAnalytics::new(config.debounce()),
            player_tracking: PlayerTracking::new(config.debounce(), config.session_ping()),
            data_pipeline: DataPipeline::default(),
            data_layer: DataLayer::default(),
            ctx: Ctx::new(config),
        };
        let effects = Effects::one(ping_effect::<E>(model.player_tracking.session_ping)).unchanged();
        (model, effects)
    }
}

impl<E: Env + 'static> Model<E> for AnalyticsModel<E> {
    fn update(&mut self, msg: &Msg) -> Effects {
        let listen_analytics_effects =
            UpdateWithCtx::<E>::update(&mut self.listen_analytics, msg, &self.ctx);
        let player_tracking_effects =
            UpdateWithCtx::<E>::update(&mut self.player_tracking, msg, &self.ctx);
        let data_pipeline_effects =
            UpdateWithCtx::<E>::update(&mut self.data_pipeline, msg, &self.ctx);
        let data_layer_effects = Update::<E>::update(&mut self.data_layer, msg);
        let ctx_effects = Update::<E>::update(&mut self.ctx, msg);
        listen_analytics_effects
            .join(player_tracking_effects)
            .join(data_pipeline_effects)
            .join(data_layer_effects)
            .join(ctx_effects)
    }
}
