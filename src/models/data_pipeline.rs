use crate::models::common::{eq_update, DeltaTracker};
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionDataPipeline, Event, Internal, Msg};
use crate::runtime::{EffectFuture, Effects, Env, EnvError, EnvFutureExt, UpdateWithCtx};
use crate::types::config::Config;
use crate::types::listen::ListenActionType;
use futures::{future, FutureExt};
use http::header::CONTENT_TYPE;
use http::Request;
use serde::de::IgnoredAny;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Sender of listen actions and item views to the data pipeline and the
/// legacy counters.
#[derive(Default, Clone, PartialEq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DataPipeline {
    pub delta: DeltaTracker,
    pub current_referrer: Option<String>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for DataPipeline {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Internal(Internal::ListenActionFlushed(action)) => self
                .report_listen_action::<E>(
                    action.action_type,
                    action.payload.to_owned(),
                    &ctx.config,
                ),
            Msg::Action(Action::DataPipeline(ActionDataPipeline::ReportListenAction {
                action_type,
                payload,
            })) => match ListenActionType::from_str(action_type) {
                Ok(action_type) => {
                    self.report_listen_action::<E>(action_type, payload.to_owned(), &ctx.config)
                }
                Err(_) => {
                    tracing::trace!("ignoring unknown listen action {}", action_type);
                    Effects::none().unchanged()
                }
            },
            Msg::Action(Action::DataPipeline(ActionDataPipeline::ReportItemView(payload))) => {
                Effects::msg(Msg::Internal(Internal::ItemViewDeferred(payload.to_owned())))
                    .unchanged()
            }
            Msg::Internal(Internal::ItemViewDeferred(payload)) => {
                self.report_item_view::<E>(payload.to_owned(), &ctx.config)
            }
            Msg::Action(Action::DataPipeline(ActionDataPipeline::SetCurrentReferrer(
                referrer,
            ))) => eq_update(&mut self.current_referrer, referrer.to_owned()),
            _ => Effects::none().unchanged(),
        }
    }
}

impl DataPipeline {
    fn report_listen_action<E: Env + 'static>(
        &mut self,
        action_type: ListenActionType,
        mut payload: Map<String, Value>,
        config: &Config,
    ) -> Effects {
        let delta = self.delta.update(action_type, E::now());
        payload.insert("delta".to_owned(), Value::from(delta));
        let data = self.generate_data::<E>(payload, Some(action_type), config);
        let cms_id = cms_id(&data);
        let mut futures = vec![send::<E>(
            config.listen_action_url(),
            Value::Object(data),
            Event::ListenActionReported {
                action: action_type,
                delta,
            },
        )];
        match (cms_id, action_type) {
            (Some(cms_id), action_type) if action_type.is_start_or_resume() => {
                futures.push(legacy_send::<E>(
                    format!("api/most/listen/managed_item/{cms_id}/"),
                    config,
                ));
                futures.push(legacy_send::<E>(
                    format!("api/v1/listenaction/create/{cms_id}/play/"),
                    config,
                ));
            }
            (Some(cms_id), ListenActionType::Finish) => {
                futures.push(legacy_send::<E>(
                    format!("api/v1/listenaction/create/{cms_id}/complete/"),
                    config,
                ));
            }
            _ => {}
        };
        Effects::futures(futures)
    }
    fn report_item_view<E: Env + 'static>(
        &self,
        payload: Map<String, Value>,
        config: &Config,
    ) -> Effects {
        let data = self.generate_data::<E>(payload, None, config);
        let cms_id = cms_id(&data);
        let mut futures = vec![send::<E>(
            config.item_view_url(),
            Value::Object(data),
            Event::ItemViewReported,
        )];
        if let Some(cms_id) = cms_id {
            futures.push(legacy_send::<E>(
                format!("api/most/view/managed_item/{cms_id}/"),
                config,
            ));
        };
        Effects::futures(futures).unchanged()
    }
    /// Page context merged under the incoming payload, the payload wins on conflicts.
    fn generate_data<E: Env>(
        &self,
        incoming: Map<String, Value>,
        action: Option<ListenActionType>,
        config: &Config,
    ) -> Map<String, Value> {
        let context = E::analytics_context();
        let mut data = Map::new();
        if let Some(action) = action {
            data.insert("action".to_owned(), Value::from(action.wire_name()));
        };
        data.insert("browser_id".to_owned(), Value::from(context.browser_id));
        data.insert("client".to_owned(), Value::from(config.client_slug.to_owned()));
        data.insert(
            "referrer".to_owned(),
            Value::from(self.current_referrer.to_owned()),
        );
        data.insert(
            "external_referrer".to_owned(),
            Value::from(context.external_referrer),
        );
        data.insert("url".to_owned(), Value::from(context.url));
        data.insert("site_id".to_owned(), Value::from(config.site_id));
        data.extend(incoming);
        data
    }
}

fn cms_id(data: &Map<String, Value>) -> Option<String> {
    match data.get("cms_id") {
        Some(Value::String(cms_id)) if !cms_id.is_empty() => Some(cms_id.to_owned()),
        Some(Value::Number(cms_id)) => Some(cms_id.to_string()),
        _ => None,
    }
}

fn legacy_send<E: Env + 'static>(path: String, config: &Config) -> EffectFuture {
    let body = serde_json::json!({ "browser_id": E::analytics_context().browser_id });
    send::<E>(
        config.legacy_url(&path),
        body,
        Event::LegacyActionReported { path },
    )
}

/// Fire-and-forget JSON POST, resolving to `event` or to an error event.
fn send<E: Env + 'static>(url: String, body: Value, event: Event) -> EffectFuture {
    let request = E::authorize(
        Request::post(url.as_str()).header(CONTENT_TYPE, "application/json"),
    )
    .body(body);
    match request {
        Ok(request) => EffectFuture::Concurrent(
            E::fetch::<_, IgnoredAny>(request)
                .map(move |result| match result {
                    Ok(_) => Msg::Event(event),
                    Err(error) => {
                        tracing::warn!("delivery to {} failed: {}", url, error);
                        Msg::Event(Event::Error {
                            error,
                            source: Box::new(event),
                        })
                    }
                })
                .boxed_env(),
        ),
        Err(error) => EffectFuture::Concurrent(
            future::ready(Msg::Event(Event::Error {
                error: EnvError::from(error),
                source: Box::new(event),
            }))
            .boxed_env(),
        ),
    }
}
