use crate::types::metrics::{MetricsAdapter, MetricsEvent};
use crate::types::pipeline::AnalyticsContext;
use chrono::{DateTime, Utc};
use futures::Future;
use http::request::Builder as RequestBuilder;
use http::Request;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

pub use conditional_types::{ConditionalSend, EnvFuture, EnvFutureExt};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EnvError {
    /// Error returned on [`Env::fetch`]
    Fetch(String),
    /// Serde error when serializing
    Serde(String),
    /// No global data layer is available to push into
    DataLayerUnavailable,
    Other(String),
}

impl EnvError {
    pub fn message(&self) -> String {
        match &self {
            EnvError::Fetch(message) => format!("Failed to fetch: {message}"),
            EnvError::Serde(message) => format!("Serialization error: {message}"),
            EnvError::DataLayerUnavailable => "No global dataLayer available".to_owned(),
            EnvError::Other(message) => format!("Other error: {message}"),
        }
    }
    pub fn code(&self) -> u32 {
        match &self {
            EnvError::Fetch(_) => 1,
            EnvError::Serde(_) => 3,
            EnvError::DataLayerUnavailable => 9,
            EnvError::Other(_) => 1001,
        }
    }
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Serialize for EnvError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("EnvError", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

impl From<serde_json::Error> for EnvError {
    fn from(error: serde_json::Error) -> Self {
        EnvError::Serde(error.to_string())
    }
}

impl From<http::Error> for EnvError {
    fn from(error: http::Error) -> Self {
        EnvError::Other(error.to_string())
    }
}

#[cfg(not(feature = "env-future-send"))]
/// Only for wasm or when `env-future-send` is not enabled
mod conditional_types {
    use futures::{future::LocalBoxFuture, Future, FutureExt};

    pub type EnvFuture<'a, T> = LocalBoxFuture<'a, T>;

    pub trait ConditionalSend {}

    impl<T> ConditionalSend for T {}

    pub trait EnvFutureExt: Future {
        fn boxed_env<'a>(self) -> EnvFuture<'a, Self::Output>
        where
            Self: Sized + 'a,
        {
            self.boxed_local()
        }
    }
}

#[cfg(feature = "env-future-send")]
/// Enabled with the feature `env-future-send` but it requires a non-wasm target!
/// It will cause a compile-time error!
mod conditional_types {
    use futures::{future::BoxFuture, Future, FutureExt};

    pub type EnvFuture<'a, T> = BoxFuture<'a, T>;

    pub trait ConditionalSend: Send {}

    impl<T> ConditionalSend for T where T: Send {}

    pub trait EnvFutureExt: Future {
        fn boxed_env<'a>(self) -> EnvFuture<'a, Self::Output>
        where
            Self: Sized + Send + 'a,
        {
            self.boxed()
        }
    }
}

impl<T: ?Sized> EnvFutureExt for T where T: Future {}

pub type TryEnvFuture<T> = EnvFuture<'static, Result<T, EnvError>>;

/// The host environment: clock, timers, HTTP and the analytics sinks.
///
/// All methods are static, an implementation is a type-level handle to the
/// host (the browser window in production, a fake in tests).
pub trait Env {
    fn fetch<
        IN: Serialize + ConditionalSend + 'static,
        OUT: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    >(
        request: Request<IN>,
    ) -> TryEnvFuture<OUT>;
    fn exec_concurrent<F: futures::Future<Output = ()> + ConditionalSend + 'static>(future: F);
    fn exec_sequential<F: futures::Future<Output = ()> + ConditionalSend + 'static>(future: F);
    fn now() -> DateTime<Utc>;
    /// Resolves once `duration` has elapsed on the host run loop.
    fn set_timeout(duration: Duration) -> EnvFuture<'static, ()>;
    /// Appends an entry to the global tag-manager data layer.
    ///
    /// Must return [`EnvError::DataLayerUnavailable`] when the host has no
    /// data layer, callers fall back to a local buffer.
    fn data_layer_push(entry: &serde_json::Map<String, serde_json::Value>) -> Result<(), EnvError>;
    fn track_metrics_event(adapter: MetricsAdapter, event: MetricsEvent);
    fn analytics_context() -> AnalyticsContext;
    /// Hook for the host to add credentials to every outgoing request.
    fn authorize(request: RequestBuilder) -> RequestBuilder {
        request
    }
}
