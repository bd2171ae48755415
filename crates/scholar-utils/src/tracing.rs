use sentry::ClientInitGuard;
use sentry_tracing::EventFilter;
use std::borrow::Cow;
use thiserror::Error;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use typed_builder::TypedBuilder;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(TypedBuilder, Debug)]
pub struct TracingConfig {
    // Set by the binary so the sentry release matches the deployed package
    pub package: &'static str,
    pub version: &'static str,
    #[builder(default)]
    pub sentry_dsn: Option<String>,
    #[builder(setter(into), default = String::from("dev"))]
    pub env: String,
    #[builder(default)]
    pub format: LogFormat,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TracingInit(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the sentry client alive. Dropping it flushes pending events.
pub struct TracingGuard {
    _sentry: ClientInitGuard,
}

pub fn setup(config: TracingConfig) -> Result<TracingGuard, Error> {
    let guard = sentry::init((
        config.sentry_dsn,
        sentry::ClientOptions {
            release: Some(Cow::Owned(format!("{}@{}", config.package, config.version))),
            environment: Some(Cow::Owned(config.env)),
            ..Default::default()
        },
    ));

    let sentry_layer = sentry_tracing::layer().event_filter(|md| match *md.level() {
        Level::ERROR => EventFilter::Event,
        Level::TRACE => EventFilter::Ignore,
        _ => EventFilter::Breadcrumb,
    });

    let (full, compact) = match config.format {
        LogFormat::Full => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Compact => (None, Some(tracing_subscriber::fmt::layer().compact())),
    };

    tracing_subscriber::registry()
        .with(full)
        .with(compact)
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(sentry_layer)
        .try_init()?;

    Ok(TracingGuard { _sentry: guard })
}
