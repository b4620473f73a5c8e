use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Initialises tracing.
///
/// Log lines go to stderr, so that the valuation report on stdout stays clean.
pub fn init(sentry_dsn: Option<String>) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            ..Default::default()
        },
    ));

    let sentry_filter = EnvFilter::try_from_env("BOSTON_VALUATION_SENTRY_LOG")
        .or_else(|_| EnvFilter::try_new("boston_valuation=debug"))?;
    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(|metadata| match metadata.level() {
            &Level::ERROR | &Level::WARN => EventFilter::Event,
            &Level::INFO | &Level::DEBUG | &Level::TRACE => EventFilter::Breadcrumb,
        })
        .with_filter(sentry_filter);

    let format_filter = EnvFilter::try_from_env("BOSTON_VALUATION_LOG")
        .or_else(|_| EnvFilter::try_new("boston_valuation=info"))?;
    let format_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(format_filter);

    tracing_subscriber::Registry::default()
        .with(sentry_layer)
        .with(format_layer)
        .try_init()
        .context("failed to initialise the tracing subscriber")?;

    Ok(guard)
}
