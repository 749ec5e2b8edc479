use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "escape_posts_created_total",
            Unit::Count,
            "Total number of posts created through the ingestion endpoint."
        );
        describe_counter!(
            "escape_ingest_failures_total",
            Unit::Count,
            "Total number of rejected post submissions, labelled by failure kind."
        );
        describe_counter!(
            "escape_assets_written_total",
            Unit::Count,
            "Total number of image assets written to the content store."
        );
        describe_counter!(
            "escape_asset_bytes_written_total",
            Unit::Bytes,
            "Total number of image bytes written to the content store."
        );
        describe_histogram!(
            "escape_http_request_duration_ms",
            Unit::Milliseconds,
            "HTTP request latency in milliseconds, labelled by method and status."
        );
    });
}
