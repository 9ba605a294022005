//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber with OpenTelemetry integration,
//! setting up the complete observability pipeline from `tracing` macros to file
//! export, plus a terse stderr layer for warnings.

use super::tracer;
use crate::infrastructure::TRACE_FILE;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Name reported as `service.name` on every exported batch.
const SERVICE_NAME: &str = "manhwadex";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters spans by `config.trace_level` (default `"info"`)
/// 2. Exports spans through OpenTelemetry to `<data_dir>/manhwadex-otlp.json`
/// 3. Prints warnings and errors to stderr
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Gives up silently if that fails (tracing is best effort)
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust
/// use manhwadex::observability::init_tracing;
/// use manhwadex::Config;
///
/// let dir = tempfile::tempdir()?;
/// let config = Config {
///     data_dir: Some(dir.path().to_path_buf()),
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(tracer::SCOPE));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(LevelFilter::WARN);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .with(stderr_layer)
        .try_init();
}
