//! OpenTelemetry-based observability with file-based trace export.
//!
//! Spans and events from the whole crate flow through a custom file exporter:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: `<data_dir>/manhwadex-otlp.json`, one OTLP document per line
//! - **Automatic Rotation**: files rotate at 10MB with 3-backup retention
//! - **Stderr Warnings**: warnings and errors are also printed for the terminal user
//!
//! # Configuration
//!
//! The level comes from `trace_level` in the config file or `--trace-level`,
//! and defaults to `"info"`.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON serialization
//! - `file_writer`: rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
