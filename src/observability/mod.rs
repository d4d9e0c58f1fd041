//! Tracing with file-based OpenTelemetry export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `<data dir>/mapcomplete-otlp.json`, rotated at 10 MiB with
//! three timestamped backups. The level comes from `trace_level` in the
//! configuration and defaults to `info`.

mod exporter;
mod file_writer;
mod init;

pub use init::{init_tracing, TRACE_FILE_NAME};
