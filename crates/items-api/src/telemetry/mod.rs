//! Tracing setup: structured JSON logs, plus span export over OTLP when a
//! collector endpoint is configured.
//!
//! API keys, secret values and database passwords are never recorded: the
//! gate logs only the header name, and the database URL is redacted before it
//! reaches a log line. `RUST_LOG` overrides `LOG_LEVEL` (default `info`).

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
