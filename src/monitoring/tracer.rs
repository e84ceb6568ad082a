/*!
 * Tracing
 * Structured logging for allocator operations using the tracing crate
 *
 * Log output always goes to stderr so it never interleaves with command
 * output on stdout.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

static COMMAND_SEQ: AtomicU64 = AtomicU64::new(1);

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: warn)
/// - `json`: JSON output instead of the compact human-readable format
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        // JSON output for parsing
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    } else {
        // Human-readable output for development
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
    }
    debug!(json, "Structured tracing initialized");
}

/// Span covering the execution of one shell command
pub struct CommandSpan {
    _span: tracing::Span,
    start: Instant,
    seq: u64,
}

impl CommandSpan {
    pub fn new(command: &str) -> Self {
        let seq = COMMAND_SEQ.fetch_add(1, Ordering::Relaxed);

        let span = span!(
            Level::DEBUG,
            "command",
            seq = seq,
            command = command,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            _span: span,
            start: Instant::now(),
            seq,
        }
    }

    /// Sequence number of this command within the process
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record_result(&self, success: bool) {
        self._span
            .record("result", if success { "success" } else { "error" });
    }

    pub fn record_error(&self, error: &str) {
        self._span.record("error", error);
        self._span.record("result", "error");
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self._span.enter()
    }
}

impl Drop for CommandSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self._span.record("duration_us", duration.as_micros() as u64);
    }
}

/// Create a span for a shell command
pub fn span_command(command: &str) -> CommandSpan {
    CommandSpan::new(command)
}
