/*!
 * Monitoring
 * Structured logging setup and command spans
 */

mod tracer;

pub use tracer::{init_tracing, span_command, CommandSpan};
