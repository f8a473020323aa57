//! CLI handlers.

mod audit;

pub use audit::{exit_status, format_run, run_audit_mode};

/// Render an error followed by each of its sources, `outer: inner: root`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
