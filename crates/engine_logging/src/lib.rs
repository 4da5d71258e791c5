#![deny(missing_docs)]
//! Shared logging utilities for the enhancer workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a per-thread request context that tags log lines with the enhancement
//! request being served, and a minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Request id currently being handled on this thread, if any.
    static REQUEST_CONTEXT: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Marks `request_id` as the request handled by the current thread.
/// Pass `None` once the request is finished.
pub fn set_request_context(request_id: Option<u64>) {
    REQUEST_CONTEXT.with(|v| v.set(request_id));
}

/// Returns the request id set for the current thread.
pub fn current_request() -> Option<u64> {
    REQUEST_CONTEXT.with(|v| v.get())
}

/// Runs `f` with `request_id` as the thread's request context and restores
/// the previous context afterwards.
pub fn with_request_context<T>(request_id: u64, f: impl FnOnce() -> T) -> T {
    let previous = current_request();
    set_request_context(Some(request_id));
    let out = f();
    set_request_context(previous);
    out
}

/// Prefix placed in front of log lines emitted inside a request context.
#[doc(hidden)]
pub fn context_prefix() -> String {
    match current_request() {
        Some(id) => format!("[req {id}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_context_is_scoped() {
        assert_eq!(current_request(), None);
        let seen = with_request_context(7, || {
            assert_eq!(context_prefix(), "[req 7] ");
            current_request()
        });
        assert_eq!(seen, Some(7));
        assert_eq!(current_request(), None);
        assert_eq!(context_prefix(), "");
    }

    #[test]
    fn nested_context_restores_outer() {
        with_request_context(1, || {
            with_request_context(2, || assert_eq!(current_request(), Some(2)));
            assert_eq!(current_request(), Some(1));
        });
    }
}
