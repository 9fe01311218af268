//! Logging macros for ergonomic message formatting.
//!
//! Each macro formats its arguments like `format!` and emits the result as a
//! single message through the matching `*_fmt` method of the logger.
//!
//! # Examples
//!
//! ```
//! use rust_event_stream::prelude::*;
//! use rust_event_stream::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Emit a formatted message at the given level.
///
/// Never exits or panics, even at `Level::Fatal` or `Level::Panic`.
///
/// ```
/// # use rust_event_stream::prelude::*;
/// # let logger = Logger::new();
/// use rust_event_stream::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
}

/// Emit a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace_fmt(format_args!($($arg)+))
    };
}

/// Emit a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug_fmt(format_args!($($arg)+))
    };
}

/// Emit an info-level message.
///
/// ```
/// # use rust_event_stream::prelude::*;
/// # let logger = Logger::new();
/// use rust_event_stream::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info_fmt(format_args!($($arg)+))
    };
}

/// Emit a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warning_fmt(format_args!($($arg)+))
    };
}

/// Emit an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error_fmt(format_args!($($arg)+))
    };
}

/// Emit a fatal-level message, then exit the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_fmt(format_args!($($arg)+))
    };
}
