//! Logging macros for the baler crates.
//!
//! Thin wrappers over `tracing` events that tag every message with the
//! emitting component ("sources", "compile", "watch", ...). The subscriber
//! is installed by the CLI; library code only emits.

/// Log an error-level message tagged with a component name.
#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        tracing::event!(tracing::Level::ERROR, component = $component, $($arg)*);
    }
}

/// Log a warn-level message tagged with a component name.
#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        tracing::event!(tracing::Level::WARN, component = $component, $($arg)*);
    }
}

/// Log an info-level message tagged with a component name.
#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        tracing::event!(tracing::Level::INFO, component = $component, $($arg)*);
    }
}

/// Log a debug-level message tagged with a component name.
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        tracing::event!(tracing::Level::DEBUG, component = $component, $($arg)*);
    }
}

/// Log a trace-level message tagged with a component name.
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        tracing::event!(tracing::Level::TRACE, component = $component, $($arg)*);
    }
}
