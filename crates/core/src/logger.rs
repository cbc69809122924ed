//! Logging abstraction for clinic-queue.
//!
//! Provides a [`Logger`] trait for service lifecycle events (gateway
//! initialization, admin provisioning) along with a default
//! [`TracingLogger`] that delegates to the [`tracing`] crate.
//! Request-level diagnostics use `tracing` macros directly.

use std::fmt;

/// Logging trait for clinic-queue lifecycle events.
///
/// # Example
///
/// ```rust
/// use clinic_queue_core::logger::{Logger, TracingLogger};
///
/// let logger = TracingLogger;
/// logger.info("Gateway ready");
/// ```
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);

    fn debug(&self, message: &str);
}

impl fmt::Debug for dyn Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Logger")
    }
}

/// Default logger implementation using the `tracing` crate.
#[derive(Debug, Clone)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "clinic_queue", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "clinic_queue", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "clinic_queue", "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "clinic_queue", "{}", message);
    }
}
