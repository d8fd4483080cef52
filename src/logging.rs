//! Logging utilities for structured tracing

use std::time::Instant;

/// Track operation timing and log on drop
pub struct Timer {
    start: Instant,
    operation: String,
    enum_type: &'static str,
}

impl Timer {
    /// Create a new timer for an operation on one enumerated type
    pub fn new(operation: impl Into<String>, enum_type: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
            enum_type,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration_us = self.start.elapsed().as_micros() as u64;
        tracing::debug!(
            operation = %self.operation,
            enum_type = %self.enum_type,
            duration_us = duration_us,
            "Operation completed"
        );
    }
}

/// Log a failure with structured context, at debug level
///
/// The error itself still reaches the caller.
pub fn log_failure(operation: &str, enum_type: &str, error: &impl std::error::Error) {
    tracing::debug!(
        operation = %operation,
        enum_type = %enum_type,
        error = %error,
        error_kind = std::any::type_name_of_val(error),
        "Operation failed"
    );
}

/// Install a fmt subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`; repeated calls are no-ops.
#[cfg(test)]
pub(crate) fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("enum_metadata=debug")),
        )
        .with_test_writer()
        .try_init();
}
