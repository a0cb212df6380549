//! Logging setup shared by every binary of the workspace.

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}

/// Subscriber configuration (filter, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
