use thiserror::Error;

/// Rejected startup input. Every variant is fatal and reported before any
/// probe is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid port range {start}-{end} (expected 1 <= start <= end <= 65535)")]
    InvalidRange { start: u32, end: u32 },

    #[error("Invalid concurrency {0} (expected at least 1)")]
    InvalidConcurrency(u32),

    #[error("Invalid timeout '{0}' (expected a non-negative number of seconds)")]
    InvalidTimeout(String),

    #[error("Invalid target '{input}': {reason}")]
    InvalidTarget { input: String, reason: String },
}
