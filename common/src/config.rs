use std::time::Duration;

use tracing::debug;

use crate::error::ConfigError;
use crate::network::range::PortRange;
use crate::network::target::ScanTarget;

pub const DEFAULT_TIMEOUT_SECS: u64 = 1;
pub const DEFAULT_CONCURRENCY: u32 = 50;

/// Validated scan settings. Read-only once built; every probe receives a
/// copy of the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub target: ScanTarget,
    pub range: PortRange,
    /// Upper bound on a single connection attempt.
    pub timeout: Duration,
    /// Maximum number of probes in flight at once. Always at least 1.
    pub concurrency: u32,
    /// Report every port instead of only the open ones.
    pub verbose: bool,
}

impl ScanConfig {
    pub fn new(
        target: ScanTarget,
        range: PortRange,
        timeout: Duration,
        concurrency: u32,
        verbose: bool,
    ) -> Result<Self, ConfigError> {
        if concurrency < 1 {
            return Err(ConfigError::InvalidConcurrency(concurrency));
        }

        let cfg = Self {
            target,
            range,
            timeout,
            concurrency,
            verbose,
        };
        debug!(?cfg, "scan configuration accepted");
        Ok(cfg)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: ScanTarget::default(),
            range: PortRange::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
            verbose: false,
        }
    }
}

/// Parses a timeout given in (possibly fractional) seconds, e.g. `"1"` or `"0.25"`.
pub fn parse_timeout(s: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidTimeout(s.to_string());
    let secs: f64 = s.trim().parse().map_err(|_| invalid())?;
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_concurrency() {
        let result = ScanConfig::new(
            ScanTarget::default(),
            PortRange::default(),
            Duration::from_secs(1),
            0,
            false,
        );
        assert_eq!(result, Err(ConfigError::InvalidConcurrency(0)));
    }

    #[test]
    fn test_default_values() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.target.to_string(), "127.0.0.1");
        assert_eq!(cfg.range, PortRange::new(1, 1024).unwrap());
        assert_eq!(cfg.timeout, Duration::from_secs(1));
        assert_eq!(cfg.concurrency, 50);
        assert!(!cfg.verbose);
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("1"), Ok(Duration::from_secs(1)));
        assert_eq!(parse_timeout("0.25"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_timeout("0"), Ok(Duration::ZERO));

        assert!(parse_timeout("-1").is_err());
        assert!(parse_timeout("NaN").is_err());
        assert!(parse_timeout("inf").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
