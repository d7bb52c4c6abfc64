//! # Scan Target Model
//!
//! The single host a scan is aimed at.
//!
//! A target is parsed and validated once at startup and then copied by value
//! into every probe, so workers never re-validate or share the address.
//! Only IPv4 is accepted, and only addresses that can be the destination of a
//! TCP connect:
//! * the unspecified address (`0.0.0.0`) is rejected,
//! * the limited broadcast address (`255.255.255.255`) is rejected,
//! * multicast addresses (`224.0.0.0/4`) are rejected.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_TARGET: &str = "127.0.0.1";

/// A validated, connectable IPv4 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanTarget(Ipv4Addr);

impl ScanTarget {
    pub fn new(addr: Ipv4Addr) -> Result<Self, ConfigError> {
        if let Some(reason) = unroutable_reason(&addr) {
            return Err(ConfigError::InvalidTarget {
                input: addr.to_string(),
                reason: reason.to_string(),
            });
        }
        Ok(Self(addr))
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.0
    }
}

impl Default for ScanTarget {
    fn default() -> Self {
        Self(Ipv4Addr::LOCALHOST)
    }
}

impl FromStr for ScanTarget {
    type Err = ConfigError;

    /// Parses a dotted-quad IPv4 address (e.g. `"192.168.1.5"`).
    ///
    /// Hostnames, IPv6 addresses and ranges are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        let addr: Ipv4Addr = trimmed.parse().map_err(|_| ConfigError::InvalidTarget {
            input: s.to_string(),
            reason: "not an IPv4 address".to_string(),
        })?;
        Self::new(addr)
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ScanTarget> for Ipv4Addr {
    fn from(target: ScanTarget) -> Self {
        target.0
    }
}

fn unroutable_reason(addr: &Ipv4Addr) -> Option<&'static str> {
    if addr.is_unspecified() {
        return Some("the unspecified address cannot be connected to");
    }
    if addr.is_broadcast() {
        return Some("the broadcast address cannot be connected to");
    }
    if addr.is_multicast() {
        return Some("multicast addresses do not accept TCP connections");
    }
    None
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
