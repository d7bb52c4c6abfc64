use std::fmt;
use std::io;
use std::net::SocketAddrV4;
use std::time::Duration;

use crate::config::ScanConfig;
use crate::network::target::ScanTarget;

/// One unit of probe work. Built by the dispatcher right before a worker is
/// spawned and moved into that worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTask {
    pub target: ScanTarget,
    pub port: u16,
    pub timeout: Duration,
    pub verbose: bool,
}

impl ScanTask {
    pub fn new(cfg: &ScanConfig, port: u16) -> Self {
        Self {
            target: cfg.target,
            port,
            timeout: cfg.timeout,
            verbose: cfg.verbose,
        }
    }

    pub fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.target.addr(), self.port)
    }
}

/// How a single connection attempt ended.
///
/// Only [`ProbeOutcome::Open`] counts as open; the other variants are all
/// reported to the user as "closed or timeout".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Open,
    /// The target answered with a reset.
    Refused,
    /// No answer within the probe timeout.
    TimedOut,
    /// Any other socket or routing failure.
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, ProbeOutcome::Open)
    }

    /// The two-way label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Open => "open",
            _ => "closed or timeout",
        }
    }
}

impl From<&io::Error> for ProbeOutcome {
    fn from(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => ProbeOutcome::Refused,
            io::ErrorKind::TimedOut => ProbeOutcome::TimedOut,
            _ => ProbeOutcome::Unreachable(err.to_string()),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Open => write!(f, "open"),
            ProbeOutcome::Refused => write!(f, "refused"),
            ProbeOutcome::TimedOut => write!(f, "timed out"),
            ProbeOutcome::Unreachable(detail) => write!(f, "unreachable ({detail})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortResult {
    pub port: u16,
    pub outcome: ProbeOutcome,
}

impl PortResult {
    pub fn new(port: u16, outcome: ProbeOutcome) -> Self {
        Self { port, outcome }
    }

    pub fn is_open(&self) -> bool {
        self.outcome.is_open()
    }
}

impl fmt::Display for PortResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Port {} {}", self.port, self.outcome.label())
    }
}

/// Everything a finished scan produced.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Results in the order the workers finished, not in port order.
    pub results: Vec<PortResult>,
    /// Ports whose worker died before reporting.
    pub unprobed: Vec<u16>,
    pub elapsed: Duration,
    /// Highest number of probes that were in flight at the same time.
    pub peak_in_flight: usize,
}

impl ScanReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn open_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_open()).count()
    }

    /// Open ports in ascending order.
    pub fn open_ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self
            .results
            .iter()
            .filter(|r| r.is_open())
            .map(|r| r.port)
            .collect();
        ports.sort_unstable();
        ports
    }

    pub fn outcome_of(&self, port: u16) -> Option<&ProbeOutcome> {
        self.results
            .iter()
            .find(|r| r.port == port)
            .map(|r| &r.outcome)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
