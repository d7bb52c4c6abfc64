pub mod scan;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};

use knockr_common::config::{self, DEFAULT_CONCURRENCY, ScanConfig};
use knockr_common::error::ConfigError;
use knockr_common::network::range::{DEFAULT_END_PORT, DEFAULT_START_PORT, PortRange};
use knockr_common::network::target::{DEFAULT_TARGET, ScanTarget};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "knockr")]
#[command(version, about = "A bounded-concurrency TCP connect scanner.")]
#[command(disable_help_flag = true)]
pub struct CommandLine {
    /// Target IPv4 address
    #[arg(short = 'h', value_name = "IP", default_value = DEFAULT_TARGET)]
    pub host: ScanTarget,

    /// First port of the range
    #[arg(short = 's', value_name = "PORT", default_value_t = DEFAULT_START_PORT)]
    pub start_port: u32,

    /// Last port of the range
    #[arg(short = 'e', value_name = "PORT", default_value_t = DEFAULT_END_PORT)]
    pub end_port: u32,

    /// Connect timeout per port, in seconds
    #[arg(short = 't', value_name = "SECONDS", default_value = "1", value_parser = config::parse_timeout)]
    pub timeout: std::time::Duration,

    /// Maximum number of concurrent probes
    #[arg(short = 'c', value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: u32,

    /// Print every port, not only the open ones
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl CommandLine {
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

impl TryFrom<CommandLine> for ScanConfig {
    type Error = ConfigError;

    fn try_from(cmd: CommandLine) -> Result<Self, Self::Error> {
        let range: PortRange = PortRange::new(cmd.start_port, cmd.end_port)?;
        ScanConfig::new(cmd.host, range, cmd.timeout, cmd.concurrency, cmd.verbose)
    }
}

/// Help and version requests are successful runs, everything else clap
/// rejects is a usage error.
pub fn parse_error_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
        _ => EXIT_FAILURE,
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
