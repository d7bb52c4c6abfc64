mod commands;
mod terminal;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::CommandFactory;
use tracing::error;

use commands::{CommandLine, EXIT_FAILURE, EXIT_SUCCESS, scan};
use knockr_common::config::ScanConfig;
use terminal::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd: CommandLine = match CommandLine::try_parse_args() {
        Ok(cmd) => cmd,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(commands::parse_error_exit_code(&e));
        }
    };

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    logging::init_logging(cmd.verbose);

    let cfg: ScanConfig = match ScanConfig::try_from(cmd) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", CommandLine::command().render_usage());
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match scan::scan(cfg).await {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
