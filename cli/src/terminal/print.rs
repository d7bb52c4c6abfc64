use colored::*;
use tracing::{info, warn};

use knockr_common::models::{PortResult, ScanReport};

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

/// Log target whose events are written without a level symbol.
pub const PRINT_TARGET: &str = "knockr::print";

/// Decorative output goes through the logger to stderr, keeping stdout for results.
pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = console::measure_text_width(&formatted);

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().color(colors::PRIMARY),
        "─".repeat(right)
    )
    .color(colors::SEPARATOR);

    print(&format!("{}", line));
}

/// Formats one result as `Port <n> open` or `Port <n> closed or timeout`.
pub fn port_line(result: &PortResult) -> String {
    let label: &str = result.outcome.label();
    let status: ColoredString = if result.is_open() {
        label.color(colors::OPEN).bold()
    } else {
        label.color(colors::CLOSED)
    };
    format!("Port {} {}", result.port.to_string().color(colors::PORT), status)
}

pub fn port_result(result: &PortResult) {
    println!("{}", port_line(result));
}

pub fn summary(report: &ScanReport) {
    for port in &report.unprobed {
        warn!("Port {port} was never classified, its probe worker died");
    }

    let open: ColoredString = format!("{} open", report.open_count()).bold().green();
    let total: ColoredString = format!("{} ports", report.len() + report.unprobed.len()).bold();
    let elapsed: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64()).bold().yellow();

    print(&format!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)));
    info!(
        "{}",
        format!("Scan complete: {open} of {total} in {elapsed}").color(colors::TEXT_DEFAULT)
    );
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
    use knockr_common::models::ProbeOutcome;

    #[test]
    fn test_port_line_without_colors() {
        colored::control::set_override(false);

        let open = PortResult::new(54321, ProbeOutcome::Open);
        let closed = PortResult::new(54320, ProbeOutcome::TimedOut);

        assert_eq!(port_line(&open), "Port 54321 open");
        assert_eq!(port_line(&closed), "Port 54320 closed or timeout");
    }
}
