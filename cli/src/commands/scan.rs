use std::sync::Arc;

use knockr_common::config::ScanConfig;
use knockr_common::models::{PortResult, ScanReport};
use knockr_core::scanner::{self, ResultCallback};

use crate::terminal::{print, spinner::ScanProgress};

pub async fn scan(cfg: ScanConfig) -> anyhow::Result<ScanReport> {
    print::header(&format!("scanning {} ports {}", cfg.target, cfg.range));

    let verbose: bool = cfg.verbose;
    let progress: ScanProgress = ScanProgress::new(cfg.range.len() as u64, verbose)?;

    let reporter = progress.clone();
    let on_result: ResultCallback = Arc::new(move |result: &PortResult| {
        reporter.inc();
        if verbose || result.is_open() {
            reporter.suspend(|| print::port_result(result));
        }
    });

    let report: ScanReport = scanner::perform_scan(cfg, Some(on_result)).await?;

    progress.finish();
    print::summary(&report);

    Ok(report)
}
