#![cfg(test)]
use std::sync::{Arc, Mutex};
use std::time::Duration;

use knockr_common::models::{PortResult, ProbeOutcome, ScanReport};
use knockr_core::scanner::{self, PortScanner, ResultCallback};

use crate::utils::{self, ListenerFixture};

const SCAN_DEADLINE: Duration = Duration::from_secs(30);

/// A listening port is open, its silent neighbours are not.
#[tokio::test]
async fn scan_classifies_loopback_listener() {
    let fixture = ListenerFixture::new().expect("no free loopback port triple");
    let port: u16 = fixture.port;

    let cfg = utils::loopback_config(port - 1, port + 1, 4);
    let report: ScanReport = tokio::time::timeout(SCAN_DEADLINE, scanner::perform_scan(cfg, None))
        .await
        .expect("scan did not finish")
        .expect("scan failed");

    assert_eq!(report.len(), 3);
    assert_eq!(report.open_ports(), vec![port]);
    assert_eq!(report.outcome_of(port - 1), Some(&ProbeOutcome::Refused));
    assert_eq!(report.outcome_of(port + 1), Some(&ProbeOutcome::Refused));
}

#[tokio::test]
async fn scan_reports_through_callback() {
    let fixture = ListenerFixture::new().expect("no free loopback port triple");
    let port: u16 = fixture.port;

    let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let lines_ref = lines.clone();
    let on_result: ResultCallback = Arc::new(move |result: &PortResult| {
        lines_ref.lock().unwrap().push(result.to_string());
    });

    let cfg = utils::loopback_config(port - 1, port + 1, 2);
    tokio::time::timeout(SCAN_DEADLINE, scanner::perform_scan(cfg, Some(on_result)))
        .await
        .unwrap()
        .unwrap();

    let mut lines: Vec<String> = lines.lock().unwrap().clone();
    lines.sort();
    let mut expected: Vec<String> = vec![
        format!("Port {} closed or timeout", port - 1),
        format!("Port {} open", port),
        format!("Port {} closed or timeout", port + 1),
    ];
    expected.sort();
    assert_eq!(lines, expected);
}

#[tokio::test]
async fn scan_with_single_slot_still_covers_range() {
    let fixture = ListenerFixture::new().expect("no free loopback port triple");
    let port: u16 = fixture.port;

    let cfg = utils::loopback_config(port - 1, port + 1, 1);
    let report: ScanReport = tokio::time::timeout(SCAN_DEADLINE, PortScanner::new(cfg).run())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.len(), 3);
    assert_eq!(report.peak_in_flight, 1);
    assert_eq!(report.open_ports(), vec![port]);
}

/// The reference scenario on fixed ports 54320-54322.
#[tokio::test]
async fn scan_fixed_port_fixture() {
    if !utils::is_free(54320) || !utils::is_free(54322) {
        eprintln!("Skipping fixed port test: 54320 or 54322 is in use.");
        return;
    }
    let Some(_fixture) = ListenerFixture::on_port(54321) else {
        eprintln!("Skipping fixed port test: 54321 is in use.");
        return;
    };

    let cfg = utils::loopback_config(54320, 54322, 4);
    let report: ScanReport = tokio::time::timeout(SCAN_DEADLINE, scanner::perform_scan(cfg, None))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.open_ports(), vec![54321]);
    assert!(!report.outcome_of(54320).unwrap().is_open());
    assert!(!report.outcome_of(54322).unwrap().is_open());
}
