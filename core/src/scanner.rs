//! The port scanning **engine**.
//!
//! [`PortScanner`] walks a [`PortRange`] in ascending order and launches one
//! probe worker per port. Before each launch it takes a slot from the
//! [`AdmissionGate`], which caps the number of probes in flight at the
//! configured concurrency. Workers report through a [`ResultCallback`] as
//! they finish, so results arrive in completion order rather than port order.
//!
//! After the last port has been dispatched the scanner drains the gate. The
//! drain only completes once every worker has returned its slot, after which
//! the collected [`ScanReport`] is handed back.
//!
//! How an individual port is classified is delegated to the [`Prober`] trait;
//! [`TcpConnectProber`] is the production implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{Instrument, debug, info_span, warn};

use knockr_common::config::ScanConfig;
use knockr_common::models::{PortResult, ProbeOutcome, ScanReport, ScanTask};
use knockr_common::network::range::PortRange;

use crate::gate::{AdmissionGate, GateError, Slot};
use crate::network::tcp::TcpConnectProber;

mod worker;

use worker::ResultSink;

/// Called once per port, from the worker's task, as soon as it is classified.
pub type ResultCallback = Arc<dyn Fn(&PortResult) + Send + Sync>;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Gate(#[from] GateError),
}

/// Classifies a single port.
///
/// Implementations must not fail: every error is folded into a
/// [`ProbeOutcome`] and the call is expected to return within the task's
/// timeout.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, task: &ScanTask) -> ProbeOutcome;
}

pub struct PortScanner {
    config: ScanConfig,
    prober: Arc<dyn Prober>,
    on_result: Option<ResultCallback>,
}

impl PortScanner {
    /// A scanner using real TCP connect probes.
    pub fn new(config: ScanConfig) -> Self {
        Self::with_prober(config, Arc::new(TcpConnectProber))
    }

    pub fn with_prober(config: ScanConfig, prober: Arc<dyn Prober>) -> Self {
        Self {
            config,
            prober,
            on_result: None,
        }
    }

    pub fn on_result<F>(mut self, callback: F) -> Self
    where
        F: Fn(&PortResult) + Send + Sync + 'static,
    {
        self.on_result = Some(Arc::new(callback));
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Probes every port in the configured range and waits for all of them.
    pub async fn run(self) -> Result<ScanReport, ScanError> {
        let span = info_span!(
            "scan",
            target = %self.config.target,
            start = self.config.range.start(),
            end = self.config.range.end(),
        );
        self.dispatch().instrument(span).await
    }

    async fn dispatch(self) -> Result<ScanReport, ScanError> {
        let range: PortRange = self.config.range;
        let gate: AdmissionGate = AdmissionGate::new(self.config.concurrency)?;
        let (tx, mut rx) = mpsc::unbounded_channel::<PortResult>();
        let sink = ResultSink::new(tx, self.on_result);

        let mut workers: JoinSet<()> = JoinSet::new();
        let mut in_flight: HashMap<Id, u16> = HashMap::new();
        let mut unprobed: Vec<u16> = Vec::new();
        let start_time: Instant = Instant::now();

        debug!(ports = range.len(), concurrency = gate.capacity(), "dispatching probes");

        for port in range {
            let slot: Slot = gate.acquire().await?;
            let task: ScanTask = ScanTask::new(&self.config, port);

            let handle = workers.spawn(worker::run(task, self.prober.clone(), slot, sink.clone()));
            in_flight.insert(handle.id(), port);

            while let Some(joined) = workers.try_join_next_with_id() {
                reap(joined, &mut in_flight, &mut unprobed);
            }
        }

        let recovered: u32 = gate.drain().await?;
        debug!(recovered, "every probe returned its slot");

        while let Some(joined) = workers.join_next_with_id().await {
            reap(joined, &mut in_flight, &mut unprobed);
        }

        drop(sink);
        rx.close();
        let mut results: Vec<PortResult> = Vec::with_capacity(range.len());
        while let Ok(result) = rx.try_recv() {
            results.push(result);
        }

        unprobed.sort_unstable();
        Ok(ScanReport {
            results,
            unprobed,
            elapsed: start_time.elapsed(),
            peak_in_flight: gate.peak_outstanding(),
        })
    }
}

/// Executes a full connect scan described by `cfg`.
pub async fn perform_scan(
    cfg: ScanConfig,
    on_result: Option<ResultCallback>,
) -> Result<ScanReport, ScanError> {
    let mut scanner = PortScanner::new(cfg);
    scanner.on_result = on_result;
    scanner.run().await
}

fn reap(
    joined: Result<(Id, ()), JoinError>,
    in_flight: &mut HashMap<Id, u16>,
    unprobed: &mut Vec<u16>,
) {
    match joined {
        Ok((id, ())) => {
            in_flight.remove(&id);
        }
        Err(e) => {
            let port: Option<u16> = in_flight.remove(&e.id());
            match port {
                Some(port) => {
                    warn!(port, "probe worker died before reporting: {e}");
                    unprobed.push(port);
                }
                None => warn!("unknown probe worker died: {e}"),
            }
        }
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
