use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use knockr_common::models::{PortResult, ProbeOutcome, ScanTask};

use super::{Prober, ResultCallback};
use crate::gate::Slot;

/// Where finished workers deliver their result.
#[derive(Clone)]
pub(super) struct ResultSink {
    tx: UnboundedSender<PortResult>,
    on_result: Option<ResultCallback>,
}

impl ResultSink {
    pub(super) fn new(tx: UnboundedSender<PortResult>, on_result: Option<ResultCallback>) -> Self {
        Self { tx, on_result }
    }

    fn emit(&self, result: PortResult) {
        if let Some(callback) = &self.on_result {
            callback(&result);
        }
        // The receiver outlives every worker, a failed send means the scan was abandoned.
        let _ = self.tx.send(result);
    }
}

/// Probes one port, reports the outcome and gives the slot back.
///
/// `slot` is owned by this future, so it is also returned if the probe
/// panics or the task is dropped.
pub(super) async fn run(task: ScanTask, prober: Arc<dyn Prober>, slot: Slot, sink: ResultSink) {
    let outcome: ProbeOutcome = prober.probe(&task).await;

    if task.verbose {
        if let ProbeOutcome::Unreachable(detail) = &outcome {
            debug!(port = task.port, "probe failed: {detail}");
        }
    }

    sink.emit(PortResult::new(task.port, outcome));
    slot.release();
}
