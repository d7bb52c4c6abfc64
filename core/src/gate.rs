//! # Admission Gate
//!
//! A counting gate that bounds how many probes are in flight.
//!
//! The dispatcher calls [`AdmissionGate::acquire`] before it spawns a worker
//! and moves the returned [`Slot`] into that worker. The slot goes back to the
//! gate when it is dropped, so a worker returns its slot on every exit path,
//! panics included.
//!
//! Once every port has been dispatched, [`AdmissionGate::drain`] takes back
//! the whole capacity. It can only succeed after every outstanding slot has
//! been returned, which is how the dispatcher knows the scan has finished.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("admission gate needs a capacity of at least 1")]
    ZeroCapacity,

    #[error("admission gate capacity {requested} exceeds the supported maximum of {max}")]
    CapacityTooLarge { requested: u32, max: usize },

    #[error("admission gate was closed while waiting for a slot")]
    Closed,
}

#[derive(Debug, Default)]
struct Counters {
    outstanding: AtomicUsize,
    peak: AtomicUsize,
}

/// Shared handle to the gate. Clones refer to the same slots.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    capacity: u32,
    counters: Arc<Counters>,
}

impl AdmissionGate {
    pub fn new(capacity: u32) -> Result<Self, GateError> {
        if capacity == 0 {
            return Err(GateError::ZeroCapacity);
        }
        if capacity as usize > Semaphore::MAX_PERMITS {
            return Err(GateError::CapacityTooLarge {
                requested: capacity,
                max: Semaphore::MAX_PERMITS,
            });
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity as usize)),
            capacity,
            counters: Arc::new(Counters::default()),
        })
    }

    /// Waits until a slot is free and takes it.
    pub async fn acquire(&self) -> Result<Slot, GateError> {
        let permit: OwnedSemaphorePermit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| GateError::Closed)?;

        let outstanding: usize = self.counters.outstanding.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(outstanding, Ordering::SeqCst);

        Ok(Slot {
            counters: self.counters.clone(),
            _permit: permit,
        })
    }

    /// Waits until every slot is back, then hands the full capacity back to
    /// the gate and returns how many slots were recovered.
    ///
    /// Never returns while a slot is held, so a leaked slot hangs the caller.
    pub async fn drain(&self) -> Result<u32, GateError> {
        let permits: OwnedSemaphorePermit = self
            .semaphore
            .clone()
            .acquire_many_owned(self.capacity)
            .await
            .map_err(|_| GateError::Closed)?;

        Ok(permits.num_permits() as u32)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Slots that could be acquired right now.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Slots currently held by workers.
    pub fn outstanding(&self) -> usize {
        self.counters.outstanding.load(Ordering::SeqCst)
    }

    /// Highest value [`Self::outstanding`] has reached.
    pub fn peak_outstanding(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }
}

/// One admission slot. Returned to its gate on drop.
#[derive(Debug)]
#[must_use = "dropping a slot immediately returns it to the gate"]
pub struct Slot {
    counters: Arc<Counters>,
    // Dropped after `Drop::drop` runs, so the counter never exceeds capacity.
    _permit: OwnedSemaphorePermit,
}

impl Slot {
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        self.counters.outstanding.fetch_sub(1, Ordering::SeqCst);
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
