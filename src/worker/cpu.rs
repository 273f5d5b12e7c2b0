//! CPU-based worker for candidate verification.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tracing::trace;

use crate::hash::Verifier;
use crate::source::Batch;

use super::CrackResult;

/// How long a worker waits for a batch before re-checking the stop flag.
const RECV_TIMEOUT: Duration = Duration::from_millis(50);

/// Statistics shared by every worker of an attack.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total candidates verified
    pub candidates_tested: AtomicU64,
    /// Matches found
    pub matches_found: AtomicU64,
}

impl WorkerStats {
    /// Creates new worker stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total candidates verified.
    pub fn total_candidates(&self) -> u64 {
        self.candidates_tested.load(Ordering::Relaxed)
    }

    /// Returns the total matches found.
    pub fn total_matches(&self) -> u64 {
        self.matches_found.load(Ordering::Relaxed)
    }
}

/// A CPU worker that verifies candidate batches.
pub struct CpuWorker<V> {
    /// Worker ID
    id: usize,
    /// The verifier shared by every worker
    verifier: Arc<V>,
    /// Queue of batches to verify
    job_rx: Receiver<Batch>,
    /// Channel to send results
    result_tx: Sender<CrackResult>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
}

impl<V: Verifier> CpuWorker<V> {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        verifier: Arc<V>,
        job_rx: Receiver<Batch>,
        result_tx: Sender<CrackResult>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            id,
            verifier,
            job_rx,
            result_tx,
            stop_flag,
            stats,
        }
    }

    /// Runs the worker loop.
    ///
    /// Pulls batches and verifies their candidates until:
    /// - A match is found (sends result through channel)
    /// - Stop flag is set
    /// - The job queue is closed and drained
    pub fn run(&self) {
        loop {
            if self.is_stopped() {
                break;
            }

            let batch = match self.job_rx.recv_timeout(RECV_TIMEOUT) {
                Ok(batch) => batch,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };

            if let Some(candidate) = self.verify_batch(batch) {
                self.stats.matches_found.fetch_add(1, Ordering::Relaxed);
                trace!(worker = self.id, "match found");

                // Try to send result (ignore if channel closed)
                let _ = self.result_tx.send(CrackResult {
                    candidate,
                    worker_id: self.id,
                });
                break;
            }
        }

        trace!(worker = self.id, "worker exiting");
    }

    /// Verifies a batch, stopping early on a match or when the pool stops.
    fn verify_batch(&self, batch: Batch) -> Option<String> {
        let mut tested = 0;
        let mut found = None;

        for candidate in batch {
            if self.is_stopped() {
                break;
            }
            tested += 1;
            if self.verifier.verify(&candidate) {
                found = Some(candidate);
                break;
            }
        }

        // Update stats once per batch
        self.stats.candidates_tested.fetch_add(tested, Ordering::Relaxed);
        found
    }

    #[inline]
    fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}
