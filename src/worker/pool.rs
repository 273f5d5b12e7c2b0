//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use tracing::debug;

use crate::error::CrackError;
use crate::hash::Verifier;
use crate::source::Batch;

use super::cpu::{CpuWorker, WorkerStats};

/// Batches queued per worker before dispatch blocks.
const QUEUE_DEPTH_PER_WORKER: usize = 2;

/// A candidate that matched the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrackResult {
    /// The matching candidate
    pub candidate: String,
    /// The ID of the worker that found it
    pub worker_id: usize,
}

/// Outcome of offering a batch to the pool.
#[derive(Debug)]
pub enum Dispatch {
    /// The batch was queued
    Sent,
    /// The queue stayed full for the whole timeout; the batch is handed back
    Full(Batch),
    /// No worker is left to receive it
    Closed,
}

/// Outcome of waiting for a worker result.
#[derive(Debug)]
pub enum PollResult {
    /// A worker found a match
    Found(CrackResult),
    /// No result yet
    Pending,
    /// Every worker has exited without a match
    Exhausted,
}

/// Manages a pool of workers for one search.
///
/// Dropping the pool stops and joins every worker.
pub struct WorkerPool {
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Job queue sender (Option so dispatch can be closed)
    job_tx: Option<Sender<Batch>>,
    /// Channel receiver for results
    result_rx: Receiver<CrackResult>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Start time
    start_time: Instant,
}

impl WorkerPool {
    /// Creates a new worker pool with the specified number of workers.
    pub fn new<V: Verifier + 'static>(
        num_workers: usize,
        verifier: Arc<V>,
        stats: Arc<WorkerStats>,
    ) -> Result<Self, CrackError> {
        let num_workers = num_workers.max(1);
        let (job_tx, job_rx) = bounded(num_workers * QUEUE_DEPTH_PER_WORKER);
        // each worker sends at most one result, so sends never block
        let (result_tx, result_rx) = bounded(num_workers);
        let stop_flag = Arc::new(AtomicBool::new(false));

        let mut pool = Self {
            handles: Some(Vec::with_capacity(num_workers)),
            job_tx: Some(job_tx),
            result_rx,
            stop_flag,
            stats,
            start_time: Instant::now(),
        };

        for id in 0..num_workers {
            let worker = CpuWorker::new(
                id,
                verifier.clone(),
                job_rx.clone(),
                result_tx.clone(),
                pool.stop_flag.clone(),
                pool.stats.clone(),
            );

            // on error the partially built pool is dropped, which joins the
            // workers already spawned
            let handle = thread::Builder::new()
                .name(format!("cracker-worker-{}", id))
                .spawn(move || worker.run())
                .map_err(CrackError::WorkerSpawn)?;

            if let Some(handles) = pool.handles.as_mut() {
                handles.push(handle);
            }
        }

        debug!(workers = num_workers, "worker pool started");
        Ok(pool)
    }

    /// Offers a batch to the workers, waiting up to `timeout` for queue space.
    pub fn dispatch(&self, batch: Batch, timeout: Duration) -> Dispatch {
        let Some(job_tx) = self.job_tx.as_ref() else {
            return Dispatch::Closed;
        };

        match job_tx.send_timeout(batch, timeout) {
            Ok(()) => Dispatch::Sent,
            Err(SendTimeoutError::Timeout(batch)) => Dispatch::Full(batch),
            Err(SendTimeoutError::Disconnected(_)) => Dispatch::Closed,
        }
    }

    /// Closes the job queue. Workers exit once it is drained.
    pub fn close(&mut self) {
        self.job_tx.take();
    }

    /// Attempts to receive a result without blocking.
    pub fn try_recv(&self) -> Option<CrackResult> {
        self.result_rx.try_recv().ok()
    }

    /// Waits for a result with a timeout.
    pub fn wait_for_result(&self, timeout: Duration) -> PollResult {
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => PollResult::Found(result),
            Err(RecvTimeoutError::Timeout) => PollResult::Pending,
            Err(RecvTimeoutError::Disconnected) => PollResult::Exhausted,
        }
    }

    /// Signals all workers to stop. Safe to call any number of times.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops the workers and waits for all of them to exit.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop();
        self.close();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
            debug!(elapsed = ?self.elapsed(), "worker pool stopped");
        }
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Exact(&'static str);

    impl Verifier for Exact {
        fn verify(&self, candidate: &str) -> bool {
            candidate == self.0
        }
    }

    fn words(list: &[&str]) -> Batch {
        Batch::Words(list.iter().map(|w| w.to_string()).collect())
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_pool_finds_match() {
        let stats = Arc::new(WorkerStats::new());
        let pool = WorkerPool::new(2, Arc::new(Exact("needle")), stats).unwrap();

        assert!(matches!(pool.dispatch(words(&["hay", "needle"]), TIMEOUT), Dispatch::Sent));
        match pool.wait_for_result(TIMEOUT) {
            PollResult::Found(result) => assert_eq!(result.candidate, "needle"),
            other => panic!("expected a match, got {:?}", other),
        }
        pool.join();
    }

    #[test]
    fn test_pool_exhausts_after_close() {
        let stats = Arc::new(WorkerStats::new());
        let mut pool = WorkerPool::new(3, Arc::new(Exact("needle")), stats.clone()).unwrap();

        for _ in 0..4 {
            assert!(matches!(pool.dispatch(words(&["a", "b"]), TIMEOUT), Dispatch::Sent));
        }
        pool.close();

        assert!(matches!(pool.wait_for_result(TIMEOUT), PollResult::Exhausted));
        assert_eq!(stats.total_candidates(), 8);
        assert!(matches!(pool.dispatch(words(&["c"]), TIMEOUT), Dispatch::Closed));
    }

    #[test]
    fn test_stop_is_reentrant() {
        let stats = Arc::new(WorkerStats::new());
        let pool = WorkerPool::new(2, Arc::new(Exact("x")), stats).unwrap();
        pool.stop();
        pool.stop();
        assert!(pool.is_stopped());
        drop(pool);
    }
}
