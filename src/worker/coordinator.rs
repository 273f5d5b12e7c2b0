//! Search coordination.
//!
//! The coordinator pulls batches from a candidate source on the calling
//! thread and feeds them to a [`WorkerPool`]. The first match stops the
//! whole pool. An interrupt flag, typically set from a Ctrl-C handler, is
//! polled throughout and aborts the search with [`CrackError::Interrupted`].

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::CrackError;
use crate::hash::Verifier;
use crate::keyspace::Keyspace;
use crate::source::{BruteForceSource, CandidateSource, DictionarySource, DEFAULT_BATCH_SIZE};

use super::pool::{Dispatch, PollResult, WorkerPool};
use super::WorkerStats;

/// How often the coordinator re-checks results and the interrupt flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackResult {
    Found(String),
    NotFound,
}

/// Runs searches over candidate sources with a fixed number of workers.
pub struct Coordinator<V> {
    verifier: Arc<V>,
    workers: usize,
    batch_size: usize,
    interrupt: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
    start_time: Instant,
}

impl<V: Verifier + 'static> Coordinator<V> {
    /// Creates a coordinator with `workers` threads per search.
    pub fn new(verifier: V, workers: usize) -> Self {
        Self {
            verifier: Arc::new(verifier),
            workers: workers.max(1),
            batch_size: DEFAULT_BATCH_SIZE,
            interrupt: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(WorkerStats::new()),
            start_time: Instant::now(),
        }
    }

    /// Sets the number of candidates per dispatched batch.
    ///
    /// Larger batches cut dispatch overhead but leave more candidates in
    /// flight once a match is found elsewhere.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Uses an external interrupt flag instead of the coordinator's own.
    pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Returns a clone of the interrupt flag for external use (e.g., signal handlers).
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }

    /// Runs a dictionary attack over a wordlist file.
    pub fn dictionary_attack(&self, wordlist: &Path, mutate: bool) -> Result<AttackResult, CrackError> {
        info!(wordlist = %wordlist.display(), mutate, "starting dictionary attack");
        let mut source = DictionarySource::open(wordlist, mutate, self.batch_size)?;
        let result = self.search(&mut source);

        if source.skipped_lines() > 0 {
            info!(skipped = source.skipped_lines(), "skipped undecodable wordlist lines");
        }
        result
    }

    /// Runs a brute-force attack, one search per length from 1 to `max_length`.
    pub fn brute_force_attack(
        &self,
        keyspace: Arc<Keyspace>,
        max_length: usize,
    ) -> Result<AttackResult, CrackError> {
        for length in 1..=max_length {
            info!(
                length,
                candidates = ?keyspace.size(length),
                "starting brute force length"
            );

            let mut source =
                BruteForceSource::new(keyspace.clone(), length, self.workers, self.batch_size)?;
            if let AttackResult::Found(candidate) = self.search(&mut source)? {
                return Ok(AttackResult::Found(candidate));
            }
        }

        Ok(AttackResult::NotFound)
    }

    /// Verifies every candidate of a source until one matches.
    ///
    /// Returns `NotFound` once the source is exhausted and every worker has
    /// finished. The worker pool is torn down on every exit path.
    pub fn search<S: CandidateSource>(&self, source: &mut S) -> Result<AttackResult, CrackError> {
        let mut pool = WorkerPool::new(self.workers, self.verifier.clone(), self.stats.clone())?;

        'dispatch: while let Some(mut batch) = source.next_batch()? {
            loop {
                self.check_interrupt(&pool)?;

                if let Some(result) = pool.try_recv() {
                    return Ok(self.finish(pool, result.candidate, result.worker_id));
                }

                match pool.dispatch(batch, POLL_INTERVAL) {
                    Dispatch::Sent => break,
                    Dispatch::Full(returned) => batch = returned,
                    // every worker already exited; whatever they reported is
                    // waiting on the result channel
                    Dispatch::Closed => break 'dispatch,
                }
            }
        }

        pool.close();
        debug!("candidate source exhausted, draining workers");

        loop {
            self.check_interrupt(&pool)?;

            match pool.wait_for_result(POLL_INTERVAL) {
                PollResult::Found(result) => {
                    return Ok(self.finish(pool, result.candidate, result.worker_id))
                }
                PollResult::Pending => continue,
                PollResult::Exhausted => break,
            }
        }

        pool.join();
        Ok(AttackResult::NotFound)
    }

    fn finish(&self, pool: WorkerPool, candidate: String, worker_id: usize) -> AttackResult {
        debug!(worker = worker_id, "match found, stopping pool");
        pool.join();
        AttackResult::Found(candidate)
    }

    fn check_interrupt(&self, pool: &WorkerPool) -> Result<(), CrackError> {
        if self.interrupt.load(Ordering::Relaxed) {
            debug!("interrupted, stopping pool");
            pool.stop();
            return Err(CrackError::Interrupted);
        }
        Ok(())
    }

    /// Returns the total candidates verified across all searches.
    pub fn total_candidates(&self) -> u64 {
        self.stats.total_candidates()
    }

    /// Returns the elapsed time since the coordinator was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the average verification rate (candidates per second).
    pub fn candidates_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_candidates() as f64 / elapsed
        } else {
            0.0
        }
    }
}
