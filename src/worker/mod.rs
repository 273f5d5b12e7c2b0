//! Worker pool for parallel candidate verification.
//!
//! This module provides:
//! - Multi-threaded CPU workers pulling batches from a bounded queue
//! - First-match-wins cancellation through a shared stop flag
//! - The coordinator driving dictionary and brute-force attacks

mod coordinator;
mod cpu;
mod pool;

pub use coordinator::{AttackResult, Coordinator};
pub use cpu::{CpuWorker, WorkerStats};
pub use pool::{CrackResult, Dispatch, PollResult, WorkerPool};
