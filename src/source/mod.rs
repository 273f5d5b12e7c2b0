//! Lazy candidate sources.
//!
//! Sources hand out candidates in batches, the unit of work pulled by the
//! worker pool. They are finite and single-pass; none of them ever holds
//! more than a batch worth of candidates in memory.

mod brute;
mod dictionary;

use std::sync::Arc;

use crate::error::CrackError;
use crate::keyspace::{Keyspace, KeyspaceIter, WorkUnit};

pub use brute::BruteForceSource;
pub use dictionary::DictionarySource;

/// Default number of candidates per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// A unit of work dispatched to a single worker.
#[derive(Debug, Clone)]
pub enum Batch {
    /// Explicit candidates, from a wordlist.
    Words(Vec<String>),
    /// A keyspace range, decoded by the worker that receives it.
    Range {
        keyspace: Arc<Keyspace>,
        unit: WorkUnit,
    },
}

impl Batch {
    /// Returns the number of candidates in this batch.
    pub fn len(&self) -> u128 {
        match self {
            Batch::Words(words) => words.len() as u128,
            Batch::Range { unit, .. } => unit.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntoIterator for Batch {
    type Item = String;
    type IntoIter = BatchIter;

    fn into_iter(self) -> BatchIter {
        match self {
            Batch::Words(words) => BatchIter::Words(words.into_iter()),
            Batch::Range { keyspace, unit } => BatchIter::Range(keyspace.iter(unit)),
        }
    }
}

/// Iterator over the candidates of a [`Batch`].
#[derive(Debug)]
pub enum BatchIter {
    Words(std::vec::IntoIter<String>),
    Range(KeyspaceIter),
}

impl Iterator for BatchIter {
    type Item = String;

    #[inline]
    fn next(&mut self) -> Option<String> {
        match self {
            BatchIter::Words(it) => it.next(),
            BatchIter::Range(it) => it.next(),
        }
    }
}

/// A lazy, single-pass producer of candidate batches.
pub trait CandidateSource {
    /// Returns the next batch, or `None` once the source is exhausted.
    fn next_batch(&mut self) -> Result<Option<Batch>, CrackError>;
}
