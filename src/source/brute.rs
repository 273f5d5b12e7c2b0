//! Brute-force candidate source.

use std::sync::Arc;

use crate::config::ConfigError;
use crate::error::CrackError;
use crate::keyspace::{Keyspace, WorkUnit};

use super::{Batch, CandidateSource};

/// Enumerates the whole keyspace of a single password length.
///
/// The keyspace is split into one unit per worker, and each unit is handed
/// out in slices of at most `batch_size` indices, in increasing order.
#[derive(Debug)]
pub struct BruteForceSource {
    keyspace: Arc<Keyspace>,
    units: std::vec::IntoIter<WorkUnit>,
    current: Option<WorkUnit>,
    batch_size: u128,
}

impl BruteForceSource {
    pub fn new(
        keyspace: Arc<Keyspace>,
        length: usize,
        workers: usize,
        batch_size: usize,
    ) -> Result<Self, ConfigError> {
        let units = keyspace
            .partition(length, workers)
            .ok_or(ConfigError::KeyspaceTooLarge {
                charset_len: keyspace.charset().len(),
                length,
            })?;

        Ok(Self {
            keyspace,
            units: units.into_iter(),
            current: None,
            batch_size: batch_size.max(1) as u128,
        })
    }
}

impl CandidateSource for BruteForceSource {
    fn next_batch(&mut self) -> Result<Option<Batch>, CrackError> {
        loop {
            let unit = match self.current.take().or_else(|| self.units.next()) {
                Some(unit) => unit,
                None => return Ok(None),
            };
            if unit.is_empty() {
                continue;
            }

            let end = unit.start.saturating_add(self.batch_size).min(unit.end);
            if end < unit.end {
                self.current = Some(WorkUnit { start: end, ..unit });
            }

            return Ok(Some(Batch::Range {
                keyspace: Arc::clone(&self.keyspace),
                unit: WorkUnit { end, ..unit },
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyspace::CharSet;

    fn keyspace(symbols: &str) -> Arc<Keyspace> {
        Arc::new(Keyspace::new(CharSet::new(symbols).unwrap()))
    }

    fn ranges(source: &mut BruteForceSource) -> Vec<(u128, u128)> {
        let mut ranges = Vec::new();
        while let Some(batch) = source.next_batch().unwrap() {
            match batch {
                Batch::Range { unit, .. } => ranges.push((unit.start, unit.end)),
                Batch::Words(_) => panic!("brute force source produced words"),
            }
        }
        ranges
    }

    #[test]
    fn test_covers_keyspace_in_order() {
        let ks = keyspace("abcd");
        let mut source = BruteForceSource::new(ks, 3, 3, 7).unwrap();
        let ranges = ranges(&mut source);

        let mut next = 0;
        for (start, end) in &ranges {
            assert_eq!(*start, next);
            assert!(end - start <= 7);
            next = *end;
        }
        assert_eq!(next, 64);
    }

    #[test]
    fn test_skips_empty_units() {
        let ks = keyspace("ab");
        let mut source = BruteForceSource::new(ks, 1, 8, 100).unwrap();
        assert_eq!(ranges(&mut source), [(0u128, 1u128), (1, 2)]);
    }

    #[test]
    fn test_candidates_of_length() {
        let ks = keyspace("xy");
        let mut source = BruteForceSource::new(ks, 2, 2, 100).unwrap();
        let mut candidates = Vec::new();
        while let Some(batch) = source.next_batch().unwrap() {
            candidates.extend(batch);
        }
        assert_eq!(candidates, ["xx", "xy", "yx", "yy"]);
    }

    #[test]
    fn test_keyspace_too_large() {
        let ks = Arc::new(Keyspace::new(CharSet::default()));
        let err = BruteForceSource::new(ks, 30, 4, 1000).unwrap_err();
        assert!(matches!(err, ConfigError::KeyspaceTooLarge { length: 30, .. }));
    }
}
