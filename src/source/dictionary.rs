//! Wordlist candidate source.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::CrackError;
use crate::mutator::mutate;

use super::{Batch, CandidateSource};

/// Reads candidates line by line from a wordlist.
///
/// Lines are trimmed of surrounding whitespace. Lines that are not valid
/// UTF-8 are skipped. With mutation enabled every word is replaced by its
/// full variant set, which may span several batches.
pub struct DictionarySource<R> {
    reader: R,
    mutate: bool,
    batch_size: usize,
    line: Vec<u8>,
    pending: btree_set::IntoIter<String>,
    skipped: u64,
}

impl DictionarySource<BufReader<File>> {
    /// Opens a wordlist file.
    pub fn open(path: &Path, mutate: bool, batch_size: usize) -> Result<Self, CrackError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), mutate, batch_size))
    }
}

impl<R: BufRead> DictionarySource<R> {
    pub fn new(reader: R, mutate: bool, batch_size: usize) -> Self {
        Self {
            reader,
            mutate,
            batch_size: batch_size.max(1),
            line: Vec::new(),
            pending: BTreeSet::new().into_iter(),
            skipped: 0,
        }
    }

    /// Returns the number of lines skipped for invalid encoding so far.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped
    }

    /// Reads the next decodable word, or `None` at end of file.
    fn next_word(&mut self) -> Result<Option<String>, CrackError> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }

            match std::str::from_utf8(&self.line) {
                Ok(line) => return Ok(Some(line.trim().to_string())),
                Err(e) => {
                    self.skipped += 1;
                    debug!("Skipping wordlist line with invalid UTF-8: {}", e);
                }
            }
        }
    }
}

impl<R: BufRead> CandidateSource for DictionarySource<R> {
    fn next_batch(&mut self) -> Result<Option<Batch>, CrackError> {
        let mut words = Vec::with_capacity(self.batch_size);

        while words.len() < self.batch_size {
            if let Some(variant) = self.pending.next() {
                words.push(variant);
                continue;
            }

            match self.next_word()? {
                Some(word) if self.mutate => self.pending = mutate(&word).into_iter(),
                Some(word) => words.push(word),
                None => break,
            }
        }

        if words.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Batch::Words(words)))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn drain<R: BufRead>(source: &mut DictionarySource<R>) -> Vec<Vec<String>> {
        let mut batches = Vec::new();
        while let Some(batch) = source.next_batch().unwrap() {
            batches.push(batch.into_iter().collect());
        }
        batches
    }

    #[test]
    fn test_plain_words_in_file_order() {
        let mut source = DictionarySource::new(Cursor::new("alpha\n  beta \r\ngamma"), false, 2);
        let batches = drain(&mut source);
        assert_eq!(batches, vec![vec!["alpha", "beta"], vec!["gamma"]]);
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let data: &[u8] = b"first\n\xff\xfe bad\nsecond\n";
        let mut source = DictionarySource::new(Cursor::new(data), false, 10);
        let batches = drain(&mut source);
        assert_eq!(batches, vec![vec!["first", "second"]]);
        assert_eq!(source.skipped_lines(), 1);
    }

    #[test]
    fn test_empty_wordlist() {
        let mut source = DictionarySource::new(Cursor::new(""), true, 10);
        assert!(source.next_batch().unwrap().is_none());
    }

    #[test]
    fn test_mutated_words_span_batches() {
        let mut source = DictionarySource::new(Cursor::new("one\ntwo\n"), true, 50);
        let candidates: Vec<String> = drain(&mut source).into_iter().flatten().collect();

        let expected: Vec<String> = mutate("one").into_iter().chain(mutate("two")).collect();
        assert_eq!(candidates, expected);
    }

    #[test]
    fn test_exhausted_source_stays_exhausted() {
        let mut source = DictionarySource::new(Cursor::new("x\n"), false, 10);
        assert!(source.next_batch().unwrap().is_some());
        assert!(source.next_batch().unwrap().is_none());
        assert!(source.next_batch().unwrap().is_none());
    }
}
