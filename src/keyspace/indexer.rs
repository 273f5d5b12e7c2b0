//! Index <-> password mapping and partitioning.

use std::sync::Arc;

use super::CharSet;

/// A half-open range `[start, end)` of indices for one password length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkUnit {
    pub length: usize,
    pub start: u128,
    pub end: u128,
}

impl WorkUnit {
    /// Returns the number of indices in this unit.
    #[inline]
    pub fn len(&self) -> u128 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The keyspace of every fixed-length password over a charset.
///
/// Indices use positional encoding, most significant symbol first, with
/// `charset.len()` as the radix.
#[derive(Debug, Clone)]
pub struct Keyspace {
    charset: CharSet,
}

impl Keyspace {
    pub fn new(charset: CharSet) -> Self {
        Self { charset }
    }

    /// Returns the charset.
    pub fn charset(&self) -> &CharSet {
        &self.charset
    }

    /// Returns `base^length`, or `None` if it does not fit in a `u128`.
    pub fn size(&self, length: usize) -> Option<u128> {
        let exp = u32::try_from(length).ok()?;
        (self.charset.len() as u128).checked_pow(exp)
    }

    /// Converts an index in `[0, size(length))` to its password.
    ///
    /// The result always has exactly `length` symbols; leading positions of
    /// small indices are filled with the first charset symbol.
    pub fn decode(&self, length: usize, index: u128) -> String {
        debug_assert!(self.size(length).map_or(true, |size| index < size));

        let base = self.charset.len() as u128;
        let mut symbols = vec![self.charset.symbol(0); length];
        let mut n = index;

        for slot in symbols.iter_mut().rev() {
            *slot = self.charset.symbol((n % base) as usize);
            n /= base;
        }

        symbols.into_iter().collect()
    }

    /// Converts a password back to its index.
    ///
    /// Returns `None` if a symbol is outside the charset or the index
    /// overflows.
    pub fn encode(&self, password: &str) -> Option<u128> {
        let base = self.charset.len() as u128;
        password.chars().try_fold(0u128, |acc, c| {
            let digit = self.charset.position(c)? as u128;
            acc.checked_mul(base)?.checked_add(digit)
        })
    }

    /// Splits `[0, size(length))` into `num_chunks` contiguous units.
    ///
    /// Units have `max(total / num_chunks, 1)` indices each and the last one
    /// absorbs the remainder. When there are more chunks than indices the
    /// trailing units are empty.
    ///
    /// Returns `None` if the keyspace size overflows.
    pub fn partition(&self, length: usize, num_chunks: usize) -> Option<Vec<WorkUnit>> {
        let total = self.size(length)?;
        let num_chunks = num_chunks.max(1);
        let chunk = (total / num_chunks as u128).max(1);

        let units = (0..num_chunks)
            .map(|i| {
                let i = i as u128;
                let start = i.saturating_mul(chunk).min(total);
                let end = if i + 1 == num_chunks as u128 {
                    total
                } else {
                    (i + 1).saturating_mul(chunk).min(total)
                };
                WorkUnit { length, start, end }
            })
            .collect();

        Some(units)
    }

    /// Returns a lazy iterator over the passwords of a unit, in index order.
    pub fn iter(self: &Arc<Self>, unit: WorkUnit) -> KeyspaceIter {
        KeyspaceIter {
            keyspace: Arc::clone(self),
            length: unit.length,
            next: unit.start,
            end: unit.end,
        }
    }
}

/// Iterator decoding the passwords of a [`WorkUnit`].
#[derive(Debug, Clone)]
pub struct KeyspaceIter {
    keyspace: Arc<Keyspace>,
    length: usize,
    next: u128,
    end: u128,
}

impl Iterator for KeyspaceIter {
    type Item = String;

    #[inline]
    fn next(&mut self) -> Option<String> {
        if self.next >= self.end {
            return None;
        }
        let password = self.keyspace.decode(self.length, self.next);
        self.next += 1;
        Some(password)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.next);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
