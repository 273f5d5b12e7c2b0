//! Ordered character sets.

use std::collections::HashMap;

use crate::config::ConfigError;

/// The default brute-force charset.
pub const DEFAULT_CHARSET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()";

/// An ordered set of distinct symbols.
///
/// The order is significant: it is the enumeration order of the keyspace,
/// and the charset length is its radix.
#[derive(Debug, Clone)]
pub struct CharSet {
    symbols: Vec<char>,
    positions: HashMap<char, usize>,
}

impl CharSet {
    /// Creates a charset from the symbols of a string, in order.
    pub fn new(symbols: &str) -> Result<Self, ConfigError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(ConfigError::InvalidCharset("Charset cannot be empty".into()));
        }

        let mut positions = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if positions.insert(c, i).is_some() {
                return Err(ConfigError::InvalidCharset(format!(
                    "Charset contains duplicate symbol {:?}",
                    c
                )));
            }
        }

        Ok(Self { symbols, positions })
    }

    /// Returns the number of symbols (the radix).
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: a charset holds at least one symbol.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbol for a digit value.
    #[inline]
    pub fn symbol(&self, digit: usize) -> char {
        self.symbols[digit]
    }

    /// Returns the digit value of a symbol, if it belongs to the charset.
    #[inline]
    pub fn position(&self, symbol: char) -> Option<usize> {
        self.positions.get(&symbol).copied()
    }
}

impl Default for CharSet {
    fn default() -> Self {
        let symbols: Vec<char> = DEFAULT_CHARSET.chars().collect();
        let positions = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, positions }
    }
}
