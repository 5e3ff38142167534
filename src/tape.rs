//! This module defines the `Tape`, an unbounded two-directional sequence of symbols
//! addressed by a signed offset from its origin.

use crate::types::{Symbol, BLANK_SYMBOL};
use std::ops::Range;

/// A tape that is blank everywhere until written.
///
/// Storage is split at the origin into two growable buffers. `right` holds offsets
/// `0, 1, 2, ...` and `left` holds offsets `-1, -2, ...` at indices `0, 1, ...`.
/// Both buffers are extended with blanks on demand and never shrink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    right: Vec<Symbol>,
    left: Vec<Symbol>,
}

impl Tape {
    /// Creates an empty (all blank) tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol at `index`, growing the storage up to `index` if needed.
    pub fn read(&mut self, index: i64) -> &str {
        self.cell(index)
    }

    /// Stores `symbol` at `index`, growing the storage up to `index` if needed.
    pub fn write(&mut self, index: i64, symbol: impl Into<Symbol>) {
        *self.cell(index) = symbol.into();
    }

    /// Returns the symbol at `index` without touching the storage.
    ///
    /// Unallocated cells read as blank, exactly as `read` would report them.
    pub fn peek(&self, index: i64) -> &str {
        let (side, offset) = if index < 0 {
            (&self.left, Self::left_offset(index))
        } else {
            (&self.right, index as usize)
        };

        side.get(offset).map_or(BLANK_SYMBOL, String::as_str)
    }

    /// Resets the tape to all blank.
    pub fn clear(&mut self) {
        self.right.clear();
        self.left.clear();
    }

    /// Appends `symbols` to the non-negative side, starting at its current end.
    pub fn load<I, S>(&mut self, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.right.extend(symbols.into_iter().map(Into::into));
    }

    /// The allocated cells of the non-negative side, origin first.
    pub fn right(&self) -> &[Symbol] {
        &self.right
    }

    /// The allocated cells of the negative side, offset `-1` first.
    pub fn left(&self) -> &[Symbol] {
        &self.left
    }

    /// The range of offsets currently backed by storage.
    pub fn extent(&self) -> Range<i64> {
        -(self.left.len() as i64)..self.right.len() as i64
    }

    /// All allocated cells from the lowest offset to the highest.
    pub fn contents(&self) -> Vec<&str> {
        self.left
            .iter()
            .rev()
            .chain(self.right.iter())
            .map(String::as_str)
            .collect()
    }

    fn cell(&mut self, index: i64) -> &mut Symbol {
        let (side, offset) = if index < 0 {
            (&mut self.left, Self::left_offset(index))
        } else {
            (&mut self.right, index as usize)
        };

        if side.len() <= offset {
            side.resize(offset + 1, BLANK_SYMBOL.to_string());
        }

        &mut side[offset]
    }

    /// Maps a negative offset onto the zero-based index of the left buffer.
    fn left_offset(index: i64) -> usize {
        (index.unsigned_abs() - 1) as usize
    }
}

impl<S: Into<Symbol>> FromIterator<S> for Tape {
    /// Builds a tape whose non-negative side starts with the given symbols.
    fn from_iter<I: IntoIterator<Item = S>>(symbols: I) -> Self {
        let mut tape = Tape::new();
        tape.load(symbols);
        tape
    }
}
