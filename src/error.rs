//! Error types for pattern decoding and strict board edits.

use crate::Pos2;
use thiserror::Error;

/// Errors produced while decoding RLE text.
///
/// Decoding is all-or-nothing: when one of these is returned, no cells were
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A character outside of `b`, `o`, `$`, `0-9` and `!`.
    #[error("invalid RLE character {ch:?} at offset {offset}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset into the pattern body.
        offset: usize,
    },

    /// A `!` that is not the last character.
    #[error("'!' must be the final character, found one at offset {offset}")]
    MisplacedTerminator {
        /// Byte offset of the early terminator.
        offset: usize,
    },

    /// A run count that does not fit in a coordinate.
    #[error("run length too large at offset {offset}")]
    RunLengthOverflow {
        /// Byte offset where the run count starts.
        offset: usize,
    },

    /// A body with more alive cells than [`crate::enc::MAX_CELLS`].
    #[error("pattern has more than {limit} alive cells")]
    TooManyCells {
        /// The cap that was exceeded.
        limit: usize,
    },

    /// A malformed `x = .., y = .., rule = ..` document header.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

/// A strict board edit that landed outside of `[0, rows) x [0, cols)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell {pos} lies outside the {rows}x{cols} board")]
pub struct OutOfBounds {
    /// The rejected position.
    pub pos: Pos2,
    /// Number of valid x values.
    pub rows: i32,
    /// Number of valid y values.
    pub cols: i32,
}
