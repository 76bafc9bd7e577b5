//! Core library for Conway's Game of Life.
//!
//! Patterns are composed with [`Pattern`], read and written as RLE through
//! [`enc`], and evolved on a [`Board`].

pub mod enc;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod pos;
pub mod presets;

pub use enc::{Codec, RunLengthEncoded};
pub use engine::{Board, BoardWindow, Changes, Topology};
pub use error::{FormatError, OutOfBounds};
pub use pattern::{BoundingBox, CellContainer, CellSet, Pattern, PatternSource};
pub use pos::Pos2;
