use crate::Pos2;

/// Describes how the edges of a board behave.
///
/// `rows` bounds the x coordinate and `cols` bounds the y coordinate, so a
/// bounded board holds cells with `0 <= x < rows` and `0 <= y < cols`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Field is unbounded and can grow infinitely.
    Unbounded,
    /// Cells past the edges are dead and never come alive.
    Bounded { rows: i32, cols: i32 },
    /// Opposite bounds of the field are stitched together.
    Torus { rows: i32, cols: i32 },
}

impl Topology {
    /// Negative dimensions become zero, an empty board that drops every write.
    pub(crate) fn normalized(self) -> Self {
        match self {
            Self::Unbounded => Self::Unbounded,
            Self::Bounded { rows, cols } => Self::Bounded {
                rows: rows.max(0),
                cols: cols.max(0),
            },
            Self::Torus { rows, cols } => Self::Torus {
                rows: rows.max(0),
                cols: cols.max(0),
            },
        }
    }

    /// `(rows, cols)` of a bounded or toroidal board
    #[inline]
    pub fn dimensions(&self) -> Option<(i32, i32)> {
        match *self {
            Self::Unbounded => None,
            Self::Bounded { rows, cols } | Self::Torus { rows, cols } => Some((rows, cols)),
        }
    }

    /// Whether `pos` lies on the board.
    #[inline]
    pub fn contains(&self, pos: Pos2) -> bool {
        match self.dimensions() {
            Some((rows, cols)) => (0..rows).contains(&pos.x) && (0..cols).contains(&pos.y),
            None => true,
        }
    }

    #[inline]
    pub fn wraps(&self) -> bool {
        matches!(self, Self::Torus { .. })
    }
}
