use crate::{Pos2, enc, error::FormatError};
use std::collections::HashSet;

/// A set of alive cells.
pub type CellSet = HashSet<Pos2>;

/// The smallest axis-aligned rectangle holding every cell of a set.
///
/// An empty set has the all-zero box. The extents are `i64` since a set
/// spanning the whole `i32` range is `2^32` cells wide.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i64,
    pub height: i64,
}
impl BoundingBox {
    pub fn of<I: IntoIterator<Item = Pos2>>(cells: I) -> Self {
        let mut iter = cells.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let (tl, br) = iter.fold((first, first), |(tl, br), pos| {
            (tl.component_min(pos), br.component_max(pos))
        });
        Self {
            x: tl.x,
            y: tl.y,
            width: i64::from(br.x) - i64::from(tl.x) + 1,
            height: i64::from(br.y) - i64::from(tl.y) + 1,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn top_left(&self) -> Pos2 {
        Pos2 {
            x: self.x,
            y: self.y,
        }
    }

    /// The last cell inside the box. Meaningless for an empty box.
    #[inline]
    pub fn bottom_right(&self) -> Pos2 {
        Pos2 {
            x: (i64::from(self.x) + self.width - 1) as i32,
            y: (i64::from(self.y) + self.height - 1) as i32,
        }
    }
}

/// Read access shared by patterns and boards.
pub trait CellContainer {
    fn cells(&self) -> &CellSet;

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::of(self.cells().iter().copied())
    }
    #[inline]
    fn contains(&self, pos: Pos2) -> bool {
        self.cells().contains(&pos)
    }
    #[inline]
    fn population(&self) -> usize {
        self.cells().len()
    }
}

/// Where a [`Pattern`] is built from.
#[derive(Debug, Clone)]
pub enum PatternSource {
    FromRle(String),
    FromCells(CellSet),
    FromPattern(Pattern),
}

/// An immutable set of alive cells with geometric operations.
///
/// Every operation returns a new pattern and leaves the receiver untouched.
/// Patterns know nothing about board bounds; coordinates may be negative and
/// wrap around at the ends of the `i32` range.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pattern {
    cells: CellSet,
}

fn in_rect(pos: Pos2, x: i32, y: i32, w: i32, h: i32) -> bool {
    let (px, py) = (i64::from(pos.x), i64::from(pos.y));
    let (x, y) = (i64::from(x), i64::from(y));
    x <= px && px < x + i64::from(w) && y <= py && py < y + i64::from(h)
}

impl Pattern {
    pub fn new(source: PatternSource) -> Result<Self, FormatError> {
        match source {
            PatternSource::FromRle(text) => Self::from_rle(&text),
            PatternSource::FromCells(cells) => Ok(Self { cells }),
            PatternSource::FromPattern(pattern) => Ok(pattern),
        }
    }

    /// Decodes a bare RLE body, see [`enc::decode`].
    pub fn from_rle(text: &str) -> Result<Self, FormatError> {
        enc::decode(text).map(|cells| Self { cells })
    }

    pub fn from_cells<I: IntoIterator<Item = Pos2>>(cells: I) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Canonical RLE body of this pattern, see [`enc::encode`].
    pub fn to_rle(&self) -> String {
        enc::encode(&self.cells)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.cells.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_cells(self) -> CellSet {
        self.cells
    }

    fn map<F: FnMut(Pos2) -> Pos2>(&self, f: F) -> Self {
        Self {
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }

    #[must_use]
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        let offset = Pos2 { x: dx, y: dy };
        self.map(|pos| pos.wrapping_add(offset))
    }

    /// Moves the pattern so its bounding box starts at the origin.
    #[must_use]
    pub fn strip(&self) -> Self {
        let tl = self.bounding_box().top_left();
        self.translate(tl.x.wrapping_neg(), tl.y.wrapping_neg())
    }

    /// Mirrors across the horizontal midline (negates y); the bounding box
    /// stays where it was.
    #[must_use]
    pub fn flip_x(&self) -> Self {
        let bb = self.bounding_box();
        let sum = i64::from(bb.y) + i64::from(bb.bottom_right().y);
        self.map(|pos| Pos2 {
            x: pos.x,
            y: (sum - i64::from(pos.y)) as i32,
        })
    }

    /// Mirrors across the vertical midline (negates x); the bounding box
    /// stays where it was.
    #[must_use]
    pub fn flip_y(&self) -> Self {
        let bb = self.bounding_box();
        let sum = i64::from(bb.x) + i64::from(bb.bottom_right().x);
        self.map(|pos| Pos2 {
            x: (sum - i64::from(pos.x)) as i32,
            y: pos.y,
        })
    }

    /// Rotates a quarter turn in screen coordinates (y grows downwards),
    /// keeping the top-left corner of the bounding box in place.
    ///
    /// For a stripped pattern of size `w x h` clockwise maps `(x, y)` to
    /// `(h - 1 - y, x)` and counter-clockwise maps it to `(y, w - 1 - x)`.
    #[must_use]
    pub fn rotate90(&self, clockwise: bool) -> Self {
        let bb = self.bounding_box();
        let (x0, y0) = (i64::from(bb.x), i64::from(bb.y));
        let (x1, y1) = (x0 + bb.width - 1, y0 + bb.height - 1);
        // a box taller than wide may reach past i32::MAX once turned
        if clockwise {
            self.map(|pos| Pos2 {
                x: (x0 + y1 - i64::from(pos.y)) as i32,
                y: (y0 + i64::from(pos.x) - x0) as i32,
            })
        } else {
            self.map(|pos| Pos2 {
                x: (x0 + i64::from(pos.y) - y0) as i32,
                y: (y0 + x1 - i64::from(pos.x)) as i32,
            })
        }
    }

    /// Set union with `other` moved by `offset`.
    #[must_use]
    pub fn union(&self, other: &Pattern, offset: Pos2) -> Self {
        let mut cells = self.cells.clone();
        cells.extend(other.iter().map(|pos| pos.wrapping_add(offset)));
        Self { cells }
    }

    /// Drops every cell with `x` in `[x, x + w)` and `y` in `[y, y + h)`.
    #[must_use]
    pub fn clear_rect(&self, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            cells: self
                .iter()
                .filter(|&pos| !in_rect(pos, x, y, w, h))
                .collect(),
        }
    }

    /// Keeps only the cells [`Pattern::clear_rect`] would drop.
    #[must_use]
    pub fn crop(&self, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            cells: self.iter().filter(|&pos| in_rect(pos, x, y, w, h)).collect(),
        }
    }
}

impl CellContainer for Pattern {
    #[inline]
    fn cells(&self) -> &CellSet {
        &self.cells
    }
}

impl From<CellSet> for Pattern {
    fn from(cells: CellSet) -> Self {
        Self { cells }
    }
}

impl FromIterator<Pos2> for Pattern {
    fn from_iter<I: IntoIterator<Item = Pos2>>(iter: I) -> Self {
        Self::from_cells(iter)
    }
}

impl std::str::FromStr for Pattern {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rle(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(cells: &[(i32, i32)]) -> Pattern {
        cells.iter().copied().map(Pos2::from).collect()
    }

    fn glider() -> Pattern {
        pattern(&[(2, 0), (0, 1), (2, 1), (1, 2), (2, 2)])
    }

    #[test]
    fn bounding_box_of_empty_is_zero() {
        let bb = Pattern::default().bounding_box();

        assert_eq!(bb, BoundingBox::default());
        assert!(bb.is_empty());
    }

    #[test]
    fn bounding_box_folds_min_max() {
        let bb = pattern(&[(3, -1), (-2, 4), (0, 0)]).bounding_box();

        assert_eq!(
            bb,
            BoundingBox {
                x: -2,
                y: -1,
                width: 6,
                height: 6
            }
        );
        assert_eq!(bb.bottom_right(), Pos2::new(3, 4));
    }

    #[test]
    fn extreme_coordinates_wrap() {
        let wide = pattern(&[(0, 0), (i32::MAX, 0)]);
        assert_eq!(wide.bounding_box().width, i64::from(i32::MAX) + 1);

        let full = pattern(&[(i32::MIN, 0), (i32::MAX, 0)]);
        assert_eq!(full.bounding_box().width, 1_i64 << 32);
        assert_eq!(full.bounding_box().bottom_right(), Pos2::new(i32::MAX, 0));
        assert_eq!(full.flip_y(), full);

        assert_eq!(pattern(&[(i32::MIN, 5)]).strip(), pattern(&[(0, 0)]));

        let edge = pattern(&[(i32::MAX, 0)]);
        assert_eq!(edge.translate(1, 0), pattern(&[(i32::MIN, 0)]));
        assert_eq!(edge.translate(1, 0).translate(-1, 0), edge);
        assert_eq!(edge.rotate90(true), edge);
    }

    #[test]
    fn sources_resolve_once() {
        let from_rle = Pattern::new(PatternSource::FromRle("2bo$obo$b2o!".into())).unwrap();
        let from_cells = Pattern::new(PatternSource::FromCells(glider().into_cells())).unwrap();
        let from_pattern = Pattern::new(PatternSource::FromPattern(glider())).unwrap();

        assert_eq!(from_rle, glider());
        assert_eq!(from_cells, glider());
        assert_eq!(from_pattern, glider());
        assert!(Pattern::new(PatternSource::FromRle("2bq!".into())).is_err());
    }

    #[test]
    fn translate_leaves_receiver_alone() {
        let g = glider();
        let moved = g.translate(5, -3);

        assert_eq!(g, glider());
        assert!(moved.contains(Pos2::new(7, -3)));
        assert_eq!(moved.bounding_box().top_left(), Pos2::new(5, -3));
    }

    #[test]
    fn strip_is_idempotent() {
        let p = glider().translate(-7, 11);
        let once = p.strip();

        assert_eq!(once.bounding_box().top_left(), Pos2::zero());
        assert_eq!(once.strip(), once);
        assert_eq!(once, glider());
    }

    #[test]
    fn flips_of_stripped_pattern() {
        // `(0, h - 1)` / `(w - 1, 0)` offsets after negating one axis
        let g = glider();

        assert_eq!(g.flip_x(), pattern(&[(2, 2), (0, 1), (2, 1), (1, 0), (2, 0)]));
        assert_eq!(g.flip_y(), pattern(&[(0, 0), (2, 1), (0, 1), (1, 2), (0, 2)]));
    }

    #[test]
    fn flips_keep_bounding_box() {
        let p = pattern(&[(4, 5), (5, 5), (4, 7)]);

        assert_eq!(p.flip_x().bounding_box(), p.bounding_box());
        assert_eq!(p.flip_y().bounding_box(), p.bounding_box());
        assert_eq!(p.flip_x(), pattern(&[(4, 7), (5, 7), (4, 5)]));
        assert_eq!(p.flip_x().flip_x(), p);
    }

    #[test]
    fn rotate_matches_quarter_turn() {
        // 3 wide, 2 tall: o o o / o . .
        let l = pattern(&[(0, 0), (1, 0), (2, 0), (0, 1)]);

        let cw = l.rotate90(true);
        assert_eq!(cw, pattern(&[(1, 0), (1, 1), (1, 2), (0, 0)]));
        assert_eq!(cw.bounding_box().width, 2);
        assert_eq!(cw.bounding_box().height, 3);

        let ccw = l.rotate90(false);
        assert_eq!(ccw, pattern(&[(0, 2), (0, 1), (0, 0), (1, 2)]));
    }

    #[test]
    fn rotate_round_trips() {
        let p = glider().translate(3, 8);

        assert_eq!(p.rotate90(true).rotate90(false), p);
        let full = p.rotate90(true).rotate90(true).rotate90(true).rotate90(true);
        assert_eq!(full, p);
        assert_eq!(p.rotate90(true).bounding_box().top_left(), Pos2::new(3, 8));
    }

    #[test]
    fn union_collapses_duplicates() {
        let a = pattern(&[(1, 0), (0, 1), (4, 0)]);
        let b = pattern(&[(6, 1), (4, 0)]);

        let c = a.union(&b, Pos2::new(0, 3));
        assert_eq!(c, pattern(&[(1, 0), (0, 1), (4, 0), (6, 4), (4, 3)]));

        let same = a.union(&a, Pos2::zero());
        assert_eq!(same, a);
    }

    #[test]
    fn clear_rect_is_half_open() {
        let p = pattern(&[(0, 0), (1, 1), (2, 2), (3, 3)]);

        assert_eq!(p.clear_rect(1, 1, 2, 2), pattern(&[(0, 0), (3, 3)]));
        assert_eq!(p.clear_rect(0, 0, 0, 10), p);
    }

    #[test]
    fn clear_then_restore_rect() {
        let p = glider().union(&glider(), Pos2::new(4, 1)).union(&glider(), Pos2::new(1, 5));
        let (x, y, w, h) = (1, 1, 4, 3);

        let cleared = p.clear_rect(x, y, w, h);
        let content = p.crop(x, y, w, h);

        assert_ne!(cleared, p);
        assert_eq!(cleared.union(&content, Pos2::zero()), p);
    }

    #[test]
    fn to_rle_and_back() {
        let p = glider().translate(2, 1);

        assert_eq!(p.to_rle(), "$4bo$2bobo$3b2o!");
        assert_eq!(Pattern::from_rle(&p.to_rle()).unwrap(), p);
        assert_eq!(Pattern::default().to_rle(), "!");
        assert_eq!("!".parse::<Pattern>().unwrap(), Pattern::default());
    }
}
