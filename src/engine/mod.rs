pub mod rule;
mod topology;
mod window;

pub use self::topology::Topology;
pub use self::window::BoardWindow;
use crate::{
    Pos2,
    error::OutOfBounds,
    pattern::{CellContainer, CellSet, Pattern},
};
use rayon::prelude::*;

/// Offsets of the Moore neighbourhood, row-major, center excluded
const NEIGHBOR_OFFSETS: [Pos2; 8] = [
    Pos2::new(-1, -1),
    Pos2::new(0, -1),
    Pos2::new(1, -1),
    Pos2::new(-1, 0),
    Pos2::new(1, 0),
    Pos2::new(-1, 1),
    Pos2::new(0, 1),
    Pos2::new(1, 1),
];

/// How many cells were born and how many died in one generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Changes {
    pub births: usize,
    pub deaths: usize,
}

/// Shifts one coordinate on a torus axis of length `len`.
#[inline]
fn wrap_axis(value: i32, delta: i32, len: i32) -> i32 {
    // the result lies in [0, len), so it fits back into an i32
    (i64::from(value) + i64::from(delta)).rem_euclid(i64::from(len)) as i32
}

/// The live state of one simulation.
///
/// A board owns the current generation and replaces it in place on every
/// [`Board::advance`]. When the topology is bounded or toroidal every alive
/// cell satisfies `0 <= x < rows` and `0 <= y < cols` after each mutation.
#[derive(Debug, Clone)]
pub struct Board {
    cells: CellSet,
    topology: Topology,
    last: Changes,
}

impl Board {
    pub fn new(topology: Topology) -> Self {
        Self {
            cells: CellSet::new(),
            topology: topology.normalized(),
            last: Changes::default(),
        }
    }

    /// A board seeded with `pattern`, trimmed to the topology.
    pub fn from_pattern(pattern: &Pattern, topology: Topology) -> Self {
        let mut board = Self::new(topology);
        board.add_pattern(pattern, Pos2::zero());
        board
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn wrap(&self) -> bool {
        self.topology.wraps()
    }

    /// Whether `pos` may hold an alive cell.
    #[inline]
    pub fn in_bounds(&self, pos: Pos2) -> bool {
        self.topology.contains(pos)
    }

    #[inline]
    pub fn is_alive(&self, pos: Pos2) -> bool {
        self.in_bounds(pos) && self.cells.contains(&pos)
    }

    /// Snapshot of the current generation.
    ///
    /// The borrow ends before the next mutation, so iterating again afterwards
    /// sees the new generation.
    #[inline]
    pub fn alive_cells(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.cells.iter().copied()
    }

    /// Moves `pos` by `offset`, wrapping around when the board is a torus.
    ///
    /// `None` when the result leaves the `i32` range; no board can hold such
    /// a cell.
    #[inline]
    fn offset_pos(&self, pos: Pos2, offset: Pos2) -> Option<Pos2> {
        match self.topology {
            Topology::Torus { rows, cols } if rows > 0 && cols > 0 => Some(Pos2 {
                x: wrap_axis(pos.x, offset.x, rows),
                y: wrap_axis(pos.y, offset.y, cols),
            }),
            _ => pos.checked_add(offset),
        }
    }

    /// The neighbours of `pos`, wrapped when the board is a torus.
    ///
    /// On tiny tori the same position can appear more than once. Neighbours
    /// past the `i32` range are skipped.
    pub fn neighbors(&self, pos: Pos2) -> impl Iterator<Item = Pos2> + '_ {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |offset| self.offset_pos(pos, offset))
    }

    /// 9-bit mask of the neighbourhood of `pos`, see [`rule::CENTER`].
    fn neighborhood(&self, pos: Pos2) -> u16 {
        let mut mask = if self.is_alive(pos) { rule::CENTER } else { 0 };
        for (i, offset) in NEIGHBOR_OFFSETS.into_iter().enumerate() {
            let alive = self
                .offset_pos(pos, offset)
                .is_some_and(|neighbor| self.is_alive(neighbor));
            if alive {
                // the center sits at bit 4
                let bit = if i < 4 { i } else { i + 1 };
                mask |= 1u16 << bit;
            }
        }
        mask
    }

    pub fn alive_neighbor_count(&self, pos: Pos2) -> u32 {
        rule::neighbors(self.neighborhood(pos))
    }

    /// Alive cells plus all of their neighbours; nothing else can change.
    fn candidates(&self) -> CellSet {
        let mut candidates = CellSet::with_capacity(self.cells.len() * 9);
        for &pos in &self.cells {
            candidates.insert(pos);
            candidates.extend(self.neighbors(pos));
        }
        candidates
    }

    /// Whether `pos` flips state in the next generation.
    #[inline]
    fn flips(&self, pos: Pos2) -> bool {
        rule::transition(self.neighborhood(pos)) != self.is_alive(pos)
    }

    /// Computes the next generation in place.
    ///
    /// Every candidate is evaluated against the current generation first; the
    /// collected flips are applied afterwards as one batch.
    pub fn advance(&mut self) {
        let flips: Vec<Pos2> = self
            .candidates()
            .into_iter()
            .filter(|&pos| self.flips(pos))
            .collect();
        self.apply(flips);
    }

    /// Same as [`Board::advance`], evaluating candidates on the rayon pool.
    pub fn advance_parallel(&mut self) {
        let candidates = self.candidates();
        let flips: Vec<Pos2> = candidates
            .par_iter()
            .copied()
            .filter(|&pos| self.flips(pos))
            .collect();
        self.apply(flips);
    }

    /// Births outside of the bounds are dropped here, so the board never
    /// needs trimming after a generation.
    fn apply(&mut self, flips: Vec<Pos2>) {
        let mut changes = Changes::default();
        for pos in flips {
            if self.cells.remove(&pos) {
                changes.deaths += 1;
            } else if self.in_bounds(pos) {
                self.cells.insert(pos);
                changes.births += 1;
            }
        }
        self.last = changes;
    }

    /// Births and deaths of the most recent [`Board::advance`]; zero before
    /// the first one.
    #[inline]
    pub fn last_changes(&self) -> Changes {
        self.last
    }

    /// Drops every cell outside of the bounds.
    fn trim(&mut self) {
        if self.topology.dimensions().is_some() {
            let topology = self.topology;
            self.cells.retain(|&pos| topology.contains(pos));
        }
    }

    /// Sets a single cell; writes outside a bounded board are dropped.
    pub fn set_cell(&mut self, pos: Pos2, alive: bool) {
        if !alive {
            self.cells.remove(&pos);
        } else if self.in_bounds(pos) {
            self.cells.insert(pos);
        }
    }

    /// Like [`Board::set_cell`], but rejects positions outside the bounds.
    pub fn try_set_cell(&mut self, pos: Pos2, alive: bool) -> Result<(), OutOfBounds> {
        self.check_bounds(pos)?;
        self.set_cell(pos, alive);
        Ok(())
    }

    /// Adds `pattern` moved by `offset`; cells falling outside a bounded
    /// board or past the `i32` range are dropped.
    pub fn add_pattern(&mut self, pattern: &Pattern, offset: Pos2) {
        for pos in pattern.iter().filter_map(|pos| pos.checked_add(offset)) {
            self.set_cell(pos, true);
        }
    }

    /// Like [`Board::add_pattern`], but adds nothing at all if any cell would
    /// fall outside the bounds.
    pub fn try_add_pattern(&mut self, pattern: &Pattern, offset: Pos2) -> Result<(), OutOfBounds> {
        for pos in pattern.iter() {
            // a saturated position is out of bounds on every bounded board
            self.check_bounds(pos.saturating_add(offset))?;
        }
        self.add_pattern(pattern, offset);
        Ok(())
    }

    fn check_bounds(&self, pos: Pos2) -> Result<(), OutOfBounds> {
        match self.topology.dimensions() {
            Some((rows, cols)) if !self.in_bounds(pos) => Err(OutOfBounds { pos, rows, cols }),
            _ => Ok(()),
        }
    }

    /// Kills every cell with `x` in `[x, x + w)` and `y` in `[y, y + h)`.
    pub fn clear_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let (x0, y0) = (i64::from(x), i64::from(y));
        let (x1, y1) = (x0 + i64::from(w), y0 + i64::from(h));
        self.cells.retain(|pos| {
            let (px, py) = (i64::from(pos.x), i64::from(pos.y));
            !(x0 <= px && px < x1 && y0 <= py && py < y1)
        });
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Shifts every cell; toroidal boards wrap, bounded boards trim.
    ///
    /// On an unbounded board cells pushed past the `i32` range are dropped.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        let offset = Pos2 { x: dx, y: dy };
        let moved: CellSet = self
            .cells
            .iter()
            .filter_map(|&pos| self.offset_pos(pos, offset))
            .collect();
        self.cells = moved;
        self.trim();
    }

    /// The current generation as a free-standing pattern.
    pub fn to_pattern(&self) -> Pattern {
        Pattern::from(self.cells.clone())
    }

    pub fn window(&self, top_left: Pos2, bottom_right: Pos2) -> BoardWindow<'_> {
        BoardWindow::new(self, top_left, bottom_right)
    }
}

impl CellContainer for Board {
    #[inline]
    fn cells(&self) -> &CellSet {
        &self.cells
    }
}
