use super::Board;
use crate::Pos2;

/// The alive cells of a board inside `[top_left, bottom_right)`.
pub struct BoardWindow<'a> {
    tl: Pos2,
    br: Pos2,
    board: &'a Board,
}
impl<'a> BoardWindow<'a> {
    pub fn new(board: &'a Board, top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
            board,
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Pos2> + '_ {
        let rx = self.tl.x..self.br.x;
        let ry = self.tl.y..self.br.y;
        self.board
            .alive_cells()
            .filter(move |pos| rx.contains(&pos.x) && ry.contains(&pos.y))
    }

    /// The visible cells in row-major order
    pub fn sorted(&self) -> Vec<Pos2> {
        let mut cells: Vec<Pos2> = self.iter().collect();
        cells.sort_unstable();
        cells
    }
}

impl std::fmt::Display for BoardWindow<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut last = self.tl - Pos2 { x: 1, y: 0 };
        for alive in self.sorted() {
            // determine the number of lines to print
            let lines = alive.y - last.y;
            // determine the number of padding spaces to print
            let padding = match lines {
                0 => alive.x - last.x - 1,
                _ => alive.x - self.tl.x,
            };
            write!(
                f,
                "{0:\n<1$}{0: <2$}█",
                "", lines as usize, padding as usize
            )?;
            last = alive;
        }
        Ok(())
    }
}
