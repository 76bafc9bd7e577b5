use std::sync::OnceLock;

/// The number of arrangements of a 3x3 neighbourhood
const PERMUTATIONS: usize = 1 << 9;
type TransitionTable = [bool; PERMUTATIONS];

/// Bit of the center cell in a neighbourhood mask.
///
/// Masks are laid out row-major, top-left neighbour in bit 0 and bottom-right
/// neighbour in bit 8.
pub(crate) const CENTER: u16 = 0b000_010_000;

/// Neighbour counts that give birth to a dead cell
pub const BIRTH: &[u32] = &[3];
/// Neighbour counts that keep a live cell alive
pub const SURVIVAL: &[u32] = &[2, 3];

/// Returns a singleton transition table for B3/S23
///
/// Equivalent to calling [`generate_table`] once and storing the result
fn table() -> &'static TransitionTable {
    static CELL: OnceLock<TransitionTable> = OnceLock::new();
    CELL.get_or_init(generate_table)
}

/// Creates the transition table for B3/S23
///
/// The table is indexed by a 9-bit neighbourhood mask (see [`CENTER`]) and
/// holds whether the center cell is alive in the next generation.
fn generate_table() -> TransitionTable {
    let mut table = [false; PERMUTATIONS];
    for (mask, next) in table.iter_mut().enumerate() {
        let mask = mask as u16;
        *next = next_state(mask & CENTER != 0, neighbors(mask));
    }
    table
}

/// Number of alive neighbours in a mask, the center excluded
#[inline]
pub(crate) fn neighbors(mask: u16) -> u32 {
    (mask & !CENTER).count_ones()
}

/// The rule itself, for a cell and its neighbour count
#[inline]
pub fn next_state(alive: bool, neighbors: u32) -> bool {
    if alive {
        SURVIVAL.contains(&neighbors)
    } else {
        BIRTH.contains(&neighbors)
    }
}

/// Looks up the next state of the center cell of `mask`
#[inline]
pub(crate) fn transition(mask: u16) -> bool {
    table()[usize::from(mask & 0x1ff)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(alive: bool, neighbors: usize) -> u16 {
        const NEIGHBOR_BITS: [u16; 8] = [
            0b000_000_001,
            0b000_000_010,
            0b000_000_100,
            0b000_001_000,
            0b000_100_000,
            0b001_000_000,
            0b010_000_000,
            0b100_000_000,
        ];

        let mut value = if alive { CENTER } else { 0 };
        for bit in NEIGHBOR_BITS.iter().take(neighbors) {
            value |= bit;
        }
        value
    }

    #[test]
    fn table_matches_b3_s23() {
        assert!(transition(mask(true, 2)));
        assert!(transition(mask(true, 3)));
        assert!(transition(mask(false, 3)));

        assert!(!transition(mask(true, 0)));
        assert!(!transition(mask(true, 1)));
        assert!(!transition(mask(true, 4)));
        assert!(!transition(mask(true, 8)));
        assert!(!transition(mask(false, 2)));
        assert!(!transition(mask(false, 4)));
    }

    #[test]
    fn counts_exclude_center() {
        assert_eq!(neighbors(mask(true, 0)), 0);
        assert_eq!(neighbors(mask(true, 5)), 5);
        assert_eq!(neighbors(0x1ff), 8);
    }

    #[test]
    fn table_agrees_with_rule() {
        for m in 0..PERMUTATIONS as u16 {
            assert_eq!(transition(m), next_state(m & CENTER != 0, neighbors(m)));
        }
    }
}
