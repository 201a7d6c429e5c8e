//! Playable-square coordinates for the 10×10 board.
//!
//! Squares use an internal bit index laid out so that diagonal neighbours are
//! always `±5` or `±6` apart. Every pair of board rows occupies eleven indices;
//! the eleventh (`10`, `21`, `32`, `43`) is a ghost column that absorbs the
//! offsets of edge squares, so shifting never wraps onto the wrong row.
//!
//! ```text
//!  row 0 (even):   1   2   3   4   5      indices  0..=4
//!  row 1 (odd):  6   7   8   9  10        indices  5..=9   ghost 10
//!  row 2 (even):  11  12  13  14  15      indices 11..=15
//!  ...
//!  row 9 (odd): 46  47  48  49  50        indices 49..=53
//! ```

use std::fmt;

use crate::game_state::draughts_types::Player;

/// Number of playable squares.
pub const SQUARE_COUNT: usize = 50;

/// Bit mask of every valid internal index.
pub const BOARD_MASK: u64 = generate_board_mask();

const fn generate_board_mask() -> u64 {
    let mut mask = 0u64;
    let mut index = 0u32;
    while index < 64 {
        if is_valid_index(index) {
            mask |= 1u64 << index;
        }
        index += 1;
    }
    mask
}

#[inline]
pub(crate) const fn is_valid_index(index: u32) -> bool {
    index < 54 && index % 11 != 10
}

/// A playable square, stored as its internal bit index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Square from its conventional 1..=50 number.
    pub const fn from_number(number: u8) -> Option<Square> {
        if number == 0 || number as usize > SQUARE_COUNT {
            return None;
        }
        let zero_based = number - 1;
        Some(Square(zero_based + zero_based / 10))
    }

    /// Square from its internal bit index; ghost and out-of-board indices give `None`.
    pub const fn from_index(index: u8) -> Option<Square> {
        if is_valid_index(index as u32) {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Unchecked constructor used by bitboard iteration, where the bit is known valid.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(is_valid_index(index as u32));
        Square(index)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn mask(self) -> u64 {
        1u64 << self.0
    }

    /// Conventional 1..=50 number.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0 - self.0 / 11 + 1
    }

    /// Board row, 0 at the top (squares 1..=5) through 9 (squares 46..=50).
    #[inline]
    pub const fn row(self) -> u8 {
        (self.number() - 1) / 5
    }

    /// Board column 0..=9. Even rows use the odd columns.
    #[inline]
    pub const fn column(self) -> u8 {
        let position_in_row = (self.number() - 1) % 5;
        position_in_row * 2 + if self.row() % 2 == 0 { 1 } else { 0 }
    }

    /// True when a man of `player` standing here must be a king.
    #[inline]
    pub const fn is_on_promotion_row(self, player: Player) -> bool {
        match player {
            Player::White => self.row() == 0,
            Player::Black => self.row() == 9,
        }
    }

    /// All 50 squares in ascending number order.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=SQUARE_COUNT as u8).filter_map(Square::from_number)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.number())
    }
}
