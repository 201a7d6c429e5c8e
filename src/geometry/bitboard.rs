//! 64-bit square sets.
//!
//! Only bits inside [`BOARD_MASK`] are ever set. Enumeration walks the set bits
//! lowest first, which is also ascending square-number order.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::geometry::direction::Direction;
use crate::geometry::square::{Square, BOARD_MASK};

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(BOARD_MASK);

    /// Wraps raw bits, dropping anything outside the board.
    #[inline]
    pub const fn from_bits(bits: u64) -> Bitboard {
        Bitboard(bits & BOARD_MASK)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn from_square(square: Square) -> Bitboard {
        Bitboard(square.mask())
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & square.mask() != 0
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= square.mask();
    }

    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !square.mask();
    }

    /// Same set with `square` flipped.
    #[inline]
    pub const fn toggled(self, square: Square) -> Bitboard {
        Bitboard(self.0 ^ square.mask())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest square in the set.
    #[inline]
    pub fn first(self) -> Option<Square> {
        self.iter().next()
    }

    /// Every member moved one step in `direction`; members on that edge fall off.
    #[inline]
    pub const fn shift(self, direction: Direction) -> Bitboard {
        let movable = self.0 & !direction.edge().0;
        let offset = direction.offset();
        if offset < 0 {
            Bitboard(movable >> (-offset) as u32)
        } else {
            Bitboard(movable << offset as u32)
        }
    }

    #[inline]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self.0)
    }
}

pub struct BitboardIter(u64);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Square::from_index_unchecked(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> BitboardIter {
        self.iter()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut out = Bitboard::EMPTY;
        for square in iter {
            out.insert(square);
        }
        out
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Bitboard::from_square(square)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

/// Complement within the board.
impl Not for Bitboard {
    type Output = Bitboard;
    fn not(self) -> Bitboard {
        Bitboard(!self.0 & BOARD_MASK)
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Square::number)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(numbers: &[u8]) -> Bitboard {
        numbers
            .iter()
            .map(|&n| Square::from_number(n).unwrap())
            .collect()
    }

    #[test]
    fn iteration_is_ascending_by_number() {
        let set = board(&[50, 1, 23, 11, 10]);
        let numbers: Vec<u8> = set.iter().map(Square::number).collect();
        assert_eq!(numbers, vec![1, 10, 11, 23, 50]);
    }

    #[test]
    fn complement_stays_on_the_board() {
        assert_eq!((!Bitboard::EMPTY).len(), 50);
        assert_eq!(!Bitboard::FULL, Bitboard::EMPTY);
    }

    #[test]
    fn shift_drops_squares_on_the_edge() {
        let set = board(&[6, 15, 32]);
        assert_eq!(set.shift(Direction::NorthWest), board(&[10, 27]));
        assert_eq!(set.shift(Direction::NorthEast), board(&[1, 28]));
        assert_eq!(set.shift(Direction::SouthEast), board(&[11, 38]));
    }

    #[test]
    fn set_algebra() {
        let a = board(&[1, 2, 3]);
        let b = board(&[3, 4]);
        assert_eq!(a | b, board(&[1, 2, 3, 4]));
        assert_eq!(a & b, board(&[3]));
        assert_eq!(a ^ b, board(&[1, 2, 4]));
        assert!(a.contains(Square::from_number(2).unwrap()));
        assert_eq!(a.first(), Square::from_number(1));
    }
}
