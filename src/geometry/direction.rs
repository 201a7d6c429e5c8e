//! Diagonal directions, edge masks and ray walking.
//!
//! North points toward square 1 (the white promotion row). Each direction owns
//! a precomputed edge bitboard: the squares whose neighbour in that direction
//! is off the board. Shifts and neighbour lookups mask those squares first.

use crate::game_state::draughts_types::Player;
use crate::geometry::bitboard::Bitboard;
use crate::geometry::square::{is_valid_index, Square, BOARD_MASK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

/// Clockwise order; `right` steps forward in this array, `left` backward.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::NorthWest,
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
];

const EDGES: [u64; 4] = [
    generate_edge(-6),
    generate_edge(-5),
    generate_edge(6),
    generate_edge(5),
];

const fn generate_edge(offset: i32) -> u64 {
    let mut edge = 0u64;
    let mut index = 0i32;
    while index < 64 {
        if BOARD_MASK & (1u64 << index) != 0 {
            let target = index + offset;
            if target < 0 || !is_valid_index(target as u32) {
                edge |= 1u64 << index;
            }
        }
        index += 1;
    }
    edge
}

impl Direction {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::NorthWest => 0,
            Direction::NorthEast => 1,
            Direction::SouthEast => 2,
            Direction::SouthWest => 3,
        }
    }

    /// Signed difference between internal indices of neighbouring squares.
    #[inline]
    pub const fn offset(self) -> i8 {
        match self {
            Direction::NorthWest => -6,
            Direction::NorthEast => -5,
            Direction::SouthEast => 6,
            Direction::SouthWest => 5,
        }
    }

    /// Squares with no neighbour in this direction.
    #[inline]
    pub const fn edge(self) -> Bitboard {
        Bitboard::from_bits(EDGES[self.index()])
    }

    /// 90° clockwise turn.
    #[inline]
    pub const fn right(self) -> Direction {
        ALL_DIRECTIONS[(self.index() + 1) % 4]
    }

    /// 90° counter-clockwise turn.
    #[inline]
    pub const fn left(self) -> Direction {
        ALL_DIRECTIONS[(self.index() + 3) % 4]
    }

    #[inline]
    pub const fn inverse(self) -> Direction {
        ALL_DIRECTIONS[(self.index() + 2) % 4]
    }

    /// The two directions a man of `player` steps in.
    pub const fn forward(player: Player) -> [Direction; 2] {
        match player {
            Player::White => [Direction::NorthWest, Direction::NorthEast],
            Player::Black => [Direction::SouthWest, Direction::SouthEast],
        }
    }
}

/// Adjacent square in `direction`, or `None` at the board edge.
#[inline]
pub fn neighbor(square: Square, direction: Direction) -> Option<Square> {
    if direction.edge().contains(square) {
        return None;
    }
    let target = square.index() as i16 + direction.offset() as i16;
    Some(Square::from_index_unchecked(target as u8))
}

/// Squares walked from `square` (exclusive) to the edge of the board.
#[derive(Debug, Clone)]
pub struct Ray {
    current: Square,
    direction: Direction,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let next = neighbor(self.current, self.direction)?;
        self.current = next;
        Some(next)
    }
}

#[inline]
pub fn squares_to(square: Square, direction: Direction) -> Ray {
    Ray {
        current: square,
        direction,
    }
}

/// The direction whose ray from `from` passes through `to`.
pub fn direction_between(from: Square, to: Square) -> Option<Direction> {
    ALL_DIRECTIONS
        .into_iter()
        .find(|&direction| squares_to(from, direction).any(|square| square == to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(number: u8) -> Square {
        Square::from_number(number).unwrap()
    }

    #[test]
    fn neighbors_of_a_central_square() {
        assert_eq!(neighbor(sq(32), Direction::NorthWest), Some(sq(27)));
        assert_eq!(neighbor(sq(32), Direction::NorthEast), Some(sq(28)));
        assert_eq!(neighbor(sq(32), Direction::SouthWest), Some(sq(37)));
        assert_eq!(neighbor(sq(32), Direction::SouthEast), Some(sq(38)));
    }

    #[test]
    fn edge_squares_have_no_neighbor_off_board() {
        assert_eq!(neighbor(sq(6), Direction::NorthWest), None);
        assert_eq!(neighbor(sq(6), Direction::SouthWest), None);
        assert_eq!(neighbor(sq(15), Direction::NorthEast), None);
        assert_eq!(neighbor(sq(3), Direction::NorthEast), None);
        assert_eq!(neighbor(sq(48), Direction::SouthEast), None);
        assert_eq!(neighbor(sq(5), Direction::SouthWest), Some(sq(10)));
    }

    #[test]
    fn turns_form_a_cycle() {
        for direction in ALL_DIRECTIONS {
            assert_eq!(direction.right().left(), direction);
            assert_eq!(direction.right().right(), direction.inverse());
            assert_eq!(direction.inverse().inverse(), direction);
        }
    }

    #[test]
    fn ray_walks_to_the_edge_and_restarts() {
        let ray = squares_to(sq(46), Direction::NorthEast);
        let walked: Vec<u8> = ray.clone().map(Square::number).collect();
        assert_eq!(walked, vec![41, 37, 32, 28, 23, 19, 14, 10, 5]);
        assert_eq!(ray.count(), 9);
    }

    #[test]
    fn direction_between_finds_the_ray() {
        assert_eq!(direction_between(sq(46), sq(5)), Some(Direction::NorthEast));
        assert_eq!(direction_between(sq(5), sq(46)), Some(Direction::SouthWest));
        assert_eq!(direction_between(sq(1), sq(2)), None);
    }
}
