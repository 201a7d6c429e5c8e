//! Hop-by-hop route reconstruction.
//!
//! A move only stores its start, end and ordered captures. The route between
//! them is rebuilt on demand: trivially for men, by search for kings, whose
//! landing square after each capture is not recorded. The first consistent
//! route found is used.

use crate::geometry::bitboard::Bitboard;
use crate::geometry::direction::{direction_between, neighbor, squares_to, Direction, ALL_DIRECTIONS};
use crate::geometry::square::Square;
use crate::moves::draughts_move::DraughtsMove;

/// One straight leg of a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub direction: Direction,
    /// Square jumped over, if this leg captures.
    pub captured: Option<Square>,
    /// Empty squares crossed on the way, excluding the landing square.
    pub passed: Bitboard,
    pub landing: Square,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovePath {
    hops: Vec<Hop>,
}

impl MovePath {
    #[inline]
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn landing_squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.hops.iter().map(|hop| hop.landing)
    }

    /// Squares crossed, jumped or landed on before the final landing.
    pub fn intermediate_squares(&self) -> Bitboard {
        let mut squares = Bitboard::EMPTY;
        for (idx, hop) in self.hops.iter().enumerate() {
            squares |= hop.passed;
            if let Some(captured) = hop.captured {
                squares.insert(captured);
            }
            if idx + 1 < self.hops.len() {
                squares.insert(hop.landing);
            }
        }
        squares
    }
}

/// # Panics
/// When the captures admit no consistent route, which means the move was not
/// produced by the generator.
pub(crate) fn reconstruct_path(mv: &DraughtsMove) -> MovePath {
    match try_reconstruct_path(mv) {
        Some(path) => path,
        None => panic!("no consistent route for move {mv:?}"),
    }
}

/// Route through start, the captures in their recorded order and end, or
/// None when the pieces on the origin board allow no such route.
pub(crate) fn try_reconstruct_path(mv: &DraughtsMove) -> Option<MovePath> {
    let start = mv.start_square();
    let end = mv.end_square();
    let captures: Vec<Square> = mv.captures().iter().map(|piece| piece.square).collect();

    let hops = if captures.is_empty() {
        slide_path(start, end, mv.start().is_king())
    } else if mv.start().is_king() {
        let mut obstacles = mv.origin().occupied();
        obstacles.remove(start);
        let mut hops = Vec::with_capacity(captures.len());
        king_capture_path(obstacles, start, &captures, end, &mut hops).then_some(hops)
    } else {
        man_capture_path(start, &captures, end)
    };

    hops.map(|hops| MovePath { hops })
}

fn slide_path(start: Square, end: Square, is_king: bool) -> Option<Vec<Hop>> {
    let direction = direction_between(start, end)?;
    let passed: Bitboard = squares_to(start, direction)
        .take_while(|&square| square != end)
        .collect();
    if !is_king && !passed.is_empty() {
        return None;
    }
    Some(vec![Hop {
        direction,
        captured: None,
        passed,
        landing: end,
    }])
}

fn man_capture_path(start: Square, captures: &[Square], end: Square) -> Option<Vec<Hop>> {
    let mut hops = Vec::with_capacity(captures.len());
    let mut from = start;
    for &captured in captures {
        let direction = ALL_DIRECTIONS
            .into_iter()
            .find(|&direction| neighbor(from, direction) == Some(captured))?;
        let landing = neighbor(captured, direction)?;
        hops.push(Hop {
            direction,
            captured: Some(captured),
            passed: Bitboard::EMPTY,
            landing,
        });
        from = landing;
    }
    (from == end).then_some(hops)
}

fn king_capture_path(
    obstacles: Bitboard,
    from: Square,
    captures: &[Square],
    end: Square,
    hops: &mut Vec<Hop>,
) -> bool {
    let Some((&target, rest)) = captures.split_first() else {
        return from == end;
    };

    for direction in ALL_DIRECTIONS {
        let mut ray = squares_to(from, direction);
        let mut approach = Bitboard::EMPTY;
        let reached = loop {
            match ray.next() {
                Some(square) if square == target => break true,
                Some(square) if obstacles.contains(square) => break false,
                Some(square) => approach.insert(square),
                None => break false,
            }
        };
        if !reached {
            continue;
        }

        let mut beyond = Bitboard::EMPTY;
        for landing in ray.take_while(|&square| !obstacles.contains(square)) {
            hops.push(Hop {
                direction,
                captured: Some(target),
                passed: approach | beyond,
                landing,
            });
            if king_capture_path(obstacles, landing, rest, end, hops) {
                return true;
            }
            hops.pop();
            beyond.insert(landing);
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::draughts_types::{Piece, PieceKind, Player};
    use crate::game_state::position::Position;

    fn sq(number: u8) -> Square {
        Square::from_number(number).unwrap()
    }

    fn squares(numbers: &[u8]) -> Bitboard {
        numbers.iter().map(|&n| sq(n)).collect()
    }

    #[test]
    fn man_slide_has_no_intermediate_squares() {
        let position = Position::initial();
        let mv = DraughtsMove::new(
            position.placement(),
            Piece::new(Player::White, PieceKind::Man, sq(33)),
            sq(29),
            Vec::new(),
        );
        assert_eq!(mv.path().hops().len(), 1);
        assert_eq!(mv.intermediate_squares(), Bitboard::EMPTY);
        assert_eq!(mv.relevant_squares(), squares(&[29, 33]));
    }

    #[test]
    fn man_double_capture_path() {
        let man = Piece::new(Player::White, PieceKind::Man, sq(32));
        let first = Piece::new(Player::Black, PieceKind::Man, sq(28));
        let second = Piece::new(Player::Black, PieceKind::Man, sq(18));
        let position = Position::from_pieces(Player::White, &[man, first, second]).unwrap();
        let mv = DraughtsMove::new(position.placement(), man, sq(12), vec![first, second]);

        let landings: Vec<u8> = mv.path().landing_squares().map(Square::number).collect();
        assert_eq!(landings, vec![23, 12]);
        assert_eq!(mv.intermediate_squares(), squares(&[18, 23, 28]));
    }

    #[test]
    fn king_path_finds_the_turning_landing() {
        let king = Piece::new(Player::White, PieceKind::King, sq(46));
        let first = Piece::new(Player::Black, PieceKind::Man, sq(37));
        let second = Piece::new(Player::Black, PieceKind::Man, sq(22));
        let position = Position::from_pieces(Player::White, &[king, first, second]).unwrap();
        let mv = DraughtsMove::new(position.placement(), king, sq(17), vec![first, second]);

        let hops = mv.path().hops();
        assert_eq!(hops.len(), 2);
        assert_eq!(hops[0].landing, sq(28));
        assert_eq!(hops[1].direction, Direction::NorthWest);
        assert_eq!(mv.relevant_squares(), squares(&[17, 22, 28, 32, 37, 41, 46]));
    }

    #[test]
    #[should_panic(expected = "no consistent route")]
    fn inconsistent_capture_order_is_a_defect() {
        let man = Piece::new(Player::White, PieceKind::Man, sq(32));
        let far = Piece::new(Player::Black, PieceKind::Man, sq(12));
        let position = Position::from_pieces(Player::White, &[man, far]).unwrap();
        let mv = DraughtsMove::new(position.placement(), man, sq(23), vec![far]);
        let _ = mv.path();
    }

    #[test]
    fn swapped_capture_order_has_no_route() {
        let man = Piece::new(Player::White, PieceKind::Man, sq(32));
        let near = Piece::new(Player::Black, PieceKind::Man, sq(28));
        let far = Piece::new(Player::Black, PieceKind::Man, sq(18));
        let position = Position::from_pieces(Player::White, &[man, near, far]).unwrap();

        let recorded = DraughtsMove::new(position.placement(), man, sq(12), vec![near, far]);
        assert!(try_reconstruct_path(&recorded).is_some());

        let swapped = DraughtsMove::new(position.placement(), man, sq(12), vec![far, near]);
        assert_eq!(swapped, recorded);
        assert!(try_reconstruct_path(&swapped).is_none());
    }
}
