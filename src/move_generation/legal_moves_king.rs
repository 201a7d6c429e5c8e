//! King moves: flying slides and long-range captures.

use crate::game_state::draughts_types::Piece;
use crate::game_state::position::Placement;
use crate::geometry::bitboard::Bitboard;
use crate::geometry::direction::{squares_to, Direction, ALL_DIRECTIONS};
use crate::geometry::square::Square;
use crate::move_generation::legal_move_shared::{CaptureContext, CaptureSearch};
use crate::moves::draughts_move::DraughtsMove;

/// Pushes the longest capture sequences of `king`.
///
/// A king scans a diagonal up to the first occupied square. When that square
/// holds an enemy not yet taken, every open square beyond it up to the next
/// obstacle is a landing. Taken pieces stay on the board until the move is
/// over, so they block later scans.
pub fn generate_king_captures(placement: &Placement, king: Piece, out: &mut Vec<DraughtsMove>) {
    let context = CaptureContext::new(placement, king);
    let mut search = CaptureSearch::new();
    let mut captures = Vec::new();

    extend_king_captures(&context, king.square, None, Bitboard::EMPTY, &mut captures, &mut search);

    search.into_moves(&context, out);
}

/// `incoming` carries the direction of the last jump and whether `from` was the
/// first landing square past the captured piece.
fn extend_king_captures(
    context: &CaptureContext<'_>,
    from: Square,
    incoming: Option<(Direction, bool)>,
    captured: Bitboard,
    captures: &mut Vec<Piece>,
    search: &mut CaptureSearch,
) {
    let mut directions = Vec::with_capacity(4);
    match incoming {
        None => directions.extend(ALL_DIRECTIONS),
        Some((direction, first_landing)) => {
            directions.push(direction.left());
            directions.push(direction.right());
            // Further along the same line is only new ground from the first landing.
            if first_landing {
                directions.push(direction);
            }
        }
    }

    let mut extended = false;
    for direction in directions {
        let mut ray = squares_to(from, direction).skip_while(|&square| context.open.contains(square));
        let Some(over) = ray.next() else {
            continue;
        };
        let Some(victim) = context.capturable(over, captured) else {
            continue;
        };

        let after = captured | Bitboard::from_square(over);
        for (step, landing) in ray.take_while(|&square| context.open.contains(square)).enumerate() {
            extended = true;
            captures.push(victim);
            extend_king_captures(context, landing, Some((direction, step == 0)), after, captures, search);
            captures.pop();
        }
    }

    if !extended {
        search.record(from, captures);
    }
}

/// Pushes every slide of `king` along the four diagonals up to the first obstacle.
pub fn generate_king_slides(placement: &Placement, king: Piece, out: &mut Vec<DraughtsMove>) {
    let empty = placement.empty();
    for direction in ALL_DIRECTIONS {
        for target in squares_to(king.square, direction).take_while(|&square| empty.contains(square)) {
            out.push(DraughtsMove::new(placement, king, target, Vec::new()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::draughts_types::{PieceKind, Player};
    use crate::game_state::position::Position;

    fn sq(number: u8) -> Square {
        Square::from_number(number).unwrap()
    }

    fn position(king: u8, black_men: &[u8]) -> (Position, Piece) {
        let king = Piece::new(Player::White, PieceKind::King, sq(king));
        let mut pieces = vec![king];
        pieces.extend(
            black_men
                .iter()
                .map(|&n| Piece::new(Player::Black, PieceKind::Man, sq(n))),
        );
        (Position::from_pieces(Player::White, &pieces).unwrap(), king)
    }

    #[test]
    fn lone_king_in_the_centre_has_fifteen_slides() {
        let (position, king) = position(33, &[]);
        let mut out = Vec::new();
        generate_king_slides(position.placement(), king, &mut out);
        assert_eq!(out.len(), 15);
    }

    #[test]
    fn every_square_beyond_the_victim_is_a_landing() {
        let (position, king) = position(46, &[37]);
        let mut out = Vec::new();
        generate_king_captures(position.placement(), king, &mut out);
        let mut ends: Vec<u8> = out.iter().map(|mv| mv.end_square().number()).collect();
        ends.sort();
        assert_eq!(ends, vec![5, 10, 14, 19, 23, 28, 32]);
    }

    #[test]
    fn the_first_landing_must_be_open() {
        // 37 is backed by 32, so 46 cannot capture along that line.
        let (position, king) = position(46, &[37, 32]);
        let mut out = Vec::new();
        generate_king_captures(position.placement(), king, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn straight_on_after_the_first_landing() {
        // Only the longer 46x37x14 sequences survive, landing on 10 or 5.
        let (position, king) = position(46, &[37, 14]);
        let mut out = Vec::new();
        generate_king_captures(position.placement(), king, &mut out);
        let mut ends: Vec<u8> = out.iter().map(|mv| mv.end_square().number()).collect();
        ends.sort();
        assert_eq!(ends, vec![5, 10]);
        assert!(out.iter().all(|mv| mv.capture_count() == 2));
    }

    #[test]
    fn captured_pieces_block_later_scans() {
        let (position, king) = position(26, &[9, 12, 13, 23, 24]);
        let mut out = Vec::new();
        generate_king_captures(position.placement(), king, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].end_square(), sq(18));
        assert_eq!(out[0].capture_count(), 4);
    }
}
