//! Bookkeeping shared by the man and king capture searches.

use crate::game_state::draughts_types::Piece;
use crate::game_state::position::Placement;
use crate::geometry::bitboard::Bitboard;
use crate::geometry::square::Square;
use crate::moves::draughts_move::DraughtsMove;

/// Board facts one capture search needs, fixed for the whole search.
pub(crate) struct CaptureContext<'a> {
    pub placement: &'a Placement,
    pub piece: Piece,
    /// Pieces of the opponent of the moving piece.
    pub enemies: Bitboard,
    /// Squares a capturing piece may cross or land on: the empty squares plus
    /// the square the piece itself left.
    pub open: Bitboard,
}

impl<'a> CaptureContext<'a> {
    pub fn new(placement: &'a Placement, piece: Piece) -> Self {
        Self {
            placement,
            piece,
            enemies: placement.pieces_of(piece.player.opposite()),
            open: placement.empty() | Bitboard::from_square(piece.square),
        }
    }

    /// Enemy piece on `square` that the current sequence may still capture.
    #[inline]
    pub fn capturable(&self, square: Square, captured: Bitboard) -> Option<Piece> {
        if self.enemies.contains(square) && !captured.contains(square) {
            self.placement.piece_at(square)
        } else {
            None
        }
    }
}

/// The longest capture sequences found so far for one piece.
pub(crate) struct CaptureSearch {
    best: usize,
    finished: Vec<(Square, Vec<Piece>)>,
}

impl CaptureSearch {
    pub fn new() -> Self {
        Self {
            best: 0,
            finished: Vec::new(),
        }
    }

    /// Records a sequence that cannot be extended further.
    pub fn record(&mut self, end: Square, captures: &[Piece]) {
        if captures.len() > self.best {
            self.best = captures.len();
            self.finished.clear();
        }
        if captures.len() == self.best && self.best > 0 {
            self.finished.push((end, captures.to_vec()));
        }
    }

    pub fn into_moves(self, context: &CaptureContext<'_>, out: &mut Vec<DraughtsMove>) {
        for (end, captures) in self.finished {
            out.push(DraughtsMove::new(context.placement, context.piece, end, captures));
        }
    }
}

/// Keeps the moves with the most captures and drops moves whose net effect
/// repeats an earlier one.
pub(crate) fn retain_maximal_captures(moves: &mut Vec<DraughtsMove>) {
    let Some(best) = moves.iter().map(DraughtsMove::capture_count).max() else {
        return;
    };
    let mut seen = std::collections::HashSet::with_capacity(moves.len());
    moves.retain(|mv| mv.capture_count() == best && seen.insert(mv.diffs()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::draughts_types::{PieceKind, Player};
    use crate::game_state::position::Position;

    fn sq(number: u8) -> Square {
        Square::from_number(number).unwrap()
    }

    #[test]
    fn shorter_sequences_are_discarded() {
        let man = Piece::new(Player::White, PieceKind::Man, sq(32));
        let a = Piece::new(Player::Black, PieceKind::Man, sq(28));
        let b = Piece::new(Player::Black, PieceKind::Man, sq(18));
        let position = Position::from_pieces(Player::White, &[man, a, b]).unwrap();
        let context = CaptureContext::new(position.placement(), man);

        let mut search = CaptureSearch::new();
        search.record(sq(23), &[a]);
        search.record(sq(12), &[a, b]);
        search.record(sq(23), &[a]);

        let mut out = Vec::new();
        search.into_moves(&context, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].end_square(), sq(12));
    }

    #[test]
    fn context_opens_the_origin() {
        let man = Piece::new(Player::Black, PieceKind::Man, sq(19));
        let position = Position::from_pieces(Player::White, &[man]).unwrap();
        let context = CaptureContext::new(position.placement(), man);
        assert!(context.open.contains(sq(19)));
        assert!(context.enemies.is_empty());
    }
}
