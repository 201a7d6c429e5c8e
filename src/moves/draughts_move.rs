//! The move value type.
//!
//! A move records the piece that moves, where it ends up and the pieces it
//! captures in capture order, plus the placement it was generated from. Its
//! identity is the net change it makes: two moves are equal exactly when their
//! white, black and king diff bitboards agree, which is what de-duplicates
//! capture sequences found along different search paths.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::game_state::draughts_types::{Piece, Player};
use crate::game_state::position::{Placement, Position};
use crate::geometry::bitboard::Bitboard;
use crate::geometry::square::Square;
use crate::moves::move_path::{reconstruct_path, MovePath};

#[derive(Clone)]
pub struct DraughtsMove {
    origin: Placement,
    start: Piece,
    end: Piece,
    captures: Vec<Piece>,

    white_diff: Bitboard,
    black_diff: Bitboard,
    kings_diff: Bitboard,

    path: OnceLock<MovePath>,
    essential_captures: OnceLock<Bitboard>,
}

impl DraughtsMove {
    /// Builds a move of `start` to `end_square` capturing `captures` in order.
    ///
    /// The move is not checked for legality; see [`Position::move_is_valid`].
    pub fn new(origin: &Placement, start: Piece, end_square: Square, captures: Vec<Piece>) -> Self {
        let end = start.arriving_at(end_square);

        let own_diff = Bitboard::from_square(start.square) ^ Bitboard::from_square(end.square);
        let captured: Bitboard = captures.iter().map(|piece| piece.square).collect();

        let mut kings_diff = captures
            .iter()
            .filter(|piece| piece.is_king())
            .map(|piece| piece.square)
            .collect::<Bitboard>();
        if start.is_king() {
            kings_diff ^= Bitboard::from_square(start.square);
        }
        if end.is_king() {
            kings_diff ^= Bitboard::from_square(end.square);
        }

        let (white_diff, black_diff) = match start.player {
            Player::White => (own_diff, captured),
            Player::Black => (captured, own_diff),
        };

        Self {
            origin: *origin,
            start,
            end,
            captures,
            white_diff,
            black_diff,
            kings_diff,
            path: OnceLock::new(),
            essential_captures: OnceLock::new(),
        }
    }

    /// Placement of the position this move was generated from.
    #[inline]
    pub fn origin(&self) -> &Placement {
        &self.origin
    }

    #[inline]
    pub fn start(&self) -> Piece {
        self.start
    }

    /// The moving piece after the move, crowned if it promoted.
    #[inline]
    pub fn end(&self) -> Piece {
        self.end
    }

    #[inline]
    pub fn start_square(&self) -> Square {
        self.start.square
    }

    #[inline]
    pub fn end_square(&self) -> Square {
        self.end.square
    }

    /// Captured pieces in the order they were jumped.
    #[inline]
    pub fn captures(&self) -> &[Piece] {
        &self.captures
    }

    #[inline]
    pub fn capture_count(&self) -> usize {
        self.captures.len()
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.end.kind != self.start.kind
    }

    pub fn captured_squares(&self) -> Bitboard {
        self.captures.iter().map(|piece| piece.square).collect()
    }

    /// White, black and king squares that change.
    #[inline]
    pub fn diffs(&self) -> (Bitboard, Bitboard, Bitboard) {
        (self.white_diff, self.black_diff, self.kings_diff)
    }

    /// Placement after the move: the origin's bitboards XOR the diffs.
    pub fn end_placement(&self) -> Placement {
        Placement {
            white: self.origin.white ^ self.white_diff,
            black: self.origin.black ^ self.black_diff,
            kings: self.origin.kings ^ self.kings_diff,
            side_to_move: self.origin.side_to_move.opposite(),
        }
    }

    /// Hop-by-hop route of the moving piece, reconstructed on first access.
    pub fn path(&self) -> &MovePath {
        self.path.get_or_init(|| reconstruct_path(self))
    }

    /// Squares passed over or landed on strictly between start and end.
    pub fn intermediate_squares(&self) -> Bitboard {
        self.path().intermediate_squares()
    }

    /// Every square the move touches: start, intermediates, captures and end.
    pub fn relevant_squares(&self) -> Bitboard {
        Bitboard::from_square(self.start.square)
            | self.intermediate_squares()
            | self.captured_squares()
            | Bitboard::from_square(self.end.square)
    }

    /// Captured squares that tell this move apart from other legal moves with
    /// the same start and end squares.
    pub fn essential_captures(&self) -> Bitboard {
        *self.essential_captures.get_or_init(|| {
            let origin = Position::from_placement(self.origin);
            essential_captures_among(self, origin.legal_moves())
        })
    }

    pub(crate) fn set_essential_captures(&self, essential: Bitboard) {
        let _ = self.essential_captures.set(essential);
    }
}

/// A captured square is essential when some sibling with the same start and
/// end squares does not capture it.
pub(crate) fn essential_captures_among(mv: &DraughtsMove, moves: &[DraughtsMove]) -> Bitboard {
    let captured = mv.captured_squares();
    moves
        .iter()
        .filter(|other| {
            other.start_square() == mv.start_square()
                && other.end_square() == mv.end_square()
                && *other != mv
        })
        .fold(Bitboard::EMPTY, |essential, sibling| {
            essential | (captured & !sibling.captured_squares())
        })
}

impl PartialEq for DraughtsMove {
    fn eq(&self, other: &Self) -> bool {
        self.diffs() == other.diffs()
    }
}

impl Eq for DraughtsMove {}

impl Hash for DraughtsMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.diffs().hash(state);
    }
}

impl fmt::Display for DraughtsMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

impl fmt::Debug for DraughtsMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraughtsMove")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("captures", &self.captures)
            .finish()
    }
}
