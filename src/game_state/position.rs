//! Immutable board snapshot.
//!
//! `Position` is the central model of the crate. It stores the white, black
//! and king bitboards plus the side to move, and lazily caches its own legal
//! moves. Equality and hashing only look at the placement, never the cache.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use tracing::{debug, instrument};

use crate::game_state::draughts_rules::{BLACK_START, WHITE_START};
use crate::game_state::draughts_types::{Piece, PieceKind, Player};
use crate::geometry::bitboard::Bitboard;
use crate::geometry::square::Square;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::draughts_move::DraughtsMove;
use crate::moves::move_path::try_reconstruct_path;
use crate::utils::position_notation::generate_position;
use crate::utils::render_position::render_position;

/// Reasons an explicit piece list cannot form a position.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PositionError {
    /// Two pieces were placed on the same square.
    #[display("Square {} holds more than one piece", _0)]
    SquareOccupiedTwice(Square),

    /// A man was placed on the row where it would already be crowned.
    #[display("Man on square {} stands on its own promotion row", _0)]
    ManOnPromotionRow(Square),
}

impl std::error::Error for PositionError {}

/// The bare piece placement and side to move.
///
/// This is the `Copy` part of a [`Position`]; moves keep one as the record of
/// the position they were generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub white: Bitboard,
    pub black: Bitboard,
    pub kings: Bitboard,
    pub side_to_move: Player,
}

impl Placement {
    #[inline]
    pub fn pieces_of(&self, player: Player) -> Bitboard {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.white | self.black
    }

    #[inline]
    pub fn empty(&self) -> Bitboard {
        !self.occupied()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let player = if self.white.contains(square) {
            Player::White
        } else if self.black.contains(square) {
            Player::Black
        } else {
            return None;
        };
        let kind = if self.kings.contains(square) {
            PieceKind::King
        } else {
            PieceKind::Man
        };
        Some(Piece::new(player, kind, square))
    }
}

#[derive(Clone)]
pub struct Position {
    placement: Placement,
    legal_moves: OnceLock<Vec<DraughtsMove>>,
}

impl Position {
    /// Standard layout, white to move.
    pub fn initial() -> Self {
        Self::initial_with(Player::White)
    }

    /// Standard layout with `first` to move.
    pub fn initial_with(first: Player) -> Self {
        Self::from_placement(Placement {
            white: Bitboard::from_bits(WHITE_START),
            black: Bitboard::from_bits(BLACK_START),
            kings: Bitboard::EMPTY,
            side_to_move: first,
        })
    }

    /// Builds a position from an explicit piece list.
    pub fn from_pieces(side_to_move: Player, pieces: &[Piece]) -> Result<Self, PositionError> {
        let mut placement = Placement {
            white: Bitboard::EMPTY,
            black: Bitboard::EMPTY,
            kings: Bitboard::EMPTY,
            side_to_move,
        };

        for piece in pieces {
            if placement.occupied().contains(piece.square) {
                return Err(PositionError::SquareOccupiedTwice(piece.square));
            }
            match piece.kind {
                PieceKind::Man if piece.square.is_on_promotion_row(piece.player) => {
                    return Err(PositionError::ManOnPromotionRow(piece.square));
                }
                PieceKind::Man => {}
                PieceKind::King => placement.kings.insert(piece.square),
            }
            match piece.player {
                Player::White => placement.white.insert(piece.square),
                Player::Black => placement.black.insert(piece.square),
            }
        }

        Ok(Self::from_placement(placement))
    }

    #[inline]
    pub fn from_placement(placement: Placement) -> Self {
        Self {
            placement,
            legal_moves: OnceLock::new(),
        }
    }

    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[inline]
    pub fn side_to_move(&self) -> Player {
        self.placement.side_to_move
    }

    #[inline]
    pub fn white(&self) -> Bitboard {
        self.placement.white
    }

    #[inline]
    pub fn black(&self) -> Bitboard {
        self.placement.black
    }

    #[inline]
    pub fn kings(&self) -> Bitboard {
        self.placement.kings
    }

    #[inline]
    pub fn pieces_of(&self, player: Player) -> Bitboard {
        self.placement.pieces_of(player)
    }

    #[inline]
    pub fn empty(&self) -> Bitboard {
        self.placement.empty()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.placement.piece_at(square)
    }

    /// Every piece on the board in ascending square order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.placement
            .occupied()
            .iter()
            .filter_map(|square| self.placement.piece_at(square))
    }

    /// Legal moves for the side to move, generated on first access.
    pub fn legal_moves(&self) -> &[DraughtsMove] {
        self.legal_moves.get_or_init(|| generate_legal_moves(self))
    }

    /// True when `mv` belongs to this position, matches one of its legal moves
    /// and moves the same piece along a route the board allows.
    pub fn move_is_valid(&self, mv: &DraughtsMove) -> bool {
        mv.origin() == &self.placement
            && self
                .legal_moves()
                .iter()
                .any(|legal| legal == mv && legal.start() == mv.start())
            && try_reconstruct_path(mv).is_some()
    }

    /// Position after `mv`.
    ///
    /// # Panics
    /// When `mv` was not generated from this position.
    #[instrument(level = "trace", skip_all, fields(mv = %mv))]
    pub fn play(&self, mv: &DraughtsMove) -> Position {
        assert!(
            mv.origin() == &self.placement,
            "move {mv} does not belong to position {self:?}"
        );
        let next = Position::from_placement(mv.end_placement());
        debug!(position = ?next, "played move");
        next
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.placement == other.placement
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.placement.hash(state);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl From<Placement> for Position {
    fn from(placement: Placement) -> Self {
        Self::from_placement(placement)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", generate_position(self))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_position(self))
    }
}
