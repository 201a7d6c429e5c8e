//! Core piece vocabulary shared by every subsystem.

use std::fmt;

use crate::geometry::square::Square;

/// Side to move. White starts on 31..=50 and moves toward square 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    White,
    Black,
}

impl Player {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Man,
    King,
}

/// A piece standing on a square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    pub player: Player,
    pub kind: PieceKind,
    pub square: Square,
}

impl Piece {
    #[inline]
    pub const fn new(player: Player, kind: PieceKind, square: Square) -> Self {
        Self {
            player,
            kind,
            square,
        }
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Same piece relocated; a man arriving on its promotion row is crowned.
    pub const fn arriving_at(&self, square: Square) -> Piece {
        let kind = match self.kind {
            PieceKind::Man if square.is_on_promotion_row(self.player) => PieceKind::King,
            kind => kind,
        };
        Piece::new(self.player, kind, square)
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let player = match self.player {
            Player::White => 'W',
            Player::Black => 'B',
        };
        let kind = match self.kind {
            PieceKind::Man => "",
            PieceKind::King => "K",
        };
        write!(f, "{player}{kind}{}", self.square.number())
    }
}
