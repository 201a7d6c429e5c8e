//! Incremental move selection by touching squares.
//!
//! A picker starts with every legal move as a candidate. Each square the user
//! touches narrows the candidates to moves that start on, pass over, capture
//! or land on it. Touching a required square again takes it back.

use tracing::{debug, instrument, trace};

use crate::game_state::position::Position;
use crate::geometry::bitboard::Bitboard;
use crate::geometry::square::Square;
use crate::moves::draughts_move::DraughtsMove;

/// Single-owner selection state over one position's legal moves.
#[derive(Debug, Clone)]
pub struct MovePicker<'a> {
    position: &'a Position,
    required: Bitboard,
    candidates: Vec<&'a DraughtsMove>,
}

impl<'a> MovePicker<'a> {
    pub fn new(position: &'a Position) -> Self {
        Self {
            position,
            required: Bitboard::EMPTY,
            candidates: position.legal_moves().iter().collect(),
        }
    }

    #[inline]
    pub fn position(&self) -> &'a Position {
        self.position
    }

    #[inline]
    pub fn required_squares(&self) -> Bitboard {
        self.required
    }

    #[inline]
    pub fn candidates(&self) -> &[&'a DraughtsMove] {
        &self.candidates
    }

    /// Adds or removes `square` from the required squares.
    ///
    /// Returns the chosen move when adding the square leaves exactly one
    /// candidate. Removing a square never chooses a move.
    #[instrument(level = "trace", skip_all, fields(square = %square))]
    pub fn toggle(&mut self, square: Square) -> Option<&'a DraughtsMove> {
        if self.required.contains(square) {
            let remaining = self.required.toggled(square);
            self.restore();
            // Filtering cannot be undone, so the narrowing starts over.
            for again in remaining {
                self.require(again);
            }
            debug!(required = ?self.required, candidates = self.candidates.len(), "square released");
            return None;
        }

        let chosen = self.require(square);
        debug!(required = ?self.required, candidates = self.candidates.len(), "square required");
        chosen
    }

    fn require(&mut self, square: Square) -> Option<&'a DraughtsMove> {
        let narrowed: Vec<&'a DraughtsMove> = self
            .candidates
            .iter()
            .copied()
            .filter(|mv| mv.relevant_squares().contains(square))
            .collect();

        if !narrowed.is_empty() {
            self.candidates = narrowed;
            self.required.insert(square);
            return self.sole_candidate();
        }

        let starting_here: Vec<&'a DraughtsMove> = self
            .position
            .legal_moves()
            .iter()
            .filter(|mv| mv.start_square() == square)
            .collect();
        if starting_here.is_empty() {
            trace!("no move touches the square, ignored");
            return None;
        }

        trace!(moves = starting_here.len(), "restarting from the square");
        self.candidates = starting_here;
        self.required = Bitboard::from_square(square);
        self.sole_candidate()
    }

    /// Back to every legal move and no required squares.
    pub fn restore(&mut self) {
        self.required = Bitboard::EMPTY;
        self.candidates = self.position.legal_moves().iter().collect();
    }

    fn sole_candidate(&self) -> Option<&'a DraughtsMove> {
        match self.candidates.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// The move the required squares pin down: the single remaining
    /// candidate, or else the only candidate whose relevant squares are exactly
    /// the required ones.
    pub fn only_candidate(&self) -> Option<&'a DraughtsMove> {
        if let Some(only) = self.sole_candidate() {
            return Some(only);
        }
        if self.required.is_empty() {
            return None;
        }
        unique(
            self.candidates
                .iter()
                .copied()
                .filter(|mv| mv.relevant_squares() == self.required),
        )
    }

    /// The only move from `from` to `to`, looked up among the candidates first
    /// and among all legal moves when the candidates give no unique answer.
    pub fn only_candidate_between(&self, from: Square, to: Square) -> Option<&'a DraughtsMove> {
        let between = |mv: &&'a DraughtsMove| mv.start_square() == from && mv.end_square() == to;
        unique(self.candidates.iter().copied().filter(between))
            .or_else(|| unique(self.position.legal_moves().iter().filter(between)))
    }
}

fn unique<'a>(mut moves: impl Iterator<Item = &'a DraughtsMove>) -> Option<&'a DraughtsMove> {
    match (moves.next(), moves.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}
