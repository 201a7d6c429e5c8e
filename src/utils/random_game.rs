//! Seeded random playouts.
//!
//! Plays uniformly random legal moves from a position, reproducibly for a
//! given seed. Used by property tests and benchmarks to reach positions a
//! hand-written fixture would not.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::game_state::position::Position;
use crate::moves::draughts_move::DraughtsMove;

/// A played line: `positions[i]` is the position before `moves[i]`, and the
/// last position is the one after the final move.
#[derive(Debug, Clone)]
pub struct RandomGame {
    pub positions: Vec<Position>,
    pub moves: Vec<DraughtsMove>,
}

impl RandomGame {
    pub fn final_position(&self) -> &Position {
        // `positions` always holds at least the starting position.
        &self.positions[self.positions.len() - 1]
    }
}

/// Plays at most `max_plies` random moves from `start`, stopping early when
/// the side to move has no legal move.
pub fn random_game(start: Position, seed: u64, max_plies: usize) -> RandomGame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = vec![start];
    let mut moves = Vec::new();

    while moves.len() < max_plies {
        let current = &positions[positions.len() - 1];
        let Some(mv) = current.legal_moves().choose(&mut rng).cloned() else {
            break;
        };
        let next = current.play(&mv);
        moves.push(mv);
        positions.push(next);
    }

    debug!(seed, plies = moves.len(), "random game finished");
    RandomGame { positions, moves }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_line() {
        let first = random_game(Position::initial(), 7, 40);
        let second = random_game(Position::initial(), 7, 40);
        assert_eq!(first.moves, second.moves);
        assert_eq!(first.positions.len(), first.moves.len() + 1);
    }

    #[test]
    fn every_move_is_legal_where_it_was_played() {
        let game = random_game(Position::initial(), 11, 60);
        for (position, mv) in game.positions.iter().zip(&game.moves) {
            assert!(position.move_is_valid(mv));
        }
    }

    #[test]
    fn zero_plies_keeps_the_start() {
        let game = random_game(Position::initial(), 3, 0);
        assert!(game.moves.is_empty());
        assert_eq!(game.final_position(), &Position::initial());
    }
}
