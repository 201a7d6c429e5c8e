use std::thread;

use tracing::{debug, instrument};

use crate::game_state::position::Position;
use crate::moves::draughts_move::DraughtsMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    /// Captured pieces summed over all leaf moves.
    pub pieces_captured: usize,
    pub promotions: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.pieces_captured += rhs.pieces_captured;
        self.promotions += rhs.promotions;
    }

    fn count_leaf(&mut self, mv: &DraughtsMove) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
            self.pieces_captured += mv.capture_count();
        }
        if mv.is_promotion() {
            self.promotions += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PerftError {
    #[display("perft worker thread panicked")]
    WorkerPanicked,
}

impl std::error::Error for PerftError {}

pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    perft_single_thread(position, depth)
}

#[instrument(level = "debug", skip(position))]
pub fn perft_single_thread(position: &Position, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }

    perft_recurse(position, depth, &mut total);
    debug!(nodes = total.nodes, "perft finished");
    total
}

/// Splits the root moves over `threads` workers, each counting its share of
/// the tree on its own thread.
#[instrument(level = "debug", skip(position))]
pub fn perft_multi_threaded(position: &Position, depth: u8, threads: usize) -> Result<PerftCounts, PerftError> {
    if depth <= 1 {
        return Ok(perft_single_thread(position, depth));
    }

    let workers = threads.max(1);
    let mut shares: Vec<Vec<Position>> = vec![Vec::new(); workers];
    for (i, mv) in position.legal_moves().iter().enumerate() {
        shares[i % workers].push(position.play(mv));
    }

    let mut handles = Vec::with_capacity(workers);
    for share in shares.into_iter().filter(|share| !share.is_empty()) {
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            for child in &share {
                perft_recurse(child, depth - 1, &mut local);
            }
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle.join().map_err(|_| PerftError::WorkerPanicked)?;
        total.merge(local);
    }

    debug!(nodes = total.nodes, "perft finished");
    Ok(total)
}

fn perft_recurse(position: &Position, depth: u8, counts: &mut PerftCounts) {
    let moves = position.legal_moves();
    if depth == 1 {
        for mv in moves {
            counts.count_leaf(mv);
        }
        return;
    }

    for mv in moves {
        perft_recurse(&position.play(mv), depth - 1, counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::position_notation::parse_position;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&Position::initial(), 0);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_from_the_start() {
        let start = Position::initial();
        let nodes: Vec<usize> = (1..=3).map(|depth| perft(&start, depth).nodes).collect();
        assert_eq!(nodes, vec![9, 81, 658]);
    }

    #[test]
    fn perft_with_kings_on_the_board() {
        let position = parse_position("W:WK46,28,33,38:BK5,12,17,19,23").unwrap();
        let nodes: Vec<usize> = (1..=3).map(|depth| perft(&position, depth).nodes).collect();
        assert_eq!(nodes, vec![6, 18, 58]);
    }

    #[test]
    fn multi_threaded_matches_single_thread() {
        let start = Position::initial();
        let single = perft_single_thread(&start, 4);
        assert_eq!(single.nodes, 4265);
        for threads in [1, 3, 16] {
            assert_eq!(perft_multi_threaded(&start, 4, threads), Ok(single));
        }
    }

    #[test]
    fn leaf_metrics() {
        let position = parse_position("W:W7,33,37:B29,32,22").unwrap();
        let counts = perft(&position, 1);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                captures: 1,
                pieces_captured: 2,
                promotions: 0,
            }
        );

        let crowning = parse_position("W:W7:B").unwrap();
        let counts = perft(&crowning, 1);
        assert_eq!(counts.nodes, 2);
        assert_eq!(counts.promotions, 2);
    }
}
