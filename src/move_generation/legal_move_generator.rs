//! Full legal move generation pipeline.
//!
//! Collects the longest capture sequences of every piece of the side to move,
//! keeps those tied at the global maximum and de-duplicates them by net
//! effect. Only when nothing can be captured are slides generated.

use tracing::{debug, instrument};

use crate::game_state::position::Position;
use crate::geometry::bitboard::Bitboard;
use crate::move_generation::legal_move_shared::retain_maximal_captures;
use crate::move_generation::legal_moves_king::{generate_king_captures, generate_king_slides};
use crate::move_generation::legal_moves_man::{generate_man_captures, generate_man_slides};
use crate::moves::draughts_move::{essential_captures_among, DraughtsMove};

#[instrument(level = "trace", skip_all, fields(side = ?position.side_to_move()))]
pub fn generate_legal_moves(position: &Position) -> Vec<DraughtsMove> {
    let placement = position.placement();
    let own: Vec<_> = position
        .pieces()
        .filter(|piece| piece.player == position.side_to_move())
        .collect();

    let mut captures = Vec::new();
    for &piece in &own {
        if piece.is_king() {
            generate_king_captures(placement, piece, &mut captures);
        } else {
            generate_man_captures(placement, piece, &mut captures);
        }
    }

    if !captures.is_empty() {
        retain_maximal_captures(&mut captures);
        for mv in &captures {
            mv.set_essential_captures(essential_captures_among(mv, &captures));
        }
        debug!(
            count = captures.len(),
            captured = captures[0].capture_count(),
            "capture is mandatory"
        );
        return captures;
    }

    let mut slides = Vec::with_capacity(own.len() * 2);
    for &piece in &own {
        if piece.is_king() {
            generate_king_slides(placement, piece, &mut slides);
        } else {
            generate_man_slides(placement, piece, &mut slides);
        }
    }
    for mv in &slides {
        mv.set_essential_captures(Bitboard::EMPTY);
    }

    debug!(count = slides.len(), "generated slides");
    slides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::draughts_types::{Piece, PieceKind, Player};
    use crate::geometry::square::Square;
    use crate::utils::position_notation::parse_position;
    use crate::utils::random_game::random_game;

    fn sq(number: u8) -> Square {
        Square::from_number(number).unwrap()
    }

    fn notations(moves: &[DraughtsMove]) -> Vec<String> {
        let mut out: Vec<String> = moves.iter().map(DraughtsMove::notation).collect();
        out.sort();
        out
    }

    /// Most pieces any single piece of the side to move can capture, searched
    /// piece by piece without the side-wide filter.
    fn best_capture_count(position: &Position) -> usize {
        let mut best = 0;
        for piece in position.pieces().filter(|piece| piece.player == position.side_to_move()) {
            let mut out = Vec::new();
            if piece.is_king() {
                generate_king_captures(position.placement(), piece, &mut out);
            } else {
                generate_man_captures(position.placement(), piece, &mut out);
            }
            best = out.iter().map(DraughtsMove::capture_count).fold(best, usize::max);
        }
        best
    }

    #[test]
    fn opening_moves() {
        let start = Position::initial();
        assert_eq!(
            notations(start.legal_moves()),
            vec!["31-26", "31-27", "32-27", "32-28", "33-28", "33-29", "34-29", "34-30", "35-30"]
        );
    }

    #[test]
    fn every_opening_move_leaves_nine_replies() {
        let start = Position::initial();
        for mv in start.legal_moves() {
            let reply = start.play(mv);
            assert_eq!(reply.side_to_move(), Player::Black);
            assert_eq!(reply.legal_moves().len(), 9, "after {mv}");
        }
    }

    #[test]
    fn lone_king_on_33() {
        let position = parse_position("W:WK33:B").unwrap();
        assert_eq!(position.legal_moves().len(), 15);
    }

    #[test]
    fn king_captures_four_around_the_board() {
        let position = parse_position("W:WK26:B9,12,13,23,24").unwrap();
        let moves = position.legal_moves();
        assert_eq!(moves.len(), 1);

        let after = position.play(&moves[0]);
        assert_eq!(moves[0].end_square(), sq(18));
        assert_eq!(
            after.piece_at(sq(18)),
            Some(Piece::new(Player::White, PieceKind::King, sq(18)))
        );
        assert_eq!(after.black(), [sq(13)].into_iter().collect::<Bitboard>());
    }

    #[test]
    fn the_longest_capture_of_any_piece_wins() {
        // 33x24 takes one man, 37x17 takes two.
        let position = parse_position("W:W33,37:B29,32,22").unwrap();
        let moves = position.legal_moves();
        assert!(moves.iter().all(|mv| mv.capture_count() == 2));
        assert_eq!(notations(moves), vec!["37x17"]);
    }

    #[test]
    fn promotion_on_the_far_row() {
        let position = parse_position("W:W7:B").unwrap();
        for mv in position.legal_moves() {
            assert!(mv.is_promotion());
            assert!(position.play(mv).kings().contains(mv.end_square()));
        }

        let black = parse_position("B:W:B44").unwrap();
        assert!(black.legal_moves().iter().all(DraughtsMove::is_promotion));
    }

    #[test]
    fn no_pieces_no_moves() {
        let position = parse_position("W:W:B1").unwrap();
        assert!(position.legal_moves().is_empty());
    }

    #[test]
    fn every_legal_capture_is_maximal_in_random_games() {
        let starts = [
            Position::initial(),
            parse_position("W:WK46,K47,K48,33,34,35:BK3,K4,K5,16,17,18").unwrap(),
            parse_position("B:WK28,K37,K41,29,39:BK12,K22,K24,K30,19").unwrap(),
            parse_position("W:WK6,K45,K50,31,36:BK1,K23,K27,14,15").unwrap(),
        ];
        for start in starts {
            for seed in 0..8 {
                let game = random_game(start.clone(), seed, 120);
                for position in &game.positions {
                    let moves = position.legal_moves();
                    let Some(first) = moves.first() else {
                        continue;
                    };
                    let count = first.capture_count();
                    assert!(moves.iter().all(|mv| mv.capture_count() == count));
                    assert_eq!(count, best_capture_count(position), "{position:?}");
                    for (i, mv) in moves.iter().enumerate() {
                        assert!(moves[i + 1..].iter().all(|other| other != mv));
                        assert_eq!(mv.end_placement().side_to_move, position.side_to_move().opposite());
                    }
                }
            }
        }
    }
}
