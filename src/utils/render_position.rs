//! Terminal-oriented board renderer.
//!
//! Draws the 10×10 board with square 1 at the top, light squares blank and
//! the playable dark squares marked, for debugging and diagnostics.

use crate::game_state::draughts_types::{PieceKind, Player};
use crate::game_state::position::Position;
use crate::geometry::square::Square;

/// Render the board to a string, one row per line, followed by the side to move.
///
/// White men are `w`, white kings `W`, black men `b`, black kings `B` and
/// empty playable squares `·`.
pub fn render_position(position: &Position) -> String {
    let mut out = String::new();

    for row in 0..10u8 {
        out.push_str(&format!("{:>2} ", row * 5 + 1));

        for column in 0..10u8 {
            // Dark squares sit on odd columns in even rows and even columns in odd rows.
            if (row + column) % 2 == 0 {
                out.push(' ');
            } else {
                let number = row * 5 + column / 2 + 1;
                let ch = Square::from_number(number)
                    .and_then(|square| position.piece_at(square))
                    .map_or('·', |piece| piece_char(piece.player, piece.kind));
                out.push(ch);
            }

            if column < 9 {
                out.push(' ');
            }
        }

        out.push('\n');
    }

    out.push_str(match position.side_to_move() {
        Player::White => "white to move",
        Player::Black => "black to move",
    });

    out
}

fn piece_char(player: Player, kind: PieceKind) -> char {
    match (player, kind) {
        (Player::White, PieceKind::Man) => 'w',
        (Player::White, PieceKind::King) => 'W',
        (Player::Black, PieceKind::Man) => 'b',
        (Player::Black, PieceKind::King) => 'B',
    }
}
