//! Man moves: one step forward, or jumps over adjacent enemies.

use crate::game_state::draughts_types::Piece;
use crate::game_state::position::Placement;
use crate::geometry::bitboard::Bitboard;
use crate::geometry::direction::{neighbor, Direction, ALL_DIRECTIONS};
use crate::geometry::square::Square;
use crate::move_generation::legal_move_shared::{CaptureContext, CaptureSearch};
use crate::moves::draughts_move::DraughtsMove;

/// Pushes the longest capture sequences of `man`.
///
/// The first jump may go in any direction. After that a man only turns: each
/// continuation uses the left or right turn of the direction it arrived in.
pub fn generate_man_captures(placement: &Placement, man: Piece, out: &mut Vec<DraughtsMove>) {
    let context = CaptureContext::new(placement, man);
    let mut search = CaptureSearch::new();
    let mut captures = Vec::new();

    extend_man_captures(&context, man.square, None, Bitboard::EMPTY, &mut captures, &mut search);

    search.into_moves(&context, out);
}

fn extend_man_captures(
    context: &CaptureContext<'_>,
    from: Square,
    incoming: Option<Direction>,
    captured: Bitboard,
    captures: &mut Vec<Piece>,
    search: &mut CaptureSearch,
) {
    let turns;
    let directions: &[Direction] = match incoming {
        None => &ALL_DIRECTIONS,
        Some(direction) => {
            turns = [direction.left(), direction.right()];
            &turns
        }
    };

    let mut extended = false;
    for &direction in directions {
        let Some(over) = neighbor(from, direction) else {
            continue;
        };
        let Some(victim) = context.capturable(over, captured) else {
            continue;
        };
        let Some(landing) = neighbor(over, direction) else {
            continue;
        };
        if !context.open.contains(landing) {
            continue;
        }

        extended = true;
        captures.push(victim);
        extend_man_captures(
            context,
            landing,
            Some(direction),
            captured | Bitboard::from_square(over),
            captures,
            search,
        );
        captures.pop();
    }

    if !extended {
        search.record(from, captures);
    }
}

/// Pushes the one-step forward moves of `man`.
pub fn generate_man_slides(placement: &Placement, man: Piece, out: &mut Vec<DraughtsMove>) {
    let empty = placement.empty();
    for direction in Direction::forward(man.player) {
        if let Some(target) = neighbor(man.square, direction) {
            if empty.contains(target) {
                out.push(DraughtsMove::new(placement, man, target, Vec::new()));
            }
        }
    }
}
