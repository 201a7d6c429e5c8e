//! Piece traces: which physical piece ended up where over a played line.

use std::collections::{HashMap, HashSet};

use crate::game_state::draughts_types::Piece;
use crate::moves::draughts_move::DraughtsMove;
use crate::trace::trace::Trace;

impl Trace<Piece> {
    /// The moving piece goes from its start to its (possibly crowned) end and
    /// every captured piece disappears.
    pub fn of_move(mv: &DraughtsMove) -> Self {
        let mut builder = Trace::builder();
        builder.moved(mv.start(), mv.end());
        for &captured in mv.captures() {
            builder.removed(captured);
        }
        builder.build()
    }
}

/// Trace of a whole line of consecutive moves, computed in one pass.
///
/// Each piece on the board is followed back to the piece it was at the start
/// of the line. Equal to folding [`Trace::of_move`] with
/// [`Trace::followed_by`].
pub fn trace_line<'a>(moves: impl IntoIterator<Item = &'a DraughtsMove>) -> Trace<Piece> {
    // Current piece -> the piece it was before the first move.
    let mut origin_of: HashMap<Piece, Piece> = HashMap::new();
    let mut lost: HashSet<Piece> = HashSet::new();

    for mv in moves {
        let start = mv.start();
        let original = origin_of.remove(&start).unwrap_or(start);
        for captured in mv.captures() {
            lost.insert(origin_of.remove(captured).unwrap_or(*captured));
        }
        origin_of.insert(mv.end(), original);
    }

    let mut builder = Trace::builder();
    for (current, original) in origin_of {
        builder.moved(original, current);
    }
    for original in lost {
        builder.removed(original);
    }
    builder.build()
}
