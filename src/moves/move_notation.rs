//! Move notation: writing `32-28` / `26x18`, disambiguating with the captured
//! squares that matter, and resolving text back to a legal move.

use crate::game_state::position::Position;
use crate::geometry::bitboard::Bitboard;
use crate::geometry::square::Square;
use crate::moves::draughts_move::DraughtsMove;
use crate::utils::position_notation::NotationError;

impl DraughtsMove {
    /// `"{start}-{end}"` for slides, `"{start}x{end}"` for captures.
    pub fn notation(&self) -> String {
        let separator = if self.is_capture() { 'x' } else { '-' };
        format!(
            "{}{}{}",
            self.start_square().number(),
            separator,
            self.end_square().number()
        )
    }

    /// Plain notation followed by `" (over a, b and c)"` when other legal
    /// moves share the start and end squares.
    pub fn unambiguous_notation(&self) -> String {
        let essential = self.essential_captures();
        if essential.is_empty() {
            return self.notation();
        }
        format!("{} (over {})", self.notation(), square_list(essential))
    }
}

fn square_list(squares: Bitboard) -> String {
    let numbers: Vec<String> = squares.iter().map(|square| square.to_string()).collect();
    match numbers.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        None => String::new(),
    }
}

/// Resolves move text against `position`'s legal moves.
///
/// Accepts `a-b`, `axb` and either followed by `(over s1, s2 and s3)`. The
/// text must name exactly one legal move.
pub fn parse_move<'a>(position: &'a Position, text: &str) -> Result<&'a DraughtsMove, NotationError> {
    let text = text.trim();
    let (head, over) = match text.split_once('(') {
        Some((head, tail)) => {
            let inner = tail
                .strip_suffix(')')
                .ok_or_else(|| NotationError::InvalidMove(text.to_owned()))?;
            (head.trim(), Some(parse_over_list(inner, text)?))
        }
        None => (text, None),
    };

    let (start, is_capture, end) = parse_head(head).ok_or_else(|| NotationError::InvalidMove(text.to_owned()))?;

    let mut matches = position.legal_moves().iter().filter(|mv| {
        mv.start_square() == start
            && mv.end_square() == end
            && mv.is_capture() == is_capture
            && over.map_or(true, |over| {
                (mv.captured_squares() & over) == over
            })
    });

    match (matches.next(), matches.next()) {
        (Some(mv), None) => Ok(mv),
        (Some(_), Some(_)) => Err(NotationError::AmbiguousMove(text.to_owned())),
        (None, _) => Err(NotationError::IllegalMove(text.to_owned())),
    }
}

fn parse_head(head: &str) -> Option<(Square, bool, Square)> {
    let (separator_at, separator) = head.char_indices().find(|(_, ch)| *ch == '-' || *ch == 'x')?;
    let start = parse_square(&head[..separator_at])?;
    let end = parse_square(&head[separator_at + 1..])?;
    Some((start, separator == 'x', end))
}

fn parse_over_list(inner: &str, text: &str) -> Result<Bitboard, NotationError> {
    let inner = inner
        .trim()
        .strip_prefix("over")
        .ok_or_else(|| NotationError::InvalidMove(text.to_owned()))?;
    inner
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|token| !token.is_empty() && *token != "and")
        .map(|token| parse_square(token).ok_or_else(|| NotationError::InvalidMove(text.to_owned())))
        .collect()
}

fn parse_square(token: &str) -> Option<Square> {
    token.trim().parse::<u8>().ok().and_then(Square::from_number)
}
