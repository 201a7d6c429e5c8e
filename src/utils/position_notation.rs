//! Position notation parser and generator.
//!
//! The layout is `"{side}:W{list}:B{list}"` where a list is comma separated
//! square numbers, a `K` prefix marks a king and `a-b` spans a range of men
//! (or kings, when prefixed). The start position reads `"W:W31-50:B1-20"`.

use crate::game_state::draughts_types::{Piece, PieceKind, Player};
use crate::game_state::position::{Position, PositionError};
use crate::geometry::square::Square;

/// Reasons notation text cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum NotationError {
    /// Position text does not have the `side:W...:B...` shape.
    #[display("Malformed position notation: {}", _0)]
    MalformedPosition(String),

    /// A square token is not a number in 1..=50.
    #[display("Invalid square '{}'", _0)]
    InvalidSquare(String),

    /// The pieces parse but cannot stand together.
    #[display("Invalid position: {}", _0)]
    InvalidPosition(PositionError),

    /// Move text does not have the `a-b` / `axb (over ...)` shape.
    #[display("Malformed move '{}'", _0)]
    InvalidMove(String),

    /// Move text fits more than one legal move.
    #[display("Move '{}' matches more than one legal move", _0)]
    AmbiguousMove(String),

    /// Move text fits no legal move.
    #[display("Move '{}' is not legal here", _0)]
    IllegalMove(String),
}

impl std::error::Error for NotationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotationError::InvalidPosition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PositionError> for NotationError {
    fn from(err: PositionError) -> Self {
        NotationError::InvalidPosition(err)
    }
}

pub fn parse_position(text: &str) -> Result<Position, NotationError> {
    let text = text.trim();
    let malformed = || NotationError::MalformedPosition(text.to_owned());

    let mut fields = text.split(':');
    let side_part = fields.next().ok_or_else(malformed)?;
    let white_part = fields.next().ok_or_else(malformed)?;
    let black_part = fields.next().ok_or_else(malformed)?;
    if fields.next().is_some() {
        return Err(malformed());
    }

    let side_to_move = parse_side(side_part.trim()).ok_or_else(malformed)?;
    let white_list = white_part.trim().strip_prefix('W').ok_or_else(malformed)?;
    let black_list = black_part.trim().strip_prefix('B').ok_or_else(malformed)?;

    let mut pieces = Vec::new();
    parse_piece_list(white_list, Player::White, &mut pieces)?;
    parse_piece_list(black_list, Player::Black, &mut pieces)?;

    Ok(Position::from_pieces(side_to_move, &pieces)?)
}

fn parse_side(side: &str) -> Option<Player> {
    match side {
        "W" => Some(Player::White),
        "B" => Some(Player::Black),
        _ => None,
    }
}

fn parse_piece_list(list: &str, player: Player, pieces: &mut Vec<Piece>) -> Result<(), NotationError> {
    for token in list.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        let (kind, body) = match token.strip_prefix('K') {
            Some(rest) => (PieceKind::King, rest),
            None => (PieceKind::Man, token),
        };

        let (first, last) = match body.split_once('-') {
            Some((first, last)) => (parse_square(first)?, parse_square(last)?),
            None => {
                let square = parse_square(body)?;
                (square, square)
            }
        };
        if first > last {
            return Err(NotationError::InvalidSquare(token.to_owned()));
        }

        for number in first.number()..=last.number() {
            if let Some(square) = Square::from_number(number) {
                pieces.push(Piece::new(player, kind, square));
            }
        }
    }
    Ok(())
}

fn parse_square(token: &str) -> Result<Square, NotationError> {
    token
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Square::from_number)
        .ok_or_else(|| NotationError::InvalidSquare(token.trim().to_owned()))
}

pub fn generate_position(position: &Position) -> String {
    let side = match position.side_to_move() {
        Player::White => 'W',
        Player::Black => 'B',
    };
    format!(
        "{}:W{}:B{}",
        side,
        generate_piece_list(position, Player::White),
        generate_piece_list(position, Player::Black)
    )
}

/// Men on consecutive squares collapse into `a-b` runs; kings are listed one by one.
fn generate_piece_list(position: &Position, player: Player) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let mut run: Option<(u8, u8)> = None;

    for piece in position.pieces().filter(|piece| piece.player == player) {
        let number = piece.square.number();
        if piece.is_king() {
            flush_run(&mut run, &mut tokens);
            tokens.push(format!("K{number}"));
            continue;
        }
        run = match run {
            Some((first, last)) if last + 1 == number => Some((first, number)),
            _ => {
                flush_run(&mut run, &mut tokens);
                Some((number, number))
            }
        };
    }
    flush_run(&mut run, &mut tokens);

    tokens.join(",")
}

fn flush_run(run: &mut Option<(u8, u8)>, tokens: &mut Vec<String>) {
    match run.take() {
        Some((first, last)) if first == last => tokens.push(first.to_string()),
        Some((first, last)) => tokens.push(format!("{first}-{last}")),
        None => {}
    }
}
