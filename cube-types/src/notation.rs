//! Move notation parsing.
//!
//! Accepted tokens are a face letter (`U D F B L R`) optionally followed by a
//! single modifier: `'` for counter-clockwise or `2` for a half turn.
//! Sequences are whitespace separated.

use crate::{Amount, CubeError, Direction, Face, Move};

/// Parse a single notation token.
///
/// Fails with [`CubeError::InvalidMoveToken`] (position 0) for an empty
/// token, an unknown face letter or anything other than exactly one optional
/// modifier.
pub fn parse_move(token: &str) -> Result<Move, CubeError> {
    parse_at(token, 0)
}

/// Parse a whitespace separated sequence of tokens.
///
/// Runs of whitespace are collapsed, so leading, trailing or repeated spaces
/// are harmless. Fails on the first invalid token, reporting its 0-based
/// position among the tokens.
pub fn parse_sequence(text: &str) -> Result<Vec<Move>, CubeError> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| parse_at(token, position))
        .collect()
}

/// Render moves as a single space separated string.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The sequence that undoes `moves`: reversed, with every move inverted.
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(Move::inverse).collect()
}

fn parse_at(token: &str, position: usize) -> Result<Move, CubeError> {
    let invalid = || CubeError::InvalidMoveToken {
        token: token.to_string(),
        position,
    };

    let mut chars = token.chars();
    let face = chars.next().and_then(Face::from_letter).ok_or_else(invalid)?;

    let (amount, direction) = match (chars.next(), chars.next()) {
        (None, _) => (Amount::Quarter, Direction::Clockwise),
        (Some('\''), None) => (Amount::Quarter, Direction::CounterClockwise),
        (Some('2'), None) => (Amount::Half, Direction::Clockwise),
        _ => return Err(invalid()),
    };

    Ok(Move::new(face, amount, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_plain_prime_and_double() {
        assert_eq!(parse_move("R").unwrap(), Move::cw(Face::R));
        assert_eq!(parse_move("R'").unwrap(), Move::ccw(Face::R));
        assert_eq!(parse_move("R2").unwrap(), Move::half(Face::R));
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["", "X", "r", "R''", "R2'", "R'2", "R3", "RU", "2", "'"] {
            let err = parse_move(token).unwrap_err();
            assert_eq!(
                err,
                CubeError::InvalidMoveToken {
                    token: token.to_string(),
                    position: 0
                },
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn sequence_collapses_whitespace() {
        let moves = parse_sequence("  R U\tR'\n\n U'  ").unwrap();
        assert_eq!(
            moves,
            vec![
                Move::cw(Face::R),
                Move::cw(Face::U),
                Move::ccw(Face::R),
                Move::ccw(Face::U)
            ]
        );
    }

    #[test]
    fn empty_sequence_is_empty() {
        assert!(parse_sequence("").unwrap().is_empty());
        assert!(parse_sequence("   \n ").unwrap().is_empty());
    }

    #[test]
    fn sequence_reports_position_of_first_bad_token() {
        let err = parse_sequence("R U Q2 F X").unwrap_err();
        assert_eq!(
            err,
            CubeError::InvalidMoveToken {
                token: "Q2".into(),
                position: 2
            }
        );
    }

    #[test]
    fn format_and_invert() {
        let moves = parse_sequence("R U2 F'").unwrap();
        assert_eq!(format_sequence(&moves), "R U2 F'");
        assert_eq!(format_sequence(&invert_sequence(&moves)), "F U2 R'");
        assert_eq!(format_sequence(&[]), "");
    }

    fn any_move() -> impl Strategy<Value = Move> {
        (0..6usize, 0..3u8).prop_map(|(face, kind)| {
            let face = Face::ALL[face];
            match kind {
                0 => Move::cw(face),
                1 => Move::ccw(face),
                _ => Move::half(face),
            }
        })
    }

    proptest! {
        #[test]
        fn display_parse_roundtrip(moves in prop::collection::vec(any_move(), 0..40)) {
            let text = format_sequence(&moves);
            prop_assert_eq!(parse_sequence(&text).unwrap(), moves);
        }

        #[test]
        fn double_inversion_is_identity(moves in prop::collection::vec(any_move(), 0..40)) {
            prop_assert_eq!(invert_sequence(&invert_sequence(&moves)), moves);
        }
    }
}
