//! The immutable token record

use crate::utils::{Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed, positioned span of source text.
///
/// `seq` is unique and strictly increasing within a single lexer run; it is
/// allocated by the lexer state's sequence generator when the token's lexeme
/// buffer is opened, so emission order and id order always agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Name of the token type that resolved this payload
    pub type_name: String,
    /// Raw matched text (possibly empty)
    pub payload: String,
    /// Start/end positions of the payload, both inclusive
    pub span: Span,
    /// Sequence id unique per lexer run
    pub seq: u64,
}

impl Token {
    /// Create a new token
    pub fn new(type_name: &str, payload: String, span: Span, seq: u64) -> Self {
        Self {
            type_name: type_name.to_string(),
            payload,
            span,
            seq,
        }
    }

    /// Start position of the payload
    pub fn start(&self) -> Position {
        self.span.start
    }

    /// End position of the payload (last character, inclusive)
    pub fn end(&self) -> Position {
        self.span.end
    }

    /// Rows covered by this token
    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.span.rows()
    }

    /// Payload length in characters
    pub fn len(&self) -> usize {
        self.payload.chars().count()
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{} {:?} @ {}",
            self.type_name, self.seq, self.payload, self.span
        )
    }
}

/// Validate that a token list has strictly increasing sequence ids and
/// well-ordered spans. Returns a description of the first violation.
pub fn validate_sequence(tokens: &[Token]) -> Result<(), String> {
    for token in tokens {
        if !token.span.is_ordered() {
            return Err(format!(
                "token #{} has end {} before start {}",
                token.seq, token.span.end, token.span.start
            ));
        }
    }

    for window in tokens.windows(2) {
        if window[1].seq <= window[0].seq {
            return Err(format!(
                "sequence ids not strictly increasing: #{} followed by #{}",
                window[0].seq, window[1].seq
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(seq: u64, start: (u32, u32), end: (u32, u32)) -> Token {
        Token::new(
            "WORD",
            "ab".to_string(),
            Span::new(start.into(), end.into()),
            seq,
        )
    }

    #[test]
    fn test_token_accessors() {
        let tkn = token(3, (1, 0), (1, 1));
        assert_eq!(tkn.start(), Position::new(1, 0));
        assert_eq!(tkn.end(), Position::new(1, 1));
        assert_eq!(tkn.len(), 2);
        assert_eq!(tkn.rows().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_validate_sequence_accepts_increasing_ids() {
        let tokens = vec![token(0, (0, 0), (0, 1)), token(1, (0, 3), (0, 4))];
        assert!(validate_sequence(&tokens).is_ok());
    }

    #[test]
    fn test_validate_sequence_rejects_duplicate_ids() {
        let tokens = vec![token(2, (0, 0), (0, 1)), token(2, (0, 3), (0, 4))];
        assert!(validate_sequence(&tokens).is_err());
    }

    #[test]
    fn test_validate_sequence_rejects_inverted_span() {
        let tokens = vec![token(0, (1, 4), (0, 2))];
        assert!(validate_sequence(&tokens).is_err());
    }
}
