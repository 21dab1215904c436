//! The mutable lexer engine
//!
//! [`LexerState`] owns everything that changes during a scan: the cursor,
//! the pending-lexeme buffer, the trash channel, the emitted token list and
//! the snapshot history used for backtracking. It is single-owner and
//! single-writer for the duration of a scan; snapshots are value copies, so
//! mutating the live state never touches a backup and restoring never
//! touches state reachable from other backups.

use super::buffer::LexemeBuffer;
use super::cursor::Cursor;
use crate::catalog::ConflictError;
use crate::config::constants::compile_time::lexical::{
    MAX_BRANCH_HISTORY, MAX_SNAPSHOT_HISTORY,
};
use crate::preprocess::{LineBuffer, Lookahead};
use crate::tokens::Token;
use crate::utils::{Position, Span};

/// Lexical errors surfaced to the scan driver's caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexError {
    #[error("advance past end of input")]
    EndOfInput,

    #[error("restore of {requested} steps exceeds available history of {available}")]
    BacktrackRange { requested: usize, available: usize },

    #[error("unrecognized text '{text}' at line {row}, column {col}")]
    Unrecognized { text: String, row: u32, col: u32 },

    #[error("too many tokens: {count} (max {max})")]
    TooManyTokens { count: usize, max: usize },

    #[error("token payload too long at line {row}: {length} characters (max {max})")]
    PayloadTooLong { row: u32, length: usize, max: usize },

    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

impl LexError {
    pub fn error_code(&self) -> crate::logging::Code {
        use crate::logging::codes::{catalog, lexical};

        match self {
            LexError::EndOfInput => lexical::END_OF_INPUT,
            LexError::BacktrackRange { .. } => lexical::BACKTRACK_RANGE,
            LexError::Unrecognized { .. } => lexical::UNRECOGNIZED_TEXT,
            LexError::TooManyTokens { .. } => lexical::TOKEN_LIMIT,
            LexError::PayloadTooLong { .. } => lexical::PAYLOAD_LIMIT,
            LexError::Conflict(_) => catalog::AMBIGUOUS_MATCH,
        }
    }
}

/// Caps for the snapshot stack and the outer branch history.
#[derive(Debug, Clone, Copy)]
pub struct HistoryLimits {
    pub snapshot_cap: usize,
    pub branch_cap: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            snapshot_cap: MAX_SNAPSHOT_HISTORY,
            branch_cap: MAX_BRANCH_HISTORY,
        }
    }
}

/// A deep copy of everything restore must rewind.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    cursor: Cursor,
    buffer: LexemeBuffer,
    trash: Vec<String>,
    tokens: Vec<Token>,
    stage: usize,
    next_seq: u64,
}

/// The lexer state machine: Idle (buffer empty, at a token boundary),
/// Accumulating (buffer non-empty), Resolved (about to emit via
/// [`LexerState::mark_end`]).
#[derive(Debug, Clone)]
pub struct LexerState {
    src: LineBuffer,
    cursor: Cursor,
    buffer: LexemeBuffer,
    trash: Vec<String>,
    tokens: Vec<Token>,
    backups: Vec<Snapshot>,
    branch_history: Vec<Vec<Snapshot>>,
    stage: usize,
    next_seq: u64,
    terminator: char,
    limits: HistoryLimits,
}

impl LexerState {
    /// Create a state over a preprocessed line buffer
    pub fn new(src: LineBuffer, terminator: char) -> Self {
        Self::with_limits(src, terminator, HistoryLimits::default())
    }

    /// Create a state with explicit history caps
    pub fn with_limits(src: LineBuffer, terminator: char, limits: HistoryLimits) -> Self {
        Self {
            src,
            cursor: Cursor::new(),
            buffer: LexemeBuffer::new(Position::start(), 0),
            trash: vec![String::new()],
            tokens: Vec::new(),
            backups: Vec::new(),
            branch_history: Vec::new(),
            stage: 0,
            next_seq: 1,
            terminator,
            limits,
        }
    }

    fn alloc_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Current cursor position
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// The statement terminator this state treats as a line break
    pub fn terminator(&self) -> char {
        self.terminator
    }

    /// The pending-lexeme buffer
    pub fn buffer(&self) -> &LexemeBuffer {
        &self.buffer
    }

    /// Tokens emitted so far
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Extract the token list, consuming the state
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Trash slots (characters consumed but excluded from payloads)
    pub fn trash(&self) -> &[String] {
        &self.trash
    }

    /// Extract tokens and trash together, consuming the state
    pub fn into_parts(self) -> (Vec<Token>, Vec<String>) {
        (self.tokens, self.trash)
    }

    /// Number of snapshots taken since creation (never decreases except
    /// through restore)
    pub fn stage(&self) -> usize {
        self.stage
    }

    /// Number of snapshots currently restorable
    pub fn available_history(&self) -> usize {
        self.backups.len()
    }

    /// The character at the cursor, or the end marker
    pub fn lookahead(&self) -> Lookahead {
        self.src.char_at(self.cursor.row(), self.cursor.col())
    }

    /// True once the cursor reads the end marker
    pub fn at_end(&self) -> bool {
        matches!(self.lookahead(), Lookahead::End)
    }

    /// Consume exactly one character at the cursor.
    ///
    /// With `skip_for_token` false the character joins the pending lexeme;
    /// with true it goes to the current trash slot instead (lexically
    /// significant for navigation, but excluded from any payload). A newline
    /// or the declared terminator completes the row; any other character
    /// advances the column.
    pub fn advance(&mut self, skip_for_token: bool) -> Result<char, LexError> {
        let ch = match self.lookahead() {
            Lookahead::End => return Err(LexError::EndOfInput),
            Lookahead::Char(ch) => ch,
        };

        if skip_for_token {
            self.trash
                .last_mut()
                .expect("trash always holds an open slot")
                .push(ch);
        } else {
            if self.buffer.is_empty() {
                self.buffer.reanchor(self.cursor.position());
            }
            self.buffer.push(ch);
        }

        if ch == '\n' || ch == self.terminator {
            self.cursor.line_break();
        } else {
            self.cursor.step();
        }

        Ok(ch)
    }

    /// Emit a token of `type_name` from the pending buffer.
    ///
    /// The token's end position is the last character actually consumed,
    /// never the next unconsumed one. The buffer is reset at the current
    /// cursor position with a fresh sequence id and a new trash slot opens.
    pub fn mark_end(&mut self, type_name: &str) -> Token {
        let span = Span::new(self.buffer.start(), self.cursor.last());
        let seq = self.buffer.seq();
        let payload = self.buffer.take_payload();
        let token = Token::new(type_name, payload, span, seq);

        self.tokens.push(token.clone());

        let next_seq = self.alloc_seq();
        self.buffer = LexemeBuffer::new(self.cursor.position(), next_seq);
        self.trash.push(String::new());

        token
    }

    /// Discard the pending buffer contents into trash without emitting.
    pub fn burn_payload(&mut self, new_trash_slot: bool) {
        if new_trash_slot {
            self.trash.push(String::new());
        }
        let payload = self.buffer.take_payload();
        self.trash
            .last_mut()
            .expect("trash always holds an open slot")
            .push_str(&payload);

        let next_seq = self.alloc_seq();
        self.buffer = LexemeBuffer::new(self.cursor.position(), next_seq);
    }

    /// Push a deep copy of the live state onto the bounded backup stack.
    /// The oldest snapshot is evicted when the cap is reached.
    pub fn snapshot(&mut self) {
        let snap = Snapshot {
            cursor: self.cursor.clone(),
            buffer: self.buffer.clone(),
            trash: self.trash.clone(),
            tokens: self.tokens.clone(),
            stage: self.stage,
            next_seq: self.next_seq,
        };

        if self.backups.len() >= self.limits.snapshot_cap {
            self.backups.remove(0);
        }
        self.backups.push(snap);
        self.stage += 1;
    }

    /// Rewind `steps_back` snapshots.
    ///
    /// Strict over-range requests fail with [`LexError::BacktrackRange`];
    /// non-strict requests clamp to the oldest available snapshot. The
    /// backup stack itself rewinds to its state at that snapshot, so
    /// history evicted by the cap can never be reached.
    pub fn restore(&mut self, steps_back: usize, strict: bool) -> Result<(), LexError> {
        let available = self.backups.len();

        if available == 0 || steps_back == 0 {
            return Err(LexError::BacktrackRange {
                requested: steps_back,
                available,
            });
        }

        let steps = if steps_back > available {
            if strict {
                return Err(LexError::BacktrackRange {
                    requested: steps_back,
                    available,
                });
            }
            available
        } else {
            steps_back
        };

        let index = available - steps;
        let snap = self.backups[index].clone();
        self.backups.truncate(index);

        self.cursor = snap.cursor;
        self.buffer = snap.buffer;
        self.trash = snap.trash;
        self.tokens = snap.tokens;
        self.stage = snap.stage;
        self.next_seq = snap.next_seq;

        Ok(())
    }

    /// Enter a nested speculative branch: stash the current snapshot stack
    /// on the bounded outer history and start with a clean one.
    pub fn enter_branch(&mut self) {
        if self.branch_history.len() >= self.limits.branch_cap {
            self.branch_history.remove(0);
        }
        self.branch_history.push(std::mem::take(&mut self.backups));
    }

    /// Leave the current branch, dropping its snapshots and resuming the
    /// outer snapshot stack.
    pub fn leave_branch(&mut self) {
        self.backups = self.branch_history.pop().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::{preprocess, PreprocessOptions};
    use assert_matches::assert_matches;

    fn state_for(source: &str) -> LexerState {
        let buf = preprocess(source, &PreprocessOptions::default()).unwrap();
        LexerState::new(buf, ';')
    }

    #[test]
    fn test_advance_accumulates_or_trashes() {
        let mut state = state_for("ab");

        assert_eq!(state.advance(false).unwrap(), 'a');
        assert_eq!(state.advance(true).unwrap(), 'b');

        assert_eq!(state.buffer().payload(), "a");
        assert_eq!(state.trash(), &["b".to_string()]);
    }

    #[test]
    fn test_advance_past_end_marker_fails() {
        let mut state = state_for("a");

        state.advance(false).unwrap(); // 'a'
        state.advance(true).unwrap(); // ';'
        assert!(state.at_end());
        assert_matches!(state.advance(false), Err(LexError::EndOfInput));
    }

    #[test]
    fn test_terminator_breaks_line() {
        let mut state = state_for("ab\ncd");

        for _ in 0..3 {
            state.advance(false).unwrap(); // a, b, ;
        }
        assert_eq!(state.position(), Position::new(1, 0));

        state.advance(false).unwrap(); // 'c'
        assert_eq!(state.position(), Position::new(1, 1));
    }

    #[test]
    fn test_mark_end_produces_token_and_resets() {
        let mut state = state_for("ab cd");

        state.advance(false).unwrap();
        state.advance(false).unwrap();
        let token = state.mark_end("WORD");

        assert_eq!(token.payload, "ab");
        assert_eq!(token.span.start, Position::new(0, 0));
        assert_eq!(token.span.end, Position::new(0, 1));
        assert_eq!(token.seq, 0);

        assert!(state.buffer().is_empty());
        assert_eq!(state.buffer().start(), Position::new(0, 2));
        assert_eq!(state.tokens().len(), 1);
    }

    #[test]
    fn test_mark_end_at_column_zero_uses_previous_row_end() {
        let mut state = state_for("ab");

        state.advance(false).unwrap(); // 'a'
        state.advance(false).unwrap(); // 'b'
        state.advance(false).unwrap(); // ';' breaks the line

        let token = state.mark_end("STMT");
        // the terminator sat at column 2 of row 0, not at row 1 column 0
        assert_eq!(token.span.end, Position::new(0, 2));
        assert!(token.span.is_ordered());
    }

    #[test]
    fn test_sequence_ids_strictly_increase() {
        let mut state = state_for("a b c");
        let mut seqs = Vec::new();

        for _ in 0..3 {
            state.advance(false).unwrap();
            seqs.push(state.mark_end("WORD").seq);
            if !state.at_end() {
                state.advance(true).unwrap();
            }
        }

        assert!(seqs.windows(2).all(|w| w[1] > w[0]), "ids not increasing: {seqs:?}");
    }

    #[test]
    fn test_burn_payload_moves_buffer_to_trash() {
        let mut state = state_for("abc");

        state.advance(false).unwrap();
        state.advance(false).unwrap();
        state.burn_payload(false);

        assert!(state.buffer().is_empty());
        assert_eq!(state.trash(), &["ab".to_string()]);

        state.advance(false).unwrap();
        state.burn_payload(true);
        assert_eq!(state.trash(), &["ab".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_restore_is_idempotent_after_snapshot() {
        let mut state = state_for("abcdef");
        state.advance(false).unwrap();

        let before = state.clone();
        state.snapshot();
        state.restore(1, true).unwrap();

        assert_eq!(state.position(), before.position());
        assert_eq!(state.buffer(), before.buffer());
        assert_eq!(state.trash(), before.trash());
        assert_eq!(state.tokens(), before.tokens());
        assert_eq!(state.stage(), before.stage());
    }

    #[test]
    fn test_restore_rewinds_mutations() {
        let mut state = state_for("abcdef");

        state.advance(false).unwrap(); // 'a'
        state.snapshot();
        state.advance(false).unwrap(); // 'b'
        state.advance(false).unwrap(); // 'c'
        assert_eq!(state.buffer().payload(), "abc");

        state.restore(1, true).unwrap();
        assert_eq!(state.buffer().payload(), "a");
        assert_eq!(state.position(), Position::new(0, 1));

        // the character is consumable again after the rewind
        assert_eq!(state.advance(false).unwrap(), 'b');
    }

    #[test]
    fn test_restore_beyond_history_strict_vs_clamped() {
        let mut state = state_for("abcdef");

        state.advance(false).unwrap();
        state.snapshot();
        state.advance(false).unwrap();
        state.snapshot();
        state.advance(false).unwrap();

        let err = state.restore(5, true).unwrap_err();
        assert_matches!(
            err,
            LexError::BacktrackRange {
                requested: 5,
                available: 2
            }
        );

        // non-strict clamps to the oldest snapshot
        state.restore(5, false).unwrap();
        assert_eq!(state.buffer().payload(), "a");
        assert_eq!(state.available_history(), 0);
    }

    #[test]
    fn test_restore_with_no_history_fails() {
        let mut state = state_for("ab");
        assert_matches!(state.restore(1, false), Err(LexError::BacktrackRange { .. }));
    }

    #[test]
    fn test_snapshot_cap_evicts_oldest() {
        let buf = preprocess("abcdefgh", &PreprocessOptions::default()).unwrap();
        let mut state = LexerState::with_limits(
            buf,
            ';',
            HistoryLimits {
                snapshot_cap: 2,
                branch_cap: 2,
            },
        );

        for _ in 0..4 {
            state.advance(false).unwrap();
            state.snapshot();
        }

        assert_eq!(state.available_history(), 2);
        // the two oldest snapshots are gone; reaching past the cap fails
        assert_matches!(state.restore(3, true), Err(LexError::BacktrackRange { .. }));
        // the newest surviving snapshot holds three consumed characters
        state.restore(2, true).unwrap();
        assert_eq!(state.buffer().payload(), "abc");
    }

    #[test]
    fn test_snapshot_is_isolated_from_live_mutation() {
        let mut state = state_for("abcd");

        state.advance(false).unwrap();
        state.snapshot();
        state.advance(false).unwrap();
        state.mark_end("WORD");

        // the snapshot predates the token; restoring must drop it
        state.restore(1, true).unwrap();
        assert!(state.tokens().is_empty());
        assert_eq!(state.buffer().payload(), "a");
    }

    #[test]
    fn test_branch_history_stashes_and_resumes() {
        let mut state = state_for("abcdef");

        state.advance(false).unwrap();
        state.snapshot();
        assert_eq!(state.available_history(), 1);

        state.enter_branch();
        assert_eq!(state.available_history(), 0);
        state.advance(false).unwrap();
        state.snapshot();
        state.snapshot();
        assert_eq!(state.available_history(), 2);

        state.leave_branch();
        assert_eq!(state.available_history(), 1);
        state.restore(1, true).unwrap();
        assert_eq!(state.buffer().payload(), "a");
    }

    #[test]
    fn test_stage_counter_tracks_snapshots_and_restores() {
        let mut state = state_for("abc");
        assert_eq!(state.stage(), 0);

        state.snapshot();
        state.snapshot();
        assert_eq!(state.stage(), 2);

        state.restore(2, true).unwrap();
        assert_eq!(state.stage(), 0);
    }
}
