//! Random-access token sequence with cursor, peek-ahead, and rewind.
//!
//! `TokenStream` sits between the lexer and the parser: it owns the full
//! token vector produced by [`crate::Lexer::tokenize`] and gives the parser
//! a cursor over it, including a `next_non_whitespace` helper so trivia
//! tokens never have to be special-cased at every call site.

use crate::token::{Token, TokenKind};

/// A cursor over an already-tokenized file.
///
/// Cloning the cursor position (via [`TokenStream::position`] /
/// [`TokenStream::rewind`]) is how the parser implements lookahead that
/// turns out to be wrong and backtracking speculative parses.
pub struct TokenStream<'a> {
    tokens: Vec<Token>,
    file_name: &'a str,
    cursor: usize,
}

impl<'a> TokenStream<'a> {
    /// Wraps a token vector produced by the lexer. `tokens` must end with
    /// an `Eof` token (as `Lexer::tokenize` guarantees).
    pub fn new(tokens: Vec<Token>, file_name: &'a str) -> Self {
        debug_assert!(
            tokens.last().map(|t| t.kind == TokenKind::Eof).unwrap_or(false),
            "TokenStream requires a trailing Eof token"
        );
        Self { tokens, file_name, cursor: 0 }
    }

    #[inline]
    pub fn file_name(&self) -> &'a str {
        self.file_name
    }

    /// Returns the token `offset` positions ahead of the cursor without
    /// consuming it. Past the end of the vector, returns the trailing
    /// `Eof` token.
    pub fn peek(&self, offset: usize) -> Token {
        self.peek_at(self.cursor + offset)
    }

    /// Returns the token at absolute index `n`, clamped to the trailing
    /// `Eof` if `n` is out of bounds.
    pub fn peek_at(&self, n: usize) -> Token {
        self.tokens.get(n).copied().unwrap_or_else(|| *self.tokens.last().unwrap())
    }

    /// Returns the current token and advances the cursor by one. Once the
    /// cursor reaches the trailing `Eof`, further calls keep returning it
    /// without moving past the end of the vector.
    pub fn next(&mut self) -> Token {
        let tok = self.peek(0);
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
        tok
    }

    /// Like [`TokenStream::next`] but skips trivia (whitespace, newlines,
    /// comments) first, returning the next semantically significant token.
    pub fn next_non_whitespace(&mut self) -> Token {
        self.skip_trivia();
        self.next()
    }

    /// Returns the next semantically significant token without consuming
    /// it, skipping any trivia the cursor currently sits on. Does not
    /// move the cursor itself, so it can be called with a shared
    /// reference even though finding the answer means scanning past
    /// trivia the cursor hasn't consumed yet.
    pub fn peek_non_whitespace(&self, offset: usize) -> Token {
        let mut idx = self.cursor;
        while self.peek_at(idx).kind.is_trivia() && idx < self.tokens.len() - 1 {
            idx += 1;
        }
        let mut remaining = offset;
        loop {
            let tok = self.peek_at(idx);
            if !tok.kind.is_trivia() {
                if remaining == 0 {
                    return tok;
                }
                remaining -= 1;
            }
            if idx >= self.tokens.len() - 1 {
                return *self.tokens.last().unwrap();
            }
            idx += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while self.peek(0).kind.is_trivia() {
            self.next();
        }
    }

    /// Current cursor position, suitable for a later [`TokenStream::rewind`].
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Restores the cursor to a position previously observed via
    /// [`TokenStream::position`]. Behavior is unspecified if `position`
    /// exceeds [`TokenStream::size`].
    pub fn rewind(&mut self, position: usize) {
        self.cursor = position.min(self.tokens.len().saturating_sub(1));
    }

    /// Total number of tokens, including the trailing `Eof`.
    #[inline]
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the cursor sits on the trailing `Eof` token.
    #[inline]
    pub fn eof(&self) -> bool {
        self.peek(0).kind == TokenKind::Eof
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileRef;
    use crate::lexer::Lexer;
    use crate::stream::Utf8Stream;
    use langfront_util::Handler;

    fn stream_for(src: &str) -> TokenStream<'_> {
        let handler = Handler::new();
        let file = FileRef::new(0, "<test>", src.as_bytes());
        let utf8 = Utf8Stream::init(file).unwrap();
        let mut lexer = Lexer::new(file, utf8, &handler);
        TokenStream::new(lexer.tokenize(), "<test>")
    }

    #[test]
    fn next_advances_and_saturates_at_eof() {
        let mut ts = stream_for("a b");
        assert_eq!(ts.next().kind, TokenKind::Identifier);
        assert_eq!(ts.next().kind, TokenKind::Whitespace);
        assert_eq!(ts.next().kind, TokenKind::Identifier);
        assert_eq!(ts.next().kind, TokenKind::Eof);
        assert_eq!(ts.next().kind, TokenKind::Eof);
    }

    #[test]
    fn next_non_whitespace_skips_trivia() {
        let mut ts = stream_for("a   b");
        assert_eq!(ts.next_non_whitespace().kind, TokenKind::Identifier);
        assert_eq!(ts.next_non_whitespace().kind, TokenKind::Identifier);
        assert_eq!(ts.next_non_whitespace().kind, TokenKind::Eof);
    }

    #[test]
    fn rewind_restores_a_prior_position() {
        let mut ts = stream_for("a b c");
        ts.next_non_whitespace();
        let p = ts.position();
        ts.next_non_whitespace();
        ts.next_non_whitespace();
        ts.rewind(p);
        assert_eq!(ts.next_non_whitespace().kind, TokenKind::Identifier);
    }

    #[test]
    fn peek_non_whitespace_looks_ahead_without_consuming() {
        let mut ts = stream_for("a + b");
        assert_eq!(ts.peek_non_whitespace(1).kind, TokenKind::Plus);
        // still at the start
        assert_eq!(ts.next_non_whitespace().kind, TokenKind::Identifier);
    }
}
