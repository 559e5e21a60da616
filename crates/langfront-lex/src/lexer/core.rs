//! Core lexer: dispatch table and the token-production loop.

use langfront_util::{Diagnostic, DiagnosticCode, FileId, Handler, SourceLocation, SourceRange, Span};

use crate::file::FileRef;
use crate::stream::Utf8Stream;
use crate::token::{Token, TokenKind};
use crate::unicode::is_ascii_ident_start;

/// Transforms a validated [`Utf8Stream`] into a sequence of [`Token`]s,
/// reporting malformed input through a shared [`Handler`] instead of
/// aborting. Lives for the duration of one file's lexing.
pub struct Lexer<'a> {
    pub(crate) file: FileRef<'a>,
    pub(crate) stream: Utf8Stream<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) token_start_pos: usize,
    pub(crate) token_start_loc: SourceLocation,
}

impl<'a> Lexer<'a> {
    /// Builds a lexer from an already-validated stream. Callers that
    /// need to surface `Utf8Stream::init`'s encoding error should do so
    /// before constructing the lexer; the lexer only ever sees valid
    /// UTF-8.
    pub fn new(file: FileRef<'a>, stream: Utf8Stream<'a>, handler: &'a Handler) -> Self {
        let file_id = FileId::new(file.file_id());
        Self {
            file,
            stream,
            handler,
            token_start_pos: 0,
            token_start_loc: SourceLocation::new(1, 1, file_id),
        }
    }

    #[inline]
    pub fn file(&self) -> FileRef<'a> {
        self.file
    }

    fn mark_token_start(&mut self) {
        self.token_start_pos = self.stream.position();
        self.token_start_loc = SourceLocation::new(
            self.stream.line(),
            self.stream.column(),
            FileId::new(self.file.file_id()),
        );
    }

    pub(crate) fn finish(&mut self, kind: TokenKind) -> Token {
        let range = SourceRange::new(self.token_start_pos, self.stream.position());
        Token::new(kind, range, self.token_start_loc)
    }

    pub(crate) fn slice_from_start(&self) -> &'a str {
        std::str::from_utf8(&self.file.source()[self.token_start_pos..self.stream.position()])
            .expect("token range is always a valid utf8 boundary")
    }

    pub(crate) fn report(&self, code: DiagnosticCode, message: impl Into<String>) {
        let range = SourceRange::new(self.token_start_pos, self.stream.position());
        let span = Span::new(range, self.token_start_loc);
        self.handler.emit_diagnostic(Diagnostic::error(message, span).with_code(code));
    }

    /// Produces exactly one token. Idempotent at EOF: once the stream is
    /// exhausted every subsequent call returns another `Eof` token.
    pub fn tokenize_next(&mut self) -> Token {
        loop {
            self.mark_token_start();

            if self.stream.eof() {
                return self.finish(TokenKind::Eof);
            }

            let cp = self.stream.peek(0);
            let produced =
                if cp < 0x80 { self.ascii_token(cp as u8) } else { self.unicode_token() };
            if let Some(tok) = produced {
                return tok;
            }
            // An unrecognized character was consumed and reported; try again.
        }
    }

    /// Drains the stream to `Eof`, returning every token produced
    /// (including trivia) in source order.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.tokenize_next();
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn ascii_token(&mut self, byte: u8) -> Option<Token> {
        let ch = byte as char;
        if is_ascii_ident_start(ch) {
            return Some(self.lex_identifier());
        }
        if ch.is_ascii_digit() {
            return Some(self.lex_number());
        }
        match ch {
            '"' => Some(self.lex_string()),
            '\'' => Some(self.lex_char()),
            '\n' | '\r' => Some(self.lex_newline()),
            c if c.is_whitespace() => Some(self.lex_whitespace()),
            '/' if self.stream.peek(1) == b'/' as u32 => Some(self.lex_comment()),
            '/' if self.stream.peek(1) == b'*' as u32 => Some(self.lex_block_comment()),
            _ => Some(self.lex_operator()),
        }
    }

    fn unicode_token(&mut self) -> Option<Token> {
        let cp = self.stream.peek(0);
        let ch = char::from_u32(cp).unwrap_or('\u{FFFD}');
        if ch.is_alphabetic() {
            return Some(self.lex_identifier());
        }
        if ch.is_numeric() {
            return Some(self.lex_number());
        }
        if ch.is_whitespace() {
            return Some(self.lex_whitespace());
        }
        self.stream.advance();
        self.report(DiagnosticCode::E_UNRECOGNIZED_CHARACTER, format!("unrecognized character {ch:?}"));
        None
    }

    fn lex_newline(&mut self) -> Token {
        self.stream.advance();
        if self.slice_from_start() == "\r" && self.stream.peek(0) == b'\n' as u32 {
            self.stream.advance();
        }
        self.finish(TokenKind::Newline)
    }

    fn lex_whitespace(&mut self) -> Token {
        loop {
            let cp = self.stream.peek(0);
            let keep_going = cp != 0
                && char::from_u32(cp).map(|c| c.is_whitespace() && c != '\n' && c != '\r').unwrap_or(false);
            if !keep_going {
                break;
            }
            self.stream.advance();
        }
        self.finish(TokenKind::Whitespace)
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// For any valid UTF-8 input the lexer must never panic, must
        /// always terminate with exactly one trailing `Eof` token, and
        /// every token's lexeme must concatenate back to the source
        /// bytes it was sliced from, in order.
        #[test]
        fn arbitrary_input_tokenizes_without_panicking(src in "\\PC{0,300}") {
            let handler = Handler::new();
            let file = FileRef::new(0, "<proptest>", src.as_bytes());
            let stream = Utf8Stream::init(file).expect("proptest strings are valid utf8");
            let mut lexer = Lexer::new(file, stream, &handler);
            let tokens = lexer.tokenize();

            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

            let mut rebuilt = Vec::new();
            for tok in &tokens {
                rebuilt.extend_from_slice(tok.lexeme(src.as_bytes()));
            }
            prop_assert_eq!(rebuilt, src.as_bytes());

            for pair in tokens.windows(2) {
                prop_assert!(pair[0].range.end <= pair[1].range.start);
            }
        }

        /// Tokenizing twice from the same source must be fully
        /// deterministic: same kinds, same ranges.
        #[test]
        fn tokenizing_is_deterministic(src in "\\PC{0,200}") {
            let lex_once = || {
                let handler = Handler::new();
                let file = FileRef::new(0, "<proptest>", src.as_bytes());
                let stream = Utf8Stream::init(file).expect("proptest strings are valid utf8");
                let mut lexer = Lexer::new(file, stream, &handler);
                lexer.tokenize()
            };
            let a = lex_once();
            let b = lex_once();
            prop_assert_eq!(a.len(), b.len());
            for (ta, tb) in a.iter().zip(b.iter()) {
                prop_assert_eq!(ta.kind, tb.kind);
                prop_assert_eq!(ta.range.start, tb.range.start);
                prop_assert_eq!(ta.range.end, tb.range.end);
            }
        }
    }
}
