//! Comment lexing.
//!
//! Comments are trivia tokens, not skipped: `//` is `InlineComment`,
//! `//@` is `DocComment`, and `/* */` is `BlockComment`, nested to a
//! bounded depth so a runaway `/*` can't recurse the lexer into the
//! ground.

use langfront_util::DiagnosticCode;

use crate::token::{Token, TokenKind};

use super::core::Lexer;

const MAX_BLOCK_COMMENT_DEPTH: u32 = 100;

impl<'a> Lexer<'a> {
    pub(super) fn lex_comment(&mut self) -> Token {
        self.stream.advance(); // first '/'
        self.stream.advance(); // second '/'
        let is_doc = self.stream.peek(0) == b'@' as u32;
        if is_doc {
            self.stream.advance();
        }
        while !self.stream.eof() && self.stream.peek(0) != b'\n' as u32 {
            self.stream.advance();
        }
        self.finish(if is_doc { TokenKind::DocComment } else { TokenKind::InlineComment })
    }

    pub(super) fn lex_block_comment(&mut self) -> Token {
        self.stream.advance(); // '/'
        self.stream.advance(); // '*'
        let mut depth: u32 = 1;

        while depth > 0 {
            if self.stream.eof() {
                self.report(DiagnosticCode::E_UNTERMINATED_BLOCK_COMMENT, "unterminated block comment");
                break;
            }
            if depth > MAX_BLOCK_COMMENT_DEPTH {
                self.report(
                    DiagnosticCode::E_UNTERMINATED_BLOCK_COMMENT,
                    format!("block comment nesting exceeds {MAX_BLOCK_COMMENT_DEPTH} levels"),
                );
                break;
            }
            if self.stream.peek(0) == b'/' as u32 && self.stream.peek(1) == b'*' as u32 {
                self.stream.advance();
                self.stream.advance();
                depth += 1;
            } else if self.stream.peek(0) == b'*' as u32 && self.stream.peek(1) == b'/' as u32 {
                self.stream.advance();
                self.stream.advance();
                depth -= 1;
            } else {
                self.stream.advance();
            }
        }

        self.finish(TokenKind::BlockComment)
    }
}
