//! Identifier and keyword lexing.
//!
//! Identifiers start with an alphabetic codepoint or `_`, continue with
//! alphanumerics or `_`. After consuming the run, a keyword lookup
//! decides between a fixed keyword `TokenKind` and `Identifier`.

use crate::keyword::lookup_keyword;
use crate::token::{Token, TokenKind};
use crate::unicode::is_ascii_ident_continue;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn lex_identifier(&mut self) -> Token {
        loop {
            let cp = self.stream.peek(0);
            let continues = if cp < 0x80 {
                is_ascii_ident_continue(cp as u8 as char)
            } else {
                char::from_u32(cp).map(|c| c.is_alphanumeric() || c == '_').unwrap_or(false)
            };
            if !continues {
                break;
            }
            self.stream.advance();
        }

        let text = self.slice_from_start();
        let kind = lookup_keyword(text).unwrap_or(TokenKind::Identifier);
        self.finish(kind)
    }
}
