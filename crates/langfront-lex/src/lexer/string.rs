//! String and character literal lexing.
//!
//! Literal content is never decoded into an owned buffer here; the lexer
//! only validates escape syntax and bounds the literal's byte range, the
//! way every other token is produced. Escape sequences recognized:
//! `\n \t \r \\ \" \' \0`, `\xHH` (exactly two hex digits), `\uHHHH`
//! (exactly four), `\UHHHHHHHH` (exactly eight), and octal `\ooo` (one
//! to three octal digits).

use langfront_util::DiagnosticCode;

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn lex_string(&mut self) -> Token {
        self.stream.advance(); // opening '"'
        loop {
            if self.stream.eof() {
                self.report(DiagnosticCode::E_UNTERMINATED_STRING_LITERAL, "unterminated string literal");
                break;
            }
            let cp = self.stream.peek(0);
            if cp == b'"' as u32 {
                self.stream.advance();
                break;
            }
            if cp == b'\n' as u32 {
                self.report(DiagnosticCode::E_UNTERMINATED_STRING_LITERAL, "unterminated string literal");
                break;
            }
            if cp == b'\\' as u32 {
                self.stream.advance();
                self.consume_escape();
            } else {
                self.stream.advance();
            }
        }
        self.finish(TokenKind::LiteralString)
    }

    pub(super) fn lex_char(&mut self) -> Token {
        self.stream.advance(); // opening '\''
        if self.stream.eof() {
            self.report(DiagnosticCode::E_UNTERMINATED_CHARACTER_LITERAL, "unterminated character literal");
            return self.finish(TokenKind::LiteralChar);
        }
        let cp = self.stream.peek(0);
        if cp == b'\'' as u32 || cp == b'\n' as u32 {
            self.report(DiagnosticCode::E_UNTERMINATED_CHARACTER_LITERAL, "empty character literal");
        } else if cp == b'\\' as u32 {
            self.stream.advance();
            self.consume_escape();
        } else {
            self.stream.advance();
        }

        if self.stream.peek(0) == b'\'' as u32 {
            self.stream.advance();
        } else {
            self.report(DiagnosticCode::E_UNTERMINATED_CHARACTER_LITERAL, "unterminated character literal");
            while !self.stream.eof() && self.stream.peek(0) != b'\'' as u32 && self.stream.peek(0) != b'\n' as u32 {
                self.stream.advance();
            }
            if self.stream.peek(0) == b'\'' as u32 {
                self.stream.advance();
            }
        }
        self.finish(TokenKind::LiteralChar)
    }

    /// Consumes one escape body (the part after the backslash) and
    /// reports a diagnostic if its shape is invalid. Never produces a
    /// value; only the lexer's shape-validation matters here.
    fn consume_escape(&mut self) {
        if self.stream.eof() {
            self.report(DiagnosticCode::E_INVALID_ESCAPE_SEQUENCE, "unterminated escape sequence");
            return;
        }
        let cp = self.stream.peek(0);
        let ch = cp as u8 as char;
        match cp {
            _ if cp == b'n' as u32
                || cp == b't' as u32
                || cp == b'r' as u32
                || cp == b'\\' as u32
                || cp == b'"' as u32
                || cp == b'\'' as u32
                || cp == b'0' as u32 =>
            {
                self.stream.advance();
            }
            _ if cp == b'x' as u32 => {
                self.stream.advance();
                self.consume_fixed_hex_digits(2, DiagnosticCode::E_INVALID_HEX_ESCAPE);
            }
            _ if cp == b'u' as u32 => {
                self.stream.advance();
                self.consume_fixed_hex_digits(4, DiagnosticCode::E_INVALID_UNICODE_ESCAPE);
            }
            _ if cp == b'U' as u32 => {
                self.stream.advance();
                self.consume_fixed_hex_digits(8, DiagnosticCode::E_INVALID_UNICODE_ESCAPE);
            }
            _ if (b'0'..=b'7').contains(&(cp as u8)) && cp < 0x80 => {
                let mut count = 0;
                while count < 3 {
                    let c = self.stream.peek(0);
                    if c < 0x80 && (b'0'..=b'7').contains(&(c as u8)) {
                        self.stream.advance();
                        count += 1;
                    } else {
                        break;
                    }
                }
            }
            _ => {
                self.stream.advance();
                self.report(DiagnosticCode::E_INVALID_CHARACTER_ESCAPE, format!("unknown escape sequence '\\{ch}'"));
            }
        }
    }

    fn consume_fixed_hex_digits(&mut self, count: usize, code: DiagnosticCode) {
        let mut seen = 0;
        while seen < count {
            let cp = self.stream.peek(0);
            if cp < 0x80 && (cp as u8 as char).is_ascii_hexdigit() {
                self.stream.advance();
                seen += 1;
            } else {
                break;
            }
        }
        if seen != count {
            self.report(code, format!("expected {count} hex digits, found {seen}"));
        }
    }
}
