//! Number literal lexing.
//!
//! Handles decimal, hex (`0x`), binary (`0b`), octal (`0o`), and
//! floating-point literals, with `_` permitted as a digit separator
//! anywhere in the digit run. The lexer only classifies and bounds the
//! literal; parsing the digits into a value is left to the parser,
//! which has the diagnostic context of the surrounding expression.

use langfront_util::DiagnosticCode;

use crate::token::{Token, TokenKind};
use crate::unicode::is_digit_in_base;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn lex_number(&mut self) -> Token {
        if self.stream.peek(0) == b'0' as u32 {
            match self.stream.peek(1) {
                cp if cp == b'x' as u32 || cp == b'X' as u32 => {
                    self.stream.advance();
                    self.stream.advance();
                    return self.lex_radix_digits(16, TokenKind::LiteralHex);
                }
                cp if cp == b'b' as u32 || cp == b'B' as u32 => {
                    self.stream.advance();
                    self.stream.advance();
                    return self.lex_radix_digits(2, TokenKind::LiteralBinary);
                }
                cp if cp == b'o' as u32 || cp == b'O' as u32 => {
                    self.stream.advance();
                    self.stream.advance();
                    return self.lex_radix_digits(8, TokenKind::LiteralOctal);
                }
                _ => {}
            }
        }

        while self.current_is_decimal_digit_or_sep() {
            self.stream.advance();
        }

        let mut is_float = false;
        if self.stream.peek(0) == b'.' as u32 && (self.stream.peek(1) as u8 as char).is_ascii_digit() {
            is_float = true;
            self.stream.advance(); // '.'
            while self.current_is_decimal_digit_or_sep() {
                self.stream.advance();
            }
        }

        if self.stream.peek(0) == b'e' as u32 || self.stream.peek(0) == b'E' as u32 {
            let exp_start = self.stream.position();
            self.stream.advance();
            if self.stream.peek(0) == b'+' as u32 || self.stream.peek(0) == b'-' as u32 {
                self.stream.advance();
            }
            let digits_start = self.stream.position();
            while self.current_is_decimal_digit_or_sep() {
                self.stream.advance();
            }
            if self.stream.position() == digits_start {
                self.report(DiagnosticCode::E_INVALID_NUMERIC_LITERAL, "no digits in exponent");
                let _ = exp_start;
            } else {
                is_float = true;
            }
        }

        self.finish(if is_float { TokenKind::LiteralFloat } else { TokenKind::LiteralDecimal })
    }

    fn current_is_decimal_digit_or_sep(&self) -> bool {
        let cp = self.stream.peek(0);
        cp == b'_' as u32 || (cp < 0x80 && is_digit_in_base(cp as u8 as char, 10))
    }

    fn lex_radix_digits(&mut self, base: u32, kind: TokenKind) -> Token {
        let digits_start = self.stream.position();
        loop {
            let cp = self.stream.peek(0);
            let is_digit = cp == b'_' as u32 || (cp < 0x80 && is_digit_in_base(cp as u8 as char, base));
            if !is_digit {
                break;
            }
            self.stream.advance();
        }
        if self.stream.position() == digits_start {
            self.report(DiagnosticCode::E_INVALID_NUMERIC_LITERAL, format!("no digits after base-{base} prefix"));
        }
        self.finish(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileRef;
    use crate::stream::Utf8Stream;
    use langfront_util::Handler;

    fn lex_one(source: &str) -> (Token, Handler) {
        let handler = Handler::new();
        let file = FileRef::new(0, "<test>", source.as_bytes());
        let stream = Utf8Stream::init(file).unwrap();
        let mut lexer = Lexer::new(file, stream, &handler);
        let tok = lexer.tokenize_next();
        (tok, handler)
    }

    #[test]
    fn decimal_integer() {
        assert_eq!(lex_one("42").0.kind, TokenKind::LiteralDecimal);
        assert_eq!(lex_one("0").0.kind, TokenKind::LiteralDecimal);
    }

    #[test]
    fn hex_integer_with_separators() {
        let (tok, handler) = lex_one("0xAB_CD");
        assert_eq!(tok.kind, TokenKind::LiteralHex);
        assert!(!handler.has_errors());
    }

    #[test]
    fn binary_integer() {
        assert_eq!(lex_one("0b1111_0000").0.kind, TokenKind::LiteralBinary);
    }

    #[test]
    fn octal_integer() {
        assert_eq!(lex_one("0o777").0.kind, TokenKind::LiteralOctal);
    }

    #[test]
    fn float_with_fraction() {
        let (tok, _) = lex_one("3.14");
        assert_eq!(tok.kind, TokenKind::LiteralFloat);
        assert_eq!(tok.length_bytes, 4);
    }

    #[test]
    fn float_with_exponent() {
        assert_eq!(lex_one("1e10").0.kind, TokenKind::LiteralFloat);
        assert_eq!(lex_one("2.5e-3").0.kind, TokenKind::LiteralFloat);
    }

    #[test]
    fn bare_zero_followed_by_dot_method_is_not_consumed_as_float() {
        // `0.` with no trailing digit is a decimal literal followed by a
        // separate `.` token; only `0.5`-style fractions become floats.
        let (tok, _) = lex_one("0");
        assert_eq!(tok.kind, TokenKind::LiteralDecimal);
        assert_eq!(tok.length_bytes, 1);
    }

    #[test]
    fn empty_radix_digits_reports_error() {
        let (tok, handler) = lex_one("0x");
        assert_eq!(tok.kind, TokenKind::LiteralHex);
        assert!(handler.has_errors());
    }
}
