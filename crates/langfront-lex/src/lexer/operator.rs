//! Operator and punctuation lexing.
//!
//! One dispatcher handles every non-alphanumeric ASCII character not
//! already claimed by string/char/comment lexing, matching the longest
//! operator first (`<<=` before `<<` before `<`).

use langfront_util::DiagnosticCode;

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn lex_operator(&mut self) -> Token {
        let first = self.stream.peek(0) as u8 as char;
        self.stream.advance();

        macro_rules! two {
            ($ch:expr, $kind:expr) => {
                if self.stream.peek(0) == $ch as u32 {
                    self.stream.advance();
                    return self.finish($kind);
                }
            };
        }

        let kind = match first {
            '+' => {
                two!('+', TokenKind::PlusPlus);
                two!('=', TokenKind::PlusEq);
                TokenKind::Plus
            }
            '-' => {
                two!('-', TokenKind::MinusMinus);
                two!('>', TokenKind::Arrow);
                two!('=', TokenKind::MinusEq);
                TokenKind::Minus
            }
            '*' => {
                two!('*', TokenKind::StarStar);
                two!('=', TokenKind::StarEq);
                TokenKind::Star
            }
            '/' => {
                two!('=', TokenKind::SlashEq);
                TokenKind::Slash
            }
            '%' => {
                two!('=', TokenKind::PercentEq);
                TokenKind::Percent
            }
            '=' => {
                two!('=', TokenKind::EqEq);
                TokenKind::Eq
            }
            '!' => {
                two!('=', TokenKind::BangEq);
                TokenKind::Bang
            }
            '<' => {
                if self.stream.peek(0) == b'=' as u32 && self.stream.peek(1) == b'>' as u32 {
                    self.stream.advance();
                    self.stream.advance();
                    return self.finish(TokenKind::Spaceship);
                }
                if self.stream.peek(0) == b'<' as u32 {
                    self.stream.advance();
                    two!('=', TokenKind::LtLtEq);
                    return self.finish(TokenKind::LtLt);
                }
                two!('=', TokenKind::LtEq);
                TokenKind::Lt
            }
            '>' => {
                if self.stream.peek(0) == b'>' as u32 {
                    self.stream.advance();
                    two!('=', TokenKind::GtGtEq);
                    return self.finish(TokenKind::GtGt);
                }
                two!('=', TokenKind::GtEq);
                TokenKind::Gt
            }
            '&' => {
                two!('&', TokenKind::AmpAmp);
                two!('=', TokenKind::AmpEq);
                TokenKind::Amp
            }
            '|' => {
                two!('|', TokenKind::PipePipe);
                two!('=', TokenKind::PipeEq);
                TokenKind::Pipe
            }
            '^' => {
                two!('=', TokenKind::CaretEq);
                TokenKind::Caret
            }
            '~' => TokenKind::Tilde,
            ':' => {
                two!(':', TokenKind::ColonColon);
                two!('=', TokenKind::ColonEq);
                TokenKind::Colon
            }
            '.' => {
                if self.stream.peek(0) == b'.' as u32 {
                    self.stream.advance();
                    two!('=', TokenKind::DotDotEq);
                    two!('<', TokenKind::DotDotLt);
                    return self.finish(TokenKind::DotDot);
                }
                TokenKind::Dot
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '@' => TokenKind::At,
            '#' => TokenKind::Hash,
            '$' => TokenKind::Dollar,
            '?' => TokenKind::Question,
            other => {
                self.report(DiagnosticCode::E_UNRECOGNIZED_CHARACTER, format!("unrecognized character {other:?}"));
                TokenKind::Whitespace
            }
        };
        self.finish(kind)
    }
}
