//! Pattern parsing, used only by `match` arms.
//!
//! Patterns are not arena nodes: a match arm's pattern is always read
//! top-down by the single consumer that owns it (the arm itself), so
//! there's no benefit to index-addressing it the way expressions and
//! declarations are.

use langfront_lex::TokenKind;

use crate::ast::{Mutability, Pattern, RangeKind};
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn parse_pattern(&mut self) -> PResult<Pattern> {
        let base = self.parse_pattern_primary()?;
        if self.check(TokenKind::DotDot) || self.check(TokenKind::DotDotEq) || self.check(TokenKind::DotDotLt) {
            let kind = match self.current().kind {
                TokenKind::DotDot => RangeKind::Exclusive,
                TokenKind::DotDotEq => RangeKind::Inclusive,
                _ => RangeKind::HalfOpenLt,
            };
            self.advance();
            let end = self.parse_pattern_primary()?;
            return Ok(Pattern::Range(Box::new(base), Box::new(end), kind));
        }
        Ok(base)
    }

    fn parse_pattern_primary(&mut self) -> PResult<Pattern> {
        let tok = self.current();
        match tok.kind {
            TokenKind::Identifier if self.lexeme_of(tok) == "_" => {
                self.advance();
                Ok(Pattern::Wildcard)
            }

            TokenKind::LiteralDecimal
            | TokenKind::LiteralBinary
            | TokenKind::LiteralOctal
            | TokenKind::LiteralHex
            | TokenKind::LiteralFloat
            | TokenKind::LiteralString
            | TokenKind::LiteralChar
            | TokenKind::True
            | TokenKind::False => {
                let tok = self.advance();
                Ok(Pattern::Literal(self.literal_kind_of(tok.kind), tok.range))
            }

            TokenKind::Mut => {
                self.advance();
                let name_tok = self.expect_or_abort(TokenKind::Identifier, "a binding name")?;
                Ok(Pattern::Ident(self.symbol_of(name_tok), Mutability::Mutable))
            }

            TokenKind::Identifier => {
                let mut segments = vec![self.symbol_of(self.advance())];
                while self.match_token(TokenKind::ColonColon) {
                    let seg = self.expect_or_abort(TokenKind::Identifier, "a path segment")?;
                    segments.push(self.symbol_of(seg));
                }

                if segments.len() == 1 && !self.check(TokenKind::LParen) && !self.check(TokenKind::LBrace) {
                    return Ok(Pattern::Ident(segments[0], Mutability::Immutable));
                }

                if self.match_token(TokenKind::LParen) {
                    let mut elems = Vec::new();
                    if !self.check(TokenKind::RParen) {
                        loop {
                            elems.push(self.parse_pattern()?);
                            if !self.match_token(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect_or_abort(TokenKind::RParen, "`)`")?;
                    return Ok(Pattern::TupleStruct(segments, elems));
                }

                if self.match_token(TokenKind::LBrace) {
                    let mut fields = Vec::new();
                    if !self.check(TokenKind::RBrace) {
                        loop {
                            let field_tok = self.expect_or_abort(TokenKind::Identifier, "a field name")?;
                            let field_name = self.symbol_of(field_tok);
                            let pattern = if self.match_token(TokenKind::Colon) {
                                self.parse_pattern()?
                            } else {
                                Pattern::Ident(field_name, Mutability::Immutable)
                            };
                            fields.push((field_name, pattern));
                            if !self.match_token(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect_or_abort(TokenKind::RBrace, "`}`")?;
                    return Ok(Pattern::Struct(segments, fields));
                }

                Ok(Pattern::Path(segments))
            }

            TokenKind::LParen => {
                self.advance();
                let mut elems = Vec::new();
                if !self.check(TokenKind::RParen) {
                    loop {
                        elems.push(self.parse_pattern()?);
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect_or_abort(TokenKind::RParen, "`)`")?;
                Ok(Pattern::Tuple(elems))
            }

            TokenKind::LBracket => {
                self.advance();
                let mut elems = Vec::new();
                if !self.check(TokenKind::RBracket) {
                    loop {
                        elems.push(self.parse_pattern()?);
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect_or_abort(TokenKind::RBracket, "`]`")?;
                Ok(Pattern::Slice(elems))
            }

            _ => {
                self.error_expected("a pattern", tok);
                self.fail_if_strict(Pattern::Wildcard)
            }
        }
    }
}
