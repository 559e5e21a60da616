//! Type-expression parsing.
//!
//! There are no generics anywhere in the grammar, so a type expression
//! is always one of: the unit type `()`, a primitive keyword, a named
//! path, a reference/pointer, a slice/array, a tuple, or a function
//! type. [`crate::ast::Type`] stays a plain recursive enum rather than
//! an arena node — nothing downstream ever re-addresses "the 3rd type
//! expression" on its own, so the indirection arena ids exist for
//! elsewhere would only add overhead here.

use langfront_lex::TokenKind;

use crate::ast::{Mutability, PrimitiveType, Type};
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn parse_type(&mut self) -> PResult<Type> {
        let tok = self.current();
        match tok.kind {
            TokenKind::I8 => { self.advance(); Ok(Type::Primitive(PrimitiveType::I8)) }
            TokenKind::I16 => { self.advance(); Ok(Type::Primitive(PrimitiveType::I16)) }
            TokenKind::I32 => { self.advance(); Ok(Type::Primitive(PrimitiveType::I32)) }
            TokenKind::I64 => { self.advance(); Ok(Type::Primitive(PrimitiveType::I64)) }
            TokenKind::Isize => { self.advance(); Ok(Type::Primitive(PrimitiveType::Isize)) }
            TokenKind::U8 => { self.advance(); Ok(Type::Primitive(PrimitiveType::U8)) }
            TokenKind::U16 => { self.advance(); Ok(Type::Primitive(PrimitiveType::U16)) }
            TokenKind::U32 => { self.advance(); Ok(Type::Primitive(PrimitiveType::U32)) }
            TokenKind::U64 => { self.advance(); Ok(Type::Primitive(PrimitiveType::U64)) }
            TokenKind::Usize => { self.advance(); Ok(Type::Primitive(PrimitiveType::Usize)) }
            TokenKind::F32 => { self.advance(); Ok(Type::Primitive(PrimitiveType::F32)) }
            TokenKind::F64 => { self.advance(); Ok(Type::Primitive(PrimitiveType::F64)) }
            TokenKind::Bool => { self.advance(); Ok(Type::Primitive(PrimitiveType::Bool)) }
            TokenKind::Char => { self.advance(); Ok(Type::Primitive(PrimitiveType::Char)) }

            TokenKind::Identifier => {
                let tok = self.advance();
                Ok(Type::Named(self.symbol_of(tok)))
            }

            // `&T`, `&mut T`
            TokenKind::Amp => {
                self.advance();
                let mutable = self.match_token(TokenKind::Mut);
                let inner = self.parse_type()?;
                Ok(Type::Reference(
                    Box::new(inner),
                    if mutable { Mutability::Mutable } else { Mutability::Immutable },
                ))
            }

            // `*T`, `*mut T`. Unambiguous in type position: `**` never
            // starts a type, unlike in expression position.
            TokenKind::Star => {
                self.advance();
                let mutable = self.match_token(TokenKind::Mut);
                let inner = self.parse_type()?;
                Ok(Type::Pointer(
                    Box::new(inner),
                    if mutable { Mutability::Mutable } else { Mutability::Immutable },
                ))
            }

            // `[T]` slice, `[T; N]` array.
            TokenKind::LBracket => {
                self.advance();
                let elem = self.parse_type()?;
                if self.match_token(TokenKind::Semicolon) {
                    let count_tok = self.expect_or_abort(TokenKind::LiteralDecimal, "array length")?;
                    let count = self.lexeme_of(count_tok).replace('_', "").parse::<u64>().unwrap_or(0);
                    self.expect_or_abort(TokenKind::RBracket, "`]`")?;
                    Ok(Type::Array(Box::new(elem), count))
                } else {
                    self.expect_or_abort(TokenKind::RBracket, "`]`")?;
                    Ok(Type::Slice(Box::new(elem)))
                }
            }

            // `()` unit, `(T)` grouped (collapses to `T`), `(T, U)`
            // tuple, `(T, U) -> R` function type.
            TokenKind::LParen => {
                self.advance();
                let mut elems = Vec::new();
                if !self.check(TokenKind::RParen) {
                    loop {
                        elems.push(self.parse_type()?);
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                        if self.check(TokenKind::RParen) {
                            break;
                        }
                    }
                }
                self.expect_or_abort(TokenKind::RParen, "`)`")?;

                if self.match_token(TokenKind::Arrow) {
                    let ret = self.parse_type()?;
                    return Ok(Type::Fn(elems, Box::new(ret)));
                }

                match elems.len() {
                    0 => Ok(Type::Unit),
                    1 => Ok(elems.into_iter().next().unwrap()),
                    _ => Ok(Type::Tuple(elems)),
                }
            }

            _ => {
                self.error_expected("a type", tok);
                self.fail_if_strict(Type::Inferred)
            }
        }
    }

    /// Parses an optional `: Type` annotation, used by parameters,
    /// field definitions, and typed assignment statements.
    pub(crate) fn parse_optional_type_annotation(&mut self) -> PResult<Option<Type>> {
        if self.match_token(TokenKind::Colon) {
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }
}
