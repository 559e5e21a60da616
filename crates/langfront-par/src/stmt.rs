//! Block, statement, `use`, and attribute-statement parsing.
//!
//! `parse_block` is the hub every block-form expression in `expr.rs`
//! and every function/method body in `items.rs` routes through: a
//! block is a list of statements plus an optional trailing expression
//! that has no `;` and so is the block's value.

use langfront_lex::TokenKind;
use langfront_util::DiagnosticCode;

use crate::ast::{
    AssignStatement, AttributeStatement, AttributeUse, Block, BinaryOperator, ExpressionStatement,
    NodeId, PathExpression, PathSegment, StorageAttributes, UsePath, UseStatement,
};
use crate::{starts_declaration, PResult, Parser};

fn is_assign_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::ColonEq
            | TokenKind::Eq
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq
            | TokenKind::AmpEq
            | TokenKind::PipeEq
            | TokenKind::CaretEq
            | TokenKind::LtLtEq
            | TokenKind::GtGtEq
    )
}

impl<'a> Parser<'a> {
    /// Consumes the prefix run of storage-attribute keywords, combining
    /// them into one bitset. Diagnoses the `const`/`mut` conflict (I4)
    /// without dropping either bit, so downstream callers still see
    /// exactly what was written.
    pub(crate) fn parse_storage_attributes(&mut self) -> StorageAttributes {
        let mut attrs = StorageAttributes::EMPTY;
        while crate::starts_storage_attribute(self.current().kind) {
            let tok = self.advance();
            let bit = match tok.kind {
                TokenKind::Mut => StorageAttributes::MUTABLE,
                TokenKind::Const => StorageAttributes::CONSTANT,
                TokenKind::Extern => StorageAttributes::EXTERN,
                TokenKind::Static => StorageAttributes::STATIC,
                TokenKind::ThreadLocal => StorageAttributes::THREAD_LOCAL,
                TokenKind::Pub => StorageAttributes::PUBLIC,
                TokenKind::Async => StorageAttributes::ASYNC,
                TokenKind::Unsafe => StorageAttributes::UNSAFE,
                TokenKind::Fast => StorageAttributes::FAST,
                _ => unreachable!("starts_storage_attribute admitted a non-attribute token"),
            };
            let conflicts = (bit == StorageAttributes::CONSTANT && attrs.contains(StorageAttributes::MUTABLE))
                || (bit == StorageAttributes::MUTABLE && attrs.contains(StorageAttributes::CONSTANT));
            if conflicts {
                let span = self.span_of(tok);
                self.emit(
                    DiagnosticCode::E_CONFLICTING_STORAGE_ATTRIBUTES,
                    "`const` and `mut` cannot both apply to the same declaration",
                    span,
                );
            }
            attrs.insert(bit);
        }
        attrs
    }

    /// `"{" stmt* "}"`. A trailing expression-statement with no `;`
    /// becomes the block's value and is not also pushed into
    /// `statements`.
    pub(crate) fn parse_block(&mut self) -> PResult<crate::ast::PayloadId<Block>> {
        self.expect_or_abort(TokenKind::LBrace, "`{`")?;
        let mut statements = Vec::new();
        let mut trailing = NodeId::INVALID;
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            let attrs = self.parse_storage_attributes();
            let kind = self.current().kind;
            let stmt = if starts_declaration(kind) {
                self.parse_declaration(attrs)?
            } else if kind == TokenKind::Use {
                self.parse_use_statement()?
            } else if kind == TokenKind::Hash {
                self.parse_attribute_statement()?
            } else {
                let (id, had_semicolon) = self.parse_statement_inner(attrs)?;
                if !had_semicolon && self.check(TokenKind::RBrace) {
                    trailing = id;
                    break;
                }
                id
            };
            statements.push(stmt);
        }
        self.expect_or_abort(TokenKind::RBrace, "`}`")?;
        let statements = self.ast.alloc_node_range(&statements);
        Ok(self.ast.alloc_block(Block { statements, trailing }))
    }

    /// Entry point used by the top-level and declaration dispatchers,
    /// where there's no enclosing block to hand a trailing value to.
    pub(crate) fn parse_statement(&mut self, attrs: StorageAttributes) -> PResult<NodeId> {
        let (id, _) = self.parse_statement_inner(attrs)?;
        Ok(id)
    }

    /// Returns the statement node plus whether a `;` terminated it, so
    /// `parse_block` can tell a true statement from a block's trailing
    /// value expression.
    fn parse_statement_inner(&mut self, attrs: StorageAttributes) -> PResult<(NodeId, bool)> {
        if self.looks_like_assign_statement() {
            return self.parse_assign_statement(attrs).map(|id| (id, true));
        }
        let expr = self.parse_expression()?;
        let had_semicolon = self.match_token(TokenKind::Semicolon);
        let id = self.ast.create(ExpressionStatement { expr });
        Ok((id, had_semicolon))
    }

    /// Distinguishes `[mut] ident (":" type)? (":=" | "=" | compound-assign)`
    /// from a plain expression statement without fully parsing either.
    /// `mut` always commits to an assignment. Otherwise, an identifier
    /// commits only if the *very next* token is an assign-family
    /// operator, or a `:` that is itself followed (after skipping
    /// exactly one balanced type expression) by one. A `.`, `(`, or `[`
    /// immediately after the identifier means this is a postfix/call
    /// chain, not a declaration — `parse_binary_expression` already
    /// handles assignment to any place expression that falls through to
    /// the general expression-statement path.
    fn looks_like_assign_statement(&self) -> bool {
        if self.check(TokenKind::Mut) {
            return true;
        }
        if !self.check(TokenKind::Identifier) {
            return false;
        }
        if is_assign_operator(self.peek(1).kind) {
            return true;
        }
        if self.peek(1).kind != TokenKind::Colon {
            return false;
        }
        let mut depth = 0i32;
        let mut scan = 2;
        loop {
            let tok = self.peek(scan);
            match tok.kind {
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBracket => depth -= 1,
                TokenKind::Eof | TokenKind::Semicolon | TokenKind::LBrace | TokenKind::Comma
                    if depth == 0 =>
                {
                    return false;
                }
                _ if depth == 0 && is_assign_operator(tok.kind) => return true,
                _ => {}
            }
            scan += 1;
            if scan > 64 || depth < 0 {
                return false;
            }
        }
    }

    fn parse_assign_statement(&mut self, mut attrs: StorageAttributes) -> PResult<NodeId> {
        if self.match_token(TokenKind::Mut) {
            attrs.insert(StorageAttributes::MUTABLE);
        }
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "a variable name")?;
        let target = {
            let segment = PathSegment { name: self.symbol_of(name_tok) };
            let range = self.ast.alloc_path_segments(vec![segment]);
            self.ast.create(PathExpression { segments: range, is_absolute: false })
        };
        let ty = self.parse_optional_type_annotation()?;

        let op_tok = self.current();
        let op = match op_tok.kind {
            TokenKind::ColonEq => BinaryOperator::Declare,
            TokenKind::Eq => BinaryOperator::Assign,
            TokenKind::PlusEq => BinaryOperator::CompoundAdd,
            TokenKind::MinusEq => BinaryOperator::CompoundSub,
            TokenKind::StarEq => BinaryOperator::CompoundMul,
            TokenKind::SlashEq => BinaryOperator::CompoundDiv,
            TokenKind::PercentEq => BinaryOperator::CompoundMod,
            TokenKind::AmpEq => BinaryOperator::CompoundAnd,
            TokenKind::PipeEq => BinaryOperator::CompoundOr,
            TokenKind::CaretEq => BinaryOperator::CompoundXor,
            TokenKind::LtLtEq => BinaryOperator::CompoundShl,
            TokenKind::GtGtEq => BinaryOperator::CompoundShr,
            _ => {
                self.error_expected("`:=`, `=`, or a compound-assignment operator", op_tok);
                return self.fail_if_strict(self.ast.create(AssignStatement {
                    target,
                    ty,
                    op: BinaryOperator::Assign,
                    value: NodeId::INVALID,
                    attrs,
                }));
            }
        };
        self.advance();
        let value = self.parse_expression()?;
        self.expect_or_abort(TokenKind::Semicolon, "`;`")?;
        Ok(self.ast.create(AssignStatement { target, ty, op, value, attrs }))
    }

    pub(crate) fn parse_use_statement(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Use, "`use`")?;
        let mut paths = Vec::new();
        if self.match_token(TokenKind::LBrace) {
            if !self.check(TokenKind::RBrace) {
                loop {
                    paths.push(self.parse_use_path()?);
                    if !self.match_token(TokenKind::Comma) {
                        break;
                    }
                    if self.check(TokenKind::RBrace) {
                        break;
                    }
                }
            }
            self.expect_or_abort(TokenKind::RBrace, "`}`")?;
        } else {
            paths.push(self.parse_use_path()?);
        }
        self.expect_or_abort(TokenKind::Semicolon, "`;`")?;
        let paths = self.ast.alloc_use_paths(paths);
        Ok(self.ast.create(UseStatement { paths }))
    }

    fn parse_use_path(&mut self) -> PResult<UsePath> {
        let mut segments = Vec::new();
        loop {
            let tok = self.expect_or_abort(TokenKind::Identifier, "a path segment")?;
            segments.push(self.symbol_of(tok));
            if !self.match_token(TokenKind::ColonColon) {
                break;
            }
        }
        let alias = if self.match_token(TokenKind::As) {
            let tok = self.expect_or_abort(TokenKind::Identifier, "an alias name")?;
            Some(self.symbol_of(tok))
        } else {
            None
        };
        Ok(UsePath { segments, alias })
    }

    pub(crate) fn parse_attribute_statement(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Hash, "`#`")?;
        self.expect_or_abort(TokenKind::LBracket, "`[`")?;
        let mut attrs = Vec::new();
        if !self.check(TokenKind::RBracket) {
            loop {
                attrs.push(self.parse_attribute_use()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
                if self.check(TokenKind::RBracket) {
                    break;
                }
            }
        }
        self.expect_or_abort(TokenKind::RBracket, "`]`")?;
        let attrs = self.ast.alloc_attribute_uses(attrs);
        Ok(self.ast.create(AttributeStatement { attrs }))
    }

    fn parse_attribute_use(&mut self) -> PResult<AttributeUse> {
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "an attribute name")?;
        let name = self.symbol_of(name_tok);
        let mut args = Vec::new();
        if self.match_token(TokenKind::LParen) {
            if !self.check(TokenKind::RParen) {
                loop {
                    let tok = self.current();
                    if tok.kind.is_literal() || tok.kind == TokenKind::Identifier {
                        self.advance();
                        args.push(self.symbol_of(tok));
                    } else {
                        self.error_expected("an attribute argument", tok);
                        break;
                    }
                    if !self.match_token(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect_or_abort(TokenKind::RParen, "`)`")?;
        }
        Ok(AttributeUse { name, args })
    }
}
