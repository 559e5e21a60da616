//! Declaration parsing: `fn`, `struct`, `enum`, `trait`, `impl`, `union`,
//! `module`, `redirect`.
//!
//! [`Parser::parse_declaration`] is the single dispatch point every
//! caller (the top level, a block's statement loop, a `module` body)
//! routes through once [`crate::starts_declaration`] has already
//! confirmed the current token begins one of these eight forms.

use langfront_lex::TokenKind;

use crate::ast::{
    EnumVariant, EnumVariantData, EnumerationDeclaration, FieldDef, FnSignature,
    FunctionDeclaration, ImplementationDeclaration, ModuleDeclaration, NodeId, Param,
    RedirectDeclaration, StorageAttributes, StructDeclaration, TraitDeclaration, UnionDeclaration,
};
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    /// Dispatches on the current token, which the caller has already
    /// confirmed starts a declaration. `attrs` is the storage-attribute
    /// prefix the caller consumed before dispatching here; only the
    /// declaration kinds whose payload actually carries a `StorageAttributes`
    /// field (`fn`, `struct`, `enum`) use it.
    pub(crate) fn parse_declaration(&mut self, attrs: StorageAttributes) -> PResult<NodeId> {
        match self.current().kind {
            TokenKind::Fn => self.parse_function_declaration(attrs),
            TokenKind::Struct => self.parse_struct_declaration(attrs),
            TokenKind::Enum => self.parse_enum_declaration(attrs),
            TokenKind::Trait => self.parse_trait_declaration(),
            TokenKind::Impl => self.parse_impl_declaration(),
            TokenKind::Union => self.parse_union_declaration(),
            TokenKind::Module => self.parse_module_declaration(),
            TokenKind::Redirect => self.parse_redirect_declaration(),
            _ => unreachable!("parse_declaration called on a token that doesn't start one"),
        }
    }

    /// `"(" [mut] name ":" type ("," ...)* ")"`, shared by `fn` items,
    /// trait method signatures, and `impl` methods (which route back
    /// through [`Parser::parse_function_declaration`]).
    fn parse_param_list(&mut self) -> PResult<Vec<Param>> {
        self.expect_or_abort(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let mutable = self.match_token(TokenKind::Mut);
                let name_tok = self.expect_or_abort(TokenKind::Identifier, "a parameter name")?;
                let name = self.symbol_of(name_tok);
                self.expect_or_abort(TokenKind::Colon, "`:`")?;
                let ty = self.parse_type()?;
                params.push(Param { name, ty, mutable });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
                if self.check(TokenKind::RParen) {
                    break;
                }
            }
        }
        self.expect_or_abort(TokenKind::RParen, "`)`")?;
        Ok(params)
    }

    /// `"{" name ":" type ("," ...)* "}"`, shared by `struct`, `union`,
    /// and struct-like enum variants.
    fn parse_field_list(&mut self) -> PResult<Vec<FieldDef>> {
        self.expect_or_abort(TokenKind::LBrace, "`{`")?;
        let mut fields = Vec::new();
        if !self.check(TokenKind::RBrace) {
            loop {
                let name_tok = self.expect_or_abort(TokenKind::Identifier, "a field name")?;
                let name = self.symbol_of(name_tok);
                self.expect_or_abort(TokenKind::Colon, "`:`")?;
                let ty = self.parse_type()?;
                fields.push(FieldDef { name, ty });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
                if self.check(TokenKind::RBrace) {
                    break;
                }
            }
        }
        self.expect_or_abort(TokenKind::RBrace, "`}`")?;
        Ok(fields)
    }

    /// `"fn" name "(" params ")" ["->" type] block`.
    fn parse_function_declaration(&mut self, attrs: StorageAttributes) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Fn, "`fn`")?;
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "a function name")?;
        let name = self.symbol_of(name_tok);
        let params = self.parse_param_list()?;
        let return_type =
            if self.match_token(TokenKind::Arrow) { Some(self.parse_type()?) } else { None };
        let body = self.parse_block()?;
        let params = self.ast.alloc_params(params);
        Ok(self.ast.create(FunctionDeclaration { name, params, return_type, body, attrs }))
    }

    /// `"struct" name "{" fields "}"`.
    fn parse_struct_declaration(&mut self, attrs: StorageAttributes) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Struct, "`struct`")?;
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "a struct name")?;
        let name = self.symbol_of(name_tok);
        let fields = self.parse_field_list()?;
        let fields = self.ast.alloc_fields(fields);
        Ok(self.ast.create(StructDeclaration { name, fields, attrs }))
    }

    /// `"enum" name "{" variant ("," variant)* "}"`. A variant is a bare
    /// name (`Empty`), a tuple form `Name(T, U)`, or a struct-like form
    /// `Name { field: T }`.
    fn parse_enum_declaration(&mut self, attrs: StorageAttributes) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Enum, "`enum`")?;
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "an enum name")?;
        let name = self.symbol_of(name_tok);
        self.expect_or_abort(TokenKind::LBrace, "`{`")?;
        let mut variants = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            let variant_name_tok = self.expect_or_abort(TokenKind::Identifier, "a variant name")?;
            let variant_name = self.symbol_of(variant_name_tok);
            let data = if self.match_token(TokenKind::LParen) {
                let mut types = Vec::new();
                if !self.check(TokenKind::RParen) {
                    loop {
                        types.push(self.parse_type()?);
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                        if self.check(TokenKind::RParen) {
                            break;
                        }
                    }
                }
                self.expect_or_abort(TokenKind::RParen, "`)`")?;
                EnumVariantData::Tuple(types)
            } else if self.check(TokenKind::LBrace) {
                EnumVariantData::Struct(self.parse_field_list()?)
            } else {
                EnumVariantData::Empty
            };
            variants.push(EnumVariant { name: variant_name, data });
            if !self.match_token(TokenKind::Comma) {
                break;
            }
            if self.check(TokenKind::RBrace) {
                break;
            }
        }
        self.expect_or_abort(TokenKind::RBrace, "`}`")?;
        let variants = self.ast.alloc_variants(variants);
        Ok(self.ast.create(EnumerationDeclaration { name, variants, attrs }))
    }

    /// `"trait" name "{" ("fn" name "(" params ")" ["->" type] ";")* "}"`.
    /// Trait methods have no body; a mismatched token is diagnosed and
    /// skipped one at a time (rather than via `synchronize`, which would
    /// make no progress if the stray token itself starts a declaration).
    fn parse_trait_declaration(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Trait, "`trait`")?;
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "a trait name")?;
        let name = self.symbol_of(name_tok);
        self.expect_or_abort(TokenKind::LBrace, "`{`")?;
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            if !self.check(TokenKind::Fn) {
                let tok = self.current();
                self.error_expected("`fn`", tok);
                self.advance();
                continue;
            }
            self.advance();
            let m_name_tok = self.expect_or_abort(TokenKind::Identifier, "a method name")?;
            let m_name = self.symbol_of(m_name_tok);
            let params = self.parse_param_list()?;
            let return_type =
                if self.match_token(TokenKind::Arrow) { Some(self.parse_type()?) } else { None };
            self.expect_or_abort(TokenKind::Semicolon, "`;`")?;
            let params = self.ast.alloc_params(params);
            methods.push(FnSignature { name: m_name, params, return_type });
        }
        self.expect_or_abort(TokenKind::RBrace, "`}`")?;
        let methods = self.ast.alloc_fn_sigs(methods);
        Ok(self.ast.create(TraitDeclaration { name, methods }))
    }

    /// Bounded forward scan (no parsing) that tells `impl Trait for
    /// Target { .. }` apart from an inherent `impl Target { .. }`: the
    /// trait form always has a top-level `for` before the opening brace.
    fn impl_has_trait_clause(&self) -> bool {
        let mut depth: i32 = 0;
        let mut offset = 0usize;
        loop {
            let tok = self.peek(offset);
            match tok.kind {
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBracket => depth -= 1,
                TokenKind::LBrace if depth == 0 => return false,
                TokenKind::For if depth == 0 => return true,
                TokenKind::Eof => return false,
                _ => {}
            }
            offset += 1;
            if offset > 256 {
                return false;
            }
        }
    }

    /// `"impl" (path "for")? type "{" ("fn" ...)* "}"`.
    fn parse_impl_declaration(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Impl, "`impl`")?;
        let trait_path = if self.impl_has_trait_clause() {
            let path = self.parse_path_expression()?;
            self.expect_or_abort(TokenKind::For, "`for`")?;
            path
        } else {
            NodeId::INVALID
        };
        let target = self.parse_type()?;
        self.expect_or_abort(TokenKind::LBrace, "`{`")?;
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            let attrs = self.parse_storage_attributes();
            if self.check(TokenKind::Fn) {
                methods.push(self.parse_function_declaration(attrs)?);
            } else {
                let tok = self.current();
                self.error_expected("`fn`", tok);
                self.advance();
            }
        }
        self.expect_or_abort(TokenKind::RBrace, "`}`")?;
        let methods = self.ast.alloc_node_range(&methods);
        Ok(self.ast.create(ImplementationDeclaration { trait_path, target, methods }))
    }

    /// `"union" name "{" fields "}"`. Shares layout with `struct` but has
    /// no storage-attribute bitset of its own (§3 payload shapes).
    fn parse_union_declaration(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Union, "`union`")?;
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "a union name")?;
        let name = self.symbol_of(name_tok);
        let fields = self.parse_field_list()?;
        let fields = self.ast.alloc_fields(fields);
        Ok(self.ast.create(UnionDeclaration { name, fields }))
    }

    /// `"module" name "{" item* "}"`. A module body admits the same
    /// declaration/statement grammar as the top level.
    fn parse_module_declaration(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Module, "`module`")?;
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "a module name")?;
        let name = self.symbol_of(name_tok);
        self.expect_or_abort(TokenKind::LBrace, "`{`")?;
        let mut items = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            items.push(self.parse_declaration_or_statement()?);
        }
        self.expect_or_abort(TokenKind::RBrace, "`}`")?;
        let items = self.ast.alloc_node_range(&items);
        Ok(self.ast.create(ModuleDeclaration { name, items }))
    }

    /// `"redirect" name "->" target`, where `target` is a path pointing
    /// at the declaration being re-exported under `name`.
    fn parse_redirect_declaration(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Redirect, "`redirect`")?;
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "a redirect name")?;
        let name = self.symbol_of(name_tok);
        self.expect_or_abort(TokenKind::Arrow, "`->`")?;
        let target = self.parse_path_expression()?;
        Ok(self.ast.create(RedirectDeclaration { name, target }))
    }
}
