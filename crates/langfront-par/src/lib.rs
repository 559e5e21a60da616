//! Syntactic analysis for the Langfront front end.
//!
//! The parser is a Pratt-style precedence-climbing recursive-descent
//! parser: it consumes a [`langfront_lex::TokenStream`] and produces an
//! index-addressable AST (see [`ast`]) rather than a tree of owning
//! pointers. Every production allocates its children first, so a node's
//! `NodeId` is always strictly greater than any `NodeId` it references —
//! the tree is topologically ordered by construction, not by a later
//! pass.
//!
//! ```ebnf
//! program    = (declaration | statement)* ;
//! statement  = assign_stmt | attribute_stmt | use_stmt | expr_stmt ;
//! expression = parse_binary_expression(0) ;
//! ```
//!
//! Two parsing modes, set once per [`Parser`]:
//! - [`ParserMode::Strict`] — the first diagnostic aborts the file.
//! - [`ParserMode::Recovery`] — diagnostics are collected and
//!   [`Parser::synchronize`] skips to the next safe token so parsing
//!   of the rest of the file can continue.

pub mod ast;
pub mod expr;
pub mod items;
pub mod pattern;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod edge_cases;

use langfront_lex::{Token, TokenKind, TokenStream};
use langfront_util::{Diagnostic, DiagnosticCode, Handler, SourceLocation, Span};

pub use ast::{AstContext, NodeId, NodeKind};

/// Whether the parser aborts on the first error or collects diagnostics
/// and keeps going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserMode {
    Strict,
    Recovery,
}

/// Result of [`Parser::parse_all`]: the top-level items in source order,
/// the arena they live in, and every diagnostic collected along the way.
pub struct ParseResult {
    pub items: Vec<NodeId>,
    pub ast: AstContext,
    pub diagnostics: Vec<Diagnostic>,
}

/// Signals that [`ParserMode::Strict`] hit a diagnostic and the caller
/// should stop; carries no payload because the diagnostic itself was
/// already emitted to the handler.
pub(crate) struct Aborted;

pub(crate) type PResult<T> = Result<T, Aborted>;

/// Token-kind start sets the parser needs in more than one module.
/// Declared once here so `items.rs`/`stmt.rs`/`lib.rs` agree on them.
pub(crate) fn starts_declaration(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Fn
            | TokenKind::Struct
            | TokenKind::Enum
            | TokenKind::Trait
            | TokenKind::Impl
            | TokenKind::Union
            | TokenKind::Module
            | TokenKind::Redirect
    )
}

pub(crate) fn starts_storage_attribute(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Mut
            | TokenKind::Const
            | TokenKind::Extern
            | TokenKind::Static
            | TokenKind::ThreadLocal
            | TokenKind::Pub
            | TokenKind::Async
            | TokenKind::Unsafe
            | TokenKind::Fast
    )
}

fn is_synchronization_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Fn
            | TokenKind::Struct
            | TokenKind::Enum
            | TokenKind::Trait
            | TokenKind::Impl
            | TokenKind::Union
            | TokenKind::Module
            | TokenKind::If
            | TokenKind::While
            | TokenKind::For
            | TokenKind::Loop
            | TokenKind::Match
            | TokenKind::Mut
            | TokenKind::Pub
            | TokenKind::Return
    )
}

/// Drives precedence-climbing expression parsing and recursive-descent
/// statement/declaration parsing over one file's token stream, building
/// its result directly into an [`AstContext`].
pub struct Parser<'a> {
    pub(crate) tokens: TokenStream<'a>,
    pub(crate) source: &'a [u8],
    pub(crate) handler: &'a Handler,
    pub(crate) ast: AstContext,
    pub(crate) mode: ParserMode,
    /// Whether a bare `path { ... }` should parse as a construct
    /// expression. Cleared while parsing the condition of `if`/`while`/
    /// `for`/`match` so the opening brace of the loop/arm body isn't
    /// swallowed as a struct literal; parenthesized/bracketed
    /// sub-expressions restore it since grouping disambiguates.
    pub(crate) struct_literal_allowed: std::cell::Cell<bool>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: TokenStream<'a>, source: &'a [u8], handler: &'a Handler, mode: ParserMode) -> Self {
        Self {
            tokens,
            source,
            handler,
            ast: AstContext::new(),
            mode,
            struct_literal_allowed: std::cell::Cell::new(true),
        }
    }

    /// Parses an entire file and returns its top-level items, the arena
    /// they were allocated in, and the diagnostics collected.
    ///
    /// In [`ParserMode::Strict`], the first diagnostic stops parsing and
    /// `items` holds whatever top-level items were completed before it.
    pub fn parse_all(mut self) -> ParseResult {
        let mut items = Vec::new();
        while !self.at_eof() {
            match self.parse_declaration_or_statement() {
                Ok(id) => items.push(id),
                Err(Aborted) => break,
            }
        }
        ParseResult { items, ast: self.ast, diagnostics: self.handler.diagnostics() }
    }

    // --- shared token-cursor helpers, used by every submodule ---

    #[inline]
    pub(crate) fn peek(&self, offset: usize) -> Token {
        self.tokens.peek_non_whitespace(offset)
    }

    #[inline]
    pub(crate) fn current(&self) -> Token {
        self.peek(0)
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Consumes and returns the current (non-trivia) token.
    pub(crate) fn advance(&mut self) -> Token {
        self.tokens.next_non_whitespace()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consumes the current token if it matches `kind`.
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token, diagnosing `E_PARSER_EXPECTED_TOKEN`
    /// if it isn't `kind`. Returns the token either way so recovery-mode
    /// callers can keep building a best-effort node; strict mode should
    /// propagate `Err(Aborted)` instead via [`Parser::expect_or_abort`].
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Token {
        if self.check(kind) {
            self.advance()
        } else {
            let tok = self.current();
            self.error_expected(what, tok);
            tok
        }
    }

    /// Like [`Parser::expect`] but aborts the file in strict mode. In
    /// recovery mode, returns the (wrong) current token without
    /// consuming it so the caller can still splice something into the
    /// tree and let `synchronize()` clean up later.
    pub(crate) fn expect_or_abort(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let tok = self.current();
            self.error_expected(what, tok);
            self.fail_if_strict(tok)
        }
    }

    pub(crate) fn span_of(&self, tok: Token) -> Span {
        Span::new(tok.range, tok.start)
    }

    pub(crate) fn lexeme_of(&self, tok: Token) -> &'a str {
        std::str::from_utf8(tok.lexeme(self.source)).unwrap_or("")
    }

    pub(crate) fn symbol_of(&self, tok: Token) -> langfront_util::Symbol {
        langfront_util::Symbol::intern(self.lexeme_of(tok))
    }

    pub(crate) fn literal_kind_of(&self, kind: TokenKind) -> ast::LiteralKind {
        match kind {
            TokenKind::LiteralDecimal => ast::LiteralKind::Decimal,
            TokenKind::LiteralBinary => ast::LiteralKind::Binary,
            TokenKind::LiteralOctal => ast::LiteralKind::Octal,
            TokenKind::LiteralHex => ast::LiteralKind::Hex,
            TokenKind::LiteralFloat => ast::LiteralKind::Float,
            TokenKind::LiteralString => ast::LiteralKind::Str,
            TokenKind::LiteralChar => ast::LiteralKind::Char,
            TokenKind::True | TokenKind::False => ast::LiteralKind::Bool,
            other => unreachable!("literal_kind_of called on non-literal token {other:?}"),
        }
    }

    pub(crate) fn emit(&self, code: DiagnosticCode, message: impl Into<String>, span: Span) {
        self.handler.emit_diagnostic(Diagnostic::error(message, span).with_code(code));
    }

    pub(crate) fn error_unexpected(&self, tok: Token) {
        let span = self.span_of(tok);
        self.emit(
            DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
            format!("unexpected token {:?}", tok.kind),
            span,
        );
    }

    pub(crate) fn error_expected(&self, what: &str, found: Token) {
        let span = self.span_of(found);
        self.emit(
            DiagnosticCode::E_EXPECTED_BUT_FOUND,
            format!("expected {what}, found {:?}", found.kind),
            span,
        );
    }

    /// In strict mode, converts "an error was just emitted" into an
    /// abort. In recovery mode, synchronizes to the next safe token
    /// (guaranteeing forward progress, per the recovery-progress
    /// invariant) and returns `recovery_value` so the caller can splice
    /// a placeholder into the tree and keep going.
    pub(crate) fn fail_if_strict<T>(&mut self, recovery_value: T) -> PResult<T> {
        match self.mode {
            ParserMode::Strict => Err(Aborted),
            ParserMode::Recovery => {
                self.synchronize();
                Ok(recovery_value)
            }
        }
    }

    /// Advances to the next synchronization point: a consumed `;`,
    /// `Eof`, or the token just before the start of a declaration /
    /// statement keyword (§ error recovery). Guaranteed to strictly
    /// advance the cursor unless already at `Eof`.
    pub(crate) fn synchronize(&mut self) {
        loop {
            let tok = self.current();
            if tok.kind == TokenKind::Eof {
                return;
            }
            if tok.kind == TokenKind::Semicolon {
                self.advance();
                return;
            }
            if is_synchronization_start(tok.kind) {
                return;
            }
            self.advance();
        }
    }

    pub(crate) fn parse_declaration_or_statement(&mut self) -> PResult<NodeId> {
        let attrs = self.parse_storage_attributes();
        let kind = self.current().kind;
        if starts_declaration(kind) {
            self.parse_declaration(attrs)
        } else if kind == TokenKind::Use {
            self.parse_use_statement()
        } else if kind == TokenKind::Hash {
            self.parse_attribute_statement()
        } else {
            self.parse_statement(attrs)
        }
    }
}
