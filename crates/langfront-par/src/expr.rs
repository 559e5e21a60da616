//! Expression parsing: precedence-climbing binary operators over a
//! prefix/postfix unary chain over primary expressions.
//!
//! Binding strength follows the table's "Level" column literally:
//! level 1 (postfix) binds tightest, level 15 (assignment) loosest.
//! [`Parser::parse_binary_expression`] takes the *loosest* level it is
//! allowed to consume as `min_precedence` and refuses any operator whose
//! level is numerically greater than that; a right-associative operator
//! recurses at its own level (so a second same-level operator to its
//! right is still in reach), a left-associative one recurses one level
//! tighter (so a same-level operator to its right stops and lets the
//! caller fold left instead).

use langfront_lex::TokenKind;
use langfront_util::DiagnosticCode;

use crate::ast::{
    ArrayExpression, AwaitExpression, BinaryExpression, BinaryOperator, BreakExpression,
    ClosureExpression, ConstBlockExpression, ConstructExpression, ConstructField, ContinueExpression,
    FastExpression, FieldAccessExpression, ForExpression, FunctionCallExpression,
    FunctionMacroCallExpression, GroupedExpression, IfBranch, IfExpression, IndexExpression,
    LiteralExpression, LoopExpression, MatchArm, MatchExpression, MethodCallExpression,
    MethodMacroCallExpression, NodeId, NodeKind, NodeRange, Param, PathExpression, PathSegment,
    RangeExpression, RangeKind, ReturnExpression, TupleExpression, UnaryExpression, UnaryOperator,
    UnsafeExpression, WhileExpression,
};
use crate::{PResult, Parser};

/// Tokens that can begin an expression. Used to decide whether an
/// optional trailing piece (a range end, a `ret`/`break` value) is
/// actually present or the production should stop here.
pub(crate) fn token_starts_expression(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::This
            | TokenKind::ColonColon
            | TokenKind::LiteralDecimal
            | TokenKind::LiteralBinary
            | TokenKind::LiteralOctal
            | TokenKind::LiteralHex
            | TokenKind::LiteralFloat
            | TokenKind::LiteralString
            | TokenKind::LiteralChar
            | TokenKind::True
            | TokenKind::False
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LBrace
            | TokenKind::If
            | TokenKind::While
            | TokenKind::For
            | TokenKind::Loop
            | TokenKind::Match
            | TokenKind::Unsafe
            | TokenKind::Fast
            | TokenKind::Const
            | TokenKind::Return
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus
            | TokenKind::Bang
            | TokenKind::Tilde
            | TokenKind::Plus
            | TokenKind::Minus
    )
}

/// Precedence level (smaller = tighter), operator, and whether it's
/// right-associative, for every token that can appear as a binary
/// operator. `None` for anything else.
fn binary_operator_info(kind: TokenKind) -> Option<(u8, BinaryOperator, bool)> {
    use TokenKind::*;
    Some(match kind {
        StarStar => (3, BinaryOperator::Pow, true),

        Star => (4, BinaryOperator::Mul, false),
        Slash => (4, BinaryOperator::Div, false),
        Percent => (4, BinaryOperator::Mod, false),

        Plus => (5, BinaryOperator::Add, false),
        Minus => (5, BinaryOperator::Sub, false),

        LtLt => (6, BinaryOperator::Shl, false),
        GtGt => (6, BinaryOperator::Shr, false),

        Spaceship => (7, BinaryOperator::Spaceship, false),

        Lt => (8, BinaryOperator::Lt, false),
        LtEq => (8, BinaryOperator::Le, false),
        Gt => (8, BinaryOperator::Gt, false),
        GtEq => (8, BinaryOperator::Ge, false),

        EqEq => (9, BinaryOperator::Eq, false),
        BangEq => (9, BinaryOperator::Ne, false),

        Amp => (10, BinaryOperator::BitAnd, false),
        Caret => (11, BinaryOperator::BitXor, false),
        Pipe => (12, BinaryOperator::BitOr, false),

        AmpAmp => (13, BinaryOperator::And, false),
        PipePipe => (14, BinaryOperator::Or, false),

        Eq => (15, BinaryOperator::Assign, true),
        ColonEq => (15, BinaryOperator::Declare, true),
        PlusEq => (15, BinaryOperator::CompoundAdd, true),
        MinusEq => (15, BinaryOperator::CompoundSub, true),
        StarEq => (15, BinaryOperator::CompoundMul, true),
        SlashEq => (15, BinaryOperator::CompoundDiv, true),
        PercentEq => (15, BinaryOperator::CompoundMod, true),
        AmpEq => (15, BinaryOperator::CompoundAnd, true),
        PipeEq => (15, BinaryOperator::CompoundOr, true),
        CaretEq => (15, BinaryOperator::CompoundXor, true),
        LtLtEq => (15, BinaryOperator::CompoundShl, true),
        GtGtEq => (15, BinaryOperator::CompoundShr, true),

        _ => return None,
    })
}

impl<'a> Parser<'a> {
    /// Entry point: the loosest level, 15, admits every operator.
    pub(crate) fn parse_expression(&mut self) -> PResult<NodeId> {
        self.parse_binary_expression(15)
    }

    /// Runs the condition of an `if`/`while`/`for`/`match` with struct
    /// literals suppressed, so the block that follows isn't swallowed as
    /// a construct expression's field list.
    pub(crate) fn parse_condition_expression(&mut self) -> PResult<NodeId> {
        let previous = self.struct_literal_allowed.replace(false);
        let result = self.parse_expression();
        self.struct_literal_allowed.set(previous);
        result
    }

    pub(crate) fn parse_binary_expression(&mut self, min_precedence: u8) -> PResult<NodeId> {
        let mut lhs = self.parse_unary()?;
        loop {
            let tok = self.current();
            let Some((precedence, op, right_assoc)) = binary_operator_info(tok.kind) else {
                if matches!(tok.kind, TokenKind::Bang | TokenKind::Tilde) {
                    let span = self.span_of(tok);
                    self.emit(
                        DiagnosticCode::E_CANNOT_BE_POSTFIX_OPERATOR,
                        format!("{:?} cannot be used as a postfix operator", tok.kind),
                        span,
                    );
                    return self.fail_if_strict(lhs);
                }
                break;
            };
            if precedence > min_precedence {
                break;
            }
            self.advance();
            if op.is_assignment() && !self.is_assignable_target(lhs) {
                let span = self.span_of(tok);
                self.emit(
                    DiagnosticCode::E_INVALID_ASSIGNMENT_OPERATOR,
                    "left-hand side of an assignment must be a place expression",
                    span,
                );
            }
            let next_min = if right_assoc { precedence } else { precedence - 1 };
            let rhs = self.parse_binary_expression(next_min)?;
            lhs = self.ast.create(BinaryExpression { op, lhs, rhs });
        }
        Ok(lhs)
    }

    fn is_assignable_target(&self, id: NodeId) -> bool {
        matches!(
            self.ast.node(id).kind,
            NodeKind::Path | NodeKind::FieldAccess | NodeKind::Index
        )
    }

    /// Right-to-left prefix chain (`++a --a !a ~a +a -a`), bottoming out
    /// at the postfix chain, then an optional range suffix.
    fn parse_unary(&mut self) -> PResult<NodeId> {
        let expr = self.parse_prefix()?;
        self.parse_optional_range(expr)
    }

    fn parse_prefix(&mut self) -> PResult<NodeId> {
        let op = match self.current().kind {
            TokenKind::PlusPlus => Some(UnaryOperator::PreIncr),
            TokenKind::MinusMinus => Some(UnaryOperator::PreDecr),
            TokenKind::Bang => Some(UnaryOperator::Not),
            TokenKind::Tilde => Some(UnaryOperator::BitNot),
            TokenKind::Plus => Some(UnaryOperator::Plus),
            TokenKind::Minus => Some(UnaryOperator::Neg),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix_chain();
        };
        self.advance();
        let operand = self.parse_prefix()?;
        Ok(self.ast.create(UnaryExpression { op, operand }))
    }

    fn parse_optional_range(&mut self, start: NodeId) -> PResult<NodeId> {
        let kind = match self.current().kind {
            TokenKind::DotDot => RangeKind::Exclusive,
            TokenKind::DotDotEq => RangeKind::Inclusive,
            TokenKind::DotDotLt => RangeKind::HalfOpenLt,
            _ => return Ok(start),
        };
        self.advance();
        let end = if token_starts_expression(self.current().kind) {
            self.parse_unary()?
        } else {
            NodeId::INVALID
        };
        Ok(self.ast.create(RangeExpression { start, end, kind }))
    }

    /// Left-to-right postfix chain: `a++`, `a--`, calls, indices, field
    /// and method access, `#(...)` macro calls, `->await`, and (when
    /// [`Parser::struct_literal_allowed`] permits it) construct literals.
    fn parse_postfix_chain(&mut self) -> PResult<NodeId> {
        let mut expr = self.parse_primary()?;
        loop {
            let tok = self.current();
            match tok.kind {
                TokenKind::PlusPlus => {
                    self.advance();
                    expr = self.ast.create(UnaryExpression { op: UnaryOperator::PostIncr, operand: expr });
                }
                TokenKind::MinusMinus => {
                    self.advance();
                    expr = self.ast.create(UnaryExpression { op: UnaryOperator::PostDecr, operand: expr });
                }
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_call_args(TokenKind::RParen)?;
                    self.expect_or_abort(TokenKind::RParen, "`)`")?;
                    expr = self.ast.create(FunctionCallExpression { callee: expr, args });
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect_or_abort(TokenKind::RBracket, "`]`")?;
                    expr = self.ast.create(IndexExpression { object: expr, index });
                }
                TokenKind::Hash if self.peek(1).kind == TokenKind::LParen => {
                    self.advance();
                    self.advance();
                    let args = self.parse_call_args(TokenKind::RParen)?;
                    self.expect_or_abort(TokenKind::RParen, "`)`")?;
                    expr = self.ast.create(FunctionMacroCallExpression { callee: expr, args });
                }
                TokenKind::Dot => {
                    self.advance();
                    let name_tok = self.expect_or_abort(TokenKind::Identifier, "a field or method name")?;
                    let name = self.symbol_of(name_tok);
                    if self.check(TokenKind::LParen) {
                        self.advance();
                        let args = self.parse_call_args(TokenKind::RParen)?;
                        self.expect_or_abort(TokenKind::RParen, "`)`")?;
                        expr = self.ast.create(MethodCallExpression { receiver: expr, method: name, args });
                    } else if self.check(TokenKind::Hash) && self.peek(1).kind == TokenKind::LParen {
                        self.advance();
                        self.advance();
                        let args = self.parse_call_args(TokenKind::RParen)?;
                        self.expect_or_abort(TokenKind::RParen, "`)`")?;
                        expr = self.ast.create(MethodMacroCallExpression { receiver: expr, method: name, args });
                    } else {
                        expr = self.ast.create(FieldAccessExpression { object: expr, field: name });
                    }
                }
                TokenKind::Arrow if self.lexeme_of(self.peek(1)) == "await" => {
                    self.advance();
                    self.advance();
                    expr = self.ast.create(AwaitExpression { operand: expr });
                }
                TokenKind::LBrace
                    if self.struct_literal_allowed.get() && self.ast.node(expr).kind == NodeKind::Path =>
                {
                    let fields = self.parse_construct_fields()?;
                    expr = self.ast.create(ConstructExpression { path: expr, fields });
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self, terminator: TokenKind) -> PResult<NodeRange> {
        let previous = self.struct_literal_allowed.replace(true);
        let mut args = Vec::new();
        if !self.check(terminator) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
                if self.check(terminator) {
                    break;
                }
            }
        }
        self.struct_literal_allowed.set(previous);
        Ok(self.ast.alloc_node_range(&args))
    }

    fn parse_construct_fields(&mut self) -> PResult<crate::ast::PayloadRange<ConstructField>> {
        self.expect_or_abort(TokenKind::LBrace, "`{`")?;
        let mut fields = Vec::new();
        if !self.check(TokenKind::RBrace) {
            loop {
                let name_tok = self.expect_or_abort(TokenKind::Identifier, "a field name")?;
                let name = self.symbol_of(name_tok);
                let value = if self.match_token(TokenKind::Colon) {
                    self.parse_expression()?
                } else {
                    // Shorthand `{ x }` means `{ x: x }`.
                    let segment = PathSegment { name };
                    let range = self.ast.alloc_path_segments(vec![segment]);
                    self.ast.create(PathExpression { segments: range, is_absolute: false })
                };
                fields.push(ConstructField { name, value });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
                if self.check(TokenKind::RBrace) {
                    break;
                }
            }
        }
        self.expect_or_abort(TokenKind::RBrace, "`}`")?;
        Ok(self.ast.alloc_construct_fields(fields))
    }

    fn parse_primary(&mut self) -> PResult<NodeId> {
        let tok = self.current();
        match tok.kind {
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
                Ok(self.ast.create(LiteralExpression { kind: self.literal_kind_of(tok.kind), lexeme_range: tok.range }))
            }

            TokenKind::Identifier | TokenKind::This | TokenKind::ColonColon => self.parse_path_expression(),

            TokenKind::LParen => self.parse_grouped_or_tuple(),

            TokenKind::LBracket if self.looks_like_closure() => self.parse_closure(),
            TokenKind::LBracket => self.parse_array(),

            TokenKind::If => self.parse_if_expression(),
            TokenKind::While => self.parse_while_expression(),
            TokenKind::For => self.parse_for_expression(),
            TokenKind::Loop => self.parse_loop_expression(),
            TokenKind::Match => self.parse_match_expression(),
            TokenKind::Unsafe => self.parse_unsafe_expression(),
            TokenKind::Fast => self.parse_fast_expression(),
            TokenKind::Const => self.parse_const_block_expression(),
            TokenKind::LBrace => self.parse_block_expression_standalone(),

            TokenKind::Return => self.parse_return_expression(),
            TokenKind::Break => self.parse_break_expression(),
            TokenKind::Continue => {
                self.advance();
                Ok(self.ast.create(ContinueExpression { _unused: () }))
            }

            _ => {
                self.error_unexpected(tok);
                self.fail_if_strict(NodeId::INVALID)
            }
        }
    }

    pub(crate) fn parse_path_expression(&mut self) -> PResult<NodeId> {
        let is_absolute = self.match_token(TokenKind::ColonColon);
        let mut segments = Vec::new();
        loop {
            let tok = if self.check(TokenKind::This) {
                self.advance()
            } else {
                self.expect_or_abort(TokenKind::Identifier, "an identifier")?
            };
            segments.push(PathSegment { name: self.symbol_of(tok) });
            if !self.match_token(TokenKind::ColonColon) {
                break;
            }
        }
        let range = self.ast.alloc_path_segments(segments);
        Ok(self.ast.create(PathExpression { segments: range, is_absolute }))
    }

    fn parse_grouped_or_tuple(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::LParen, "`(`")?;
        let previous = self.struct_literal_allowed.replace(true);
        let mut elems = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                elems.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
                if self.check(TokenKind::RParen) {
                    break;
                }
            }
        }
        self.struct_literal_allowed.set(previous);
        self.expect_or_abort(TokenKind::RParen, "`)`")?;
        if elems.len() == 1 {
            let inner = elems.into_iter().next().unwrap();
            Ok(self.ast.create(GroupedExpression { inner }))
        } else {
            let range = self.ast.alloc_node_range(&elems);
            Ok(self.ast.create(TupleExpression { elements: range }))
        }
    }

    fn parse_array(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::LBracket, "`[`")?;
        let previous = self.struct_literal_allowed.replace(true);
        let mut elems = Vec::new();
        let mut repeat_count = NodeId::INVALID;
        if !self.check(TokenKind::RBracket) {
            let first = self.parse_expression()?;
            if self.match_token(TokenKind::Semicolon) {
                repeat_count = self.parse_expression()?;
                elems.push(first);
            } else {
                elems.push(first);
                while self.match_token(TokenKind::Comma) {
                    if self.check(TokenKind::RBracket) {
                        break;
                    }
                    elems.push(self.parse_expression()?);
                }
            }
        }
        self.struct_literal_allowed.set(previous);
        self.expect_or_abort(TokenKind::RBracket, "`]`")?;
        let elements = self.ast.alloc_node_range(&elems);
        Ok(self.ast.create(ArrayExpression { elements, repeat_count }))
    }

    /// Bounded forward scan (no parsing) to tell a capture-list-prefixed
    /// closure `[a, b](...) { ... }` apart from an array literal: a
    /// closure's `[...]` is always immediately followed by `(`. A bare
    /// `(params) { ... }` closure without a capture list is not part of
    /// this grammar — it would be indistinguishable from a parenthesized
    /// expression followed by a block.
    fn looks_like_closure(&self) -> bool {
        let mut depth: i32 = 0;
        let mut offset = 0usize;
        loop {
            let tok = self.peek(offset);
            match tok.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => {
                    depth -= 1;
                    if depth == 0 {
                        return self.peek(offset + 1).kind == TokenKind::LParen;
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            offset += 1;
            if offset > 512 {
                return false;
            }
        }
    }

    fn parse_closure(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::LBracket, "`[`")?;
        let mut captures = Vec::new();
        if !self.check(TokenKind::RBracket) {
            loop {
                let tok = self.expect_or_abort(TokenKind::Identifier, "a captured identifier")?;
                captures.push(self.symbol_of(tok));
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_or_abort(TokenKind::RBracket, "`]`")?;
        self.expect_or_abort(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let mutable = self.match_token(TokenKind::Mut);
                let name_tok = self.expect_or_abort(TokenKind::Identifier, "a parameter name")?;
                let name = self.symbol_of(name_tok);
                let ty = match self.parse_optional_type_annotation()? {
                    Some(ty) => ty,
                    None => crate::ast::Type::Inferred,
                };
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
        let body = self.parse_block_expression_standalone()?;
        let captures = self.ast.alloc_captures(captures);
        let params = self.ast.alloc_params(params);
        Ok(self.ast.create(ClosureExpression { captures, params, body }))
    }

    fn parse_if_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::If, "`if`")?;
        let mut branches = Vec::new();
        let condition = self.parse_condition_expression()?;
        let block = self.parse_block()?;
        branches.push(IfBranch { condition, block });
        while self.match_token(TokenKind::Else) {
            if self.match_token(TokenKind::If) {
                let condition = self.parse_condition_expression()?;
                let block = self.parse_block()?;
                branches.push(IfBranch { condition, block });
            } else {
                let block = self.parse_block()?;
                branches.push(IfBranch { condition: NodeId::INVALID, block });
                break;
            }
        }
        let branches = self.ast.alloc_if_branches(branches);
        Ok(self.ast.create(IfExpression { branches }))
    }

    fn parse_while_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::While, "`while`")?;
        let condition = self.parse_condition_expression()?;
        let body = self.parse_block()?;
        Ok(self.ast.create(WhileExpression { condition, body }))
    }

    fn parse_for_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::For, "`for`")?;
        let name_tok = self.expect_or_abort(TokenKind::Identifier, "a loop binding")?;
        let binding = self.symbol_of(name_tok);
        self.expect_or_abort(TokenKind::Colon, "`:`")?;
        let iterable = self.parse_condition_expression()?;
        let body = self.parse_block()?;
        Ok(self.ast.create(ForExpression { binding, iterable, body }))
    }

    fn parse_loop_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Loop, "`loop`")?;
        let body = self.parse_block()?;
        Ok(self.ast.create(LoopExpression { body }))
    }

    /// Match arms are separated by `pattern [if guard] : body`; this
    /// grammar has no fat-arrow token, so `:` (already the binder used
    /// by `for` and type annotations) does the job instead.
    fn parse_match_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Match, "`match`")?;
        let scrutinee = self.parse_condition_expression()?;
        self.expect_or_abort(TokenKind::LBrace, "`{`")?;
        let mut arms = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            let pattern = self.parse_pattern()?;
            let guard = if self.match_token(TokenKind::If) { self.parse_expression()? } else { NodeId::INVALID };
            self.expect_or_abort(TokenKind::Colon, "`:`")?;
            let body = self.parse_expression()?;
            arms.push(MatchArm { pattern, guard, body });
            if !self.match_token(TokenKind::Comma) && !self.check(TokenKind::RBrace) {
                break;
            }
        }
        self.expect_or_abort(TokenKind::RBrace, "`}`")?;
        let arms = self.ast.alloc_match_arms(arms);
        Ok(self.ast.create(MatchExpression { scrutinee, arms }))
    }

    fn parse_unsafe_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Unsafe, "`unsafe`")?;
        let block = self.parse_block()?;
        Ok(self.ast.create(UnsafeExpression { block }))
    }

    fn parse_fast_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Fast, "`fast`")?;
        let block = self.parse_block()?;
        Ok(self.ast.create(FastExpression { block }))
    }

    fn parse_const_block_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Const, "`const`")?;
        let block = self.parse_block()?;
        Ok(self.ast.create(ConstBlockExpression { block }))
    }

    /// A `{ ... }` appearing where a full expression is expected (rather
    /// than as the fixed body of an `if`/`while`/etc.) is itself a
    /// first-class block-value expression.
    pub(crate) fn parse_block_expression_standalone(&mut self) -> PResult<NodeId> {
        let block = self.parse_block()?;
        Ok(self.ast.create(crate::ast::BlockExpression { block }))
    }

    fn parse_return_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Return, "`ret`")?;
        let value = if token_starts_expression(self.current().kind) {
            self.parse_expression()?
        } else {
            NodeId::INVALID
        };
        Ok(self.ast.create(ReturnExpression { value }))
    }

    fn parse_break_expression(&mut self) -> PResult<NodeId> {
        self.expect_or_abort(TokenKind::Break, "`break`")?;
        let value = if token_starts_expression(self.current().kind) {
            self.parse_expression()?
        } else {
            NodeId::INVALID
        };
        Ok(self.ast.create(BreakExpression { value }))
    }
}
