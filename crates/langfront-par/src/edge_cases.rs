//! Edge-case and error-recovery tests that cut across `expr`/`stmt`/
//! `items`, rather than belonging to any one of them.

#[cfg(test)]
mod tests {
    use langfront_lex::{Lexer, TokenStream};
    use langfront_util::Handler;

    use crate::{ParserMode, Parser};

    fn parse_recovery(source: &str) -> crate::ParseResult {
        let handler = Handler::new();
        let file = langfront_lex::FileRef::new(0, "<test>", source.as_bytes());
        let stream = langfront_lex::Utf8Stream::init(file).expect("valid utf8");
        let mut lexer = Lexer::new(file, stream, &handler);
        let tokens = lexer.tokenize();
        let token_stream = TokenStream::new(tokens, "<test>");
        let parser = Parser::new(token_stream, source.as_bytes(), &handler, ParserMode::Recovery);
        parser.parse_all()
    }

    fn has_errors(source: &str) -> bool {
        !parse_recovery(source).diagnostics.is_empty()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn empty_source() {
        let result = parse_recovery("");
        assert!(result.items.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn whitespace_only() {
        let result = parse_recovery("   \n\t  \n  ");
        assert!(result.items.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn single_function() {
        let result = parse_recovery("fn main() { }");
        assert_eq!(result.items.len(), 1);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn empty_function_body() {
        let result = parse_recovery("fn empty() {}");
        assert_eq!(result.items.len(), 1);
        let func = result.ast.function_decl(result.items[0]);
        let block = result.ast.block(func.body);
        assert!(result.ast.node_range(block.statements).is_empty());
        assert!(block.trailing.is_invalid());
    }

    #[test]
    fn function_with_no_params() {
        let result = parse_recovery("fn no_params() { x := 1; }");
        assert!(result.diagnostics.is_empty());
        let func = result.ast.function_decl(result.items[0]);
        assert!(result.ast.params(func.params).is_empty());
    }

    #[test]
    fn function_with_single_param() {
        let result = parse_recovery("fn one(x: i32) { }");
        assert!(result.diagnostics.is_empty());
        let func = result.ast.function_decl(result.items[0]);
        assert_eq!(result.ast.params(func.params).len(), 1);
    }

    #[test]
    fn deeply_nested_blocks() {
        let source = "fn main() { {{{{ x := 1; }}}} }";
        let result = parse_recovery(source);
        assert_eq!(result.items.len(), 1);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn multiple_statements() {
        let source = "fn main() { a := 1; b := 2; c := 3; }";
        assert!(!has_errors(source));
    }

    #[test]
    fn if_without_else() {
        let source = "fn main() { if true { x := 1; } }";
        assert!(!has_errors(source));
    }

    #[test]
    fn if_with_else() {
        let source = "fn main() { if true { 1 } else { 2 } }";
        assert!(!has_errors(source));
    }

    #[test]
    fn nested_if_else() {
        let source = "fn main() { if true { if false { 1 } else { 2 } } else { 3 } }";
        assert!(!has_errors(source));
    }

    #[test]
    fn while_loop() {
        let source = "fn main() { while true { x := 1; } }";
        assert!(!has_errors(source));
    }

    #[test]
    fn for_loop() {
        let source = "fn main() { for i: 0..10 { x := i; } }";
        assert!(!has_errors(source));
    }

    #[test]
    fn loop_with_break() {
        let source = "fn main() { loop { break; } }";
        assert!(!has_errors(source));
    }

    #[test]
    fn loop_with_continue() {
        let source = "fn main() { loop { continue; } }";
        assert!(!has_errors(source));
    }

    #[test]
    fn return_with_value() {
        let source = "fn main() { ret 42; }";
        assert!(!has_errors(source));
    }

    #[test]
    fn return_unit() {
        let source = "fn main() { ret; }";
        assert!(!has_errors(source));
    }

    #[test]
    fn binary_expressions() {
        let source = "fn main() { x := 1 + 2 * 3 - 4 / 2; }";
        assert!(!has_errors(source));
    }

    #[test]
    fn comparison_operators() {
        let source = "fn main() { x := 1 == 2; y := 1 != 2; z := 1 < 2; }";
        assert!(!has_errors(source));
    }

    #[test]
    fn logical_operators() {
        let source = "fn main() { x := true && false; y := true || false; }";
        assert!(!has_errors(source));
    }

    #[test]
    fn unary_operators() {
        let source = "fn main() { x := -5; y := !true; }";
        assert!(!has_errors(source));
    }

    #[test]
    fn struct_definition() {
        let source = "struct Point { x: i32, y: i32 }";
        let result = parse_recovery(source);
        assert_eq!(result.items.len(), 1);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn empty_struct() {
        let source = "struct Empty {}";
        let result = parse_recovery(source);
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn enum_definition() {
        let source = "enum Color { Red, Green, Blue }";
        let result = parse_recovery(source);
        assert_eq!(result.items.len(), 1);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn enum_with_tuple_variant() {
        let source = "enum Maybe { Some(i32), None }";
        let result = parse_recovery(source);
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn match_expression() {
        let source = "fn main() { match 1 { 0 : 1, _ : 2 } }";
        assert!(!has_errors(source));
    }

    #[test]
    fn function_call() {
        let source = "fn main() { foo(); bar(1, 2); }";
        assert!(!has_errors(source));
    }

    #[test]
    fn nested_function_calls() {
        let source = "fn main() { foo(bar(baz(1))); }";
        assert!(!has_errors(source));
    }

    #[test]
    fn all_literal_kinds() {
        let source =
            "fn main() { a := 42; b := 3.14; c := \"hello\"; d := true; e := 'x'; }";
        assert!(!has_errors(source));
    }

    // ==================== ERROR / RECOVERY CASES ====================

    #[test]
    fn missing_semicolon_is_diagnosed_and_recovered() {
        let source = "fn main() { x := 1 y := 2; }";
        assert!(has_errors(source));
    }

    #[test]
    fn missing_closing_brace() {
        let source = "fn main() { x := 1;";
        assert!(has_errors(source));
    }

    #[test]
    fn missing_opening_brace() {
        let source = "fn main() x := 1; }";
        assert!(has_errors(source));
    }

    #[test]
    fn invalid_token_in_function_body() {
        let source = "fn main() { @#$ }";
        assert!(has_errors(source));
    }

    #[test]
    fn incomplete_if() {
        let source = "fn main() { if true }";
        assert!(has_errors(source));
    }

    #[test]
    fn incomplete_while() {
        let source = "fn main() { while true }";
        assert!(has_errors(source));
    }

    #[test]
    fn incomplete_struct() {
        let source = "struct Point { x: i32";
        assert!(has_errors(source));
    }

    #[test]
    fn incomplete_enum() {
        let source = "enum Color { Red";
        assert!(has_errors(source));
    }

    #[test]
    fn invalid_function_signature() {
        let source = "fn main( { }";
        assert!(has_errors(source));
    }

    #[test]
    fn missing_function_body() {
        let source = "fn main()";
        assert!(has_errors(source));
    }

    #[test]
    fn unbalanced_parens_recovers_without_hanging() {
        let source = "fn main() { foo((1, 2); }";
        assert!(has_errors(source));
    }

    #[test]
    fn unbalanced_brackets_recovers_without_hanging() {
        let source = "fn main() { x := [1, 2; }";
        assert!(has_errors(source));
    }

    #[test]
    fn unterminated_string_in_code() {
        let source = "fn main() { x := \"unterminated; }";
        assert!(has_errors(source));
    }

    #[test]
    fn multiple_errors_in_one_file_still_terminate() {
        let source = "fn main( { if true { x := @ }";
        assert!(has_errors(source));
    }

    #[test]
    fn trailing_comma_in_struct_is_not_an_error() {
        let source = "struct Point { x: i32, y: i32, }";
        assert!(!has_errors(source));
    }

    #[test]
    fn trailing_comma_in_enum_is_not_an_error() {
        let source = "enum Color { Red, Green, Blue, }";
        assert!(!has_errors(source));
    }

    #[test]
    fn comments_do_not_affect_parsing() {
        let source = "fn main() { // comment\nx := 1; /* block */ }";
        assert!(!has_errors(source));
    }

    #[test]
    fn complex_parenthesized_expression() {
        let source = "fn main() { x := (1 + 2) * (3 - 4) / (5 % 6); }";
        assert!(!has_errors(source));
    }

    #[test]
    fn bare_trait_path_with_trait_keyword_inside_impl_target_ambiguity() {
        // `for` only appears after a genuine trait path; a plain inherent
        // impl whose body happens to contain a `for` loop must not be
        // mistaken for the `impl Trait for Target` form.
        let source = "impl Counter { fn run() -> i32 { for i: 0..3 { } 0 } }";
        let result = parse_recovery(source);
        assert!(result.diagnostics.is_empty());
        let decl = result.ast.impl_decl(result.items[0]);
        assert!(decl.trait_path.is_invalid());
    }

    #[test]
    fn strict_mode_aborts_on_first_error() {
        let source = "fn main() { x := ; }";
        let handler = Handler::new();
        let file = langfront_lex::FileRef::new(0, "<test>", source.as_bytes());
        let stream = langfront_lex::Utf8Stream::init(file).expect("valid utf8");
        let mut lexer = Lexer::new(file, stream, &handler);
        let tokens = lexer.tokenize();
        let token_stream = TokenStream::new(tokens, "<test>");
        let parser = Parser::new(token_stream, source.as_bytes(), &handler, ParserMode::Strict);
        let result = parser.parse_all();
        assert!(result.items.is_empty());
        assert_eq!(handler.error_count(), 1);
    }
}
