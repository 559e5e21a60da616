//! Edge-case coverage for the lexer that doesn't fit naturally in any
//! one submodule's own test block: behavior that spans dispatch,
//! keywords, literals, and operators together.

#[cfg(test)]
mod tests {
    use crate::file::FileRef;
    use crate::stream::Utf8Stream;
    use crate::token::{Token, TokenKind};
    use crate::Lexer;
    use langfront_util::Handler;

    fn lex_all(source: &str) -> (Vec<Token>, Handler) {
        let handler = Handler::new();
        let file = FileRef::new(0, "<test>", source.as_bytes());
        let stream = Utf8Stream::init(file).expect("valid utf8");
        let mut lexer = Lexer::new(file, stream, &handler);
        (lexer.tokenize(), handler)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex_all(source).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        let (tokens, handler) = lex_all("");
        assert!(!handler.has_errors());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn single_char_identifier() {
        assert_eq!(kinds("x"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn long_identifier_does_not_panic() {
        let name = "a".repeat(10_000);
        let (tokens, handler) = lex_all(&name);
        assert!(!handler.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].length_bytes as usize, name.len());
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert!(kinds("fn if").starts_with(&[TokenKind::Fn, TokenKind::Whitespace, TokenKind::If]));
    }

    #[test]
    fn hex_binary_octal_bounds() {
        assert_eq!(kinds("0x0"), vec![TokenKind::LiteralHex, TokenKind::Eof]);
        assert_eq!(kinds("0b1010"), vec![TokenKind::LiteralBinary, TokenKind::Eof]);
        assert_eq!(kinds("0o77"), vec![TokenKind::LiteralOctal, TokenKind::Eof]);
    }

    #[test]
    fn empty_string_literal() {
        let (tokens, handler) = lex_all("\"\"");
        assert!(!handler.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::LiteralString);
        assert_eq!(tokens[0].length_bytes, 2);
    }

    #[test]
    fn every_arithmetic_and_comparison_operator() {
        let k = kinds("+ - * / % == != < > <= >= && || !");
        for expected in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::EqEq,
            TokenKind::BangEq,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Bang,
        ] {
            assert!(k.contains(&expected), "missing {expected:?}");
        }
    }

    #[test]
    fn every_delimiter() {
        let k = kinds("( ) { } [ ] , ; : . ->");
        for expected in [
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Dot,
            TokenKind::Arrow,
        ] {
            assert!(k.contains(&expected), "missing {expected:?}");
        }
    }

    #[test]
    fn nested_parens_each_produce_their_own_token() {
        let k = kinds("((()))");
        assert_eq!(k.iter().filter(|k| **k == TokenKind::LParen).count(), 3);
        assert_eq!(k.iter().filter(|k| **k == TokenKind::RParen).count(), 3);
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        let k = kinds("Fn fn");
        assert_eq!(k[0], TokenKind::Identifier);
        assert_eq!(k[2], TokenKind::Fn);
    }

    #[test]
    fn boolean_literals() {
        assert_eq!(kinds("true false"), vec![TokenKind::True, TokenKind::Whitespace, TokenKind::False, TokenKind::Eof]);
    }

    #[test]
    fn this_keyword() {
        assert_eq!(kinds("this"), vec![TokenKind::This, TokenKind::Eof]);
    }

    #[test]
    fn standalone_punctuators() {
        assert!(kinds("$").contains(&TokenKind::Dollar));
        assert!(kinds("@").contains(&TokenKind::At));
        assert!(kinds("#").contains(&TokenKind::Hash));
        assert!(kinds("~").contains(&TokenKind::Tilde));
        assert!(kinds("?").contains(&TokenKind::Question));
    }

    #[test]
    fn scientific_notation_floats() {
        let k = kinds("1e10 1.5e-3");
        assert!(k.iter().filter(|k| **k == TokenKind::LiteralFloat).count() == 2);
    }

    #[test]
    fn very_long_decimal_literal_lexes_without_overflow_panic() {
        assert_eq!(kinds("18446744073709551615999999"), vec![TokenKind::LiteralDecimal, TokenKind::Eof]);
    }

    #[test]
    fn all_control_flow_keywords() {
        let k = kinds("fn if else match while for loop break continue ret struct enum");
        for expected in [
            TokenKind::Fn,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Match,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Loop,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::Return,
            TokenKind::Struct,
            TokenKind::Enum,
        ] {
            assert!(k.contains(&expected), "missing {expected:?}");
        }
    }

    #[test]
    fn invalid_hex_literal_still_terminates_and_reports() {
        let (tokens, handler) = lex_all("0x");
        assert_eq!(tokens[0].kind, TokenKind::LiteralHex);
        assert!(handler.has_errors());
    }

    #[test]
    fn invalid_binary_literal_still_terminates_and_reports() {
        let (tokens, handler) = lex_all("0b");
        assert_eq!(tokens[0].kind, TokenKind::LiteralBinary);
        assert!(handler.has_errors());
    }

    #[test]
    fn unterminated_string_reports_but_does_not_hang() {
        let (_, handler) = lex_all("\"unterminated");
        assert!(handler.has_errors());
    }

    #[test]
    fn empty_char_literal_reports() {
        let (_, handler) = lex_all("''");
        assert!(handler.has_errors());
    }

    #[test]
    fn unterminated_char_reports() {
        let (_, handler) = lex_all("'x");
        assert!(handler.has_errors());
    }

    #[test]
    fn run_of_unrecognized_characters_reports_one_error_each_and_terminates() {
        let (tokens, handler) = lex_all("`\u{a0}`");
        assert!(handler.has_errors());
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn mixed_valid_and_invalid_input_still_lexes_the_valid_parts() {
        let (tokens, handler) = lex_all("x := ` 1;");
        assert!(handler.has_errors());
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Identifier));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::LiteralDecimal));
    }

    #[test]
    fn consecutive_operators_split_at_longest_match() {
        // `+++` is `++` then `+`, not three `+`.
        assert_eq!(kinds("+++"), vec![TokenKind::PlusPlus, TokenKind::Plus, TokenKind::Eof]);
    }

    #[test]
    fn mixed_whitespace_forms_are_all_trivia() {
        let k = kinds("x\t=\n1");
        assert!(k.contains(&TokenKind::Whitespace));
        assert!(k.contains(&TokenKind::Newline));
    }

    #[test]
    fn leading_zeros_still_lex_as_one_literal() {
        assert_eq!(kinds("007"), vec![TokenKind::LiteralDecimal, TokenKind::Eof]);
    }
}
