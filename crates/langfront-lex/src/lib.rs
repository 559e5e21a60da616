//! Lexical analysis for the Langfront front end.
//!
//! Turns a [`FileRef`]'s raw bytes into a stream of [`Token`]s. The
//! pipeline is: [`Utf8Stream`] validates and decodes the bytes as
//! Unicode scalar values, then [`Lexer`] walks the stream producing
//! tokens, reporting malformed input through a [`langfront_util::Handler`]
//! instead of aborting. Lexemes are never copied; a [`Token`] only
//! records its byte range, and callers recover the text with
//! [`Token::lexeme`].

#[cfg(test)]
mod edge_cases;
pub mod file;
pub mod keyword;
pub mod lexer;
pub mod stream;
pub mod token;
pub mod token_stream;
pub mod unicode;

pub use file::FileRef;
pub use lexer::Lexer;
pub use stream::{StreamStatus, Utf8Stream};
pub use token::{Token, TokenKind};
pub use token_stream::TokenStream;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use langfront_util::Handler;

    fn tokenize(src: &str) -> (Vec<Token>, Handler) {
        let handler = Handler::new();
        let file = FileRef::new(0, "<test>", src.as_bytes());
        let stream = Utf8Stream::init(file).expect("valid utf8");
        let mut lexer = Lexer::new(file, stream, &handler);
        (lexer.tokenize(), handler)
    }

    #[test]
    fn full_declaration_round_trips_token_text() {
        let src = "fn add(a: i32, b: i32) -> i32 { ret a + b; }\n";
        let (tokens, handler) = tokenize(src);
        assert!(!handler.has_errors());
        let mut rebuilt = Vec::new();
        for tok in &tokens {
            rebuilt.extend_from_slice(tok.lexeme(src.as_bytes()));
        }
        assert_eq!(rebuilt, src.as_bytes());
    }

    #[test]
    fn module_and_redirect_keywords_lex_correctly() {
        let src = "module geometry { redirect area -> compute_area }\n";
        let (tokens, handler) = tokenize(src);
        assert!(!handler.has_errors());
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::Module));
        assert!(kinds.contains(&TokenKind::Redirect));
        assert!(kinds.contains(&TokenKind::Arrow));
    }

    #[test]
    fn malformed_input_still_yields_a_token_stream_ending_in_eof() {
        let (tokens, handler) = tokenize("let x = \"unterminated\n");
        assert!(handler.has_errors());
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }
}
