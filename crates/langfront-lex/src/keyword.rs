//! Perfect-hash keyword lookup.
//!
//! Keywords are hashed by `(first_byte, last_byte, length) mod 128` into
//! a 128-slot table built once at startup. A slot miss or a full-string
//! mismatch both fall back to `Identifier` — the hash only needs to be
//! perfect over the fixed keyword set, not injective over all inputs.

use std::sync::LazyLock;

use crate::token::TokenKind;

const TABLE_SIZE: usize = 128;

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("i8", TokenKind::I8),
    ("i16", TokenKind::I16),
    ("i32", TokenKind::I32),
    ("i64", TokenKind::I64),
    ("isize", TokenKind::Isize),
    ("u8", TokenKind::U8),
    ("u16", TokenKind::U16),
    ("u32", TokenKind::U32),
    ("u64", TokenKind::U64),
    ("usize", TokenKind::Usize),
    ("f32", TokenKind::F32),
    ("f64", TokenKind::F64),
    ("bool", TokenKind::Bool),
    ("char", TokenKind::Char),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("loop", TokenKind::Loop),
    ("match", TokenKind::Match),
    ("ret", TokenKind::Return),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("fn", TokenKind::Fn),
    ("struct", TokenKind::Struct),
    ("enum", TokenKind::Enum),
    ("trait", TokenKind::Trait),
    ("impl", TokenKind::Impl),
    ("union", TokenKind::Union),
    ("module", TokenKind::Module),
    ("use", TokenKind::Use),
    ("redirect", TokenKind::Redirect),
    ("mut", TokenKind::Mut),
    ("const", TokenKind::Const),
    ("extern", TokenKind::Extern),
    ("static", TokenKind::Static),
    ("thread_local", TokenKind::ThreadLocal),
    ("pub", TokenKind::Pub),
    ("async", TokenKind::Async),
    ("unsafe", TokenKind::Unsafe),
    ("fast", TokenKind::Fast),
    ("this", TokenKind::This),
    ("as", TokenKind::As),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
];

/// Keywords short enough (≤ 5 bytes) to dispatch via a direct match
/// instead of the hashed table; same results either way.
fn short_keyword(bytes: &[u8]) -> Option<TokenKind> {
    match bytes {
        b"if" => Some(TokenKind::If),
        b"fn" => Some(TokenKind::Fn),
        b"for" => Some(TokenKind::For),
        b"use" => Some(TokenKind::Use),
        b"pub" => Some(TokenKind::Pub),
        b"mut" => Some(TokenKind::Mut),
        b"ret" => Some(TokenKind::Return),
        b"as" => Some(TokenKind::As),
        b"i8" => Some(TokenKind::I8),
        b"u8" => Some(TokenKind::U8),
        b"this" => Some(TokenKind::This),
        b"enum" => Some(TokenKind::Enum),
        b"true" => Some(TokenKind::True),
        b"loop" => Some(TokenKind::Loop),
        b"else" => Some(TokenKind::Else),
        b"char" => Some(TokenKind::Char),
        b"bool" => Some(TokenKind::Bool),
        b"i16" => Some(TokenKind::I16),
        b"i32" => Some(TokenKind::I32),
        b"i64" => Some(TokenKind::I64),
        b"u16" => Some(TokenKind::U16),
        b"u32" => Some(TokenKind::U32),
        b"u64" => Some(TokenKind::U64),
        b"f32" => Some(TokenKind::F32),
        b"f64" => Some(TokenKind::F64),
        b"isize" => Some(TokenKind::Isize),
        b"usize" => Some(TokenKind::Usize),
        b"while" => Some(TokenKind::While),
        b"match" => Some(TokenKind::Match),
        b"break" => Some(TokenKind::Break),
        b"trait" => Some(TokenKind::Trait),
        b"impl" => Some(TokenKind::Impl),
        b"union" => Some(TokenKind::Union),
        b"const" => Some(TokenKind::Const),
        b"async" => Some(TokenKind::Async),
        b"fast" => Some(TokenKind::Fast),
        b"false" => Some(TokenKind::False),
        _ => None,
    }
}

fn slot_hash(first: u8, last: u8, len: usize) -> usize {
    let mixed = (first as usize)
        .wrapping_mul(131)
        .wrapping_add(last as usize)
        .wrapping_mul(131)
        .wrapping_add(len);
    mixed % TABLE_SIZE
}

struct KeywordTable {
    slots: [Option<(&'static str, TokenKind)>; TABLE_SIZE],
}

impl KeywordTable {
    fn build() -> Self {
        let mut slots: [Option<(&'static str, TokenKind)>; TABLE_SIZE] = [None; TABLE_SIZE];
        for &(kw, kind) in KEYWORDS {
            let bytes = kw.as_bytes();
            let idx = slot_hash(bytes[0], bytes[bytes.len() - 1], bytes.len());
            debug_assert!(slots[idx].is_none(), "keyword hash collision for {kw:?}");
            slots[idx] = Some((kw, kind));
        }
        Self { slots }
    }

    fn lookup(&self, text: &str) -> Option<TokenKind> {
        let bytes = text.as_bytes();
        if bytes.is_empty() {
            return None;
        }
        let idx = slot_hash(bytes[0], bytes[bytes.len() - 1], bytes.len());
        match self.slots[idx] {
            Some((kw, kind)) if kw == text => Some(kind),
            _ => None,
        }
    }
}

static TABLE: LazyLock<KeywordTable> = LazyLock::new(KeywordTable::build);

/// Looks up `text` as a keyword, returning its `TokenKind` on a match or
/// `None` if it should be lexed as a plain identifier.
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    if text.len() <= 5 {
        if let Some(kind) = short_keyword(text.as_bytes()) {
            return Some(kind);
        }
    }
    TABLE.lookup(text)
}
