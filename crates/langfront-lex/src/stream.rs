//! Validated UTF-8 codepoint cursor with bounded rewind.
//!
//! `Utf8Stream` is the lowest layer of the front end: it turns a file's
//! raw bytes into a cursor over Unicode scalar values, tracking 1-based
//! line/column position and supporting a bounded history of prior
//! positions so the lexer can back out of a speculative decode (e.g.
//! `\r` that turns out not to be followed by `\n`).

use std::cell::Cell;

use crate::file::FileRef;

/// Ring buffer capacity for rewind history. Must be a power of two so
/// wraparound is a mask instead of a modulo.
const REWIND_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, Default)]
struct RewindEntry {
    pos: usize,
    line: u32,
    col: u32,
}

/// Fixed-capacity ring buffer of prior cursor positions. Pushing past
/// capacity silently overwrites the oldest entry.
#[derive(Debug)]
struct RewindRing {
    buf: [RewindEntry; REWIND_CAPACITY],
    head: usize,
    len: usize,
}

impl RewindRing {
    fn new() -> Self {
        Self { buf: [RewindEntry::default(); REWIND_CAPACITY], head: 0, len: 0 }
    }

    fn push(&mut self, entry: RewindEntry) {
        self.buf[self.head] = entry;
        self.head = (self.head + 1) & (REWIND_CAPACITY - 1);
        if self.len < REWIND_CAPACITY {
            self.len += 1;
        }
    }

    fn pop(&mut self) -> Option<RewindEntry> {
        if self.len == 0 {
            return None;
        }
        self.head = (self.head + REWIND_CAPACITY - 1) & (REWIND_CAPACITY - 1);
        self.len -= 1;
        Some(self.buf[self.head])
    }
}

/// Validity of a stream, set once at construction and never upgraded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamStatus {
    Valid,
    Invalid,
}

/// A validated, position-tracking cursor over a source file's codepoints.
///
/// Columns count codepoints, not bytes. `\r\n` is a lexer-level concern
/// (see the lexer's newline dispatch); the stream itself only knows
/// about `\n` as the line terminator.
pub struct Utf8Stream<'a> {
    data: &'a str,
    raw: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
    peek_cache: Cell<Option<(usize, u32)>>,
    rewind_ring: RewindRing,
    status: StreamStatus,
}

impl<'a> Utf8Stream<'a> {
    /// Validates `file`'s bytes as UTF-8 and, if well-formed, returns a
    /// stream positioned at offset 0, line 1, column 1. On malformed
    /// input returns the byte offset of the first invalid sequence;
    /// no stream is constructed in that case.
    pub fn init(file: FileRef<'a>) -> Result<Self, usize> {
        match std::str::from_utf8(file.source()) {
            Ok(data) => Ok(Self {
                data,
                raw: file.source(),
                pos: 0,
                line: 1,
                col: 1,
                peek_cache: Cell::new(None),
                rewind_ring: RewindRing::new(),
                status: StreamStatus::Valid,
            }),
            Err(e) => Err(e.valid_up_to()),
        }
    }

    #[inline]
    fn assert_valid(&self) {
        assert!(
            self.status == StreamStatus::Valid,
            "Utf8Stream operation attempted on an invalid stream"
        );
    }

    /// Returns the codepoint `offset` codepoints ahead of the cursor, or
    /// `0` at or after end of file. `offset = 0` is served from a
    /// one-slot cache keyed by byte position.
    pub fn peek(&self, offset: usize) -> u32 {
        self.assert_valid();
        if offset == 0 {
            if let Some((cached_pos, cp)) = self.peek_cache.get() {
                if cached_pos == self.pos {
                    return cp;
                }
            }
            let cp = self.data[self.pos..].chars().next().map(|c| c as u32).unwrap_or(0);
            self.peek_cache.set(Some((self.pos, cp)));
            return cp;
        }
        self.data[self.pos..].chars().nth(offset).map(|c| c as u32).unwrap_or(0)
    }

    /// Consumes exactly one codepoint, returning its UTF-8 byte length.
    /// A no-op (returns 0) at end of file. Pushes the pre-advance
    /// position onto the rewind ring before mutating.
    pub fn advance(&mut self) -> usize {
        self.assert_valid();
        let Some(ch) = self.data[self.pos..].chars().next() else {
            return 0;
        };
        self.rewind_ring.push(RewindEntry { pos: self.pos, line: self.line, col: self.col });
        let len = ch.len_utf8();
        self.pos += len;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.peek_cache.set(None);
        len
    }

    /// Restores the most recently pushed position. No-op if the ring
    /// is empty (history exhausted or nothing advanced yet).
    pub fn rewind(&mut self) {
        self.assert_valid();
        if let Some(entry) = self.rewind_ring.pop() {
            self.pos = entry.pos;
            self.line = entry.line;
            self.col = entry.col;
            self.peek_cache.set(None);
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.col
    }

    #[inline]
    pub fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    pub fn source(&self) -> &'a [u8] {
        self.raw
    }

    #[inline]
    pub fn status(&self) -> StreamStatus {
        self.status
    }
}
