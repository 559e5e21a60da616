//! Shared foundation types for the langfront compiler front end.
//!
//! This crate has no knowledge of lexing or parsing; it supplies the
//! vocabulary every later stage builds on: source positions ([`span`]),
//! string interning ([`symbol`]), diagnostics ([`diagnostic`]), dense
//! arena indices ([`index_vec`]), and definition ids ([`def_id`]).

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceLocation, SourceMap, SourceRange, Span};
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
