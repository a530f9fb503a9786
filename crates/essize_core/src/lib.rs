//! Core import detection and canonicalization for essize.
//!
//! This crate turns a JavaScript/TypeScript source snippet into canonical,
//! re-compilable probe snippets, one per third-party import:
//! - Classifying static imports, `require()` calls and dynamic `import()`
//!   expressions into [`ImportRecord`]s
//! - Normalizing specifier order so equivalent statements canonicalize to
//!   the same probe text
//! - Compiling a record back into a minimal snippet a bundler can build in
//!   isolation to measure the import's size
//!
//! The pipeline is synchronous and performs no I/O; concurrent callers need
//! no coordination.

mod classifier;
mod compile;
mod error;
mod types;

// Re-export public API
pub use classifier::classify_imports;
pub use compile::{compile_probe, sort_specifiers};
pub use error::ParseError;
pub use types::{ImportKind, ImportRecord, Lang, Specifier, SpecifierKind};
