//! Core compiler pipeline for the Wisp language.
//!
//! Wisp is a tiny JavaScript-flavored language whose module-scope
//! declarations and exports compile into a WebAssembly module. The
//! pipeline is roughly:
//!
//!   source .wisp
//!     -> lexer        (tokens)
//!     -> parser       (AST + declaration table)
//!     -> emitter      (globals/exports sections, module assembly)
//!
//! Higher-level tools (the CLI in particular) should depend on this
//! crate rather than reimplementing the pipeline.

// ---------------------------------------------------------------------
// Error handling and diagnostics
// ---------------------------------------------------------------------

pub mod error;
pub mod span;

// ---------------------------------------------------------------------
// Front-end: lexing and parsing
// ---------------------------------------------------------------------

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token_stream;

// ---------------------------------------------------------------------
// Declaration-table records shared by parser and emitter
// ---------------------------------------------------------------------

pub mod records;

// ---------------------------------------------------------------------
// Back-end: binary emission and compiler orchestration
// ---------------------------------------------------------------------

pub mod compiler;
pub mod emitter;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use compiler::{CompilationArtifact, compile_wasm};
pub use error::{CoreError, ParseError};
pub use parser::parse;
