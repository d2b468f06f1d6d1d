//! CLI support for aql-forge
//!
//! Compiles JSON statement documents so the compiler can be driven from
//! scripts or other tools without writing Rust.

mod compile;
pub mod document;

pub use compile::{CompileOptions, CompileOutput, execute_compile};
pub use document::StatementDoc;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Compile error: {0}")]
    Compile(#[from] crate::CompileError),

    #[error("Invalid statement document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe a statement document to stdin.")]
    NoInput,
}
