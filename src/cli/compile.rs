//! Compile statement documents

use super::{CliError, StatementDoc};
use crate::statement::CompiledQuery;

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Statement document (JSON)
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Print only the statement text
    pub text_only: bool,
}

/// Result of a compile operation
#[derive(Debug)]
pub struct CompileOutput {
    pub query: CompiledQuery,
    pub rendered: String,
}

/// Parse, validate and compile a statement document.
pub fn execute_compile(options: &CompileOptions) -> Result<CompileOutput, CliError> {
    let input = options.input.as_ref().ok_or(CliError::NoInput)?;

    let doc: StatementDoc = serde_json::from_str(input)?;
    let statement = doc.into_statement()?;
    tracing::debug!(clauses = statement.len(), "statement document accepted");

    let query = statement.compile();
    let rendered = if options.text_only {
        query.text().to_string()
    } else if options.pretty {
        serde_json::to_string_pretty(&query)?
    } else {
        serde_json::to_string(&query)?
    };

    Ok(CompileOutput { query, rendered })
}
