pub mod ast;
pub mod cli;
pub mod error;
pub mod path;
pub mod render;
pub mod statement;
pub mod value;

pub use ast::{Clause, Expr, Filter, Patch, Projection, Update};
pub use error::{CompileError, Result};
pub use path::{FieldPath, Member, Renames, TerminalOp, resolve};
pub use render::{Counter, Render};
pub use statement::{BindTable, CompiledQuery, Statement, compile};
pub use value::Value;
