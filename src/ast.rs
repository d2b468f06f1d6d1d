//! # Node algebras
//!
//! A statement is a list of [`Clause`]s. Clauses are built from three
//! smaller algebras, each a closed enum rendered by exhaustive matching:
//!
//! - **[expressions]** - value nodes ([`Expr`]): field references, bound
//!   literals, arithmetic, function calls
//! - **[filters]** - predicates ([`Filter`]): comparisons, membership,
//!   `AND`/`OR`
//! - **[updates]** - patch entries ([`Update`]) and the non-empty [`Patch`]
//!   they form
//! - **[projection]** - what `RETURN` emits ([`Projection`])
//! - **[clauses]** - statement lines ([`Clause`])
//! - **[operators]** - arithmetic/comparison operators and sort direction
//!
//! Data flows one way: paths feed values, values feed filters and updates,
//! and all of them feed clauses.
//!
//! Nodes with parts to validate ([`Clause`], [`Projection`], [`Update`] and
//! function [`Call`]s) have private fields. Their constructors are the only
//! way in, and `kind()` gives read access to the validated parts.
//!
//! ## Example
//!
//! ```
//! use aql_forge::ast::{Expr, Filter};
//! use aql_forge::render::{Counter, Render};
//!
//! let filter = Filter::eq(Expr::field("x", &["Foo"]).unwrap(), Expr::literal("asd"));
//! let (text, next) = filter.render(Counter::new());
//!
//! assert_eq!(text, "x.Foo == @var0");
//! assert_eq!(next.value(), 1);
//! ```
pub mod clauses;
pub mod expressions;
pub mod filters;
pub mod operators;
pub mod projection;
pub mod updates;

pub use clauses::{Clause, ClauseKind, InsertOptions, OverwriteMode, RemoveOptions, SortKey};
pub use expressions::{Call, Expr};
pub use filters::{Connective, Filter, Junction};
pub use operators::{BinOp, CompareOp, SortDirection};
pub use projection::{Projection, ProjectionKind};
pub use updates::{Patch, PatchBuilder, Update, UpdateKind};
