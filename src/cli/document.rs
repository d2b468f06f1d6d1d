//! JSON statement documents.
//!
//! A document describes a statement as data. Converting it goes through the
//! same validating constructors as the Rust API, so a document that
//! converts is a statement that compiles.
//!
//! ```json
//! {"clauses": [
//!   {"for": {"alias": "x", "in": {"var": "users"}}},
//!   {"filter": {"compare": {"op": "==", "left": {"field": {"root": "x", "path": ["Foo"]}}, "right": {"lit": "asd"}}}},
//!   {"return": {"projection": {"var": "x"}}}
//! ]}
//! ```

use serde::Deserialize;

use crate::{
    ast::{
        BinOp, Clause, CompareOp, Expr, Filter, InsertOptions, Patch, Projection, RemoveOptions, SortDirection,
        SortKey, Update,
    },
    error::Result,
    path::{FieldPath, Member, TerminalOp, resolve},
    statement::Statement,
    value::Value,
};

#[derive(Debug, Deserialize)]
pub struct StatementDoc {
    pub clauses: Vec<ClauseDoc>,
}

impl StatementDoc {
    pub fn into_statement(self) -> Result<Statement> {
        self.clauses.into_iter().map(ClauseDoc::into_clause).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct PathDoc {
    pub root: String,
    #[serde(default)]
    pub path: Vec<Member>,
    #[serde(default)]
    pub terminal: TerminalOp,
}

impl PathDoc {
    fn resolve(self) -> Result<FieldPath> {
        resolve(self.root, &self.path, self.terminal)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprDoc {
    Var(String),
    Field(PathDoc),
    Lit(serde_json::Value),
    Array(Vec<serde_json::Value>),
    Op {
        op: BinOp,
        left: Box<ExprDoc>,
        right: Box<ExprDoc>,
    },
    Call {
        name: String,
        #[serde(default)]
        args: Vec<ExprDoc>,
    },
}

impl ExprDoc {
    fn into_expr(self) -> Result<Expr> {
        Ok(match self {
            ExprDoc::Var(name) => Expr::var(name)?,
            ExprDoc::Field(path) => Expr::Field(path.resolve()?),
            ExprDoc::Lit(value) => Expr::Literal(Value::from(value)),
            ExprDoc::Array(items) => Expr::array(items.into_iter().map(Value::from)),
            ExprDoc::Op { op, left, right } => Expr::binary(op, left.into_expr()?, right.into_expr()?),
            ExprDoc::Call { name, args } => {
                let args = args.into_iter().map(ExprDoc::into_expr).collect::<Result<Vec<_>>>()?;
                Expr::call(name, args)?
            }
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDoc {
    Compare {
        op: CompareOp,
        left: ExprDoc,
        right: ExprDoc,
    },
    In {
        value: ExprDoc,
        source: ExprDoc,
        #[serde(default)]
        negated: bool,
    },
    Between {
        value: ExprDoc,
        min: ExprDoc,
        max: ExprDoc,
    },
    And(Vec<FilterDoc>),
    Or(Vec<FilterDoc>),
}

impl FilterDoc {
    fn into_filter(self) -> Result<Filter> {
        Ok(match self {
            FilterDoc::Compare { op, left, right } => Filter::compare(op, left.into_expr()?, right.into_expr()?),
            FilterDoc::In {
                value,
                source,
                negated: false,
            } => Filter::is_in(value.into_expr()?, source.into_expr()?),
            FilterDoc::In { value, source, .. } => Filter::not_in(value.into_expr()?, source.into_expr()?),
            FilterDoc::Between { value, min, max } => {
                Filter::between(value.into_expr()?, min.into_expr()?, max.into_expr()?)
            }
            FilterDoc::And(operands) => Filter::and(filters(operands)?)?,
            FilterDoc::Or(operands) => Filter::or(filters(operands)?)?,
        })
    }
}

fn filters(docs: Vec<FilterDoc>) -> Result<Vec<Filter>> {
    docs.into_iter().map(FilterDoc::into_filter).collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateDoc {
    Set {
        field: String,
        value: ExprDoc,
    },
    Merge {
        field: String,
        base: PathDoc,
        patch: Vec<UpdateDoc>,
    },
    Inc {
        field: String,
        base: PathDoc,
        delta: ExprDoc,
    },
}

impl UpdateDoc {
    fn into_update(self) -> Result<Update> {
        match self {
            UpdateDoc::Set { field, value } => Update::set(field, value.into_expr()?),
            UpdateDoc::Merge { field, base, patch } => Update::merge(field, base.resolve()?, patch_of(patch)?),
            UpdateDoc::Inc { field, base, delta } => Update::increment(field, base.resolve()?, delta.into_expr()?),
        }
    }
}

fn patch_of(docs: Vec<UpdateDoc>) -> Result<Patch> {
    let entries = docs.into_iter().map(UpdateDoc::into_update).collect::<Result<Vec<_>>>()?;
    Patch::new(entries)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionDoc {
    Var(String),
    Field(PathDoc),
    Pick { alias: String, fields: Vec<Vec<Member>> },
    Object(Vec<ProjectionEntryDoc>),
}

#[derive(Debug, Deserialize)]
pub struct ProjectionEntryDoc {
    pub key: String,
    pub value: ProjectionDoc,
}

impl ProjectionDoc {
    fn into_projection(self) -> Result<Projection> {
        match self {
            ProjectionDoc::Var(alias) => Projection::variable(alias),
            ProjectionDoc::Field(path) => Ok(Projection::field(path.resolve()?)),
            ProjectionDoc::Pick { alias, fields } => Projection::partial(&alias, &fields),
            ProjectionDoc::Object(entries) => {
                let entries = entries
                    .into_iter()
                    .map(|entry| Ok((entry.key, entry.value.into_projection()?)))
                    .collect::<Result<Vec<_>>>()?;
                Projection::object(entries)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SortKeyDoc {
    pub by: ExprDoc,
    #[serde(default)]
    pub direction: SortDirection,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseDoc {
    For {
        alias: String,
        #[serde(rename = "in")]
        source: ExprDoc,
    },
    Filter(FilterDoc),
    Let {
        alias: String,
        value: ExprDoc,
    },
    Sort(Vec<SortKeyDoc>),
    Limit {
        count: i64,
        #[serde(default)]
        offset: i64,
    },
    Collect {
        alias: Option<String>,
        value: Option<ExprDoc>,
    },
    CollectCount {
        into: String,
    },
    Aggregate {
        alias: String,
        value: ExprDoc,
    },
    Insert {
        into: String,
        document: ExprDoc,
        #[serde(default)]
        options: InsertOptions,
    },
    Update {
        alias: String,
        #[serde(rename = "in")]
        collection: String,
        patch: Vec<UpdateDoc>,
        #[serde(default = "default_true")]
        merge_objects: bool,
    },
    Replace {
        alias: String,
        #[serde(rename = "in")]
        collection: String,
        document: ExprDoc,
    },
    Upsert {
        #[serde(rename = "in")]
        collection: String,
        search: ExprDoc,
        insert: ExprDoc,
        update: Vec<UpdateDoc>,
    },
    Remove {
        alias: String,
        #[serde(rename = "in")]
        collection: String,
        #[serde(default)]
        options: RemoveOptions,
    },
    Return {
        projection: ProjectionDoc,
        #[serde(default)]
        distinct: bool,
    },
    Raw(String),
}

impl ClauseDoc {
    pub fn into_clause(self) -> Result<Clause> {
        match self {
            ClauseDoc::For { alias, source } => Clause::for_in(alias, source.into_expr()?),
            ClauseDoc::Filter(filter) => Ok(Clause::filter(filter.into_filter()?)),
            ClauseDoc::Let { alias, value } => Clause::let_(alias, value.into_expr()?),
            ClauseDoc::Sort(keys) => {
                let keys = keys
                    .into_iter()
                    .map(|k| {
                        Ok(SortKey {
                            key: k.by.into_expr()?,
                            direction: k.direction,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Clause::sort_by(keys)
            }
            ClauseDoc::Limit { count, offset } => Clause::limit_offset(offset, count),
            ClauseDoc::Collect { alias, value } => Clause::collect(alias, value.map(ExprDoc::into_expr).transpose()?),
            ClauseDoc::CollectCount { into } => Clause::collect_count(into),
            ClauseDoc::Aggregate { alias, value } => Clause::aggregate(alias, value.into_expr()?),
            ClauseDoc::Insert {
                into,
                document,
                options,
            } => Clause::insert(into, document.into_expr()?, options),
            ClauseDoc::Update {
                alias,
                collection,
                patch,
                merge_objects,
            } => Clause::update(alias, collection, patch_of(patch)?, merge_objects),
            ClauseDoc::Replace {
                alias,
                collection,
                document,
            } => Clause::replace(alias, collection, document.into_expr()?),
            ClauseDoc::Upsert {
                collection,
                search,
                insert,
                update,
            } => Clause::upsert(collection, search.into_expr()?, insert.into_expr()?, patch_of(update)?),
            ClauseDoc::Remove {
                alias,
                collection,
                options,
            } => Clause::remove(alias, collection, options),
            ClauseDoc::Return {
                projection,
                distinct: false,
            } => Ok(Clause::return_(projection.into_projection()?)),
            ClauseDoc::Return { projection, .. } => Ok(Clause::return_distinct(projection.into_projection()?)),
            ClauseDoc::Raw(text) => Ok(Clause::raw(text)),
        }
    }
}
