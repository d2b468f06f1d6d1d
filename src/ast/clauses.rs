use serde::Deserialize;

use crate::{
    ast::{Expr, Filter, Patch, Projection, SortDirection},
    error::{CompileError, Result, require_name},
    render::{Counter, Render, render_joined},
    value::Value,
};

/// One statement-level construct.
///
/// Only the associated constructors build a `Clause`. They reject
/// structurally invalid arguments, so a malformed statement can never be
/// assembled. [`Clause::kind`] exposes the validated parts for inspection.
///
/// ```compile_fail
/// use aql_forge::ast::{Clause, ClauseKind};
///
/// let unsorted = Clause { kind: ClauseKind::Sort(Vec::new()) };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    kind: ClauseKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClauseKind {
    /// `FOR alias IN source`
    For { alias: String, source: Expr },

    /// `FILTER predicate`
    Filter(Filter),

    /// `LET alias = value`
    Let { alias: String, value: Expr },

    /// `SORT key ASC, key DESC`, at least one key
    Sort(Vec<SortKey>),

    /// `LIMIT count` or `LIMIT offset, count`
    Limit { offset: u64, count: u64 },

    /// `COLLECT` or `COLLECT alias = value`
    Collect(Option<(String, Expr)>),

    /// `COLLECT WITH COUNT INTO alias`
    CollectCount { alias: String },

    /// `AGGREGATE alias = value`
    Aggregate { alias: String, value: Expr },

    /// `INSERT document INTO collection [OPTIONS {...}]`
    Insert {
        collection: String,
        document: Expr,
        options: InsertOptions,
    },

    /// `UPDATE alias WITH { ... } IN collection [OPTIONS {mergeObjects:false}]`
    Update {
        alias: String,
        collection: String,
        patch: Patch,
        merge_objects: bool,
    },

    /// `REPLACE alias WITH document IN collection`
    Replace {
        alias: String,
        collection: String,
        document: Expr,
    },

    /// `UPSERT search INSERT insert UPDATE { ... } IN collection`
    Upsert {
        collection: String,
        search: Expr,
        insert: Expr,
        patch: Patch,
    },

    /// `REMOVE alias IN collection [OPTIONS {...}]`
    Remove {
        alias: String,
        collection: String,
        options: RemoveOptions,
    },

    /// `RETURN [DISTINCT] projection`
    Return {
        projection: Projection,
        distinct: bool,
    },

    /// Passed through verbatim
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub key: Expr,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(key: Expr) -> Self {
        SortKey {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: Expr) -> Self {
        SortKey {
            key,
            direction: SortDirection::Desc,
        }
    }
}

impl Render for SortKey {
    fn render(&self, counter: Counter) -> (String, Counter) {
        let (key, counter) = self.key.render(counter);
        (format!("{} {}", key, self.direction), counter)
    }

    fn bind_values(&self, out: &mut Vec<Value>) {
        self.key.bind_values(out);
    }
}

/// What `INSERT` does when the document key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwriteMode {
    Ignore,
    Replace,
    Update,
    Conflict,
}

impl OverwriteMode {
    fn as_str(self) -> &'static str {
        match self {
            OverwriteMode::Ignore => "ignore",
            OverwriteMode::Replace => "replace",
            OverwriteMode::Update => "update",
            OverwriteMode::Conflict => "conflict",
        }
    }
}

/// Conflict handling and durability for `INSERT`. Unset fields are left to
/// the engine's defaults and not rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsertOptions {
    pub overwrite_mode: Option<OverwriteMode>,
    /// Requires `OverwriteMode::Update`
    pub keep_null: Option<bool>,
    /// Requires `OverwriteMode::Update`
    pub merge_objects: Option<bool>,
    pub ignore_errors: Option<bool>,
    pub wait_for_sync: Option<bool>,
}

impl InsertOptions {
    fn validate(&self) -> Result<()> {
        if self.overwrite_mode == Some(OverwriteMode::Update) {
            return Ok(());
        }
        let update_only = [("keepNull", self.keep_null), ("mergeObjects", self.merge_objects)];
        match update_only.into_iter().find(|(_, flag)| flag.is_some()) {
            Some((name, _)) => Err(CompileError::clause(format!(
                "INSERT option {} requires overwriteMode \"update\"",
                name
            ))),
            None => Ok(()),
        }
    }

    fn render(&self) -> Option<String> {
        let mut pairs = Vec::new();
        if let Some(mode) = self.overwrite_mode {
            pairs.push(format!("overwriteMode:\"{}\"", mode.as_str()));
        }
        push_flag(&mut pairs, "keepNull", self.keep_null);
        push_flag(&mut pairs, "mergeObjects", self.merge_objects);
        push_flag(&mut pairs, "ignoreErrors", self.ignore_errors);
        push_flag(&mut pairs, "waitForSync", self.wait_for_sync);
        options_block(pairs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoveOptions {
    pub ignore_errors: Option<bool>,
    pub wait_for_sync: Option<bool>,
}

impl RemoveOptions {
    fn render(&self) -> Option<String> {
        let mut pairs = Vec::new();
        push_flag(&mut pairs, "ignoreErrors", self.ignore_errors);
        push_flag(&mut pairs, "waitForSync", self.wait_for_sync);
        options_block(pairs)
    }
}

fn push_flag(pairs: &mut Vec<String>, name: &str, flag: Option<bool>) {
    if let Some(flag) = flag {
        pairs.push(format!("{}:{}", name, flag));
    }
}

fn options_block(pairs: Vec<String>) -> Option<String> {
    if pairs.is_empty() {
        None
    } else {
        Some(format!("OPTIONS {{{}}}", pairs.join(", ")))
    }
}

fn with_options(text: String, options: Option<String>) -> String {
    match options {
        Some(options) => format!("{} {}", text, options),
        None => text,
    }
}

impl Clause {
    fn from_kind(kind: ClauseKind) -> Self {
        Clause { kind }
    }

    pub fn kind(&self) -> &ClauseKind {
        &self.kind
    }

    pub fn for_in(alias: impl Into<String>, source: Expr) -> Result<Self> {
        let alias = alias.into();
        require_name("loop variable", &alias)?;
        Ok(Clause::from_kind(ClauseKind::For { alias, source }))
    }

    pub fn filter(predicate: Filter) -> Self {
        Clause::from_kind(ClauseKind::Filter(predicate))
    }

    pub fn let_(alias: impl Into<String>, value: Expr) -> Result<Self> {
        let alias = alias.into();
        require_name("variable", &alias)?;
        Ok(Clause::from_kind(ClauseKind::Let { alias, value }))
    }

    pub fn sort(key: Expr, direction: SortDirection) -> Self {
        Clause::from_kind(ClauseKind::Sort(vec![SortKey { key, direction }]))
    }

    pub fn sort_by(keys: Vec<SortKey>) -> Result<Self> {
        if keys.is_empty() {
            return Err(CompileError::clause("SORT requires at least one key"));
        }
        Ok(Clause::from_kind(ClauseKind::Sort(keys)))
    }

    pub fn limit(count: i64) -> Result<Self> {
        Clause::limit_offset(0, count)
    }

    pub fn limit_offset(offset: i64, count: i64) -> Result<Self> {
        let count = u64::try_from(count)
            .map_err(|_| CompileError::clause(format!("LIMIT count cannot be negative (got {})", count)))?;
        let offset = u64::try_from(offset)
            .map_err(|_| CompileError::clause(format!("LIMIT offset cannot be negative (got {})", offset)))?;
        Ok(Clause::from_kind(ClauseKind::Limit { offset, count }))
    }

    /// `COLLECT` alone, or `COLLECT alias = value`. Supplying only one of the
    /// two is rejected.
    pub fn collect(alias: Option<String>, value: Option<Expr>) -> Result<Self> {
        match (alias, value) {
            (None, None) => Ok(Clause::from_kind(ClauseKind::Collect(None))),
            (Some(alias), Some(value)) => {
                require_name("group variable", &alias)?;
                Ok(Clause::from_kind(ClauseKind::Collect(Some((alias, value)))))
            }
            (Some(alias), None) => Err(CompileError::clause(format!(
                "COLLECT variable '{}' has no grouping value",
                alias
            ))),
            (None, Some(_)) => Err(CompileError::clause("COLLECT grouping value has no variable")),
        }
    }

    pub fn collect_count(alias: impl Into<String>) -> Result<Self> {
        let alias = alias.into();
        require_name("count variable", &alias)?;
        Ok(Clause::from_kind(ClauseKind::CollectCount { alias }))
    }

    pub fn aggregate(alias: impl Into<String>, value: Expr) -> Result<Self> {
        let alias = alias.into();
        require_name("aggregate variable", &alias)?;
        Ok(Clause::from_kind(ClauseKind::Aggregate { alias, value }))
    }

    /// Rejects `keepNull`/`mergeObjects` unless the overwrite mode is
    /// `update`, the only mode they apply to.
    pub fn insert(collection: impl Into<String>, document: Expr, options: InsertOptions) -> Result<Self> {
        let collection = collection.into();
        require_name("collection", &collection)?;
        options.validate()?;
        Ok(Clause::from_kind(ClauseKind::Insert {
            collection,
            document,
            options,
        }))
    }

    pub fn update(
        alias: impl Into<String>,
        collection: impl Into<String>,
        patch: Patch,
        merge_objects: bool,
    ) -> Result<Self> {
        let alias = alias.into();
        let collection = collection.into();
        require_name("document variable", &alias)?;
        require_name("collection", &collection)?;
        Ok(Clause::from_kind(ClauseKind::Update {
            alias,
            collection,
            patch,
            merge_objects,
        }))
    }

    pub fn replace(alias: impl Into<String>, collection: impl Into<String>, document: Expr) -> Result<Self> {
        let alias = alias.into();
        let collection = collection.into();
        require_name("document variable", &alias)?;
        require_name("collection", &collection)?;
        Ok(Clause::from_kind(ClauseKind::Replace {
            alias,
            collection,
            document,
        }))
    }

    pub fn upsert(collection: impl Into<String>, search: Expr, insert: Expr, patch: Patch) -> Result<Self> {
        let collection = collection.into();
        require_name("collection", &collection)?;
        Ok(Clause::from_kind(ClauseKind::Upsert {
            collection,
            search,
            insert,
            patch,
        }))
    }

    pub fn remove(alias: impl Into<String>, collection: impl Into<String>, options: RemoveOptions) -> Result<Self> {
        let alias = alias.into();
        let collection = collection.into();
        require_name("document variable", &alias)?;
        require_name("collection", &collection)?;
        Ok(Clause::from_kind(ClauseKind::Remove {
            alias,
            collection,
            options,
        }))
    }

    pub fn return_(projection: Projection) -> Self {
        Clause::from_kind(ClauseKind::Return {
            projection,
            distinct: false,
        })
    }

    pub fn return_distinct(projection: Projection) -> Self {
        Clause::from_kind(ClauseKind::Return {
            projection,
            distinct: true,
        })
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Clause::from_kind(ClauseKind::Raw(text.into()))
    }

    /// Leading keyword, for log output.
    pub fn keyword(&self) -> &'static str {
        match &self.kind {
            ClauseKind::For { .. } => "FOR",
            ClauseKind::Filter(_) => "FILTER",
            ClauseKind::Let { .. } => "LET",
            ClauseKind::Sort(_) => "SORT",
            ClauseKind::Limit { .. } => "LIMIT",
            ClauseKind::Collect(_) | ClauseKind::CollectCount { .. } => "COLLECT",
            ClauseKind::Aggregate { .. } => "AGGREGATE",
            ClauseKind::Insert { .. } => "INSERT",
            ClauseKind::Update { .. } => "UPDATE",
            ClauseKind::Replace { .. } => "REPLACE",
            ClauseKind::Upsert { .. } => "UPSERT",
            ClauseKind::Remove { .. } => "REMOVE",
            ClauseKind::Return { .. } => "RETURN",
            ClauseKind::Raw(_) => "RAW",
        }
    }
}

impl Render for Clause {
    fn render(&self, counter: Counter) -> (String, Counter) {
        match &self.kind {
            ClauseKind::For { alias, source } => {
                let (s, counter) = source.render(counter);
                (format!("FOR {} IN {}", alias, s), counter)
            }
            ClauseKind::Filter(predicate) => {
                let (p, counter) = predicate.render(counter);
                (format!("FILTER {}", p), counter)
            }
            ClauseKind::Let { alias, value } => {
                let (v, counter) = value.render(counter);
                (format!("LET {} = {}", alias, v), counter)
            }
            ClauseKind::Sort(keys) => {
                let (k, counter) = render_joined(keys, ", ", counter);
                (format!("SORT {}", k), counter)
            }
            ClauseKind::Limit { offset: 0, count } => (format!("LIMIT {}", count), counter),
            ClauseKind::Limit { offset, count } => (format!("LIMIT {}, {}", offset, count), counter),
            ClauseKind::Collect(None) => ("COLLECT".to_string(), counter),
            ClauseKind::Collect(Some((alias, value))) => {
                let (v, counter) = value.render(counter);
                (format!("COLLECT {} = {}", alias, v), counter)
            }
            ClauseKind::CollectCount { alias } => (format!("COLLECT WITH COUNT INTO {}", alias), counter),
            ClauseKind::Aggregate { alias, value } => {
                let (v, counter) = value.render(counter);
                (format!("AGGREGATE {} = {}", alias, v), counter)
            }
            ClauseKind::Insert {
                collection,
                document,
                options,
            } => {
                let (d, counter) = document.render(counter);
                let text = format!("INSERT {} INTO {}", d, collection);
                (with_options(text, options.render()), counter)
            }
            ClauseKind::Update {
                alias,
                collection,
                patch,
                merge_objects,
            } => {
                let (p, counter) = patch.render(counter);
                let text = format!("UPDATE {} WITH {} IN {}", alias, p, collection);
                let options = (!merge_objects).then(|| "OPTIONS {mergeObjects:false}".to_string());
                (with_options(text, options), counter)
            }
            ClauseKind::Replace {
                alias,
                collection,
                document,
            } => {
                let (d, counter) = document.render(counter);
                (format!("REPLACE {} WITH {} IN {}", alias, d, collection), counter)
            }
            ClauseKind::Upsert {
                collection,
                search,
                insert,
                patch,
            } => {
                let (s, counter) = search.render(counter);
                let (i, counter) = insert.render(counter);
                let (p, counter) = patch.render(counter);
                (format!("UPSERT {} INSERT {} UPDATE {} IN {}", s, i, p, collection), counter)
            }
            ClauseKind::Remove {
                alias,
                collection,
                options,
            } => {
                let text = format!("REMOVE {} IN {}", alias, collection);
                (with_options(text, options.render()), counter)
            }
            ClauseKind::Return {
                projection,
                distinct,
            } => {
                let keyword = if *distinct { "RETURN DISTINCT" } else { "RETURN" };
                (format!("{} {}", keyword, projection), counter)
            }
            ClauseKind::Raw(text) => (text.clone(), counter),
        }
    }

    fn bind_values(&self, out: &mut Vec<Value>) {
        match &self.kind {
            ClauseKind::For { source: value, .. }
            | ClauseKind::Let { value, .. }
            | ClauseKind::Collect(Some((_, value)))
            | ClauseKind::Aggregate { value, .. }
            | ClauseKind::Insert { document: value, .. }
            | ClauseKind::Replace { document: value, .. } => value.bind_values(out),
            ClauseKind::Filter(predicate) => predicate.bind_values(out),
            ClauseKind::Sort(keys) => {
                for key in keys {
                    key.bind_values(out);
                }
            }
            ClauseKind::Update { patch, .. } => patch.bind_values(out),
            ClauseKind::Upsert {
                search, insert, patch, ..
            } => {
                search.bind_values(out);
                insert.bind_values(out);
                patch.bind_values(out);
            }
            ClauseKind::Limit { .. }
            | ClauseKind::Collect(None)
            | ClauseKind::CollectCount { .. }
            | ClauseKind::Remove { .. }
            | ClauseKind::Return { .. }
            | ClauseKind::Raw(_) => {}
        }
    }
}
