//! Statement assembly.
//!
//! A [`Statement`] is an append-only list of clauses. [`Statement::compile`]
//! renders them left to right with one shared [`Counter`] that starts at
//! zero on every call, and pairs the text with a [`BindTable`] whose
//! entries line up one-to-one with the `@varN` tokens in the text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    ast::Clause,
    render::{Counter, Render, placeholder_name},
    value::Value,
};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(var[0-9]+)").expect("placeholder pattern is valid"));

/// Ordered clause list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    clauses: Vec<Clause>,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Clause) -> &mut Self {
        self.clauses.push(clause);
        self
    }

    /// Chaining form of [`Statement::push`].
    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn compile(&self) -> CompiledQuery {
        compile(&self.clauses)
    }
}

impl From<Vec<Clause>> for Statement {
    fn from(clauses: Vec<Clause>) -> Self {
        Statement { clauses }
    }
}

impl Extend<Clause> for Statement {
    fn extend<I: IntoIterator<Item = Clause>>(&mut self, iter: I) {
        self.clauses.extend(iter);
    }
}

impl FromIterator<Clause> for Statement {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Statement {
            clauses: iter.into_iter().collect(),
        }
    }
}

/// Render `clauses` into statement text plus bind table.
///
/// Pure: the same clauses always give the same output.
pub fn compile(clauses: &[Clause]) -> CompiledQuery {
    let mut counter = Counter::new();
    let mut fragments = Vec::with_capacity(clauses.len());
    let mut bind_vars = BindTable::default();

    for clause in clauses {
        let start = counter;
        let (text, next) = clause.render(counter);
        let values = clause.bound_values();
        debug_assert_eq!(
            start.span(next),
            values.len(),
            "{} clause minted a different number of placeholders than it bound",
            clause.keyword()
        );
        tracing::trace!(clause = clause.keyword(), placeholders = values.len(), "rendered clause");

        for (offset, value) in values.into_iter().enumerate() {
            let name = placeholder_name(start.value() + offset);
            tracing::trace!(name = %name, kind = value.type_name(), "bound value");
            bind_vars.insert(name, value);
        }
        fragments.push(text);
        counter = next;
    }

    tracing::debug!(clauses = clauses.len(), bind_vars = bind_vars.len(), "compiled statement");

    CompiledQuery {
        text: fragments.join(" "),
        bind_vars,
    }
}

/// Placeholder name -> literal, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindTable {
    entries: Vec<(String, Value)>,
}

impl BindTable {
    fn insert(&mut self, name: String, value: Value) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(n, v)| (n.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl Serialize for BindTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A finalized statement: text and bind table, read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    #[serde(rename = "query")]
    text: String,
    #[serde(rename = "bindVars")]
    bind_vars: BindTable,
}

impl CompiledQuery {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bind_vars(&self) -> &BindTable {
        &self.bind_vars
    }

    /// Placeholder names in the order they appear in the text (no `@`).
    pub fn placeholders(&self) -> Vec<&str> {
        PLACEHOLDER
            .captures_iter(&self.text)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// `{ "query": ..., "bindVars": {...} }`, the cursor request body.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "query": self.text,
            "bindVars": self.bind_vars.to_json(),
        })
    }
}
