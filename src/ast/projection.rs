use std::{collections::HashSet, fmt};

use crate::{
    error::{CompileError, Result, require_name},
    path::{FieldPath, Member, TerminalOp, resolve},
};

/// The expression after `RETURN`.
///
/// Projections only reference variables that already exist in the
/// statement, so they never bind literals.
///
/// ```compile_fail
/// use aql_forge::ast::{Projection, ProjectionKind};
///
/// let empty = Projection { kind: ProjectionKind::Partial(Vec::new()) };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    kind: ProjectionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionKind {
    /// The whole variable: `x`
    Variable(String),

    /// A single path: `x.Address.city`
    Field(FieldPath),

    /// Selected fields of one variable: `{Name:x.Name, key:x._key}`
    ///
    /// Each key is the leaf segment of its path, unique within the object.
    Partial(Vec<FieldPath>),

    /// Hand-built object: `{total:x.Total, who:{name:u.Name}}`
    Object(Vec<(String, Projection)>),
}

impl Projection {
    pub fn kind(&self) -> &ProjectionKind {
        &self.kind
    }

    pub fn variable(alias: impl Into<String>) -> Result<Self> {
        let alias = alias.into();
        require_name("variable", &alias)?;
        Ok(Projection {
            kind: ProjectionKind::Variable(alias),
        })
    }

    pub fn field(path: FieldPath) -> Self {
        Projection {
            kind: ProjectionKind::Field(path),
        }
    }

    /// Partial projection of `alias` from a typed field list.
    pub fn partial(alias: &str, fields: &[Vec<Member>]) -> Result<Self> {
        if fields.is_empty() {
            return Err(CompileError::clause("partial projection needs at least one field"));
        }
        let paths = fields
            .iter()
            .map(|navigation| {
                if navigation.is_empty() {
                    return Err(CompileError::path(format!(
                        "projected field of '{}' has no member path",
                        alias
                    )));
                }
                resolve(alias, navigation, TerminalOp::None)
            })
            .collect::<Result<Vec<_>>>()?;
        reject_duplicate_keys(paths.iter().map(FieldPath::leaf))?;
        Ok(Projection {
            kind: ProjectionKind::Partial(paths),
        })
    }

    pub fn object(entries: Vec<(String, Projection)>) -> Result<Self> {
        for (key, _) in &entries {
            require_name("projection key", key)?;
        }
        reject_duplicate_keys(entries.iter().map(|(key, _)| key.as_str()))?;
        Ok(Projection {
            kind: ProjectionKind::Object(entries),
        })
    }
}

fn reject_duplicate_keys<'a>(keys: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(CompileError::clause(format!("projection key '{}' appears more than once", key)));
        }
    }
    Ok(())
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProjectionKind::Variable(alias) => f.write_str(alias),
            ProjectionKind::Field(path) => write!(f, "{}", path),
            ProjectionKind::Partial(paths) => {
                let entries: Vec<String> = paths
                    .iter()
                    .map(|path| format!("{}:{}", path.leaf(), path))
                    .collect();
                write!(f, "{{{}}}", entries.join(", "))
            }
            ProjectionKind::Object(entries) => {
                let entries: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}:{}", key, value))
                    .collect();
                write!(f, "{{{}}}", entries.join(", "))
            }
        }
    }
}

impl From<FieldPath> for Projection {
    fn from(path: FieldPath) -> Self {
        Projection::field(path)
    }
}
