//! Field path resolution.
//!
//! A path is described by the caller as an ordered list of [`Member`]s
//! hanging off a named root variable. Resolution turns that description into
//! the dotted text the engine understands:
//!
//! ```text
//! root = x, navigation = [Address, zip (renamed "postal_code")]
//!   -> x.Address.postal_code
//! root = x, navigation = [Tags], terminal = Count
//!   -> COUNT(x.Tags)
//! root = x, navigation = [], terminal = TypeOf
//!   -> x.$type
//! ```

use std::fmt;

use serde::Deserialize;

use crate::error::{CompileError, Result};

/// Suffix appended to a path for [`TerminalOp::TypeOf`].
pub const TYPE_SUFFIX: &str = "$type";

/// Field-rename metadata for a document type.
///
/// Implemented by (or generated for) the types whose fields appear in
/// queries. Fields with no override are stored under their declared name.
///
/// ```
/// use aql_forge::path::{Member, Renames};
///
/// struct User;
///
/// impl Renames for User {
///     fn renamed(member: &str) -> Option<&'static str> {
///         match member {
///             "id" => Some("_key"),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Member::of::<User>("id").segment(), Some("_key"));
/// assert_eq!(Member::of::<User>("name").segment(), Some("name"));
/// ```
pub trait Renames {
    fn renamed(member: &str) -> Option<&'static str>;
}

/// One navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "MemberRepr")]
pub struct Member {
    /// Declared member name
    pub name: String,

    /// Storage name from rename metadata, preferred over `name`
    pub rename: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Member {
            name: name.into(),
            rename: None,
        }
    }

    pub fn renamed(name: impl Into<String>, rename: impl Into<String>) -> Self {
        Member {
            name: name.into(),
            rename: Some(rename.into()),
        }
    }

    /// Step whose override is looked up in `T`'s rename metadata.
    pub fn of<T: Renames>(name: impl Into<String>) -> Self {
        let name = name.into();
        let rename = T::renamed(&name).map(str::to_string);
        Member { name, rename }
    }

    /// Step through a runtime key, e.g. a dictionary lookup.
    ///
    /// The key text lands in the path verbatim. Nothing is escaped or quoted,
    /// so the caller must make sure it is a safe identifier.
    pub fn key(key: impl Into<String>) -> Self {
        let key = key.into();
        tracing::trace!(key = %key, "dynamic path segment");
        Member::new(key)
    }

    /// The text this step contributes, or `None` if the step is malformed.
    pub fn segment(&self) -> Option<&str> {
        match self.rename.as_deref() {
            Some(rename) if !rename.is_empty() => Some(rename),
            Some(_) => None,
            None if self.name.is_empty() => None,
            None => Some(&self.name),
        }
    }
}

/// Accepts `"name"` or `{"name": ..., "rename": ...}` in documents.
#[derive(Deserialize)]
#[serde(untagged)]
enum MemberRepr {
    Plain(String),
    Full { name: String, rename: Option<String> },
}

impl From<MemberRepr> for Member {
    fn from(repr: MemberRepr) -> Self {
        match repr {
            MemberRepr::Plain(name) => Member::new(name),
            MemberRepr::Full { name, rename } => Member { name, rename },
        }
    }
}

/// Special rendering applied to the end of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalOp {
    #[default]
    None,
    /// `COUNT(<path>)`
    Count,
    /// `<path>.$type`
    TypeOf,
}

/// A resolved path: root variable, segments from root-adjacent to leaf,
/// and the terminal operation.
///
/// Only [`resolve`] builds one, so a `FieldPath` is always renderable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    root: String,
    segments: Vec<String>,
    terminal: TerminalOp,
}

impl FieldPath {
    /// Path consisting of the root variable alone (`x`, `users`, ...).
    pub fn variable(root: impl Into<String>) -> Result<Self> {
        resolve(root, &[], TerminalOp::None)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn terminal(&self) -> TerminalOp {
        self.terminal
    }

    /// Last segment, falling back to the root for a bare variable.
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or(&self.root)
    }

    /// Same path, re-rooted at `root`.
    pub fn rebase(&self, root: impl Into<String>) -> Result<Self> {
        let root = root.into();
        if root.is_empty() {
            return Err(CompileError::path("root variable name cannot be empty"));
        }
        Ok(FieldPath {
            root,
            segments: self.segments.clone(),
            terminal: self.terminal,
        })
    }

    fn dotted(&self) -> String {
        let mut out = self.root.clone();
        for segment in &self.segments {
            out.push('.');
            out.push_str(segment);
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.terminal {
            TerminalOp::None => write!(f, "{}", self.dotted()),
            TerminalOp::Count => write!(f, "COUNT({})", self.dotted()),
            TerminalOp::TypeOf => write!(f, "{}.{}", self.dotted(), TYPE_SUFFIX),
        }
    }
}

/// Resolve a navigation description under `root`.
///
/// Fails when the root is empty, when a step has neither a usable name nor a
/// usable override, or when `Count` is requested on an empty navigation
/// (there is nothing to count). `TypeOf` on an empty navigation asks for the
/// type of the root variable itself and is allowed.
pub fn resolve(root: impl Into<String>, navigation: &[Member], terminal: TerminalOp) -> Result<FieldPath> {
    let root = root.into();
    if root.is_empty() {
        return Err(CompileError::path("root variable name cannot be empty"));
    }
    if navigation.is_empty() && terminal == TerminalOp::Count {
        return Err(CompileError::path(format!("COUNT requires a member path under '{}'", root)));
    }

    let segments = navigation
        .iter()
        .enumerate()
        .map(|(i, member)| {
            member.segment().map(str::to_string).ok_or_else(|| {
                CompileError::path(format!(
                    "navigation step {} under '{}' has no member name",
                    i, root
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FieldPath {
        root,
        segments,
        terminal,
    })
}

/// Convenience for plain member names.
pub fn resolve_names(root: impl Into<String>, names: &[&str], terminal: TerminalOp) -> Result<FieldPath> {
    let navigation: Vec<Member> = names.iter().map(|n| Member::new(*n)).collect();
    resolve(root, &navigation, terminal)
}
