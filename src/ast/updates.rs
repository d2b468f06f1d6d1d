use crate::{
    ast::Expr,
    error::{CompileError, Result, require_name},
    path::{FieldPath, TerminalOp},
    render::{Counter, Render, render_joined},
    value::Value,
};

/// One entry of a patch object.
///
/// ```compile_fail
/// use aql_forge::ast::{Expr, Update, UpdateKind};
///
/// let unnamed = Update { kind: UpdateKind::Set { field: String::new(), value: Expr::literal(1) } };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    kind: UpdateKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    /// `field:value`
    Set { field: String, value: Expr },

    /// `field:MERGE(base, { ... })`
    ///
    /// Patches a nested object while keeping the sibling fields it already
    /// has. `base` is the current location of that nested object.
    Merge {
        field: String,
        base: FieldPath,
        patch: Patch,
    },

    /// `field:base.field+delta`
    ///
    /// `base` is the object that holds `field`.
    Increment {
        field: String,
        base: FieldPath,
        delta: Expr,
    },
}

impl Update {
    pub fn kind(&self) -> &UpdateKind {
        &self.kind
    }

    pub fn set(field: impl Into<String>, value: Expr) -> Result<Self> {
        let field = field.into();
        require_name("field", &field)?;
        Ok(Update {
            kind: UpdateKind::Set { field, value },
        })
    }

    /// `base` must be a plain object path: `MERGE(COUNT(..), ..)` is not
    /// an object.
    pub fn merge(field: impl Into<String>, base: FieldPath, patch: Patch) -> Result<Self> {
        let field = field.into();
        require_name("field", &field)?;
        require_object_base("MERGE", &field, &base)?;
        Ok(Update {
            kind: UpdateKind::Merge { field, base, patch },
        })
    }

    pub fn increment(field: impl Into<String>, base: FieldPath, delta: Expr) -> Result<Self> {
        let field = field.into();
        require_name("field", &field)?;
        require_object_base("increment", &field, &base)?;
        Ok(Update {
            kind: UpdateKind::Increment { field, base, delta },
        })
    }
}

fn require_object_base(kind: &str, field: &str, base: &FieldPath) -> Result<()> {
    if base.terminal() == TerminalOp::None {
        return Ok(());
    }
    Err(CompileError::clause(format!(
        "{} of '{}' needs an object base, got '{}'",
        kind, field, base
    )))
}

impl Render for Update {
    fn render(&self, counter: Counter) -> (String, Counter) {
        match &self.kind {
            UpdateKind::Set { field, value } => {
                let (v, counter) = value.render(counter);
                (format!("{}:{}", field, v), counter)
            }
            UpdateKind::Merge { field, base, patch } => {
                let (p, counter) = patch.render(counter);
                (format!("{}:MERGE({}, {})", field, base, p), counter)
            }
            UpdateKind::Increment { field, base, delta } => {
                let (d, counter) = delta.render(counter);
                (format!("{}:{}.{}+{}", field, base, field, d), counter)
            }
        }
    }

    fn bind_values(&self, out: &mut Vec<Value>) {
        match &self.kind {
            UpdateKind::Set { value, .. } => value.bind_values(out),
            UpdateKind::Merge { patch, .. } => patch.bind_values(out),
            UpdateKind::Increment { delta, .. } => delta.bind_values(out),
        }
    }
}

/// A non-empty patch object, rendered as `{ a:..., b:... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    entries: Vec<Update>,
}

impl Patch {
    pub fn new(entries: Vec<Update>) -> Result<Self> {
        if entries.is_empty() {
            return Err(CompileError::clause("update patch must contain at least one entry"));
        }
        Ok(Patch { entries })
    }

    pub fn entries(&self) -> &[Update] {
        &self.entries
    }
}

impl Render for Patch {
    fn render(&self, counter: Counter) -> (String, Counter) {
        let (joined, counter) = render_joined(&self.entries, ", ", counter);
        (format!("{{ {} }}", joined), counter)
    }

    fn bind_values(&self, out: &mut Vec<Value>) {
        for entry in &self.entries {
            entry.bind_values(out);
        }
    }
}

/// Collects patch entries, then validates on [`PatchBuilder::build`].
#[derive(Debug, Default)]
pub struct PatchBuilder {
    entries: Vec<Update>,
}

impl PatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: Update) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn set(mut self, field: impl Into<String>, value: Expr) -> Result<Self> {
        self.entries.push(Update::set(field, value)?);
        Ok(self)
    }

    pub fn build(self) -> Result<Patch> {
        Patch::new(self.entries)
    }
}
