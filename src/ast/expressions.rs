use crate::{
    ast::BinOp,
    error::{Result, require_name},
    path::{FieldPath, Member, TerminalOp, resolve},
    render::{Counter, Render, render_joined},
    value::Value,
};

/// Value node: anything that produces a value inside a statement.
///
/// # Rendering
///
/// | Variant | Text | Bound |
/// |---|---|---|
/// | `Field` | `x.a.b` | nothing |
/// | `Literal` | `@varN` | the value |
/// | `Array` | `@varN` | the whole array |
/// | `BinaryOp` | `(left op right)` | left, then right |
/// | `Call` | `NAME(a, b)` | each argument in order |
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a variable or a field beneath it
    ///
    /// # Example
    /// ```text
    /// x.Address.city
    /// ```
    Field(FieldPath),

    /// Bound literal
    Literal(Value),

    /// Array bound as one unit
    ///
    /// # Example
    /// ```text
    /// x.status IN @var0
    /// ```
    Array(Vec<Value>),

    /// Arithmetic on two values
    ///
    /// # Example
    /// ```text
    /// (x.price * @var0)
    /// ```
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Engine function call
    ///
    /// # Example
    /// ```text
    /// LENGTH(x.items)
    /// ```
    Call(Call),
}

/// A function call with a validated name. Built by [`Expr::call`].
///
/// ```compile_fail
/// use aql_forge::ast::{Call, Expr};
///
/// let anonymous = Expr::Call(Call { name: String::new(), args: Vec::new() });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    name: String,
    args: Vec<Expr>,
}

impl Call {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

impl Expr {
    /// Bare variable reference (`x`, `users`).
    pub fn var(name: impl Into<String>) -> Result<Self> {
        FieldPath::variable(name).map(Expr::Field)
    }

    /// Field reference built from plain member names.
    pub fn field(root: impl Into<String>, names: &[&str]) -> Result<Self> {
        let navigation: Vec<Member> = names.iter().map(|n| Member::new(*n)).collect();
        Expr::path(root, &navigation, TerminalOp::None)
    }

    pub fn path(root: impl Into<String>, navigation: &[Member], terminal: TerminalOp) -> Result<Self> {
        resolve(root, navigation, terminal).map(Expr::Field)
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expr::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Result<Self> {
        let name = name.into();
        require_name("function", &name)?;
        Ok(Expr::Call(Call { name, args }))
    }
}

impl Render for Expr {
    fn render(&self, counter: Counter) -> (String, Counter) {
        match self {
            Expr::Field(path) => (path.to_string(), counter),
            Expr::Literal(_) | Expr::Array(_) => counter.mint(),
            Expr::BinaryOp { op, left, right } => {
                let (l, counter) = left.render(counter);
                let (r, counter) = right.render(counter);
                (format!("({} {} {})", l, op, r), counter)
            }
            Expr::Call(call) => {
                let (joined, counter) = render_joined(&call.args, ", ", counter);
                (format!("{}({})", call.name, joined), counter)
            }
        }
    }

    fn bind_values(&self, out: &mut Vec<Value>) {
        match self {
            Expr::Field(_) => {}
            Expr::Literal(value) => out.push(value.clone()),
            Expr::Array(items) => out.push(Value::Array(items.clone())),
            Expr::BinaryOp { left, right, .. } => {
                left.bind_values(out);
                right.bind_values(out);
            }
            Expr::Call(call) => {
                for arg in &call.args {
                    arg.bind_values(out);
                }
            }
        }
    }
}

impl From<FieldPath> for Expr {
    fn from(path: FieldPath) -> Self {
        Expr::Field(path)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}
