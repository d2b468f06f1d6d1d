use crate::{
    ast::{CompareOp, Expr},
    error::{CompileError, Result},
    render::{Counter, Render},
    value::Value,
};

/// Predicate node.
///
/// Comparisons bind tighter than `AND`/`OR`, so only a junction nested inside
/// another junction is parenthesized:
///
/// ```text
/// x.a == @var0 OR (x.b > @var1 AND x.c IN @var2)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `left op right`
    Compare { op: CompareOp, left: Expr, right: Expr },

    /// `value IN source` / `value NOT IN source`
    Membership {
        negated: bool,
        value: Expr,
        source: Expr,
    },

    /// `AND` / `OR` over at least one operand
    Junction(Junction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn keyword(self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }
}

/// Non-empty boolean composition. Only [`Junction::new`] builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    connective: Connective,
    operands: Vec<Filter>,
}

impl Junction {
    pub fn new(connective: Connective, operands: Vec<Filter>) -> Result<Self> {
        if operands.is_empty() {
            return Err(CompileError::EmptyComposition(connective.keyword()));
        }
        Ok(Junction {
            connective,
            operands,
        })
    }

    pub fn connective(&self) -> Connective {
        self.connective
    }

    pub fn operands(&self) -> &[Filter] {
        &self.operands
    }
}

impl Filter {
    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Self {
        Filter::Compare { op, left, right }
    }

    pub fn eq(left: Expr, right: Expr) -> Self {
        Filter::compare(CompareOp::Equal, left, right)
    }

    pub fn ne(left: Expr, right: Expr) -> Self {
        Filter::compare(CompareOp::NotEqual, left, right)
    }

    pub fn gt(left: Expr, right: Expr) -> Self {
        Filter::compare(CompareOp::GreaterThan, left, right)
    }

    pub fn ge(left: Expr, right: Expr) -> Self {
        Filter::compare(CompareOp::GreaterEqual, left, right)
    }

    pub fn lt(left: Expr, right: Expr) -> Self {
        Filter::compare(CompareOp::LessThan, left, right)
    }

    pub fn le(left: Expr, right: Expr) -> Self {
        Filter::compare(CompareOp::LessEqual, left, right)
    }

    pub fn is_in(value: Expr, source: Expr) -> Self {
        Filter::Membership {
            negated: false,
            value,
            source,
        }
    }

    pub fn not_in(value: Expr, source: Expr) -> Self {
        Filter::Membership {
            negated: true,
            value,
            source,
        }
    }

    pub fn and(operands: Vec<Filter>) -> Result<Self> {
        Junction::new(Connective::And, operands).map(Filter::Junction)
    }

    pub fn or(operands: Vec<Filter>) -> Result<Self> {
        Junction::new(Connective::Or, operands).map(Filter::Junction)
    }

    /// `value >= min AND value <= max`
    pub fn between(value: Expr, min: Expr, max: Expr) -> Self {
        Filter::Junction(Junction {
            connective: Connective::And,
            operands: vec![
                Filter::ge(value.clone(), min),
                Filter::le(value, max),
            ],
        })
    }
}

impl Render for Filter {
    fn render(&self, counter: Counter) -> (String, Counter) {
        match self {
            Filter::Compare { op, left, right } => {
                let (l, counter) = left.render(counter);
                let (r, counter) = right.render(counter);
                (format!("{} {} {}", l, op, r), counter)
            }
            Filter::Membership {
                negated,
                value,
                source,
            } => {
                let (v, counter) = value.render(counter);
                let (s, counter) = source.render(counter);
                let keyword = if *negated { "NOT IN" } else { "IN" };
                (format!("{} {} {}", v, keyword, s), counter)
            }
            Filter::Junction(junction) => {
                let sep = format!(" {} ", junction.connective.keyword());
                let mut counter = counter;
                let mut parts = Vec::with_capacity(junction.operands.len());
                for operand in &junction.operands {
                    let (text, next) = operand.render(counter);
                    counter = next;
                    if matches!(operand, Filter::Junction(_)) {
                        parts.push(format!("({})", text));
                    } else {
                        parts.push(text);
                    }
                }
                (parts.join(&sep), counter)
            }
        }
    }

    fn bind_values(&self, out: &mut Vec<Value>) {
        match self {
            Filter::Compare { left, right, .. } => {
                left.bind_values(out);
                right.bind_values(out);
            }
            Filter::Membership { value, source, .. } => {
                value.bind_values(out);
                source.bind_values(out);
            }
            Filter::Junction(junction) => {
                for operand in &junction.operands {
                    operand.bind_values(out);
                }
            }
        }
    }
}
