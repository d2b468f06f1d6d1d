//! The render contract shared by every node algebra.
//!
//! Rendering threads an explicit [`Counter`] through the tree: each call
//! takes the counter as it stands and hands back the text together with the
//! counter to use for whatever renders next. Children are always visited
//! left to right, so the N-th `@varN` in the text is the N-th bound value.

use std::fmt;

use crate::value::Value;

/// Prefix of every placeholder name. `@` marks a bind parameter in text.
pub const PLACEHOLDER_PREFIX: &str = "var";

/// Next placeholder number to hand out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Counter(usize);

impl Counter {
    pub fn new() -> Self {
        Counter(0)
    }

    pub fn value(self) -> usize {
        self.0
    }

    /// Mint a placeholder token (`@var3`) and return the advanced counter.
    pub fn mint(self) -> (String, Counter) {
        (format!("@{}", placeholder_name(self.0)), Counter(self.0 + 1))
    }

    /// Placeholders minted between `self` and `later`.
    pub fn span(self, later: Counter) -> usize {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bind-table key for placeholder number `n` (no `@`).
pub fn placeholder_name(n: usize) -> String {
    format!("{}{}", PLACEHOLDER_PREFIX, n)
}

/// A node that renders to statement text and carries bound literals.
///
/// Implementations must mint exactly one placeholder per value pushed by
/// [`Render::bind_values`], in the same order.
pub trait Render {
    fn render(&self, counter: Counter) -> (String, Counter);

    /// Append this node's literals, in render order.
    fn bind_values(&self, out: &mut Vec<Value>);

    fn bound_values(&self) -> Vec<Value> {
        let mut out = Vec::new();
        self.bind_values(&mut out);
        out
    }
}

/// Render `items` left to right, joined by `sep`.
pub(crate) fn render_joined<'a, T, I>(items: I, sep: &str, counter: Counter) -> (String, Counter)
where
    T: Render + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut counter = counter;
    let mut parts = Vec::new();
    for item in items {
        let (text, next) = item.render(counter);
        parts.push(text);
        counter = next;
    }
    (parts.join(sep), counter)
}
