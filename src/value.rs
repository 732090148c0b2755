//! The heterogeneous result type produced by a successful match.

use std::ops::Add;
use std::rc::Rc;

/// A single value produced by a match attempt.
///
/// Matchers never inspect `Value` contents except `Add` (which needs the
/// `concat` behaviour below) and user-supplied transform closures.
#[derive(Clone)]
pub enum Value {
    /// A piece of matched text (the common case: `Any`, `Literal`, `Regexp`).
    Token(String),
    /// A nested group of values, produced by user `Apply`/`KApply` closures
    /// that want to build a tree rather than a flat list.
    Group(Vec<Value>),
    /// A `(name, value)` pair, produced by `Name`/`Apply(label)`.
    Named(String, Box<Value>),
    /// An arbitrary user value that does not fit the above shapes.
    Opaque(Rc<dyn std::any::Any>),
}

impl Value {
    pub fn token(s: impl Into<String>) -> Self {
        Value::Token(s.into())
    }

    /// Borrow the underlying text, if this value is a plain `Token`.
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Value::Token(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Token(t) => f.debug_tuple("Token").field(t).finish(),
            Value::Group(g) => f.debug_tuple("Group").field(g).finish(),
            Value::Named(n, v) => f.debug_tuple("Named").field(n).field(v).finish(),
            Value::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Token(a), Value::Token(b)) => a == b,
            (Value::Group(a), Value::Group(b)) => a == b,
            (Value::Named(n1, v1), Value::Named(n2, v2)) => n1 == n2 && v1 == v2,
            _ => false,
        }
    }
}

/// Fold two results together with `+`, as used by the `Add` combinator.
///
/// Strings join, groups merge; anything else is wrapped into a fresh
/// `Group` of the two operands (the sequence-concatenation default the
/// design notes call for).
impl Add for Value {
    type Output = Value;

    fn add(self, other: Value) -> Value {
        match (self, other) {
            (Value::Token(mut a), Value::Token(b)) => {
                a.push_str(&b);
                Value::Token(a)
            }
            (Value::Group(mut a), Value::Group(b)) => {
                a.extend(b);
                Value::Group(a)
            }
            (Value::Group(mut a), other) => {
                a.push(other);
                Value::Group(a)
            }
            (this, Value::Group(mut b)) => {
                b.insert(0, this);
                Value::Group(b)
            }
            (this, other) => Value::Group(vec![this, other]),
        }
    }
}

/// Fold a whole result list with `+`, per `Add(And(...))` semantics:
/// the empty list folds to the empty list, not a unit.
pub fn fold_add(results: Vec<Value>) -> Vec<Value> {
    let mut iter = results.into_iter();
    match iter.next() {
        None => vec![],
        Some(first) => vec![iter.fold(first, |acc, v| acc + v)],
    }
}
