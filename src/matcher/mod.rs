//! The matcher protocol: every primitive in this crate is a `Matcher`, a
//! cheaply-cloned handle to a tree node that, applied to a `Stream`,
//! produces a lazy, restartable sequence of match attempts.

pub mod alt;
pub mod commit;
pub mod delayed;
pub mod lookahead;
pub mod repeat;
pub mod seq;
pub mod terminal;
pub mod transform;

use std::any::Any;
use std::rc::Rc;

use crate::error::Error;
use crate::stream::Stream;
use crate::value::Value;

/// One `(result, stream_after)` pair, or a propagated error.
pub type Attempt = Result<(Vec<Value>, Stream), Error>;

/// The lazy, restartable sequence a matcher produces. Boxed because the
/// matcher tree is built at runtime and the concrete iterator type differs
/// per matcher kind; dropping it early releases any child iterators it
/// holds, which is all the "close" contract requires in safe Rust.
pub type Attempts = Box<dyn Iterator<Item = Attempt>>;

/// The trait every primitive matcher node implements. Not exposed directly;
/// callers build and combine [`Matcher`] values instead.
pub trait MatchNode: 'static {
    fn apply(&self, stream: Stream) -> Attempts;

    /// Short label used in `Debug` output and (behind the `trace` feature)
    /// log messages. Purely diagnostic.
    fn tag(&self) -> String;

    /// Support for the `!` operator's special case: inverting a
    /// `Lookahead` flips its polarity instead of wrapping it in `Drop`.
    fn as_any(&self) -> &dyn Any {
        unreachable!("override as_any to participate in downcasting")
    }
}

/// A reference-counted handle to a matcher tree node. `Clone` is a cheap
/// `Rc` bump, which is what lets the same sub-grammar be shared from
/// multiple places (and is essential for `Delayed`-based recursion).
#[derive(Clone)]
pub struct Matcher(pub(crate) Rc<dyn MatchNode>);

impl Matcher {
    pub fn new(node: impl MatchNode) -> Self {
        Matcher(Rc::new(node))
    }

    pub fn apply(&self, stream: Stream) -> Attempts {
        self.0.apply(stream)
    }

    pub fn tag(&self) -> String {
        self.0.tag()
    }

    /// `self & other` as a method, for callers who prefer fluent syntax
    /// (or need it, since macros and generic code can't always spell
    /// operator syntax conveniently).
    pub fn and(self, other: impl Into<Matcher>) -> Matcher {
        seq::And::new(vec![self, other.into()])
    }

    pub fn or(self, other: impl Into<Matcher>) -> Matcher {
        alt::Or::new(vec![self, other.into()])
    }

    pub fn join(self, other: impl Into<Matcher>) -> Matcher {
        transform::add(seq::And::new(vec![self, other.into()]))
    }

    /// `a / b`: `And(a, OptionalSpace, b)` — sequence the two operands with
    /// optional whitespace allowed, but not required, between them.
    pub fn loose(self, other: impl Into<Matcher>) -> Matcher {
        seq::And::new(vec![self, crate::combinators::optional_space(), other.into()])
    }

    /// `a // b`: `And(a, RequiredSpace, b)` — like [`loose`](Self::loose),
    /// but at least one whitespace character must separate the operands.
    pub fn tight(self, other: impl Into<Matcher>) -> Matcher {
        seq::And::new(vec![self, crate::combinators::required_space(), other.into()])
    }

    pub fn drop(self) -> Matcher {
        transform::drop(self)
    }

    pub fn map(self, f: impl Fn(Value) -> Value + 'static) -> Matcher {
        transform::map(self, f)
    }

    pub fn apply_fn(self, f: impl Fn(&[Value]) -> Value + 'static) -> Matcher {
        transform::apply(self, f)
    }

    /// `Apply(f, args=true)`: the spec's positional variant of `apply_fn`.
    pub fn apply_args(self, f: impl Fn(&[Value]) -> Value + 'static) -> Matcher {
        transform::apply_args(self, f)
    }

    /// `Apply(f, raw=true)`: `f` replaces the whole result list itself.
    pub fn apply_raw(self, f: impl Fn(&[Value]) -> Vec<Value> + 'static) -> Matcher {
        transform::apply_raw(self, f)
    }

    pub fn label(self, name: impl Into<String>) -> Matcher {
        transform::apply_label(self, name)
    }

    pub fn name(self, name: impl Into<String>) -> Matcher {
        transform::name(self, name)
    }

    pub fn substitute(self, value: Value) -> Matcher {
        transform::substitute(self, value)
    }

    pub fn kapply(self, f: impl Fn(transform::KArgs) -> Result<Value, Error> + 'static) -> Matcher {
        transform::kapply(self, f)
    }

    pub fn raise_error(self, message: impl Into<String>) -> Matcher {
        transform::kapply(self, transform::raise_error(message))
    }

    pub fn repeat(self, start: usize, stop: Option<usize>, direction: repeat::Direction) -> Matcher {
        repeat::Repeat::new(self, start, stop, direction, None)
    }

    pub fn repeat_sep(
        self,
        start: usize,
        stop: Option<usize>,
        direction: repeat::Direction,
        separator: impl Into<Matcher>,
    ) -> Matcher {
        repeat::Repeat::new(self, start, stop, direction, Some(separator.into()))
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Matcher({})", self.tag())
    }
}

/// String literals coerce to [`terminal::Literal`] everywhere a `Matcher`
/// is expected, mirroring the source's `coerce()`.
impl From<&str> for Matcher {
    fn from(s: &str) -> Self {
        terminal::Literal::new(s.to_string())
    }
}

impl From<String> for Matcher {
    fn from(s: String) -> Self {
        terminal::Literal::new(s)
    }
}

impl From<Matcher> for Matcher {
    fn from(m: Matcher) -> Self {
        m
    }
}

impl std::ops::BitAnd<Matcher> for Matcher {
    type Output = Matcher;
    fn bitand(self, rhs: Matcher) -> Matcher {
        self.and(rhs)
    }
}

impl std::ops::BitAnd<&str> for Matcher {
    type Output = Matcher;
    fn bitand(self, rhs: &str) -> Matcher {
        self.and(Matcher::from(rhs))
    }
}

impl std::ops::BitOr<Matcher> for Matcher {
    type Output = Matcher;
    fn bitor(self, rhs: Matcher) -> Matcher {
        self.or(rhs)
    }
}

impl std::ops::BitOr<&str> for Matcher {
    type Output = Matcher;
    fn bitor(self, rhs: &str) -> Matcher {
        self.or(Matcher::from(rhs))
    }
}

impl std::ops::Add<Matcher> for Matcher {
    type Output = Matcher;
    fn add(self, rhs: Matcher) -> Matcher {
        self.join(rhs)
    }
}

impl std::ops::Add<&str> for Matcher {
    type Output = Matcher;
    fn add(self, rhs: &str) -> Matcher {
        self.join(Matcher::from(rhs))
    }
}

impl std::ops::Div<Matcher> for Matcher {
    type Output = Matcher;
    fn div(self, rhs: Matcher) -> Matcher {
        self.loose(rhs)
    }
}

impl std::ops::Div<&str> for Matcher {
    type Output = Matcher;
    fn div(self, rhs: &str) -> Matcher {
        self.loose(Matcher::from(rhs))
    }
}

impl std::ops::BitXor<&str> for Matcher {
    type Output = Matcher;
    fn bitxor(self, message: &str) -> Matcher {
        self.raise_error(message)
    }
}

impl std::ops::BitXor<String> for Matcher {
    type Output = Matcher;
    fn bitxor(self, message: String) -> Matcher {
        self.raise_error(message)
    }
}

/// `!matcher`: `Drop` for an ordinary matcher, polarity-flip for a
/// `Lookahead` (mirroring the source's `__invert__` override).
impl std::ops::Not for Matcher {
    type Output = Matcher;
    fn not(self) -> Matcher {
        if let Some(look) = self.0.as_any().downcast_ref::<lookahead::Lookahead>() {
            return look.inverted();
        }
        self.drop()
    }
}
