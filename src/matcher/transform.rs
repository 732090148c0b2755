//! Transform combinators: everything that changes the *results* a matcher
//! produces without changing whether, or how much, it matches.

use std::rc::Rc;

use super::{Attempt, Attempts, MatchNode, Matcher};
use crate::error::Error;
use crate::stream::Stream;
use crate::value::{fold_add, Value};

/// The argument list handed to a `kapply`-style transform: the matched
/// values plus the stream position the match started at, so a transform
/// can report errors with a useful [`crate::error::Position`].
pub struct KArgs {
    pub values: Vec<Value>,
    pub start: crate::stream::Stream,
}

struct Drop {
    inner: Matcher,
}

pub fn drop(inner: Matcher) -> Matcher {
    Matcher::new(Drop { inner })
}

impl MatchNode for Drop {
    fn apply(&self, stream: Stream) -> Attempts {
        Box::new(self.inner.apply(stream).map(|a| a.map(|(_, s)| (vec![], s))))
    }

    fn tag(&self) -> String {
        format!("Drop({})", self.inner.tag())
    }
}

struct AddResults {
    inner: Matcher,
}

/// Fold a matcher's result list into a single combined value, the way `+`
/// folds an `And`'s results (see [`Value`]'s `Add` impl).
pub fn add(inner: Matcher) -> Matcher {
    Matcher::new(AddResults { inner })
}

impl MatchNode for AddResults {
    fn apply(&self, stream: Stream) -> Attempts {
        Box::new(self.inner.apply(stream).map(|a| a.map(|(v, s)| (fold_add(v), s))))
    }

    fn tag(&self) -> String {
        format!("Add({})", self.inner.tag())
    }
}

/// Closures live behind an `Rc` (not inline on the node) so the iterator
/// returned from `apply` can own a cheap clone of it instead of borrowing
/// `self` -- a borrow can't outlive the `&self` call, which is what used
/// to force these combinators to drain their inner iterator eagerly before
/// returning anything.
struct Map<F> {
    inner: Matcher,
    f: Rc<F>,
}

/// Apply `f` to each individual result value the inner matcher produces.
pub fn map(inner: Matcher, f: impl Fn(Value) -> Value + 'static) -> Matcher {
    Matcher::new(Map { inner, f: Rc::new(f) })
}

impl<F: Fn(Value) -> Value + 'static> MatchNode for Map<F> {
    fn apply(&self, stream: Stream) -> Attempts {
        Box::new(MapIter { inner: self.inner.apply(stream), f: self.f.clone() })
    }

    fn tag(&self) -> String {
        format!("Map({})", self.inner.tag())
    }
}

struct MapIter<F> {
    inner: Attempts,
    f: Rc<F>,
}

impl<F: Fn(Value) -> Value + 'static> Iterator for MapIter<F> {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        let attempt = self.inner.next()?;
        Some(attempt.map(|(v, s)| (v.into_iter().map(|x| (self.f)(x)).collect(), s)))
    }
}

struct Apply<F> {
    inner: Matcher,
    f: Rc<F>,
}

/// Apply `f` to the inner matcher's *entire* result list at once, replacing
/// it with a single value.
pub fn apply(inner: Matcher, f: impl Fn(&[Value]) -> Value + 'static) -> Matcher {
    Matcher::new(Apply { inner, f: Rc::new(f) })
}

impl<F: Fn(&[Value]) -> Value + 'static> MatchNode for Apply<F> {
    fn apply(&self, stream: Stream) -> Attempts {
        Box::new(ApplyIter { inner: self.inner.apply(stream), f: self.f.clone() })
    }

    fn tag(&self) -> String {
        format!("Apply({})", self.inner.tag())
    }
}

struct ApplyIter<F> {
    inner: Attempts,
    f: Rc<F>,
}

impl<F: Fn(&[Value]) -> Value + 'static> Iterator for ApplyIter<F> {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        let attempt = self.inner.next()?;
        Some(attempt.map(|(v, s)| (vec![(self.f)(&v)], s)))
    }
}

struct ApplyArgs<F> {
    inner: Matcher,
    f: Rc<F>,
}

/// `Apply(f, args=true)`: same shape as [`apply`], `f` just treats `R` as a
/// positional argument list rather than a single aggregate argument. Rust
/// has no spread-call syntax, so the distinction from `apply` is in what
/// the closure does with the slice, not in the wrapper's own behaviour.
pub fn apply_args(inner: Matcher, f: impl Fn(&[Value]) -> Value + 'static) -> Matcher {
    Matcher::new(ApplyArgs { inner, f: Rc::new(f) })
}

impl<F: Fn(&[Value]) -> Value + 'static> MatchNode for ApplyArgs<F> {
    fn apply(&self, stream: Stream) -> Attempts {
        Box::new(ApplyIter { inner: self.inner.apply(stream), f: self.f.clone() })
    }

    fn tag(&self) -> String {
        format!("Apply::args({})", self.inner.tag())
    }
}

struct ApplyRaw<F> {
    inner: Matcher,
    f: Rc<F>,
}

/// `Apply(f, raw=true)`: `f` returns the whole replacement result list
/// itself, instead of a single value `apply` wraps into a one-element list.
pub fn apply_raw(inner: Matcher, f: impl Fn(&[Value]) -> Vec<Value> + 'static) -> Matcher {
    Matcher::new(ApplyRaw { inner, f: Rc::new(f) })
}

impl<F: Fn(&[Value]) -> Vec<Value> + 'static> MatchNode for ApplyRaw<F> {
    fn apply(&self, stream: Stream) -> Attempts {
        Box::new(ApplyRawIter { inner: self.inner.apply(stream), f: self.f.clone() })
    }

    fn tag(&self) -> String {
        format!("Apply::raw({})", self.inner.tag())
    }
}

struct ApplyRawIter<F> {
    inner: Attempts,
    f: Rc<F>,
}

impl<F: Fn(&[Value]) -> Vec<Value> + 'static> Iterator for ApplyRawIter<F> {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        let attempt = self.inner.next()?;
        Some(attempt.map(|(v, s)| ((self.f)(&v), s)))
    }
}

/// A labelled `apply` shortcut: wraps the whole result list in a single
/// named value instead of running a user transform over it.
pub fn apply_label(inner: Matcher, label: impl Into<String>) -> Matcher {
    let label = label.into();
    apply(inner, move |values| {
        Value::Named(label.clone(), Box::new(Value::Group(values.to_vec())))
    })
}

/// `name`: tags each individual result with the same label, mirroring the
/// source's `Name` — distinct from `apply_label`, which wraps the list.
pub fn name(inner: Matcher, label: impl Into<String>) -> Matcher {
    let label = label.into();
    map(inner, move |v| Value::Named(label.clone(), Box::new(v)))
}

/// `substitute`: discard whatever the inner matcher produced and replace
/// it with a fixed value, as long as it matched at all.
pub fn substitute(inner: Matcher, value: Value) -> Matcher {
    apply(inner, move |_| value.clone())
}

struct KApply<F> {
    inner: Matcher,
    f: Rc<F>,
}

/// Like [`apply`], but `f` can fail, and sees the stream position the
/// match started at (for error reporting) rather than just the values.
pub fn kapply(inner: Matcher, f: impl Fn(KArgs) -> Result<Value, Error> + 'static) -> Matcher {
    Matcher::new(KApply { inner, f: Rc::new(f) })
}

impl<F: Fn(KArgs) -> Result<Value, Error> + 'static> MatchNode for KApply<F> {
    fn apply(&self, stream: Stream) -> Attempts {
        let start = stream.clone();
        Box::new(KApplyIter { inner: self.inner.apply(stream), f: self.f.clone(), start })
    }

    fn tag(&self) -> String {
        format!("KApply({})", self.inner.tag())
    }
}

struct KApplyIter<F> {
    inner: Attempts,
    f: Rc<F>,
    start: Stream,
}

impl<F: Fn(KArgs) -> Result<Value, Error> + 'static> Iterator for KApplyIter<F> {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        match self.inner.next()? {
            Ok((v, s)) => match (self.f)(KArgs { values: v, start: self.start.clone() }) {
                Ok(value) => Some(Ok((vec![value], s))),
                Err(e) => Some(Err(e)),
            },
            Err(e) => Some(Err(e)),
        }
    }
}

/// Build the `f` for [`kapply`] that turns a successful match into a
/// user-raised parse error instead — the realization of the `^` operator.
pub fn raise_error(message: impl Into<String>) -> impl Fn(KArgs) -> Result<Value, Error> + 'static {
    let message = message.into();
    move |args: KArgs| {
        Err(Error::UserRaised {
            message: message.clone(),
            position: crate::error::Position { offset: args.start.offset() },
        })
    }
}
