//! Positive and negative lookahead: test whether a child matcher *could*
//! match, without consuming input or backtracking into it.

use std::any::Any;
use std::cell::Cell;

use super::{Attempts, MatchNode, Matcher};
use crate::stream::Stream;

pub struct Lookahead {
    matcher: Matcher,
    negated: bool,
}

impl Lookahead {
    pub fn new(matcher: impl Into<Matcher>, negated: bool) -> Matcher {
        Matcher::new(Lookahead { matcher: matcher.into(), negated })
    }

    /// Used by `Matcher`'s `!` operator to flip polarity instead of
    /// wrapping the lookahead in `Drop`.
    pub fn inverted(&self) -> Matcher {
        Lookahead::new(self.matcher.clone(), !self.negated)
    }
}

impl MatchNode for Lookahead {
    fn apply(&self, stream: Stream) -> Attempts {
        Box::new(LookaheadIter {
            state: Cell::new(Some((self.matcher.clone(), stream, self.negated))),
        })
    }

    fn tag(&self) -> String {
        format!("Lookahead({}, negated={})", self.matcher.tag(), self.negated)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// There is no backtracking here: at most one attempt is ever produced,
/// matching the source's "the `for` is not repeated" comment.
struct LookaheadIter {
    state: Cell<Option<(Matcher, Stream, bool)>>,
}

impl Iterator for LookaheadIter {
    type Item = super::Attempt;

    fn next(&mut self) -> Option<Self::Item> {
        let (matcher, stream, negated) = self.state.take()?;
        let mut attempts = matcher.apply(stream.clone());
        match attempts.next() {
            Some(Ok(_)) => {
                if negated {
                    None
                } else {
                    Some(Ok((vec![], stream)))
                }
            }
            Some(Err(e)) => Some(Err(e)),
            None => {
                if negated {
                    Some(Ok((vec![], stream)))
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::terminal::{Any, Literal};
    use crate::stream::Stream;

    #[test]
    fn positive_lookahead_does_not_consume() {
        let m = Lookahead::new(Literal::new("a".into()), false);
        let mut it = m.apply(Stream::from_str("abc"));
        let (r, s) = it.next().unwrap().unwrap();
        assert!(r.is_empty());
        assert_eq!(s.as_str(), "abc");
        assert!(it.next().is_none());
    }

    #[test]
    fn negative_lookahead_succeeds_when_child_fails() {
        let m = Lookahead::new(Literal::new("z".into()), true);
        let mut it = m.apply(Stream::from_str("abc"));
        assert!(it.next().unwrap().unwrap().1.as_str() == "abc");
    }

    #[test]
    fn double_invert_is_positive_lookahead() {
        let base = Lookahead::new(Any::new(None), false);
        let twice = !(!base.clone());
        let mut it = twice.apply(Stream::from_str("x"));
        assert!(it.next().is_some());
        let mut it_empty = twice.apply(Stream::from_str(""));
        assert!(it_empty.next().is_none());
    }
}
