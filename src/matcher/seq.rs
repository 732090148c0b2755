//! `And`: sequential composition. Attempts are enumerated right-deep
//! depth-first: the last child is exhausted before the second-to-last is
//! asked for its next attempt, and so on back up the chain.

use std::rc::Rc;

use super::terminal::Empty;
use super::{Attempt, Attempts, MatchNode, Matcher};
use crate::core_ctx::EpochGuard;
use crate::stream::Stream;
use crate::value::Value;

pub struct And {
    matchers: Rc<[Matcher]>,
}

impl And {
    pub fn new(matchers: Vec<Matcher>) -> Matcher {
        Matcher::new(And { matchers: matchers.into() })
    }
}

impl MatchNode for And {
    fn apply(&self, stream: Stream) -> Attempts {
        let guard = EpochGuard::capture(stream.core());
        let (first_gen, next_idx): (Attempts, usize) = if self.matchers.is_empty() {
            (Empty::single_attempt(stream), 0)
        } else {
            (self.matchers[0].apply(stream), 1)
        };
        Box::new(AndIter {
            matchers: self.matchers.clone(),
            stack: vec![(vec![], first_gen, next_idx)],
            guard,
        })
    }

    fn tag(&self) -> String {
        format!("And({})", self.matchers.iter().map(|m| m.tag()).collect::<Vec<_>>().join(", "))
    }
}

struct AndIter {
    matchers: Rc<[Matcher]>,
    /// One frame per matcher currently "open": the results accumulated
    /// before it, its live attempt iterator, and the index of the next
    /// matcher to chain onto a successful attempt.
    stack: Vec<(Vec<Value>, Attempts, usize)>,
    guard: EpochGuard,
}

impl Iterator for AndIter {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        loop {
            if self.guard.erased() {
                self.stack.clear();
                return None;
            }
            let (result, gen, idx) = self.stack.last_mut()?;
            match gen.next() {
                Some(Ok((value, next_stream))) => {
                    let idx = *idx;
                    let mut combined = result.clone();
                    combined.extend(value);
                    if idx < self.matchers.len() {
                        let child_gen = self.matchers[idx].apply(next_stream);
                        self.stack.push((combined, child_gen, idx + 1));
                    } else {
                        return Some(Ok((combined, next_stream)));
                    }
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
