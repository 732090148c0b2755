//! `Or`: ordered alternation. Each alternative is tried in turn; all of one
//! alternative's attempts are exhausted before the next alternative is even
//! constructed, which is what lets `Commit` inside an earlier alternative
//! prevent later alternatives from ever being tried.

use std::rc::Rc;

use super::{Attempt, Attempts, MatchNode, Matcher};
use crate::core_ctx::EpochGuard;
use crate::stream::Stream;

pub struct Or {
    matchers: Rc<[Matcher]>,
}

impl Or {
    pub fn new(matchers: Vec<Matcher>) -> Matcher {
        Matcher::new(Or { matchers: matchers.into() })
    }
}

impl MatchNode for Or {
    fn apply(&self, stream: Stream) -> Attempts {
        let guard = EpochGuard::capture(stream.core());
        Box::new(OrIter {
            matchers: self.matchers.clone(),
            stream,
            index: 0,
            current: None,
            guard,
            #[cfg(feature = "trace")]
            tried: 0,
        })
    }

    fn tag(&self) -> String {
        format!("Or({})", self.matchers.iter().map(|m| m.tag()).collect::<Vec<_>>().join(", "))
    }
}

struct OrIter {
    matchers: Rc<[Matcher]>,
    stream: Stream,
    index: usize,
    current: Option<Attempts>,
    guard: EpochGuard,
    #[cfg(feature = "trace")]
    tried: usize,
}

impl Iterator for OrIter {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        loop {
            if self.guard.erased() {
                self.current = None;
                return None;
            }
            if self.current.is_none() {
                if self.index >= self.matchers.len() {
                    #[cfg(feature = "trace")]
                    log::trace!("Or exhausted after trying {} alternative(s)", self.tried);
                    return None;
                }
                let next = self.matchers[self.index].apply(self.stream.clone());
                self.index += 1;
                #[cfg(feature = "trace")]
                {
                    self.tried += 1;
                }
                self.current = Some(next);
            }
            let gen = self.current.as_mut().expect("just set");
            match gen.next() {
                Some(item) => return Some(item),
                None => self.current = None,
            }
        }
    }
}
