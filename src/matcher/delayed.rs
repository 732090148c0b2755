//! `Delayed`: a forward reference, bound after construction. This is what
//! lets a grammar refer to itself before the recursive matcher exists.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Attempts, MatchNode, Matcher};
use crate::error::Error;
use crate::stream::Stream;

pub struct Delayed {
    target: Rc<RefCell<Option<Matcher>>>,
}

impl Delayed {
    /// Returns a matcher that can be used in a grammar immediately; call
    /// [`bind`](Self::bind_on) on the same handle once the real matcher it
    /// stands in for has been built.
    pub fn new() -> Matcher {
        Matcher::new(Delayed { target: Rc::new(RefCell::new(None)) })
    }

    /// Binds the forward reference carried by `delayed` to `target`.
    /// Panics if `delayed` was not produced by [`Delayed::new`]; returns
    /// an error if it was already bound, matching the source's one-shot
    /// `+=` semantics.
    pub fn bind(delayed: &Matcher, target: Matcher) -> Result<(), Error> {
        let node = delayed
            .0
            .as_any()
            .downcast_ref::<Delayed>()
            .expect("bind() called on a non-Delayed matcher");
        let mut slot = node.target.borrow_mut();
        if slot.is_some() {
            return Err(Error::AlreadyBound);
        }
        *slot = Some(target);
        Ok(())
    }
}

impl MatchNode for Delayed {
    fn apply(&self, stream: Stream) -> Attempts {
        match self.target.borrow().as_ref() {
            Some(m) => m.apply(stream),
            None => Box::new(std::iter::once(Err(Error::UnboundReference))),
        }
    }

    fn tag(&self) -> String {
        "Delayed".to_string()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
