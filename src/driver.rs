//! `Parser`: the façade most callers use instead of driving a `Matcher`'s
//! attempt iterator by hand. Wires up a fresh [`crate::core_ctx::Core`] per
//! parse so `Commit` and trace logging have something to act on.

use std::cell::Cell;
use std::rc::Rc;

use crate::core_ctx::Core;
use crate::error::Error;
use crate::matcher::Matcher;
use crate::stream::Stream;
use crate::value::Value;

/// Wraps a grammar's top-level matcher for repeated use against input text.
#[derive(Clone)]
pub struct Parser {
    root: Matcher,
    trace_default: Rc<Cell<bool>>,
}

impl Parser {
    pub fn new(root: impl Into<Matcher>) -> Self {
        Parser { root: root.into(), trace_default: Rc::new(Cell::new(false)) }
    }

    /// The first successful parse of `input`, or `None` if it doesn't
    /// match at all. Propagates any [`Error`] a transform along the way
    /// raised.
    pub fn parse(&self, input: &str) -> Result<Option<Vec<Value>>, Error> {
        let mut attempts = self.attempts(input);
        match attempts.next() {
            Some(Ok((values, _))) => Ok(Some(values)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    /// Every way `input` can be parsed, lazily enumerated in whatever
    /// order the grammar's combinators produce them.
    pub fn parse_all(&self, input: &str) -> impl Iterator<Item = Result<Vec<Value>, Error>> + '_ {
        self.attempts(input).map(|a| a.map(|(values, _)| values))
    }

    /// Convenience for grammars meant to consume the whole input: succeeds
    /// only for an attempt that leaves nothing unconsumed.
    pub fn parse_complete(&self, input: &str) -> Result<Option<Vec<Value>>, Error> {
        for attempt in self.attempts(input) {
            match attempt {
                Ok((values, rest)) if rest.is_empty() => return Ok(Some(values)),
                Ok(_) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Turn on `log`-based attempt tracing for this parse (see the `trace`
    /// feature). A no-op build without the feature still accepts the call.
    pub fn with_trace(self, on: bool) -> Self {
        // Tracing state lives on the per-parse `Core`, not the `Parser`
        // itself, so this only takes effect on the next `attempts` call.
        self.trace_default.set(on);
        self
    }

    fn attempts(&self, input: &str) -> crate::matcher::Attempts {
        let core = Core::new();
        core.set_trace(self.trace_default.get());
        let stream = Stream::with_core(input.to_string(), core);
        self.root.apply(stream)
    }
}
