//! The ambient per-parse context: the commit channel and the trace switch.
//!
//! A `Stream` optionally carries a `Core`. Plain streams built with
//! [`crate::stream::Stream::from_str`] have none, and `Commit`/`Trace`
//! report [`crate::error::Error::MissingContext`] against them. Streams
//! built through [`crate::driver::Parser`] always carry one.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct CoreState {
    /// Bumped every time `Commit` runs. Any iterator that captured an
    /// earlier epoch treats itself as exhausted rather than producing
    /// another backtracking alternative -- this is the "backtracking
    /// garbage collector" the design calls for, realized without an
    /// explicit generator-close protocol.
    epoch: Cell<u64>,
    trace_on: Cell<bool>,
}

/// The ambient handle threaded through a parse via the stream.
#[derive(Clone)]
pub struct Core {
    state: Rc<CoreState>,
}

impl Core {
    pub fn new() -> Self {
        Core {
            state: Rc::new(CoreState::default()),
        }
    }

    /// The current backtracking epoch.
    pub fn epoch(&self) -> u64 {
        self.state.epoch.get()
    }

    /// Erase all pending backtracking alternatives captured up to now.
    pub fn erase(&self) {
        self.state.epoch.set(self.state.epoch.get() + 1);
    }

    pub fn trace_on(&self) -> bool {
        self.state.trace_on.get()
    }

    pub fn set_trace(&self, on: bool) {
        self.state.trace_on.set(on);
    }
}

impl Default for Core {
    fn default() -> Self {
        Core::new()
    }
}

/// Snapshot of a `Core`'s epoch, captured when a backtrackable iterator is
/// constructed. Checked on every subsequent `.next()` call; once the core's
/// epoch has moved past the snapshot, the iterator must report itself
/// exhausted instead of yielding another alternative.
#[derive(Clone)]
pub struct EpochGuard {
    core: Option<Core>,
    epoch0: u64,
}

impl EpochGuard {
    pub fn capture(core: Option<&Core>) -> Self {
        EpochGuard {
            core: core.cloned(),
            epoch0: core.map(Core::epoch).unwrap_or(0),
        }
    }

    /// True once a `Commit` has run since this guard was captured.
    pub fn erased(&self) -> bool {
        match &self.core {
            Some(core) => core.epoch() != self.epoch0,
            None => false,
        }
    }
}
