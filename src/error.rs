//! Structured error taxonomy for the matcher core.
//!
//! Programming errors (misuse of the combinator API) are distinct from the
//! user-requested syntax-error escape hatch (`^` / `raise_error`). A "no
//! parse" result is never an `Error` — it is represented by the match
//! iterator simply yielding nothing.

use thiserror::Error;

/// Position within a stream, captured for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "offset {}", self.offset)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameters at matcher build time: negative repetition start,
    /// `stop < start`, and similar construction-time mistakes.
    #[error("invalid matcher construction: {0}")]
    Construction(String),

    /// A `Delayed` matcher was evaluated before being bound.
    #[error("delayed matcher used before it was bound")]
    UnboundReference,

    /// A `Delayed` matcher was bound a second time.
    #[error("delayed matcher is already bound")]
    AlreadyBound,

    /// `Commit` (or trace) was applied to a stream without the ambient
    /// core context required to carry it out.
    #[error("{0} requires a stream built with a core context")]
    MissingContext(&'static str),

    /// Raised explicitly via `^` / `.raise_error(...)`.
    #[error("{message} (at {position})")]
    UserRaised { message: String, position: Position },
}
