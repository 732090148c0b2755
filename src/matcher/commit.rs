//! `Commit`: erase all pending backtracking alternatives captured so far.

use super::{Attempts, MatchNode, Matcher};
use crate::error::Error;
use crate::stream::Stream;

pub struct Commit;

impl Commit {
    pub fn new() -> Matcher {
        Matcher::new(Commit)
    }
}

impl MatchNode for Commit {
    fn apply(&self, stream: Stream) -> Attempts {
        match stream.core() {
            Some(core) => {
                core.erase();
                Box::new(std::iter::once(Ok((vec![], stream))))
            }
            None => Box::new(std::iter::once(Err(Error::MissingContext("Commit")))),
        }
    }

    fn tag(&self) -> String {
        "Commit".to_string()
    }
}
