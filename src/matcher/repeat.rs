//! `Repeat`: match a matcher `start..=stop` times (`stop = None` means
//! unbounded), optionally separated by a separator matcher. Three search
//! disciplines control the order attempts are produced in.

use std::collections::VecDeque;

use super::seq::And;
use super::{Attempt, Attempts, MatchNode, Matcher};
use crate::core_ctx::EpochGuard;
use crate::stream::Stream;
use crate::value::Value;

/// Which order repetition counts are explored and yielded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Greedy: longest match first, then progressively shorter ones.
    DepthFirst,
    /// Non-greedy: shortest match first, then progressively longer ones.
    BreadthFirst,
    /// Explore every possible count, but yield them longest-first, fully
    /// bucketed rather than interleaved with the search order.
    Exhaustive,
}

pub struct Repeat {
    base: Matcher,
    start: usize,
    stop: Option<usize>,
    direction: Direction,
    separator: Option<Matcher>,
}

impl Repeat {
    /// Panics eagerly on a malformed range (`stop < start`), the same
    /// construction-time-only failure mode `Regexp::new` uses for a bad
    /// pattern: a negative `start` and an out-of-range `direction` are
    /// already unrepresentable in `usize`/`Direction`, so `stop < start` is
    /// the one invariant this constructor still has to check by hand.
    pub fn new(
        base: Matcher,
        start: usize,
        stop: Option<usize>,
        direction: Direction,
        separator: Option<Matcher>,
    ) -> Matcher {
        if let Some(stop) = stop {
            if stop < start {
                panic!(
                    "{}",
                    crate::error::Error::Construction(format!(
                        "repeat: stop ({stop}) must be >= start ({start})"
                    ))
                );
            }
        }
        Matcher::new(Repeat { base, start, stop, direction, separator })
    }
}

impl MatchNode for Repeat {
    fn apply(&self, stream: Stream) -> Attempts {
        let guard = EpochGuard::capture(stream.core());
        let first = make_next(&self.base, &self.separator, 0, stream.clone());
        match self.direction {
            Direction::DepthFirst => Box::new(DepthFirstIter {
                base: self.base.clone(),
                separator: self.separator.clone(),
                start: self.start,
                stop: self.stop,
                stack: vec![(vec![], stream, 0, first)],
                guard,
            }),
            Direction::BreadthFirst => {
                let mut queue = VecDeque::new();
                queue.push_back(Frame { results: vec![], stream: stream.clone(), count: 0, attempts: first });
                Box::new(BreadthFirstIter {
                    base: self.base.clone(),
                    separator: self.separator.clone(),
                    start: self.start,
                    stop: self.stop,
                    queue,
                    to_yield: VecDeque::new(),
                    guard,
                })
            }
            Direction::Exhaustive => Box::new(ExhaustiveIter {
                base: self.base.clone(),
                separator: self.separator.clone(),
                start: self.start,
                stop: self.stop,
                stream,
                guard,
                materialized: None,
            }),
        }
    }

    fn tag(&self) -> String {
        format!(
            "Repeat({}, {}..{:?}, {:?})",
            self.base.tag(),
            self.start,
            self.stop,
            self.direction
        )
    }
}

fn make_next(base: &Matcher, separator: &Option<Matcher>, count: usize, stream: Stream) -> Attempts {
    if count == 0 {
        base.apply(stream)
    } else {
        match separator {
            // The separator is a delimiter, not data: drop its own result so
            // only the base matcher's values accumulate into the sequence.
            Some(sep) => And::new(vec![sep.clone().drop(), base.clone()]).apply(stream),
            None => base.apply(stream),
        }
    }
}

struct DepthFirstIter {
    base: Matcher,
    separator: Option<Matcher>,
    start: usize,
    stop: Option<usize>,
    stack: Vec<(Vec<Value>, Stream, usize, Attempts)>,
    guard: EpochGuard,
}

impl Iterator for DepthFirstIter {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        loop {
            if self.guard.erased() {
                self.stack.clear();
                return None;
            }
            let (results, _stream, count, attempts) = self.stack.last_mut()?;
            let can_extend = self.stop.map_or(true, |stop| *count < stop);
            if !can_extend {
                let (results, stream, count) = {
                    let (r, s, c, _) = self.stack.pop().unwrap();
                    (r, s, c)
                };
                if count >= self.start {
                    return Some(Ok((results, stream)));
                }
                continue;
            }
            match attempts.next() {
                Some(Ok((value, next_stream))) => {
                    let new_count = *count + 1;
                    let mut combined = results.clone();
                    combined.extend(value);
                    let child_attempts =
                        make_next(&self.base, &self.separator, new_count, next_stream.clone());
                    self.stack.push((combined, next_stream, new_count, child_attempts));
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    let (results, stream, count, _) = self.stack.pop().unwrap();
                    if count >= self.start {
                        return Some(Ok((results, stream)));
                    }
                }
            }
        }
    }
}

struct Frame {
    results: Vec<Value>,
    stream: Stream,
    count: usize,
    attempts: Attempts,
}

struct BreadthFirstIter {
    base: Matcher,
    separator: Option<Matcher>,
    start: usize,
    stop: Option<usize>,
    queue: VecDeque<Frame>,
    to_yield: VecDeque<(Vec<Value>, Stream)>,
    guard: EpochGuard,
}

impl Iterator for BreadthFirstIter {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        loop {
            if self.guard.erased() {
                self.queue.clear();
                self.to_yield.clear();
                return None;
            }
            if let Some(y) = self.to_yield.pop_front() {
                return Some(Ok(y));
            }
            let mut frame = self.queue.pop_front()?;
            match frame.attempts.next() {
                Some(Ok((value, next_stream))) => {
                    let new_count = frame.count + 1;
                    let mut combined = frame.results.clone();
                    combined.extend(value);
                    let within_stop = self.stop.map_or(true, |stop| new_count <= stop);
                    if within_stop {
                        if new_count >= self.start {
                            self.to_yield.push_back((combined.clone(), next_stream.clone()));
                        }
                        if self.stop.map_or(true, |stop| new_count < stop) {
                            let child_attempts =
                                make_next(&self.base, &self.separator, new_count, next_stream.clone());
                            self.queue.push_back(Frame {
                                results: combined,
                                stream: next_stream,
                                count: new_count,
                                attempts: child_attempts,
                            });
                        }
                    }
                    self.queue.push_back(frame);
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {}
            }
        }
    }
}

struct ExhaustiveIter {
    base: Matcher,
    separator: Option<Matcher>,
    start: usize,
    stop: Option<usize>,
    stream: Stream,
    guard: EpochGuard,
    materialized: Option<std::vec::IntoIter<Attempt>>,
}

impl Iterator for ExhaustiveIter {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        if self.materialized.is_none() {
            let mut buckets: Vec<(usize, Vec<(Vec<Value>, Stream)>)> = Vec::new();
            let first = make_next(&self.base, &self.separator, 0, self.stream.clone());
            let mut queue = VecDeque::new();
            queue.push_back(Frame { results: vec![], stream: self.stream.clone(), count: 0, attempts: first });
            let mut errored = None;
            while let Some(mut frame) = queue.pop_front() {
                if self.guard.erased() {
                    break;
                }
                loop {
                    match frame.attempts.next() {
                        Some(Ok((value, next_stream))) => {
                            let new_count = frame.count + 1;
                            let mut combined = frame.results.clone();
                            combined.extend(value);
                            let within_stop = self.stop.map_or(true, |stop| new_count <= stop);
                            if within_stop {
                                if new_count >= self.start {
                                    match buckets.iter_mut().find(|(c, _)| *c == new_count) {
                                        Some((_, v)) => v.push((combined.clone(), next_stream.clone())),
                                        None => buckets.push((new_count, vec![(combined.clone(), next_stream.clone())])),
                                    }
                                }
                                if self.stop.map_or(true, |stop| new_count < stop) {
                                    let child_attempts = make_next(
                                        &self.base,
                                        &self.separator,
                                        new_count,
                                        next_stream.clone(),
                                    );
                                    queue.push_back(Frame {
                                        results: combined,
                                        stream: next_stream,
                                        count: new_count,
                                        attempts: child_attempts,
                                    });
                                }
                            }
                        }
                        Some(Err(e)) => {
                            errored = Some(e);
                            break;
                        }
                        None => break,
                    }
                }
                if errored.is_some() {
                    break;
                }
            }
            buckets.sort_by(|a, b| b.0.cmp(&a.0));
            let mut flat: Vec<Attempt> =
                buckets.into_iter().flat_map(|(_, v)| v.into_iter().map(Ok)).collect();
            if let Some(e) = errored {
                flat.push(Err(e));
            }
            self.materialized = Some(flat.into_iter());
        }
        self.materialized.as_mut().unwrap().next()
    }
}
