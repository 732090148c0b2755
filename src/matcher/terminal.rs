//! Terminal matchers: `Any`, `Literal`, `Regexp`, `Empty`, `Eof`. Each
//! produces at most one attempt; none of them hold backtracking state, so
//! none of them need to consult the commit epoch.

use std::rc::Rc;

use regex::Regex;

use super::{Attempts, MatchNode, Matcher};
use crate::stream::Stream;
use crate::value::Value;

/// Match a single token, optionally restricted to a set of characters.
pub struct Any {
    restrict: Option<Rc<str>>,
    tag: String,
}

impl Any {
    pub fn new(restrict: Option<Rc<str>>) -> Matcher {
        let tag = match &restrict {
            Some(set) => format!("Any({:?})", set),
            None => "Any()".to_string(),
        };
        Matcher::new(Any { restrict, tag })
    }
}

impl MatchNode for Any {
    fn apply(&self, stream: Stream) -> Attempts {
        let restrict = self.restrict.clone();
        let attempt = stream.head().and_then(|c| {
            let allowed = match restrict.as_deref() {
                Some(set) => set.contains(c),
                None => true,
            };
            if allowed {
                let next = stream.advance_one().expect("head() returned Some");
                Some(Ok((vec![Value::token(c.to_string())], next)))
            } else {
                None
            }
        });
        Box::new(attempt.into_iter())
    }

    fn tag(&self) -> String {
        self.tag.clone()
    }
}

/// Match a fixed piece of text.
pub struct Literal {
    text: String,
}

impl Literal {
    pub fn new(text: String) -> Matcher {
        Matcher::new(Literal { text })
    }
}

impl MatchNode for Literal {
    fn apply(&self, stream: Stream) -> Attempts {
        let attempt = if stream.starts_with(&self.text) {
            let next = stream.advance_str(&self.text);
            Some(Ok((vec![Value::token(self.text.clone())], next)))
        } else {
            None
        };
        Box::new(attempt.into_iter())
    }

    fn tag(&self) -> String {
        format!("Literal({:?})", self.text)
    }
}

/// Match a regular expression, anchored at the head of the stream. Capture
/// groups, if present, become the result; otherwise the whole match does.
pub struct Regexp {
    pattern: String,
    compiled: Regex,
}

impl Regexp {
    pub fn new(pattern: impl Into<String>) -> Matcher {
        let pattern = pattern.into();
        let anchored = format!("^(?:{})", pattern);
        let compiled = Regex::new(&anchored)
            .unwrap_or_else(|e| panic!("invalid regex {:?}: {}", pattern, e));
        Matcher::new(Regexp { pattern, compiled })
    }
}

impl MatchNode for Regexp {
    fn apply(&self, stream: Stream) -> Attempts {
        let text = stream.as_str();
        let attempt = self.compiled.captures(text).map(|caps| {
            let whole = caps.get(0).unwrap();
            let eaten = whole.end();
            let results: Vec<Value> = if caps.len() > 1 {
                (1..caps.len())
                    .map(|i| Value::token(caps.get(i).map(|m| m.as_str()).unwrap_or("")))
                    .collect()
            } else {
                vec![Value::token(whole.as_str())]
            };
            let next = stream.advance_chars(text[..eaten].chars().count()).expect("within bounds");
            Ok((results, next))
        });
        Box::new(attempt.into_iter())
    }

    fn tag(&self) -> String {
        format!("Regexp({:?})", self.pattern)
    }
}

/// Matches anything, consumes nothing, always succeeds exactly once.
pub struct Empty {
    label: Option<String>,
}

impl Empty {
    pub fn new() -> Matcher {
        Matcher::new(Empty { label: None })
    }

    pub fn named(label: impl Into<String>) -> Matcher {
        Matcher::new(Empty { label: Some(label.into()) })
    }

    /// A single-shot attempt iterator, used by `And`'s empty-sequence case.
    pub(crate) fn single_attempt(stream: Stream) -> Attempts {
        Box::new(std::iter::once(Ok((vec![], stream))))
    }
}

impl MatchNode for Empty {
    fn apply(&self, stream: Stream) -> Attempts {
        Empty::single_attempt(stream)
    }

    fn tag(&self) -> String {
        match &self.label {
            Some(l) => format!("Empty({:?})", l),
            None => "Empty".to_string(),
        }
    }
}

/// Succeeds iff the stream is exhausted. Defined, as in the source, as the
/// negative lookahead of `Any`.
pub fn eof() -> Matcher {
    super::lookahead::Lookahead::new(Any::new(None), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::Stream;

    fn run(m: &Matcher, s: &str) -> Vec<(Vec<Value>, String)> {
        m.apply(Stream::from_str(s))
            .map(|a| {
                let (r, s) = a.unwrap();
                (r, s.as_str().to_string())
            })
            .collect()
    }

    #[test]
    fn any_on_empty_stream_yields_nothing() {
        let m = Any::new(None);
        assert!(run(&m, "").is_empty());
    }

    #[test]
    fn literal_matches_prefix_once() {
        let m = Literal::new("x".to_string());
        let got = run(&m, "xyz");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].1, "yz");
    }

    #[test]
    fn literal_rejects_mismatch() {
        let m = Literal::new("x".to_string());
        assert!(run(&m, "yz").is_empty());
    }

    #[test]
    fn regexp_returns_groups_when_present() {
        let m = Regexp::new(r"(\d+)-(\d+)");
        let got = run(&m, "12-34rest");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].0, vec![Value::token("12"), Value::token("34")]);
        assert_eq!(got[0].1, "rest");
    }

    #[test]
    fn regexp_returns_whole_match_without_groups() {
        let m = Regexp::new(r"\d+");
        let got = run(&m, "42rest");
        assert_eq!(got[0].0, vec![Value::token("42")]);
    }

    #[test]
    fn empty_always_yields_once_without_consuming() {
        let m = Empty::new();
        let got = run(&m, "abc");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].1, "abc");
    }

    #[test]
    fn eof_succeeds_only_at_end() {
        let m = eof();
        assert!(run(&m, "").len() == 1);
        assert!(run(&m, "a").is_empty());
    }
}
