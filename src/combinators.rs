//! Convenience constructors built on top of the core matcher primitives:
//! repetition shortcuts, character classes, and the numeric-literal family.
//! None of this introduces new matcher kinds; it is all `Any`/`Regexp`/
//! `Repeat`/`Or` wired together the way the source's free functions do.

use once_cell::sync::Lazy;
use std::rc::Rc;

use crate::matcher::repeat::Direction;
use crate::matcher::terminal::{Any, Regexp};
use crate::matcher::Matcher;

/// Zero or one: `m?`.
pub fn optional(m: impl Into<Matcher>) -> Matcher {
    m.into().repeat(0, Some(1), Direction::DepthFirst)
}

/// Zero or more, greedy: `m*`.
pub fn star(m: impl Into<Matcher>) -> Matcher {
    m.into().repeat(0, None, Direction::DepthFirst)
}

/// One or more, greedy: `m+`.
pub fn plus(m: impl Into<Matcher>) -> Matcher {
    m.into().repeat(1, None, Direction::DepthFirst)
}

/// Matches a single character that is *not* one of `excluded`. Its own
/// terminal rather than a restricted `Any`, since "everything except this
/// set" isn't expressible as a positive character set without knowing the
/// full alphabet up front.
pub fn any_but(excluded: impl Into<Rc<str>>) -> Matcher {
    use crate::matcher::MatchNode;
    use crate::stream::Stream;
    use crate::value::Value;

    struct AnyBut {
        excluded: Rc<str>,
    }

    impl MatchNode for AnyBut {
        fn apply(&self, stream: Stream) -> crate::matcher::Attempts {
            let excluded = self.excluded.clone();
            let attempt = stream.head().and_then(|c| {
                if excluded.contains(c) {
                    None
                } else {
                    let next = stream.advance_one().expect("head() returned Some");
                    Some(Ok((vec![Value::token(c.to_string())], next)))
                }
            });
            Box::new(attempt.into_iter())
        }

        fn tag(&self) -> String {
            format!("AnyBut({:?})", self.excluded)
        }
    }

    Matcher::new(AnyBut { excluded: excluded.into() })
}

/// A run of one or more characters drawn from `alphabet`.
pub fn word(alphabet: impl Into<Rc<str>>) -> Matcher {
    plus(Any::new(Some(alphabet.into())))
}

fn char_class(set: &'static str) -> Matcher {
    Any::new(Some(Rc::from(set)))
}

pub fn digit() -> Matcher {
    char_class("0123456789")
}

// The generated sets are memoized as `String`s (which, unlike `Rc<str>`,
// are `Sync` and so can live in a `static`); each call pays one small
// allocation turning the memoized set into the `Rc<str>` `Any` wants.

pub fn letter() -> Matcher {
    static ALPHA: Lazy<String> = Lazy::new(|| {
        let upper = 'A'..='Z';
        let lower = 'a'..='z';
        upper.chain(lower).collect()
    });
    Any::new(Some(Rc::from(ALPHA.as_str())))
}

pub fn upper() -> Matcher {
    static UPPER: Lazy<String> = Lazy::new(|| ('A'..='Z').collect());
    Any::new(Some(Rc::from(UPPER.as_str())))
}

pub fn lower() -> Matcher {
    static LOWER: Lazy<String> = Lazy::new(|| ('a'..='z').collect());
    Any::new(Some(Rc::from(LOWER.as_str())))
}

pub fn space() -> Matcher {
    char_class(" \t")
}

pub fn whitespace() -> Matcher {
    char_class(" \t\r\n\x0b\x0c")
}

pub fn newline() -> Matcher {
    Regexp::new(r"\r\n|\r|\n")
}

pub fn printable() -> Matcher {
    static SET: Lazy<String> = Lazy::new(|| (0x20u8..0x7f).map(|b| b as char).collect());
    Any::new(Some(Rc::from(SET.as_str())))
}

pub fn punctuation() -> Matcher {
    char_class("!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~")
}

/// Zero or more whitespace characters, joined into one token — the glue
/// `a / b` (`.loose`) inserts between its operands. Its own match stays in
/// the combined result list, same as the source's `Space()[0:,...]` (the
/// `...` there means "wrap the repetition in `Add`", per the combinator
/// algebra's indexing surface).
pub fn optional_space() -> Matcher {
    crate::matcher::transform::add(star(space()))
}

/// One or more whitespace characters, joined into one token — the glue
/// `a // b` (`.tight`) inserts between its operands. Its own match stays in
/// the combined result list, same as the source's `Space()[1:,...]`.
pub fn required_space() -> Matcher {
    crate::matcher::transform::add(plus(space()))
}

pub fn unsigned_integer() -> Matcher {
    Regexp::new(r"\d+")
}

pub fn signed_integer() -> Matcher {
    Regexp::new(r"[+-]?\d+")
}

pub fn unsigned_float() -> Matcher {
    Regexp::new(r"\d*\.\d+|\d+\.\d*|\d+")
}

pub fn signed_float() -> Matcher {
    Regexp::new(r"[+-]?(?:\d*\.\d+|\d+\.\d*|\d+)")
}

/// Like `signed_float`, but also accepts an `e`/`E` exponent suffix.
/// Composed from `signed_float`, an exponent marker, and `signed_integer`
/// instead of one combined regex, so the exponent's sign is governed by
/// the same `signed_integer` combinator used everywhere else rather than
/// a second, independently-anchored `[+-]?` group.
pub fn signed_e_float() -> Matcher {
    let exponent_marker = Any::new(Some(Rc::from("eE")));
    signed_float().join(optional(exponent_marker.and(signed_integer())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::Stream;
    use crate::value::Value;

    fn matches(m: &Matcher, s: &str) -> bool {
        m.apply(Stream::from_str(s)).next().is_some()
    }

    #[test]
    fn optional_accepts_zero_or_one() {
        let m = optional("a");
        let mut it = m.apply(Stream::from_str("b"));
        let (r, s) = it.next().unwrap().unwrap();
        assert!(r.is_empty());
        assert_eq!(s.as_str(), "b");
    }

    #[test]
    fn star_and_plus_differ_on_empty_input() {
        assert!(matches(&star("a"), ""));
        assert!(!matches(&plus("a"), ""));
    }

    #[test]
    fn any_but_excludes_given_characters() {
        let m = any_but(",");
        assert!(matches(&m, "a"));
        assert!(!matches(&m, ","));
    }

    #[test]
    fn word_requires_at_least_one_char_from_alphabet() {
        let m = word("abc");
        assert!(matches(&m, "cab"));
        assert!(!matches(&m, "xyz"));
    }

    #[test]
    fn optional_space_accepts_none_or_many() {
        assert!(matches(&optional_space(), "no leading space"));
        let mut it = optional_space().apply(Stream::from_str("   x"));
        let (r, s) = it.next().unwrap().unwrap();
        assert_eq!(r, vec![Value::token("   ")]);
        assert_eq!(s.as_str(), "x");
    }

    #[test]
    fn required_space_rejects_zero_whitespace() {
        assert!(!matches(&required_space(), "x"));
        let (r, s) = required_space().apply(Stream::from_str("  x")).next().unwrap().unwrap();
        assert_eq!(r, vec![Value::token("  ")]);
        assert_eq!(s.as_str(), "x");
    }

    #[test]
    fn signed_e_float_accepts_an_exponent() {
        let mut it = signed_e_float().apply(Stream::from_str("-1.5e-10rest"));
        let (_, s) = it.next().unwrap().unwrap();
        assert_eq!(s.as_str(), "rest");
    }
}
