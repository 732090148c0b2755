//! The immutable positional view over input text that every matcher reads
//! from and advances.

use std::rc::Rc;

use crate::core_ctx::Core;

/// An immutable cursor over a `str`. Cloning is cheap (an `Rc` bump plus a
/// byte offset); advancing never mutates the underlying text, it only
/// returns a new `Stream` pointing further along.
#[derive(Clone)]
pub struct Stream {
    text: Rc<str>,
    offset: usize,
    core: Option<Core>,
}

impl Stream {
    /// Build a plain stream with no ambient core context. `Commit` and
    /// `Trace` will fail against a stream built this way.
    pub fn from_str(text: impl Into<Rc<str>>) -> Self {
        Stream {
            text: text.into(),
            offset: 0,
            core: None,
        }
    }

    /// Build a stream carrying a fresh core context, as the driver does.
    pub fn with_core(text: impl Into<Rc<str>>, core: Core) -> Self {
        Stream {
            text: text.into(),
            offset: 0,
            core: Some(core),
        }
    }

    pub fn core(&self) -> Option<&Core> {
        self.core.as_ref()
    }

    /// Byte offset into the original text, used for error positions.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The remaining, unconsumed text.
    pub fn as_str(&self) -> &str {
        &self.text[self.offset..]
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// The next token (Unicode scalar value), if any.
    pub fn head(&self) -> Option<char> {
        self.as_str().chars().next()
    }

    /// A stream advanced past the first token, if one exists.
    pub fn advance_one(&self) -> Option<Stream> {
        let c = self.head()?;
        Some(self.advance_bytes(c.len_utf8()))
    }

    /// A stream advanced past the first `n` tokens (chars), or `None` if
    /// the stream does not have that many left.
    pub fn advance_chars(&self, n: usize) -> Option<Stream> {
        let mut bytes = 0;
        let mut seen = 0;
        for c in self.as_str().chars() {
            if seen == n {
                break;
            }
            bytes += c.len_utf8();
            seen += 1;
        }
        if seen < n {
            None
        } else {
            Some(self.advance_bytes(bytes))
        }
    }

    fn advance_bytes(&self, n: usize) -> Stream {
        Stream {
            text: self.text.clone(),
            offset: self.offset + n,
            core: self.core.clone(),
        }
    }

    /// True iff the remaining text starts with `text`.
    pub fn starts_with(&self, text: &str) -> bool {
        self.as_str().starts_with(text)
    }

    /// Advance past a literal prefix already confirmed via `starts_with`.
    pub fn advance_str(&self, text: &str) -> Stream {
        self.advance_bytes(text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_has_no_head() {
        let s = Stream::from_str("");
        assert!(s.is_empty());
        assert_eq!(s.head(), None);
    }

    #[test]
    fn advance_one_consumes_a_char() {
        let s = Stream::from_str("ab");
        let s2 = s.advance_one().unwrap();
        assert_eq!(s2.as_str(), "b");
    }

    #[test]
    fn advance_chars_past_end_is_none() {
        let s = Stream::from_str("ab");
        assert!(s.advance_chars(3).is_none());
        assert!(s.advance_chars(2).is_some());
    }

    #[test]
    fn streams_clone_independently() {
        let s = Stream::from_str("abc");
        let s2 = s.advance_one().unwrap();
        assert_eq!(s.as_str(), "abc");
        assert_eq!(s2.as_str(), "bc");
    }
}
