//! Source locations.
//!
//! Every AST node handed to Tessel carries the byte range it occupied in the
//! original model source. [`Span`] keeps that range so diagnostics can point
//! back at the text.

use std::{fmt, ops::Range};

use serde::Deserialize;

/// A half-open byte range `start..end` in a source file.
///
/// Deserializes from `{ "start": 10, "end": 20 }`, normalized like
/// [`Span::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawSpan")]
pub struct Span {
    start: usize,
    end: usize,
}

/// A location object as written in the AST, before normalization.
#[derive(Deserialize)]
struct RawSpan {
    start: usize,
    end: usize,
}

impl From<RawSpan> for Span {
    fn from(raw: RawSpan) -> Self {
        Self::new(raw.start..raw.end)
    }
}

impl Span {
    /// Create a new span from a byte range.
    ///
    /// A reversed range is normalized so that `start <= end`.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start.min(range.end),
            end: range.end.max(range.start),
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The span as a plain range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic_functionality() {
        let span = Span::new(5..10);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_empty() {
        let span = Span::new(5..5);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
    }

    #[test]
    fn test_span_reversed_range_is_normalized() {
        #[allow(clippy::reversed_empty_ranges)]
        let span = Span::new(10..5);
        assert_eq!(span.range(), 5..10);
    }

    #[test]
    fn test_span_union() {
        let span1 = Span::new(5..10);
        let span2 = Span::new(15..20);
        let union = span1.union(span2);
        assert_eq!(union.start(), 5);
        assert_eq!(union.end(), 20);
    }

    #[test]
    fn test_span_deserialize() {
        let span: Span = serde_json::from_str(r#"{ "start": 3, "end": 9 }"#).expect("valid span");
        assert_eq!(span, Span::new(3..9));
    }

    #[test]
    fn test_span_deserialize_reversed_is_normalized() {
        let span: Span = serde_json::from_str(r#"{ "start": 9, "end": 3 }"#).expect("valid span");
        assert_eq!(span.range(), 3..9);
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(1..4).to_string(), "1..4");
    }
}
