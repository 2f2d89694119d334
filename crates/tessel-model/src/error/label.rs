//! Labeled source spans for diagnostic messages.

use tessel_core::span::Span;

/// A labeled span in model source.
///
/// - **Primary labels** mark the location the diagnostic is about, such as
///   the second `@Term` on an element.
/// - **Secondary labels** add context, such as "first applied here" or the
///   element that carries the offending decorators.
///
/// ```text
/// error[E200]: Duplicate decorator Term
///    |
///  3 | @Term("A person")
///    | ----------------- first applied here
///  4 | @Term("Someone")
///    | ^^^^^^^^^^^^^^^^ duplicate decorator
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(10..20), "duplicate decorator");

        assert_eq!(label.span(), Span::new(10..20));
        assert_eq!(label.message(), "duplicate decorator");
        assert!(label.is_primary());
        assert!(!label.is_secondary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(5..15), "first applied here");

        assert_eq!(label.span().start(), 5);
        assert_eq!(label.span().end(), 15);
        assert!(label.is_secondary());
    }
}
