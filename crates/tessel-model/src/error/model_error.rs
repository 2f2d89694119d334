//! The ModelError type for wrapping model diagnostics.

use std::fmt;

use crate::error::Diagnostic;

/// A type alias for `Result<T, Diagnostic>`.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Error type for the model lifecycle (AST ingestion and validation).
///
/// Wraps one or more diagnostics.
#[derive(Debug)]
pub struct ModelError {
    diagnostics: Vec<Diagnostic>,
}

impl ModelError {
    /// Create a new model error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ModelError {}

impl From<Diagnostic> for ModelError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ModelError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_model_error_from_diagnostic() {
        let err: ModelError = Diagnostic::error("Duplicate decorator Term")
            .with_code(ErrorCode::E200)
            .into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "Duplicate decorator Term");
    }

    #[test]
    fn test_model_error_display_single() {
        let err: ModelError = Diagnostic::error("undefined type `Address`").into();

        assert_eq!(err.to_string(), "error: undefined type `Address`");
    }

    #[test]
    fn test_model_error_display_multiple() {
        let err: ModelError = vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
        ]
        .into();

        assert_eq!(err.to_string(), "error: first error (+1 more)");
    }
}
