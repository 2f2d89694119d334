//! Outcome of a successful validation pass.

use tessel_model::{FileId, error::Diagnostic};

/// Summary of a validation pass that found no errors.
///
/// Warnings never fail validation; they are returned here so callers can
/// decide how to surface them.
#[derive(Debug, Default)]
pub struct ValidationReport {
    files: usize,
    decorators: usize,
    warnings: Vec<(FileId, Diagnostic)>,
}

impl ValidationReport {
    pub(crate) fn new(files: usize, decorators: usize) -> Self {
        Self {
            files,
            decorators,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn warn(&mut self, file: FileId, warning: Diagnostic) {
        self.warnings.push((file, warning));
    }

    /// Number of model files validated.
    pub fn files(&self) -> usize {
        self.files
    }

    /// Number of decorators across all validated elements.
    pub fn decorators(&self) -> usize {
        self.decorators
    }

    /// Warnings, each with the file it was raised for.
    pub fn warnings(&self) -> &[(FileId, Diagnostic)] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
