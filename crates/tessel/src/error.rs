//! Error types for Tessel operations.
//!
//! This module provides the main error type [`TesselError`] which wraps the
//! error conditions that can occur while loading and validating models.

use std::io;

use thiserror::Error;

use tessel_model::{ResolveError, error::ModelError};

/// The main error type for Tessel operations.
///
/// # Diagnostic Variants
///
/// The `Model` variant contains "illegal model" diagnostics with source
/// spans, plus the source text the spans point into when it is known.
#[derive(Debug, Error)]
pub enum TesselError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Model { err: ModelError, src: Option<String> },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TesselError {
    /// Create a new `Model` error with the associated source text.
    pub fn new_model_error(err: impl Into<ModelError>, src: Option<String>) -> Self {
        Self::Model {
            err: err.into(),
            src,
        }
    }
}
