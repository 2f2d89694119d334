//! Error and diagnostic system for Tessel models.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - The owning model file of each diagnostic
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single "illegal model" error (or warning) with an optional error code,
//! the name of the model file it belongs to, labelled source locations and
//! help text. Multiple diagnostics are wrapped in [`ModelError`] for returning
//! from the model lifecycle.
//!
//! # Example
//!
//! ```
//! # use tessel_model::error::{Diagnostic, ErrorCode};
//! # use tessel_model::Span;
//!
//! let element = Span::new(0..80);
//! let first = Span::new(10..15);
//! let duplicate = Span::new(20..25);
//!
//! let diag = Diagnostic::error("Duplicate decorator Term")
//!     .with_code(ErrorCode::E200)
//!     .with_file("person.json")
//!     .with_label(duplicate, "duplicate decorator")
//!     .with_secondary_label(first, "first applied here")
//!     .with_secondary_label(element, "on this element");
//!
//! assert_eq!(diag.file(), Some("person.json"));
//! ```

mod diagnostic;
mod error_code;
mod label;
mod model_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use model_error::{ModelError, Result};
pub use severity::Severity;
