//! Error codes for the Tessel diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - AST ingestion errors
//! - `E2xx` - Decorator errors
//! - `E3xx` - Model structure errors
//! - `Wxxx` - Warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // AST Ingestion Errors (E1xx)
    // =========================================================================
    /// Malformed AST.
    ///
    /// The AST handed over by the upstream parser is not valid JSON or does
    /// not have the expected shape.
    E100,

    // =========================================================================
    // Decorator Errors (E2xx)
    // =========================================================================
    /// Duplicate decorator.
    ///
    /// The same decorator name is applied more than once to one element.
    E200,

    /// Invalid decorator arguments.
    ///
    /// A known decorator kind received arguments it does not accept.
    E201,

    /// Undefined type in decorator argument.
    ///
    /// A type reference argument names a type that is not declared.
    E202,

    // =========================================================================
    // Model Structure Errors (E3xx)
    // =========================================================================
    /// Duplicate declaration.
    ///
    /// A model file declares the same name more than once.
    E300,

    /// Duplicate property.
    ///
    /// A declaration has two properties with the same name.
    E301,

    /// Undefined type.
    ///
    /// A super type or property type is not declared in the model.
    E302,

    // =========================================================================
    // Warnings (Wxxx)
    // =========================================================================
    /// Unresolved decorator.
    ///
    /// No registered factory recognised the decorator, so it was kept as a
    /// generic decorator.
    W001,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E200").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::W001 => "W001",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed AST",
            ErrorCode::E200 => "duplicate decorator",
            ErrorCode::E201 => "invalid decorator arguments",
            ErrorCode::E202 => "undefined type in decorator argument",
            ErrorCode::E300 => "duplicate declaration",
            ErrorCode::E301 => "duplicate property",
            ErrorCode::E302 => "undefined type",
            ErrorCode::W001 => "unresolved decorator",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
