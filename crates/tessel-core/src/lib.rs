//! Tessel Core Types
//!
//! This crate provides the foundational types shared by the Tessel modeling
//! language crates:
//!
//! - **Identifiers**: String-interned names ([`identifier::Id`])
//! - **Spans**: Byte ranges into model source text ([`span::Span`])

pub mod identifier;
pub mod span;
