//! AST nodes handed over by the upstream parser.
//!
//! Tessel does not parse model source text itself. The upstream parser emits
//! a JSON document per model file, and this module deserializes it into the
//! node types below. Every node that can carry decorators implements
//! [`DecoratedNode`], which is all the decoration machinery needs to see.

use serde::Deserialize;

use tessel_core::{identifier::Id, span::Span};

use crate::error::{Diagnostic, ErrorCode, Result};

/// A node that may carry decorators.
pub trait DecoratedNode {
    /// The raw decorator nodes in source order, or `None` when the node has
    /// no decorator list at all.
    fn decorator_nodes(&self) -> Option<&[DecoratorNode]>;

    /// Location of the node in the model source.
    fn location(&self) -> Span;
}

/// The root node of one model file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFileNode {
    pub namespace: String,
    #[serde(default)]
    pub decorators: Option<Vec<DecoratorNode>>,
    #[serde(default)]
    pub declarations: Vec<DeclarationNode>,
    #[serde(default)]
    pub location: Span,
}

/// The kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Concept,
    Asset,
    Participant,
    Transaction,
    Event,
    Enum,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Concept => "concept",
            DeclarationKind::Asset => "asset",
            DeclarationKind::Participant => "participant",
            DeclarationKind::Transaction => "transaction",
            DeclarationKind::Event => "event",
            DeclarationKind::Enum => "enum",
        }
    }
}

/// A top-level declaration such as `concept Person { ... }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationNode {
    pub kind: DeclarationKind,
    pub name: Id,
    #[serde(default)]
    pub super_type: Option<Id>,
    #[serde(default)]
    pub decorators: Option<Vec<DecoratorNode>>,
    #[serde(default)]
    pub properties: Vec<PropertyNode>,
    #[serde(default)]
    pub location: Span,
}

/// A property of a declaration, or a value of an enum.
///
/// Enum values have no type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyNode {
    pub name: Id,
    #[serde(default, rename = "type")]
    pub type_name: Option<Id>,
    #[serde(default)]
    pub array: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub decorators: Option<Vec<DecoratorNode>>,
    #[serde(default)]
    pub location: Span,
}

/// A raw decorator application such as `@Term("A person")`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecoratorNode {
    pub name: Id,
    #[serde(default)]
    pub arguments: Vec<DecoratorArgumentNode>,
    #[serde(default)]
    pub location: Span,
}

/// A raw decorator argument.
///
/// Deserializes from `{ "type": "string", "value": "..." }` and friends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum DecoratorArgumentNode {
    String(String),
    Number(f64),
    Boolean(bool),
    TypeReference(TypeReferenceNode),
}

/// A reference to a declared type used as a decorator argument.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeReferenceNode {
    pub name: Id,
    #[serde(default)]
    pub array: bool,
}

impl DecoratedNode for ModelFileNode {
    fn decorator_nodes(&self) -> Option<&[DecoratorNode]> {
        self.decorators.as_deref()
    }

    fn location(&self) -> Span {
        self.location
    }
}

impl DecoratedNode for DeclarationNode {
    fn decorator_nodes(&self) -> Option<&[DecoratorNode]> {
        self.decorators.as_deref()
    }

    fn location(&self) -> Span {
        self.location
    }
}

impl DecoratedNode for PropertyNode {
    fn decorator_nodes(&self) -> Option<&[DecoratorNode]> {
        self.decorators.as_deref()
    }

    fn location(&self) -> Span {
        self.location
    }
}

/// Deserialize a model file AST from its JSON form.
///
/// # Errors
///
/// Returns an [`ErrorCode::E100`] diagnostic whose label points at the
/// offending byte of `source`.
pub fn from_json(source: &str) -> Result<ModelFileNode> {
    serde_json::from_str(source).map_err(|err| {
        let offset = byte_offset(source, err.line(), err.column());
        let label = if err.is_data() {
            "unexpected AST shape"
        } else {
            "invalid JSON"
        };

        Diagnostic::error(format!("malformed model AST: {err}"))
            .with_code(ErrorCode::E100)
            .with_label(Span::new(offset..offset), label)
            .with_help("the AST must be the JSON document emitted by the model parser")
    })
}

/// Convert serde_json's 1-based line/column pair to a byte offset.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}
