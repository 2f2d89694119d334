//! Decorators attached to model elements.
//!
//! The set of decorator kinds is open: factories registered with a model
//! manager may produce any type implementing [`Decorator`]. When no factory
//! recognises a decorator it is kept as a [`GenericDecorator`], so every raw
//! decorator node always yields a usable value.

use std::{any::Any, fmt};

use tessel_core::{identifier::Id, span::Span};

use crate::{
    ast::{DecoratorArgumentNode, DecoratorNode},
    context::ValidationContext,
    error::{Diagnostic, ErrorCode, Result},
};

/// One decorator applied to a model element.
///
/// Implementations are immutable once built. [`Decorator::validate`] checks
/// the decorator on its own terms (argument shapes, referenced types); the
/// owning element checks the decorator list as a whole.
pub trait Decorator: fmt::Debug {
    /// The decorator name, used for lookup and uniqueness.
    fn name(&self) -> Id;

    /// The arguments in source order.
    fn arguments(&self) -> &[DecoratorArgument];

    /// Location of the decorator in the model source.
    fn span(&self) -> Span;

    /// Check that the decorator is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns an "illegal model" diagnostic describing the first problem.
    fn validate(&self, ctx: ValidationContext<'_>) -> Result<()>;

    /// Access to the concrete type, for callers that know the decorator kind.
    fn as_any(&self) -> &dyn Any;
}

/// A resolved decorator argument.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoratorArgument {
    String(String),
    Number(f64),
    Boolean(bool),
    TypeReference { name: Id, array: bool },
}

impl DecoratorArgument {
    /// The string value, if this is a string argument.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecoratorArgument::String(value) => Some(value),
            _ => None,
        }
    }

    /// Short name of the argument type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            DecoratorArgument::String(_) => "string",
            DecoratorArgument::Number(_) => "number",
            DecoratorArgument::Boolean(_) => "boolean",
            DecoratorArgument::TypeReference { .. } => "type reference",
        }
    }
}

impl From<&DecoratorArgumentNode> for DecoratorArgument {
    fn from(node: &DecoratorArgumentNode) -> Self {
        match node {
            DecoratorArgumentNode::String(value) => Self::String(value.clone()),
            DecoratorArgumentNode::Number(value) => Self::Number(*value),
            DecoratorArgumentNode::Boolean(value) => Self::Boolean(*value),
            DecoratorArgumentNode::TypeReference(reference) => Self::TypeReference {
                name: reference.name,
                array: reference.array,
            },
        }
    }
}

impl fmt::Display for DecoratorArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecoratorArgument::String(value) => write!(f, "{value:?}"),
            DecoratorArgument::Number(value) => write!(f, "{value}"),
            DecoratorArgument::Boolean(value) => write!(f, "{value}"),
            DecoratorArgument::TypeReference { name, array } => {
                write!(f, "{name}")?;
                if *array {
                    write!(f, "[]")?;
                }
                Ok(())
            }
        }
    }
}

/// Convert the raw argument nodes of a decorator.
pub fn arguments_from_node(node: &DecoratorNode) -> Vec<DecoratorArgument> {
    node.arguments.iter().map(DecoratorArgument::from).collect()
}

/// The fallback decorator: a name and raw arguments with no kind-specific
/// meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericDecorator {
    name: Id,
    arguments: Vec<DecoratorArgument>,
    span: Span,
}

impl GenericDecorator {
    pub fn new(name: Id, arguments: Vec<DecoratorArgument>, span: Span) -> Self {
        Self {
            name,
            arguments,
            span,
        }
    }

    /// Wrap a raw decorator node.
    pub fn from_node(node: &DecoratorNode) -> Self {
        Self::new(node.name, arguments_from_node(node), node.location)
    }
}

impl Decorator for GenericDecorator {
    fn name(&self) -> Id {
        self.name
    }

    fn arguments(&self) -> &[DecoratorArgument] {
        &self.arguments
    }

    fn span(&self) -> Span {
        self.span
    }

    /// Type reference arguments must name a declared type.
    fn validate(&self, ctx: ValidationContext<'_>) -> Result<()> {
        let undefined = self.arguments.iter().find_map(|argument| match argument {
            DecoratorArgument::TypeReference { name, .. } if !ctx.resolves_type(*name) => {
                Some(*name)
            }
            _ => None,
        });

        match undefined {
            Some(type_name) => Err(ctx.attach_file(
                Diagnostic::error(format!(
                    "undefined type `{type_name}` referenced by decorator `{}`",
                    self.name
                ))
                .with_code(ErrorCode::E202)
                .with_label(self.span, "undefined type")
                .with_help(format!("declare `{type_name}` in the model")),
            )),
            None => Ok(()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
