//! Decorator kinds known to Tessel itself.
//!
//! - `@Term("…")` gives an element a human-readable term.
//! - `@Deprecated` / `@Deprecated("reason")` marks an element as deprecated.
//!
//! Only the argument shapes are checked here; what the decorators mean is up
//! to the tools that read the model.

use std::any::Any;

use tessel_core::{identifier::Id, span::Span};

use crate::{
    ast::DecoratorNode,
    context::ValidationContext,
    decorated::DecoratorOwner,
    decorator::{Decorator, DecoratorArgument, arguments_from_node},
    error::{Diagnostic, ErrorCode, Result},
    factory::{DecoratorFactory, FactoryError},
};

pub const TERM: &str = "Term";
pub const DEPRECATED: &str = "Deprecated";

/// `@Term("…")`: exactly one string argument.
#[derive(Debug, Clone, PartialEq)]
pub struct TermDecorator {
    arguments: Vec<DecoratorArgument>,
    span: Span,
}

impl TermDecorator {
    pub fn from_node(node: &DecoratorNode) -> Self {
        Self {
            arguments: arguments_from_node(node),
            span: node.location,
        }
    }

    /// The term text, when the arguments are well formed.
    pub fn term(&self) -> Option<&str> {
        match self.arguments.as_slice() {
            [argument] => argument.as_str(),
            _ => None,
        }
    }
}

impl Decorator for TermDecorator {
    fn name(&self) -> Id {
        Id::new(TERM)
    }

    fn arguments(&self) -> &[DecoratorArgument] {
        &self.arguments
    }

    fn span(&self) -> Span {
        self.span
    }

    fn validate(&self, ctx: ValidationContext<'_>) -> Result<()> {
        if self.term().is_some() {
            return Ok(());
        }
        Err(ctx.attach_file(invalid_arguments(
            TERM,
            &self.arguments,
            self.span,
            "`@Term` takes exactly one string argument",
        )))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `@Deprecated` with an optional string reason.
#[derive(Debug, Clone, PartialEq)]
pub struct DeprecatedDecorator {
    arguments: Vec<DecoratorArgument>,
    span: Span,
}

impl DeprecatedDecorator {
    pub fn from_node(node: &DecoratorNode) -> Self {
        Self {
            arguments: arguments_from_node(node),
            span: node.location,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        self.arguments.first().and_then(DecoratorArgument::as_str)
    }
}

impl Decorator for DeprecatedDecorator {
    fn name(&self) -> Id {
        Id::new(DEPRECATED)
    }

    fn arguments(&self) -> &[DecoratorArgument] {
        &self.arguments
    }

    fn span(&self) -> Span {
        self.span
    }

    fn validate(&self, ctx: ValidationContext<'_>) -> Result<()> {
        match self.arguments.as_slice() {
            [] | [DecoratorArgument::String(_)] => Ok(()),
            arguments => Err(ctx.attach_file(invalid_arguments(
                DEPRECATED,
                arguments,
                self.span,
                "`@Deprecated` takes no arguments or a single string reason",
            ))),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn invalid_arguments(
    name: &str,
    arguments: &[DecoratorArgument],
    span: Span,
    help: &str,
) -> Diagnostic {
    let found = if arguments.is_empty() {
        "no arguments".to_string()
    } else {
        arguments
            .iter()
            .map(DecoratorArgument::type_name)
            .collect::<Vec<_>>()
            .join(", ")
    };

    Diagnostic::error(format!("invalid arguments for decorator `{name}`"))
        .with_code(ErrorCode::E201)
        .with_label(span, format!("found {found}"))
        .with_help(help)
}

/// Resolves `@Term` and `@Deprecated`; declines everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDecoratorFactory;

impl DecoratorFactory for BuiltinDecoratorFactory {
    fn name(&self) -> &str {
        "builtin"
    }

    fn try_resolve(
        &self,
        _owner: DecoratorOwner,
        node: &DecoratorNode,
    ) -> std::result::Result<Option<Box<dyn Decorator>>, FactoryError> {
        let decorator: Option<Box<dyn Decorator>> = if node.name == TERM {
            Some(Box::new(TermDecorator::from_node(node)))
        } else if node.name == DEPRECATED {
            Some(Box::new(DeprecatedDecorator::from_node(node)))
        } else {
            None
        };
        Ok(decorator)
    }
}
