//! Decorator factories and the ordered factory chain.
//!
//! A [`DecoratorFactory`] turns a raw [`DecoratorNode`] into a typed
//! [`Decorator`], or declines so that the next factory gets a chance. The
//! [`DecoratorFactories`] registry keeps factories in registration order and
//! implements the resolution contract:
//!
//! 1. factories are tried in registration order,
//! 2. the first factory that produces a decorator wins and no later factory
//!    is consulted,
//! 3. when every factory declines, the node becomes a [`GenericDecorator`].
//!
//! A factory that fails is a configuration defect, not a data defect, so its
//! error aborts resolution and is never retried.

use std::fmt;

use log::trace;
use thiserror::Error;

use tessel_core::{identifier::Id, span::Span};

use crate::{
    ast::DecoratorNode,
    context::FileId,
    decorated::DecoratorOwner,
    decorator::{Decorator, GenericDecorator},
};

/// Error produced by a misbehaving factory.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

/// A pluggable resolver for decorator nodes.
pub trait DecoratorFactory: fmt::Debug {
    /// Name used in logs and in [`ResolveError`].
    fn name(&self) -> &str;

    /// Produce a decorator for `node`, or `Ok(None)` to decline.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the model being built.
    fn try_resolve(
        &self,
        owner: DecoratorOwner,
        node: &DecoratorNode,
    ) -> Result<Option<Box<dyn Decorator>>, FactoryError>;
}

/// Fatal failure while resolving decorators.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(
        "decorator factory `{factory}` failed to resolve `@{decorator}`{}: {source}",
        in_file(.file_name)
    )]
    Factory {
        factory: String,
        decorator: Id,
        /// Model file that holds the decorator.
        file: FileId,
        /// Name of that file, once the model file being built has attached it.
        file_name: Option<String>,
        span: Span,
        #[source]
        source: FactoryError,
    },
}

impl ResolveError {
    /// Location of the decorator that could not be resolved.
    pub fn span(&self) -> Span {
        match self {
            ResolveError::Factory { span, .. } => *span,
        }
    }

    pub fn file(&self) -> FileId {
        match self {
            ResolveError::Factory { file, .. } => *file,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        match self {
            ResolveError::Factory { file_name, .. } => file_name.as_deref(),
        }
    }

    /// Attach the model file name, unless one is already set.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            ResolveError::Factory { file_name, .. } => {
                file_name.get_or_insert_with(|| name.into());
            }
        }
        self
    }
}

fn in_file(file_name: &Option<String>) -> String {
    file_name
        .as_deref()
        .map(|name| format!(" in {name}"))
        .unwrap_or_default()
}

/// Ordered registry of decorator factories.
#[derive(Debug, Default)]
pub struct DecoratorFactories {
    factories: Vec<Box<dyn DecoratorFactory>>,
}

impl DecoratorFactories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a factory; it is consulted after every factory registered
    /// before it.
    pub fn register(&mut self, factory: Box<dyn DecoratorFactory>) {
        trace!(factory = factory.name(); "Registering decorator factory");
        self.factories.push(factory);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, factory: impl DecoratorFactory + 'static) -> Self {
        self.register(Box::new(factory));
        self
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Factories in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn DecoratorFactory> {
        self.factories.iter().map(|factory| factory.as_ref())
    }

    /// Resolve one decorator node, first match wins.
    ///
    /// Never returns "nothing": when no factory matches, the node is wrapped
    /// in a [`GenericDecorator`].
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Factory`] as soon as a factory fails.
    pub fn resolve(
        &self,
        owner: DecoratorOwner,
        node: &DecoratorNode,
    ) -> Result<Box<dyn Decorator>, ResolveError> {
        for factory in &self.factories {
            let resolved = factory
                .try_resolve(owner, node)
                .map_err(|source| ResolveError::Factory {
                    factory: factory.name().to_string(),
                    decorator: node.name,
                    file: owner.file(),
                    file_name: None,
                    span: node.location,
                    source,
                })?;

            if let Some(decorator) = resolved {
                trace!(decorator:% = node.name, factory = factory.name(); "Decorator resolved");
                return Ok(decorator);
            }
        }

        trace!(decorator:% = node.name; "No factory matched, using generic decorator");
        Ok(Box::new(GenericDecorator::from_node(node)))
    }
}
