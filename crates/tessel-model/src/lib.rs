//! # Tessel Model
//!
//! Decorated model elements for the Tessel modeling language.
//!
//! The upstream parser hands over each model file as a JSON AST. This crate
//! turns it into model elements whose decorators have been resolved through
//! an ordered chain of [`DecoratorFactory`] implementations, and validates
//! the result.
//!
//! ## Usage
//!
//! ```
//! # use tessel_model::{
//! #     ast, BuiltinDecoratorFactory, Decorated, DecoratorFactories, FileId, ModelFile,
//! #     ModelIndex, ValidationContext,
//! # };
//! let source = r#"{
//!     "namespace": "org.acme@1.0.0",
//!     "declarations": [
//!         { "kind": "concept", "name": "Person",
//!           "decorators": [ { "name": "Editable" } ] }
//!     ]
//! }"#;
//!
//! let ast = ast::from_json(source).unwrap();
//! let factories = DecoratorFactories::new().with(BuiltinDecoratorFactory);
//! let file = ModelFile::from_ast(FileId::new(0), "person.json", &ast, &factories).unwrap();
//!
//! let mut index = ModelIndex::new();
//! file.register(&mut index);
//! file.validate(ValidationContext::new(&index)).unwrap();
//!
//! let person = file.declaration("Person").unwrap();
//! assert!(person.decorator("Editable").is_some());
//! assert!(person.decorator("Other").is_none());
//! ```

pub mod ast;
pub mod error;

mod builtin;
mod context;
mod decorated;
mod decorator;
mod factory;
mod model;

pub use builtin::{BuiltinDecoratorFactory, DEPRECATED, DeprecatedDecorator, TERM, TermDecorator};
pub use context::{FileId, ModelIndex, ValidationContext};
pub use decorated::{Decorated, DecoratedElement, DecoratorOwner, ElementKind};
pub use decorator::{Decorator, DecoratorArgument, GenericDecorator, arguments_from_node};
pub use factory::{DecoratorFactories, DecoratorFactory, FactoryError, ResolveError};
pub use model::{Declaration, ModelFile, PRIMITIVE_TYPES, Property, is_primitive};
pub use tessel_core::{identifier::Id, span::Span};
