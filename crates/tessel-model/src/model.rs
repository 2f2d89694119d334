//! Model elements built from the AST.
//!
//! [`ModelFile`], [`Declaration`] and [`Property`] each embed a
//! [`DecoratedElement`]. Their `validate` methods run the decorated base
//! validation first and then add their own structural checks.

use std::collections::HashMap;

use log::debug;

use tessel_core::{identifier::Id, span::Span};

use crate::{
    ast::{DeclarationKind, DeclarationNode, ModelFileNode, PropertyNode},
    context::{FileId, ModelIndex, ValidationContext},
    decorated::{Decorated, DecoratedElement, DecoratorOwner, ElementKind},
    error::{Diagnostic, ErrorCode, Result},
    factory::{DecoratorFactories, ResolveError},
};

/// Property types that never need a declaration.
pub const PRIMITIVE_TYPES: [&str; 6] = ["String", "Boolean", "DateTime", "Double", "Integer", "Long"];

pub fn is_primitive(name: Id) -> bool {
    PRIMITIVE_TYPES.iter().any(|primitive| name == *primitive)
}

/// One model file: a namespace, its decorators and its declarations.
#[derive(Debug)]
pub struct ModelFile {
    name: String,
    namespace: String,
    decorated: DecoratedElement,
    declarations: Vec<Declaration>,
}

impl ModelFile {
    /// Build the model file `id` from its AST, resolving every decorator.
    ///
    /// # Errors
    ///
    /// Propagates the first factory failure.
    pub fn from_ast(
        id: FileId,
        name: impl Into<String>,
        ast: &ModelFileNode,
        factories: &DecoratorFactories,
    ) -> std::result::Result<Self, ResolveError> {
        let name = name.into();
        debug!(file = name, namespace = ast.namespace; "Building model file");

        let owner = DecoratorOwner::new(id, ElementKind::ModelFile, Id::new(&ast.namespace));
        let decorated = DecoratedElement::process(owner, ast, factories)
            .map_err(|err| err.with_file_name(&name))?;

        let declarations = ast
            .declarations
            .iter()
            .map(|declaration| Declaration::from_ast(id, declaration, factories))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| err.with_file_name(&name))?;

        Ok(Self {
            name,
            namespace: ast.namespace.clone(),
            decorated,
            declarations,
        })
    }

    pub fn id(&self) -> FileId {
        self.decorated.file()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|declaration| declaration.name() == name)
    }

    /// Record this file and its declared type names in `index`, under the
    /// handle the file was built with.
    pub fn register(&self, index: &mut ModelIndex) -> FileId {
        let file = self.id();
        index.insert_file(file, &self.name);
        for declaration in &self.declarations {
            index.declare_type(declaration.name(), file);
        }
        file
    }

    /// Every decorated element of the file in source order: the namespace,
    /// then each declaration followed by its properties.
    pub fn decorated_elements(&self) -> Vec<&DecoratedElement> {
        std::iter::once(&self.decorated)
            .chain(self.declarations.iter().flat_map(|declaration| {
                std::iter::once(declaration.decorated()).chain(
                    declaration
                        .properties()
                        .iter()
                        .map(|property| property.decorated()),
                )
            }))
            .collect()
    }

    /// Validate the namespace decorators, declaration names, and every
    /// declaration.
    pub fn validate(&self, ctx: ValidationContext<'_>) -> Result<()> {
        self.decorated.validate(ctx)?;

        let ctx = ctx.in_file(self.id());
        let mut seen: HashMap<Id, Span> = HashMap::new();
        for declaration in &self.declarations {
            if let Some(first) = seen.insert(declaration.name(), declaration.span()) {
                return Err(ctx.attach_file(
                    Diagnostic::error(format!(
                        "duplicate declaration `{}` in namespace `{}`",
                        declaration.name(),
                        self.namespace
                    ))
                    .with_code(ErrorCode::E300)
                    .with_label(declaration.span(), "declared again here")
                    .with_secondary_label(first, "first declared here"),
                ));
            }
        }

        for declaration in &self.declarations {
            declaration.validate(ctx)?;
        }
        Ok(())
    }
}

impl Decorated for ModelFile {
    fn decorated(&self) -> &DecoratedElement {
        &self.decorated
    }
}

/// A top-level declaration.
#[derive(Debug)]
pub struct Declaration {
    name: Id,
    kind: DeclarationKind,
    super_type: Option<Id>,
    decorated: DecoratedElement,
    properties: Vec<Property>,
}

impl Declaration {
    fn from_ast(
        file: FileId,
        ast: &DeclarationNode,
        factories: &DecoratorFactories,
    ) -> std::result::Result<Self, ResolveError> {
        let owner = DecoratorOwner::new(file, ElementKind::Declaration(ast.kind), ast.name);
        let decorated = DecoratedElement::process(owner, ast, factories)?;

        let properties = ast
            .properties
            .iter()
            .map(|property| Property::from_ast(file, property, factories))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            name: ast.name,
            kind: ast.kind,
            super_type: ast.super_type,
            decorated,
            properties,
        })
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn super_type(&self) -> Option<Id> {
        self.super_type
    }

    pub fn span(&self) -> Span {
        self.decorated.span()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name() == name)
    }

    pub fn validate(&self, ctx: ValidationContext<'_>) -> Result<()> {
        self.decorated.validate(ctx)?;

        let ctx = ctx.in_file(self.decorated.file());

        if let Some(super_type) = self.super_type.filter(|name| !ctx.resolves_type(*name)) {
            return Err(ctx.attach_file(
                Diagnostic::error(format!(
                    "undefined super type `{super_type}` of {} `{}`",
                    self.kind.as_str(),
                    self.name
                ))
                .with_code(ErrorCode::E302)
                .with_label(self.span(), "extends an undeclared type"),
            ));
        }

        let mut seen: HashMap<Id, Span> = HashMap::new();
        for property in &self.properties {
            if let Some(first) = seen.insert(property.name(), property.span()) {
                return Err(ctx.attach_file(
                    Diagnostic::error(format!(
                        "duplicate property `{}` in {} `{}`",
                        property.name(),
                        self.kind.as_str(),
                        self.name
                    ))
                    .with_code(ErrorCode::E301)
                    .with_label(property.span(), "declared again here")
                    .with_secondary_label(first, "first declared here"),
                ));
            }
        }

        for property in &self.properties {
            property.validate(ctx)?;
        }
        Ok(())
    }
}

impl Decorated for Declaration {
    fn decorated(&self) -> &DecoratedElement {
        &self.decorated
    }
}

/// A property of a declaration, or an enum value.
#[derive(Debug)]
pub struct Property {
    name: Id,
    type_name: Option<Id>,
    array: bool,
    optional: bool,
    decorated: DecoratedElement,
}

impl Property {
    fn from_ast(
        file: FileId,
        ast: &PropertyNode,
        factories: &DecoratorFactories,
    ) -> std::result::Result<Self, ResolveError> {
        let owner = DecoratorOwner::new(file, ElementKind::Property, ast.name);

        Ok(Self {
            name: ast.name,
            type_name: ast.type_name,
            array: ast.array,
            optional: ast.optional,
            decorated: DecoratedElement::process(owner, ast, factories)?,
        })
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// The property type; `None` for enum values.
    pub fn type_name(&self) -> Option<Id> {
        self.type_name
    }

    pub fn is_array(&self) -> bool {
        self.array
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn span(&self) -> Span {
        self.decorated.span()
    }

    pub fn validate(&self, ctx: ValidationContext<'_>) -> Result<()> {
        self.decorated.validate(ctx)?;

        match self.type_name {
            Some(type_name) if !is_primitive(type_name) && !ctx.resolves_type(type_name) => {
                let ctx = ctx.in_file(self.decorated.file());
                Err(ctx.attach_file(
                    Diagnostic::error(format!(
                        "undefined type `{type_name}` of property `{}`",
                        self.name
                    ))
                    .with_code(ErrorCode::E302)
                    .with_label(self.span(), "undeclared type")
                    .with_help(format!("declare `{type_name}` or use a primitive type")),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl Decorated for Property {
    fn decorated(&self) -> &DecoratedElement {
        &self.decorated
    }
}
