//! Decorated model elements.
//!
//! [`DecoratedElement`] is the part of every model element that deals with
//! decorators. It is built once from the element's AST node by
//! [`DecoratedElement::process`] and checked, any number of times, by
//! [`DecoratedElement::validate`]. Element kinds embed it and expose it
//! through the [`Decorated`] trait.

use std::{collections::HashSet, fmt};

use log::debug;

use tessel_core::{identifier::Id, span::Span};

use crate::{
    ast::{DeclarationKind, DecoratedNode},
    context::{FileId, ValidationContext},
    decorator::Decorator,
    error::{Diagnostic, ErrorCode, Result},
    factory::{DecoratorFactories, ResolveError},
};

/// The kind of element that owns a decorator list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Decorators on the namespace of a model file.
    ModelFile,
    /// Decorators on a top-level declaration of the given kind.
    Declaration(DeclarationKind),
    /// Decorators on a property or enum value.
    Property,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::ModelFile => write!(f, "namespace"),
            ElementKind::Declaration(kind) => write!(f, "{}", kind.as_str()),
            ElementKind::Property => write!(f, "property"),
        }
    }
}

/// What a factory gets to know about the element a decorator is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoratorOwner {
    file: FileId,
    kind: ElementKind,
    name: Id,
}

impl DecoratorOwner {
    pub fn new(file: FileId, kind: ElementKind, name: Id) -> Self {
        Self { file, kind, name }
    }

    /// Handle of the model file that contains the element.
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn name(&self) -> Id {
        self.name
    }
}

/// The ordered decorator list of one model element.
#[derive(Debug)]
pub struct DecoratedElement {
    owner: DecoratorOwner,
    span: Span,
    decorators: Vec<Box<dyn Decorator>>,
}

impl DecoratedElement {
    /// Resolve the decorators of `node` through `factories`.
    ///
    /// The result holds exactly one decorator per raw decorator node, in
    /// source order. A node without a decorator list yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ResolveError`] raised by a factory.
    pub fn process(
        owner: DecoratorOwner,
        node: &impl DecoratedNode,
        factories: &DecoratorFactories,
    ) -> std::result::Result<Self, ResolveError> {
        let raw = node.decorator_nodes().unwrap_or_default();

        let decorators = raw
            .iter()
            .map(|decorator| factories.resolve(owner, decorator))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if !decorators.is_empty() {
            debug!(
                element:% = owner.name(),
                kind:% = owner.kind(),
                count = decorators.len();
                "Decorators resolved"
            );
        }

        Ok(Self {
            owner,
            span: node.location(),
            decorators,
        })
    }

    pub fn owner(&self) -> DecoratorOwner {
        self.owner
    }

    /// Handle of the owning model file.
    pub fn file(&self) -> FileId {
        self.owner.file
    }

    /// Location of the element in the model source.
    pub fn span(&self) -> Span {
        self.span
    }

    /// All decorators in source order. Empty, never absent.
    pub fn decorators(&self) -> &[Box<dyn Decorator>] {
        &self.decorators
    }

    /// The first decorator named `name` (exact, case-sensitive match).
    pub fn decorator(&self, name: &str) -> Option<&dyn Decorator> {
        self.decorators
            .iter()
            .find(|decorator| decorator.name() == name)
            .map(|decorator| decorator.as_ref())
    }

    /// Validate every decorator, then reject duplicate decorator names.
    ///
    /// Element kinds call this before their own structural checks. It never
    /// changes the decorator list, so repeated calls give the same answer.
    ///
    /// # Errors
    ///
    /// Returns the first decorator's own error unchanged, or an
    /// [`ErrorCode::E200`] diagnostic naming the earliest duplicated name.
    pub fn validate(&self, ctx: ValidationContext<'_>) -> Result<()> {
        if self.decorators.is_empty() {
            return Ok(());
        }

        let ctx = ctx.in_file(self.owner.file);

        for decorator in &self.decorators {
            decorator.validate(ctx)?;
        }

        let distinct: HashSet<Id> = self.decorators.iter().map(|d| d.name()).collect();
        if distinct.len() == self.decorators.len() {
            return Ok(());
        }

        match first_duplicate(&self.decorators) {
            Some((first, duplicate)) => Err(self.duplicate_error(ctx, first, duplicate)),
            None => Ok(()),
        }
    }

    fn duplicate_error(
        &self,
        ctx: ValidationContext<'_>,
        first: usize,
        duplicate: usize,
    ) -> Diagnostic {
        let name = self.decorators[first].name();

        ctx.attach_file(
            Diagnostic::error(format!("Duplicate decorator {name}"))
                .with_code(ErrorCode::E200)
                .with_label(self.decorators[duplicate].span(), "duplicate decorator")
                .with_secondary_label(self.decorators[first].span(), "first applied here")
                .with_secondary_label(
                    self.span,
                    format!("on {} `{}`", self.owner.kind, self.owner.name),
                )
                .with_help(format!("remove all but one `@{name}` decorator")),
        )
    }
}

/// Index of the earliest decorator whose name reappears later, and the index
/// of its first reappearance.
fn first_duplicate(decorators: &[Box<dyn Decorator>]) -> Option<(usize, usize)> {
    decorators.iter().enumerate().find_map(|(i, decorator)| {
        let name = decorator.name();
        decorators[i + 1..]
            .iter()
            .position(|later| later.name() == name)
            .map(|offset| (i, i + 1 + offset))
    })
}

/// Model elements that carry decorators.
pub trait Decorated {
    fn decorated(&self) -> &DecoratedElement;

    /// All decorators in source order.
    fn decorators(&self) -> &[Box<dyn Decorator>] {
        self.decorated().decorators()
    }

    /// The first decorator named `name`.
    fn decorator(&self, name: &str) -> Option<&dyn Decorator> {
        self.decorated().decorator(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{DecoratorArgumentNode, DecoratorNode, PropertyNode},
        builtin::BuiltinDecoratorFactory,
        context::ModelIndex,
        decorator::GenericDecorator,
        factory::{DecoratorFactory, FactoryError},
    };

    fn decorator_node(name: &str, start: usize) -> DecoratorNode {
        DecoratorNode {
            name: Id::new(name),
            arguments: Vec::new(),
            location: Span::new(start..start + name.len() + 1),
        }
    }

    fn property(decorators: Option<Vec<DecoratorNode>>) -> PropertyNode {
        PropertyNode {
            name: Id::new("email"),
            type_name: Some(Id::new("String")),
            array: false,
            optional: false,
            decorators,
            location: Span::new(0..100),
        }
    }

    fn names(element: &DecoratedElement) -> Vec<String> {
        element
            .decorators()
            .iter()
            .map(|decorator| decorator.name().to_string())
            .collect()
    }

    fn index() -> (ModelIndex, FileId) {
        let mut index = ModelIndex::new();
        let file = index.add_file("person.json");
        (index, file)
    }

    fn owner(file: FileId) -> DecoratorOwner {
        DecoratorOwner::new(file, ElementKind::Property, Id::new("email"))
    }

    #[test]
    fn test_process_absent_decorators() {
        let (index, file) = index();
        let element =
            DecoratedElement::process(owner(file), &property(None), &DecoratorFactories::new())
                .expect("resolves");

        assert!(element.decorators().is_empty());
        assert!(element.validate(ValidationContext::new(&index)).is_ok());
    }

    #[test]
    fn test_process_empty_decorators() {
        let (index, file) = index();
        let element = DecoratedElement::process(
            owner(file),
            &property(Some(Vec::new())),
            &DecoratorFactories::new(),
        )
        .expect("resolves");

        assert!(element.decorators().is_empty());
        assert!(element.validate(ValidationContext::new(&index)).is_ok());
    }

    #[test]
    fn test_process_preserves_source_order() {
        let (index, file) = index();
        let node = property(Some(vec![
            decorator_node("Editable", 0),
            decorator_node("Hidden", 10),
            decorator_node("Term", 20),
        ]));

        let element = DecoratedElement::process(owner(file), &node, &DecoratorFactories::new())
            .expect("resolves");

        assert_eq!(names(&element), vec!["Editable", "Hidden", "Term"]);
        assert_eq!(element.span(), Span::new(0..100));
        assert_eq!(element.file(), file);
        assert!(element.validate(ValidationContext::new(&index)).is_ok());
    }

    #[test]
    fn test_duplicate_decorators_rejected() {
        let (index, file) = index();
        let node = property(Some(vec![
            decorator_node("Term", 10),
            decorator_node("Term", 30),
        ]));

        let element = DecoratedElement::process(owner(file), &node, &DecoratorFactories::new())
            .expect("resolves");
        assert_eq!(names(&element), vec!["Term", "Term"]);
        assert!(
            element
                .decorators()
                .iter()
                .all(|decorator| decorator.as_any().is::<GenericDecorator>())
        );

        let err = element
            .validate(ValidationContext::new(&index))
            .expect_err("duplicate names");

        assert_eq!(err.code(), Some(ErrorCode::E200));
        assert_eq!(err.message(), "Duplicate decorator Term");
        assert_eq!(err.file(), Some("person.json"));
        assert_eq!(err.primary_span(), Some(Span::new(30..35)));
        assert_eq!(err.labels()[1].span(), Span::new(10..15));
        assert_eq!(err.labels()[2].span(), Span::new(0..100));
        assert_eq!(err.labels()[2].message(), "on property `email`");
    }

    #[test]
    fn test_duplicate_reports_earliest_duplicated_name_only() {
        let (index, file) = index();
        let node = property(Some(vec![
            decorator_node("A", 0),
            decorator_node("B", 10),
            decorator_node("B", 20),
            decorator_node("A", 30),
            decorator_node("A", 40),
        ]));

        let element = DecoratedElement::process(owner(file), &node, &DecoratorFactories::new())
            .expect("resolves");
        let err = element
            .validate(ValidationContext::new(&index))
            .expect_err("duplicates");

        assert_eq!(err.message(), "Duplicate decorator A");
        assert_eq!(err.primary_span(), Some(Span::new(30..32)));
    }

    #[test]
    fn test_first_duplicate() {
        let node = property(Some(vec![
            decorator_node("X", 0),
            decorator_node("Y", 10),
            decorator_node("Y", 20),
            decorator_node("X", 30),
        ]));
        let element =
            DecoratedElement::process(owner(FileId::new(0)), &node, &DecoratorFactories::new())
                .expect("resolves");

        assert_eq!(first_duplicate(element.decorators()), Some((0, 3)));
    }

    #[test]
    fn test_decorator_lookup() {
        let node = property(Some(vec![decorator_node("Editable", 0)]));
        let element =
            DecoratedElement::process(owner(FileId::new(0)), &node, &DecoratorFactories::new())
                .expect("resolves");

        let editable = element.decorator("Editable").expect("present");
        assert_eq!(editable.name(), "Editable");
        assert!(element.decorator("Other").is_none());
        assert!(element.decorator("editable").is_none());
    }

    #[test]
    fn test_decorator_lookup_returns_earliest_duplicate() {
        let node = property(Some(vec![
            decorator_node("Term", 10),
            decorator_node("Term", 30),
        ]));
        let element =
            DecoratedElement::process(owner(FileId::new(0)), &node, &DecoratorFactories::new())
                .expect("resolves");

        let term = element.decorator("Term").expect("present");
        assert_eq!(term.span(), Span::new(10..15));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let (index, file) = index();
        let node = property(Some(vec![
            decorator_node("Editable", 0),
            decorator_node("Hidden", 10),
        ]));
        let element = DecoratedElement::process(owner(file), &node, &DecoratorFactories::new())
            .expect("resolves");
        let before = names(&element);

        for _ in 0..3 {
            assert!(element.validate(ValidationContext::new(&index)).is_ok());
        }

        assert_eq!(names(&element), before);
    }

    #[test]
    fn test_decorator_error_propagates_before_duplicate_check() {
        let (index, file) = index();
        let factories = DecoratorFactories::new().with(BuiltinDecoratorFactory);
        let node = property(Some(vec![
            decorator_node("Editable", 0),
            decorator_node("Editable", 10),
            DecoratorNode {
                name: Id::new("Term"),
                arguments: vec![DecoratorArgumentNode::Number(1.0)],
                location: Span::new(20..30),
            },
        ]));

        let element =
            DecoratedElement::process(owner(file), &node, &factories).expect("resolves");
        let err = element
            .validate(ValidationContext::new(&index))
            .expect_err("invalid Term arguments");

        assert_eq!(err.code(), Some(ErrorCode::E201));
        assert_eq!(err.file(), Some("person.json"));
    }

    #[test]
    fn test_factory_failure_aborts_process() {
        #[derive(Debug)]
        struct Failing;

        impl DecoratorFactory for Failing {
            fn name(&self) -> &str {
                "failing"
            }

            fn try_resolve(
                &self,
                _owner: DecoratorOwner,
                node: &DecoratorNode,
            ) -> std::result::Result<Option<Box<dyn Decorator>>, FactoryError> {
                if node.name == "Broken" {
                    Err("cannot build".into())
                } else {
                    Ok(None)
                }
            }
        }

        let node = property(Some(vec![
            decorator_node("Editable", 0),
            decorator_node("Broken", 10),
        ]));
        let factories = DecoratorFactories::new().with(Failing);

        let err = DecoratedElement::process(owner(FileId::new(0)), &node, &factories)
            .expect_err("factory fails");

        assert_eq!(err.span(), Span::new(10..17));
    }

    #[test]
    fn test_factory_sees_owner() {
        #[derive(Debug)]
        struct PropertiesOnly;

        impl DecoratorFactory for PropertiesOnly {
            fn name(&self) -> &str {
                "properties-only"
            }

            fn try_resolve(
                &self,
                owner: DecoratorOwner,
                node: &DecoratorNode,
            ) -> std::result::Result<Option<Box<dyn Decorator>>, FactoryError> {
                assert_eq!(owner.kind(), ElementKind::Property);
                assert_eq!(owner.name(), "email");
                Ok(Some(Box::new(GenericDecorator::from_node(node))))
            }
        }

        let node = property(Some(vec![decorator_node("Editable", 0)]));
        let factories = DecoratorFactories::new().with(PropertiesOnly);

        let element = DecoratedElement::process(owner(FileId::new(0)), &node, &factories)
            .expect("resolves");
        assert_eq!(element.decorators().len(), 1);
    }

    #[test]
    fn test_element_kind_display() {
        assert_eq!(ElementKind::ModelFile.to_string(), "namespace");
        assert_eq!(
            ElementKind::Declaration(DeclarationKind::Concept).to_string(),
            "concept"
        );
        assert_eq!(ElementKind::Property.to_string(), "property");
    }
}
