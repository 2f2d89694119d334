//! Tessel - decorated models for a schema definition language.
//!
//! The [`ModelManager`] owns the ordered decorator factory chain and the
//! model files loaded into it. Loading a file resolves every decorator on
//! every element; [`ModelManager::validate`] then checks the whole model.

pub mod config;

mod error;
mod report;

pub use tessel_model::{
    BuiltinDecoratorFactory, Decorated, DecoratedElement, Declaration, Decorator,
    DecoratorArgument, DecoratorFactories, DecoratorFactory, DecoratorOwner,
    DeprecatedDecorator, ElementKind, FactoryError, FileId, GenericDecorator, Id, ModelFile,
    ModelIndex, Property, ResolveError, Span, TermDecorator, ValidationContext, ast,
    error as diagnostics,
};

pub use error::TesselError;
pub use report::ValidationReport;

use log::{debug, info, trace, warn};

use tessel_model::error::{Diagnostic, ErrorCode};

use config::AppConfig;

/// Loads model files and validates them.
///
/// # Examples
///
/// ```rust
/// use tessel::{Decorated, ModelManager, config::AppConfig};
///
/// let ast = r#"{
///     "namespace": "org.acme@1.0.0",
///     "declarations": [
///         { "kind": "concept", "name": "Person",
///           "decorators": [ { "name": "Term", "arguments": [ { "type": "string", "value": "A person" } ] } ] }
///     ]
/// }"#;
///
/// let mut manager = ModelManager::new(AppConfig::default());
/// let id = manager.add_model_file("person.json", ast).expect("valid AST");
///
/// let report = manager.validate().expect("valid model");
/// assert_eq!(report.files(), 1);
///
/// let person = manager.file(id).and_then(|file| file.declaration("Person")).unwrap();
/// assert!(person.decorator("Term").is_some());
/// ```
#[derive(Debug)]
pub struct ModelManager {
    config: AppConfig,
    factories: DecoratorFactories,
    files: Vec<ModelFile>,
    sources: Vec<Option<String>>,
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl ModelManager {
    /// Create a manager; registers [`BuiltinDecoratorFactory`] when the
    /// configuration asks for it.
    pub fn new(config: AppConfig) -> Self {
        let mut factories = DecoratorFactories::new();
        if config.decorators().builtin() {
            factories.register(Box::new(BuiltinDecoratorFactory));
        }

        Self {
            config,
            factories,
            files: Vec::new(),
            sources: Vec::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Append a factory to the chain. It is tried after every factory
    /// registered before it.
    ///
    /// Files already loaded keep the decorators they were built with.
    pub fn add_decorator_factory(&mut self, factory: impl DecoratorFactory + 'static) {
        if !self.files.is_empty() {
            warn!(
                factory = factory.name(),
                loaded_files = self.files.len();
                "Decorator factory registered after model files were loaded"
            );
        }
        self.factories.register(Box::new(factory));
    }

    pub fn factories(&self) -> &DecoratorFactories {
        &self.factories
    }

    /// Load a model file from its JSON AST.
    ///
    /// # Errors
    ///
    /// Returns `TesselError::Model` for a malformed AST and
    /// `TesselError::Resolve` when a factory fails.
    pub fn add_model_file(
        &mut self,
        name: impl Into<String>,
        ast_json: &str,
    ) -> Result<FileId, TesselError> {
        self.add(name.into(), ast_json, None)
    }

    /// Like [`add_model_file`](Self::add_model_file), keeping the original
    /// model source so diagnostics can quote it.
    pub fn add_model_file_with_source(
        &mut self,
        name: impl Into<String>,
        ast_json: &str,
        source: impl Into<String>,
    ) -> Result<FileId, TesselError> {
        self.add(name.into(), ast_json, Some(source.into()))
    }

    fn add(
        &mut self,
        name: String,
        ast_json: &str,
        source: Option<String>,
    ) -> Result<FileId, TesselError> {
        info!(file = name; "Loading model file");

        let ast = ast::from_json(ast_json).map_err(|diag| {
            TesselError::new_model_error(diag.with_file(&name), Some(ast_json.to_string()))
        })?;

        let id = FileId::new(self.files.len());
        let file = ModelFile::from_ast(id, name, &ast, &self.factories)?;
        debug!(
            file = file.name(),
            declarations = file.declarations().len();
            "Model file loaded"
        );

        self.files.push(file);
        self.sources.push(source);
        Ok(id)
    }

    pub fn files(&self) -> &[ModelFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> Option<&ModelFile> {
        self.files.get(id.index())
    }

    /// The model source of `id`, when it was supplied.
    pub fn source(&self, id: FileId) -> Option<&str> {
        self.sources.get(id.index()).and_then(|source| source.as_deref())
    }

    /// Declared type names across every loaded file.
    pub fn declared_types(&self) -> Vec<Id> {
        self.index().types().collect()
    }

    fn index(&self) -> ModelIndex {
        let mut index = ModelIndex::new();
        for file in &self.files {
            file.register(&mut index);
        }
        index
    }

    /// Validate every loaded file, in load order.
    ///
    /// Stops at the first error. Can be called any number of times; the
    /// model is never modified.
    ///
    /// # Errors
    ///
    /// Returns `TesselError::Model` carrying the first "illegal model"
    /// diagnostic.
    pub fn validate(&self) -> Result<ValidationReport, TesselError> {
        info!(files = self.files.len(); "Validating model");

        let index = self.index();
        let ctx = ValidationContext::new(&index)
            .with_type_checks(self.config.validation().type_references());

        for file in &self.files {
            trace!(file = file.name(); "Validating model file");
            file.validate(ctx).map_err(|diag| {
                TesselError::new_model_error(diag, self.source(file.id()).map(str::to_string))
            })?;
        }

        let decorators = self
            .files
            .iter()
            .flat_map(ModelFile::decorated_elements)
            .map(|element| element.decorators().len())
            .sum();

        let mut report = ValidationReport::new(self.files.len(), decorators);
        if self.config.decorators().warn_unresolved() {
            for file in &self.files {
                for element in file.decorated_elements() {
                    for warning in unresolved_warnings(file, element) {
                        report.warn(file.id(), warning);
                    }
                }
            }
        }

        info!(
            decorators = report.decorators(),
            warnings = report.warnings().len();
            "Model is valid"
        );
        Ok(report)
    }
}

fn unresolved_warnings<'a>(
    file: &'a ModelFile,
    element: &'a DecoratedElement,
) -> impl Iterator<Item = Diagnostic> + 'a {
    element
        .decorators()
        .iter()
        .filter(|decorator| decorator.as_any().is::<GenericDecorator>())
        .map(move |decorator| {
            Diagnostic::warning(format!(
                "decorator `{}` is not recognised by any registered factory",
                decorator.name()
            ))
            .with_code(ErrorCode::W001)
            .with_file(file.name())
            .with_label(decorator.span(), "kept as a generic decorator")
        })
}
