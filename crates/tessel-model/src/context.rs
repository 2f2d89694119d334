//! Read-only context shared by a validation pass.
//!
//! Model elements never own their model file; they keep a [`FileId`] handle
//! and look the file up through the [`ModelIndex`] when they need its name
//! for a diagnostic. The index also records every declared type name so that
//! type references can be checked without walking the model graph.

use std::fmt;

use indexmap::IndexMap;

use tessel_core::identifier::Id;

use crate::error::Diagnostic;

/// Handle of a model file inside a [`ModelIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(usize);

impl FileId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// File names and declared type names of a whole model.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex {
    files: Vec<Option<String>>,
    types: IndexMap<Id, FileId>,
}

impl ModelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model file name and return its handle.
    pub fn add_file(&mut self, name: impl Into<String>) -> FileId {
        self.files.push(Some(name.into()));
        FileId(self.files.len() - 1)
    }

    /// Register a model file name under the handle it was built with.
    ///
    /// Slots skipped over stay unnamed; a later insert into the same slot
    /// replaces the name.
    pub fn insert_file(&mut self, file: FileId, name: impl Into<String>) {
        if self.files.len() <= file.0 {
            self.files.resize(file.0 + 1, None);
        }
        self.files[file.0] = Some(name.into());
    }

    /// Record that `file` declares the type `name`.
    ///
    /// The first file to declare a name keeps it.
    pub fn declare_type(&mut self, name: Id, file: FileId) {
        self.types.entry(name).or_insert(file);
    }

    pub fn file_name(&self, file: FileId) -> Option<&str> {
        self.files.get(file.0).and_then(Option::as_deref)
    }

    pub fn is_declared(&self, name: Id) -> bool {
        self.types.contains_key(&name)
    }

    /// The file that declares `name`, if any.
    pub fn declaring_file(&self, name: Id) -> Option<FileId> {
        self.types.get(&name).copied()
    }

    /// Declared type names in declaration order.
    pub fn types(&self) -> impl Iterator<Item = Id> + '_ {
        self.types.keys().copied()
    }

    pub fn file_count(&self) -> usize {
        self.files.iter().flatten().count()
    }
}

/// Context passed by value to every `validate` call.
///
/// Element kinds narrow it to their own file with [`ValidationContext::in_file`]
/// before delegating to decorators, so a decorator can report errors against
/// the right file without holding a reference to it.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    index: &'a ModelIndex,
    check_types: bool,
    file: Option<FileId>,
}

impl<'a> ValidationContext<'a> {
    /// Create a context over `index` with type reference checks enabled.
    pub fn new(index: &'a ModelIndex) -> Self {
        Self {
            index,
            check_types: true,
            file: None,
        }
    }

    /// Enable or disable type reference checks.
    pub fn with_type_checks(mut self, check_types: bool) -> Self {
        self.check_types = check_types;
        self
    }

    /// The same context, scoped to `file`.
    pub fn in_file(mut self, file: FileId) -> Self {
        self.file = Some(file);
        self
    }

    pub fn index(&self) -> &'a ModelIndex {
        self.index
    }

    pub fn check_types(&self) -> bool {
        self.check_types
    }

    pub fn file(&self) -> Option<FileId> {
        self.file
    }

    /// Name of the file this context is scoped to.
    pub fn file_name(&self) -> Option<&'a str> {
        self.file.and_then(|file| self.index.file_name(file))
    }

    /// Returns `true` when type checks are disabled or `name` is declared.
    pub fn resolves_type(&self, name: Id) -> bool {
        !self.check_types || self.index.is_declared(name)
    }

    /// Attach the scoped file name to `diagnostic`, unless it already has one.
    pub fn attach_file(&self, diagnostic: Diagnostic) -> Diagnostic {
        match (diagnostic.file(), self.file_name()) {
            (None, Some(name)) => diagnostic.with_file(name),
            _ => diagnostic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_files_and_types() {
        let mut index = ModelIndex::new();
        let first = index.add_file("a.json");
        let second = index.add_file("b.json");

        index.declare_type(Id::new("Person"), first);
        index.declare_type(Id::new("Person"), second);
        index.declare_type(Id::new("Address"), second);

        assert_eq!(index.file_count(), 2);
        assert_eq!(index.file_name(second), Some("b.json"));
        assert_eq!(index.file_name(FileId::new(7)), None);

        index.insert_file(FileId::new(4), "e.json");
        assert_eq!(index.file_name(FileId::new(4)), Some("e.json"));
        assert_eq!(index.file_name(FileId::new(3)), None);
        assert_eq!(index.file_count(), 3);
        assert_eq!(index.declaring_file(Id::new("Person")), Some(first));
        assert_eq!(
            index.types().collect::<Vec<_>>(),
            vec![Id::new("Person"), Id::new("Address")]
        );
    }

    #[test]
    fn test_context_scoping() {
        let mut index = ModelIndex::new();
        let file = index.add_file("person.json");

        let ctx = ValidationContext::new(&index);
        assert_eq!(ctx.file_name(), None);

        let scoped = ctx.in_file(file);
        assert_eq!(scoped.file_name(), Some("person.json"));

        let diag = scoped.attach_file(Diagnostic::error("boom"));
        assert_eq!(diag.file(), Some("person.json"));

        let kept = scoped.attach_file(Diagnostic::error("boom").with_file("other.json"));
        assert_eq!(kept.file(), Some("other.json"));
    }

    #[test]
    fn test_resolves_type_respects_type_checks() {
        let index = ModelIndex::new();
        let ctx = ValidationContext::new(&index);

        assert!(!ctx.resolves_type(Id::new("Missing")));
        assert!(ctx.with_type_checks(false).resolves_type(Id::new("Missing")));
    }
}
