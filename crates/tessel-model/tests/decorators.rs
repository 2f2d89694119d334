use proptest::prelude::*;

use tessel_model::{
    Decorated, DecoratorFactories, FileId, GenericDecorator, ModelFile, ModelIndex,
    ValidationContext, ast, error::ErrorCode,
};

/// Build a model file with a single concept carrying `decorators`.
fn concept_with(decorators: &[&str]) -> String {
    let decorators = decorators
        .iter()
        .enumerate()
        .map(|(i, name)| {
            format!(
                r#"{{ "name": "{name}", "location": {{ "start": {}, "end": {} }} }}"#,
                i * 10,
                i * 10 + 5
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"{{
            "namespace": "org.acme@1.0.0",
            "declarations": [
                {{ "kind": "concept", "name": "Thing", "decorators": [ {decorators} ],
                   "location": {{ "start": 0, "end": 500 }} }}
            ]
        }}"#
    )
}

fn load(source: &str) -> (ModelFile, ModelIndex) {
    let ast = ast::from_json(source).expect("valid AST");
    let file = ModelFile::from_ast(FileId::new(0), "thing.json", &ast, &DecoratorFactories::new())
        .expect("no factories cannot fail");
    let mut index = ModelIndex::new();
    file.register(&mut index);
    (file, index)
}

#[test]
fn test_duplicate_term_scenario() {
    let (file, index) = load(&concept_with(&["Term", "Term"]));
    let thing = file.declaration("Thing").expect("declared");

    assert_eq!(thing.decorators().len(), 2);
    for decorator in thing.decorators() {
        assert_eq!(decorator.name(), "Term");
        assert!(decorator.as_any().is::<GenericDecorator>());
    }

    let err = file
        .validate(ValidationContext::new(&index))
        .expect_err("duplicate decorator");
    assert_eq!(err.code(), Some(ErrorCode::E200));
    assert_eq!(err.message(), "Duplicate decorator Term");
    assert_eq!(err.file(), Some("thing.json"));
}

#[test]
fn test_single_editable_scenario() {
    let (file, index) = load(&concept_with(&["Editable"]));
    let thing = file.declaration("Thing").expect("declared");

    assert_eq!(thing.decorators().len(), 1);
    assert_eq!(
        thing.decorator("Editable").map(|decorator| decorator.name()),
        Some("Editable".into())
    );
    assert!(thing.decorator("Other").is_none());
    assert!(file.validate(ValidationContext::new(&index)).is_ok());
}

#[test]
fn test_missing_decorator_list() {
    let (file, index) = load(
        r#"{ "namespace": "ns", "declarations": [ { "kind": "concept", "name": "Thing" } ] }"#,
    );

    assert!(file.decorators().is_empty());
    assert!(file.declarations()[0].decorators().is_empty());
    assert!(file.validate(ValidationContext::new(&index)).is_ok());
}

fn unique_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Z][a-z]{0,8}", 0..12)
        .prop_map(|names| names.into_iter().collect())
        .prop_shuffle()
}

fn names_with_duplicate() -> impl Strategy<Value = (Vec<String>, String)> {
    (unique_names(), "[A-Z][a-z]{0,8}", any::<prop::sample::Index>()).prop_map(
        |(mut names, dup, at)| {
            names.retain(|name| *name != dup);
            let position = at.index(names.len() + 1);
            names.insert(position, dup.clone());
            names.push(dup.clone());
            (names, dup)
        },
    )
}

fn check_unique_names_resolve_in_order(names: Vec<String>) -> Result<(), TestCaseError> {
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let (file, index) = load(&concept_with(&refs));
    let thing = file.declaration("Thing").expect("declared");

    let resolved: Vec<String> = thing
        .decorators()
        .iter()
        .map(|decorator| decorator.name().to_string())
        .collect();
    prop_assert_eq!(&resolved, &names);

    prop_assert!(file.validate(ValidationContext::new(&index)).is_ok());
    prop_assert!(file.validate(ValidationContext::new(&index)).is_ok());

    let after: Vec<String> = thing
        .decorators()
        .iter()
        .map(|decorator| decorator.name().to_string())
        .collect();
    prop_assert_eq!(after, resolved);
    Ok(())
}

fn check_duplicates_always_rejected(names: Vec<String>, dup: String) -> Result<(), TestCaseError> {
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let (file, index) = load(&concept_with(&refs));

    let err = file
        .validate(ValidationContext::new(&index))
        .expect_err("duplicate present");
    prop_assert_eq!(err.code(), Some(ErrorCode::E200));
    prop_assert_eq!(err.message(), format!("Duplicate decorator {dup}"));
    Ok(())
}

proptest! {
    #[test]
    fn unique_names_resolve_in_order(names in unique_names()) {
        check_unique_names_resolve_in_order(names)?;
    }

    #[test]
    fn duplicates_always_rejected((names, dup) in names_with_duplicate()) {
        check_duplicates_always_rejected(names, dup)?;
    }
}
