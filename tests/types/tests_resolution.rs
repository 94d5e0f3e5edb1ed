use idl_sema::model::{DefinedType, Document, StructuredParcelable, TypeHeader};
use idl_sema::{DiagnosticCollector, Options, Typenames, validate};

use crate::helpers::builders::*;
use crate::helpers::diagnostic_helpers::*;

fn foreign_parcelable(package: &str, name: &str) -> DefinedType {
    DefinedType::StructuredParcelable(StructuredParcelable::new(
        TypeHeader::new(loc(1), package, name),
        fields(Vec::new()),
    ))
}

/// Registry with `a.Foo` and `c.Foo` already added.
fn registry_with_foreign_types() -> Typenames {
    let mut typenames = Typenames::new();
    let mut diags = DiagnosticCollector::new();
    typenames.add_document(
        Document::new(Vec::new(), vec![foreign_parcelable("a", "Foo")]),
        &mut diags,
    );
    typenames.add_document(
        Document::new(Vec::new(), vec![foreign_parcelable("c", "Foo")]),
        &mut diags,
    );
    assert!(!diags.has_errors());
    typenames
}

fn first_field_type(document: &Document) -> String {
    document.defined_types()[0].fields()[0]
        .type_specifier()
        .name()
        .to_string()
}

#[test]
fn test_import_selects_among_same_simple_names() {
    let mut typenames = registry_with_foreign_types();
    let mut diags = DiagnosticCollector::new();
    let id = typenames.add_document(
        Document::new(
            vec![import("c.Foo")],
            vec![parcelable("Holder", vec![field(2, ty("Foo"), "foo")])],
        ),
        &mut diags,
    );
    let report = validate(&mut typenames, id, &Options::new()).expect("no internal error");
    assert_valid(&report);
    let document = typenames.document(id).expect("document");
    assert_eq!(first_field_type(document), "c.Foo");
}

#[test]
fn test_fully_qualified_name_needs_no_import() {
    let mut typenames = registry_with_foreign_types();
    let mut diags = DiagnosticCollector::new();
    let id = typenames.add_document(
        Document::new(
            Vec::new(),
            vec![parcelable("Holder", vec![field(2, ty("a.Foo"), "foo")])],
        ),
        &mut diags,
    );
    let report = validate(&mut typenames, id, &Options::new()).expect("no internal error");
    assert_valid(&report);
}

#[test]
fn test_ambiguous_imports_fail_resolution() {
    let mut typenames = registry_with_foreign_types();
    let mut diags = DiagnosticCollector::new();
    let id = typenames.add_document(
        Document::new(
            vec![import("a.Foo"), import("c.Foo")],
            vec![parcelable("Holder", vec![field(2, ty("Foo"), "foo")])],
        ),
        &mut diags,
    );
    let report = validate(&mut typenames, id, &Options::new()).expect("no internal error");
    assert_error(&report, "Ambiguous type: a.Foo vs. c.Foo");
    assert_error(&report, "Failed to resolve 'Foo'");
    assert!(report.backends.is_empty());
}

#[test]
fn test_same_document_types_resolve_by_simple_name() {
    let (typenames, id, report) = validated_registry(
        Vec::new(),
        vec![
            parcelable("Holder", vec![field(2, ty("Inner[]"), "inner")]),
            parcelable("Inner", Vec::new()),
        ],
    );
    assert_valid(&report);
    let document = typenames.document(id).expect("document");
    assert_eq!(first_field_type(document), "p.Inner");
}

#[test]
fn test_every_unresolved_name_is_reported() {
    let report = validate_java(vec![parcelable(
        "Holder",
        vec![
            field(2, ty("Missing"), "a"),
            field(3, ty("List<AlsoMissing>"), "b"),
        ],
    )]);
    assert_error(&report, "Failed to resolve 'Missing'");
    assert_error(&report, "Failed to resolve 'AlsoMissing'");
    assert_eq!(error_messages(&report).len(), 2);
}

#[test]
fn test_registry_predicates() {
    let typenames = Typenames::new();
    assert!(typenames.is_primitive_typename("int"));
    assert!(!typenames.is_primitive_typename("String"));
    assert!(typenames.is_builtin_typename("String"));
    assert!(typenames.is_builtin_typename("ParcelableHolder"));
    assert!(!typenames.is_builtin_typename("Foo"));
    assert!(typenames.try_get_defined_type("Foo").is_none());
}

#[test]
fn test_redefinition_across_documents() {
    let mut typenames = registry_with_foreign_types();
    let mut diags = DiagnosticCollector::new();
    typenames.add_document(
        Document::new(Vec::new(), vec![foreign_parcelable("a", "Foo")]),
        &mut diags,
    );
    assert_eq!(diags.error_count(), 1);
    assert_eq!(&*diags.diagnostics()[0].message, "redefinition of type 'a.Foo'");
    assert_eq!(diags.diagnostics()[0].related.len(), 1);
}

#[test]
fn test_other_package_types_need_an_import() {
    let mut typenames = registry_with_foreign_types();
    let mut diags = DiagnosticCollector::new();
    let id = typenames.add_document(
        Document::new(
            Vec::new(),
            vec![parcelable("Holder", vec![field(2, ty("Foo"), "foo")])],
        ),
        &mut diags,
    );
    let report = validate(&mut typenames, id, &Options::new()).expect("no internal error");
    assert_eq!(error_messages(&report), vec!["Failed to resolve 'Foo'".to_string()]);
    assert!(!report.valid);
}

#[test]
fn test_enclosing_package_wins_over_other_packages() {
    let mut typenames = registry_with_foreign_types();
    let mut diags = DiagnosticCollector::new();
    let id = typenames.add_document(
        Document::new(
            Vec::new(),
            vec![
                parcelable("Holder", vec![field(2, ty("Foo"), "foo")]),
                parcelable("Foo", Vec::new()),
            ],
        ),
        &mut diags,
    );
    let report = validate(&mut typenames, id, &Options::new()).expect("no internal error");
    assert_valid(&report);
    let document = typenames.document(id).expect("document");
    assert_eq!(first_field_type(document), "p.Foo");
}
