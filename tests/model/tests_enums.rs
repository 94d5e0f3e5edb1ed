use idl_sema::annotations::AnnotationType;
use idl_sema::consts::{BinaryOp, ConstantValue};
use idl_sema::model::{DefinedType, EnumDeclaration, Enumerator, StructuredParcelable, TypeHeader};
use idl_sema::{DiagnosticId, InternalError, Options, Typenames};

use crate::helpers::builders::*;
use crate::helpers::diagnostic_helpers::*;

fn backed(name: &str, backing: &str) -> TypeHeader {
    header(name).with_annotations(annotations(vec![annotation_with(
        AnnotationType::Backing,
        "type",
        backing,
    )]))
}

fn enum_decl<'a>(typenames: &'a Typenames, name: &str) -> &'a EnumDeclaration {
    typenames
        .try_get_defined_type(&format!("{}.{}", PACKAGE, name))
        .and_then(DefinedType::as_enum)
        .expect("enum is registered")
}

#[test]
fn test_default_backing_type_is_byte() {
    let (typenames, _, report) = validated_registry(Vec::new(), vec![enumeration("E", &["A", "B"])]);
    assert_valid(&report);
    let decl = enum_decl(&typenames, "E");
    assert_eq!(decl.backing_type().map(|t| t.name()), Some("byte"));
}

#[test]
fn test_backing_annotation_selects_type() {
    let (typenames, _, report) = validated_registry(
        Vec::new(),
        vec![enumeration_with(
            backed("E", "long"),
            vec![("A", None), ("B", Some(int("0xFFFFFFFFFL")))],
        )],
    );
    assert_valid(&report);
    let decl = enum_decl(&typenames, "E");
    assert_eq!(decl.backing_type().map(|t| t.name()), Some("long"));
}

#[test]
fn test_value_out_of_backing_range() {
    let report = validate_java(vec![enumeration_with(
        header("E"),
        vec![("A", None), ("B", Some(int("200")))],
    )]);
    assert_error(&report, "Enumerator type differs from enum backing type.");

    let report = validate_java(vec![enumeration_with(
        backed("E", "int"),
        vec![("A", None), ("B", Some(int("200")))],
    )]);
    assert_valid(&report);
}

#[test]
fn test_unresolvable_backing_type() {
    let report = validate_java(vec![enumeration_with(backed("E", "Missing"), vec![("A", None)])]);
    assert_error(&report, "Invalid backing type: Missing");
}

#[test]
fn test_enumerator_references_earlier_enumerator() {
    let shifted = ConstantValue::binary(loc(3), reference("A"), BinaryOp::Shl, int("2"));
    let report = validate_java(vec![enumeration_with(
        header("E"),
        vec![("A", Some(int("1"))), ("B", Some(shifted))],
    )]);
    assert!(report.valid, "{:?}", report.diagnostics);
    assert_eq!(warning_ids(&report), vec![DiagnosticId::EnumZero]);
}

#[test]
fn test_circular_enumerators() {
    let report = validate_java(vec![enumeration_with(
        header("E"),
        vec![("A", Some(reference("B"))), ("B", Some(reference("A")))],
    )]);
    assert_error(&report, "Enumerator type differs from enum backing type.");
}

#[test]
fn test_first_enumerator_not_zero_is_advisory() {
    let report = validate_java(vec![enumeration_with(
        header("E"),
        vec![("A", Some(int("3"))), ("B", None)],
    )]);
    assert!(report.valid);
    let warning = report.warnings().next().expect("an advisory");
    assert_eq!(
        &*warning.message,
        "The first enumerator 'A' should be 0, but it is 3."
    );

    let options = Options::new().without_diagnostic(DiagnosticId::EnumZero);
    let report = try_validate(
        vec![enumeration_with(header("E"), vec![("A", Some(int("3")))])],
        &options,
    )
    .expect("no internal error");
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_enum_rejects_members() {
    let decl = EnumDeclaration::new(header("E"), vec![Enumerator::new(loc(2), "A", None)])
        .with_members(fields(vec![field(3, ty("int"), "x")]));
    let report = validate_java(vec![DefinedType::Enum(decl)]);
    assert_error(&report, "Enum doesn't support fields/constants/methods.");
}

#[test]
fn test_empty_enum_is_internal_error() {
    let result = try_validate(vec![enumeration("E", &[])], &Options::new());
    assert!(matches!(result, Err(InternalError::Invariant { .. })));
}

#[test]
fn test_enum_field_defaults() {
    let valid = validate_java(vec![
        enumeration("E", &["A", "B"]),
        parcelable("P", vec![field(2, ty("E"), "e").with_default(reference("E.B"))]),
    ]);
    assert_valid(&valid);

    let invalid = validate_java(vec![
        enumeration("E", &["A", "B"]),
        parcelable("P", vec![field(2, ty("E"), "e").with_default(reference("E.C"))]),
    ]);
    assert_error(&invalid, "Invalid value for 'e'");
}

#[test]
fn test_enum_array_default() {
    let values = ConstantValue::array(loc(2), vec![reference("E.A"), reference("E.B")]);
    let report = validate_java(vec![
        enumeration("E", &["A", "B"]),
        parcelable("P", vec![field(2, ty("E[]"), "all").with_default(values)]),
    ]);
    assert_valid(&report);
}

#[test]
fn test_enum_backing_annotation_rejected_elsewhere() {
    let report = validate_java(vec![DefinedType::StructuredParcelable(StructuredParcelable::new(
        backed("P", "int"),
        fields(Vec::new()),
    ))]);
    assert_error(&report, "'Backing' is not a supported annotation for this node.");
}
