use idl_sema::annotations::AnnotationType;
use idl_sema::consts::ConstantValue;
use idl_sema::model::{DefinedType, Members, Method, StructuredParcelable};
use rstest::rstest;

use crate::helpers::builders::*;
use crate::helpers::diagnostic_helpers::*;

#[test]
fn test_duplicate_field_cites_previous_definition() {
    let report = validate_java(vec![parcelable(
        "P",
        vec![field(2, ty("int"), "a"), field(3, ty("long"), "a")],
    )]);
    assert_error(&report, "'P' has duplicate field name 'a'");
    let duplicate = report.errors().next().expect("an error");
    assert_eq!(duplicate.location, loc(3));
    assert_eq!(duplicate.related[0].location, loc(2));
}

#[test]
fn test_void_field() {
    let report = validate_java(vec![parcelable("P", vec![field(2, ty("void"), "v")])]);
    assert_error(
        &report,
        "Declaration v is void, but declarations cannot be of void type.",
    );
}

#[rstest]
#[case("int", "7")]
#[case("byte", "-128")]
#[case("long", "0xFFFFFFFFFL")]
fn test_defaults_in_range(#[case] signature: &str, #[case] value: &str) {
    let report = validate_java(vec![parcelable(
        "P",
        vec![field(2, ty(signature), "x").with_default(int(value))],
    )]);
    assert_valid(&report);
}

#[rstest]
#[case("byte", "128")]
#[case("int", "2147483648")]
fn test_defaults_out_of_range(#[case] signature: &str, #[case] value: &str) {
    let report = validate_java(vec![parcelable(
        "P",
        vec![field(2, ty(signature), "x").with_default(int(value))],
    )]);
    assert_error(&report, "Invalid value for 'x'");
}

#[test]
fn test_string_default_for_int_field() {
    let report = validate_java(vec![parcelable(
        "P",
        vec![field(2, ty("int"), "x").with_default(string("seven"))],
    )]);
    assert_error(&report, "Invalid value for 'x'");
}

#[test]
fn test_parcelable_cannot_have_methods() {
    let members = Members::new().with_method(Method::new(
        loc(2),
        false,
        ty("void"),
        "m",
        Vec::new(),
    ));
    let report = validate_java(vec![DefinedType::StructuredParcelable(StructuredParcelable::new(
        header("P"),
        members,
    ))]);
    assert_error(&report, "Parcelable 'P' cannot have methods.");
}

#[test]
fn test_fixed_size_parcelable() {
    let valid = validate_java(vec![
        enumeration("E", &["A"]),
        annotated_parcelable("Inner", &[AnnotationType::FixedSize], vec![field(2, ty("long"), "l")]),
        annotated_parcelable(
            "P",
            &[AnnotationType::FixedSize],
            vec![
                field(3, ty("int"), "i"),
                field(4, ty("E"), "e"),
                field(5, ty("Inner"), "inner"),
            ],
        ),
    ]);
    assert_valid(&valid);

    let invalid = validate_java(vec![annotated_parcelable(
        "P",
        &[AnnotationType::FixedSize],
        vec![field(2, ty("int"), "i"), field(3, ty("String"), "s")],
    )]);
    assert_error(
        &invalid,
        "The @FixedSize parcelable 'P' has a non-fixed size field named s.",
    );
}

#[test]
fn test_java_only_immutable_fields() {
    let valid = validate_java(vec![annotated_parcelable(
        "P",
        &[AnnotationType::JavaOnlyImmutable],
        vec![field(2, ty("List<String>"), "names"), field(3, ty("int"), "count")],
    )]);
    assert_valid(&valid);

    let invalid = validate_java(vec![
        parcelable("Mutable", Vec::new()),
        annotated_parcelable(
            "P",
            &[AnnotationType::JavaOnlyImmutable],
            vec![field(2, ty("List<Mutable>"), "items")],
        ),
    ]);
    assert_error(
        &invalid,
        "The @JavaOnlyImmutable 'P' has a non-immutable field named 'items'.",
    );
}

#[test]
fn test_java_only_immutable_getter_collision() {
    let report = validate_java(vec![annotated_parcelable(
        "P",
        &[AnnotationType::JavaOnlyImmutable],
        vec![field(2, ty("int"), "value"), field(3, ty("int"), "Value")],
    )]);
    assert_error(
        &report,
        "'P' has duplicate field name 'Value' after capitalizing the first letter",
    );
}

#[test]
fn test_unsupported_annotation_lists_supported_set() {
    let report = validate_java(vec![annotated_parcelable(
        "P",
        &[AnnotationType::SensitiveData],
        Vec::new(),
    )]);
    assert_error(
        &report,
        "'SensitiveData' is not a supported annotation for this node. It must be one of:",
    );
}

#[rstest]
#[case(AnnotationType::Utf8InCpp, "int", "@utf8InCpp can only be used on String, String[], and List<String>.")]
#[case(AnnotationType::Nullable, "int", "Primitive type cannot get nullable annotation")]
#[case(AnnotationType::Nullable, "ParcelableHolder", "ParcelableHolder cannot be nullable.")]
#[case(AnnotationType::Nullable, "void", "void type cannot be an array or nullable or utf8 string")]
fn test_type_annotation_rules(
    #[case] kind: AnnotationType,
    #[case] signature: &str,
    #[case] expected: &str,
) {
    let report = validate_java(vec![parcelable(
        "P",
        vec![field(2, annotated(ty(signature), &[kind]), "f")],
    )]);
    assert_error(&report, expected);
}

#[rstest]
#[case("IBinder[]")]
#[case("List<String>")]
fn test_nullable_allowed(#[case] signature: &str) {
    let spec = annotated(ty(signature), &[AnnotationType::Nullable]);
    let report = validate_java(vec![parcelable("P", vec![field(2, spec, "f")])]);
    assert_valid(&report);
}

#[test]
fn test_binder_array_and_holder_array() {
    let report = validate_java(vec![
        interface("IFoo", Vec::new()),
        parcelable(
            "P",
            vec![field(2, ty("IFoo[]"), "a"), field(3, ty("ParcelableHolder[]"), "b")],
        ),
    ]);
    assert_error(&report, "Binder type cannot be an array");
    assert_error(&report, "Arrays of ParcelableHolder are not supported.");
}

#[test]
fn test_constants() {
    let valid = validate_java(vec![DefinedType::StructuredParcelable(StructuredParcelable::new(
        header("P"),
        Members::new()
            .with_constant(constant(2, "int", "A", int("1")))
            .with_constant(constant(3, "String", "S", string("s"))),
    ))]);
    assert_valid(&valid);

    let invalid = validate_java(vec![DefinedType::StructuredParcelable(StructuredParcelable::new(
        header("P"),
        Members::new()
            .with_constant(constant(2, "int", "A", int("1")))
            .with_constant(constant(3, "int", "A", int("2")))
            .with_constant(constant(4, "float", "F", ConstantValue::floating(loc(4), "1.5"))),
    ))]);
    assert_error(&invalid, "Found duplicate constant name 'A'");
    assert_error(&invalid, "Constant of type float is not supported.");
}
