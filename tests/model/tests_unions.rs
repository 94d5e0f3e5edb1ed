use idl_sema::model::{DefinedType, Members, Method, UnionDecl};
use rstest::rstest;

use crate::helpers::builders::*;
use crate::helpers::diagnostic_helpers::*;

#[test]
fn test_first_member_with_default() {
    let report = validate_java(vec![union(
        "U",
        vec![
            field(2, ty("int"), "num").with_default(int("0")),
            field(3, ty("String"), "text"),
        ],
    )]);
    assert_valid(&report);
}

#[test]
fn test_nullable_first_member() {
    let report = validate_java(vec![union(
        "U",
        vec![field(2, nullable("String"), "text"), field(3, ty("int"), "num")],
    )]);
    assert_valid(&report);
}

#[test]
fn test_enum_first_member_with_reference() {
    let report = validate_java(vec![
        enumeration("E", &["A", "B"]),
        union("U", vec![field(2, ty("E"), "e").with_default(reference("E.B"))]),
    ]);
    assert_valid(&report);
}

#[rstest]
#[case("int", "Add a default value or mark it as @nullable.")]
#[case("int[]", "Arrays can be initialized with values(e.g. ... = { values... };) or marked as @nullable.")]
#[case("E", "Enum types can be initialized with a reference. (e.g. ... = MyEnum.FOO;)")]
fn test_first_member_needs_useful_default(#[case] signature: &str, #[case] remedy: &str) {
    let report = validate_java(vec![
        enumeration("E", &["A"]),
        union("U", vec![field(2, ty(signature), "first")]),
    ]);
    assert_error(
        &report,
        &format!("The union's first member should have a useful default value. {}", remedy),
    );
}

#[test]
fn test_empty_union() {
    let report = validate_java(vec![union("U", Vec::new())]);
    assert_error(&report, "The union 'U' has no fields.");
}

#[test]
fn test_parcelable_holder_member() {
    let report = validate_java(vec![union(
        "U",
        vec![
            field(2, ty("int"), "num").with_default(int("0")),
            field(3, ty("ParcelableHolder"), "extension"),
        ],
    )]);
    assert_error(&report, "A union can't have a member of ParcelableHolder 'extension'");
}

#[test]
fn test_getter_names_checked_without_annotation() {
    let report = validate_java(vec![union(
        "U",
        vec![
            field(2, ty("int"), "foo").with_default(int("0")),
            field(3, ty("long"), "Foo"),
        ],
    )]);
    assert_error(
        &report,
        "'U' has duplicate field name 'Foo' after capitalizing the first letter",
    );
}

#[test]
fn test_union_cannot_have_methods() {
    let members = fields(vec![field(2, ty("int"), "num").with_default(int("0"))])
        .with_method(Method::new(loc(3), false, ty("void"), "m", Vec::new()));
    let report = validate_java(vec![DefinedType::Union(UnionDecl::new(header("U"), members))]);
    assert_error(&report, "Union 'U' cannot have methods.");
}

#[test]
fn test_union_constants_are_checked() {
    let members = Members::new()
        .with_field(field(2, ty("int"), "num").with_default(reference("ZERO")))
        .with_constant(constant(3, "int", "ZERO", int("0")));
    let report = validate_java(vec![DefinedType::Union(UnionDecl::new(header("U"), members))]);
    assert_valid(&report);
}
