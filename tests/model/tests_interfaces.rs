use idl_sema::DiagnosticId;
use idl_sema::annotations::AnnotationType;
use idl_sema::model::{DefinedType, Direction, Interface, Members, Method};
use rstest::rstest;

use crate::helpers::builders::*;
use crate::helpers::diagnostic_helpers::*;

/// `Bar`, `E`, `IBar` and `IFoo` holding `methods`.
fn with_interface(methods: Vec<Method>) -> Vec<DefinedType> {
    vec![
        parcelable("Bar", Vec::new()),
        enumeration("E", &["A"]),
        interface("IBar", Vec::new()),
        interface("IFoo", methods),
    ]
}

#[test]
fn test_valid_interface() {
    let report = validate_java(with_interface(vec![
        method(2, "int", "get", vec![arg(Some(Direction::In), "String", "key")]),
        method(
            3,
            "void",
            "fill",
            vec![
                arg(Some(Direction::Out), "Bar", "bar"),
                arg(Some(Direction::Out), "int[]", "values"),
                arg(None, "IBar", "callback"),
                arg(None, "E", "e"),
            ],
        ),
        oneway(4, "fire", vec![arg(Some(Direction::In), "List<String>", "names")]),
    ]));
    assert_valid(&report);
    assert!(report.warnings().next().is_none());
}

#[rstest]
#[case("int[]", "int[]")]
#[case("Bar", "p.Bar")]
#[case("List<String>", "List<String>")]
#[case("Map<String,Bar>", "Map<String,p.Bar>")]
#[case("ParcelFileDescriptor", "ParcelFileDescriptor")]
fn test_out_capable_types_need_direction(#[case] signature: &str, #[case] resolved: &str) {
    let report = validate_java(with_interface(vec![method(
        2,
        "void",
        "m",
        vec![arg(None, signature, "a")],
    )]));
    assert_error(
        &report,
        &format!(
            "'{}' can be an out type, so you must declare it as in, out, or inout.",
            resolved
        ),
    );
}

#[rstest]
#[case(Direction::Out, "int", "'x' can't be an out parameter because 'int' can only be an in parameter.")]
#[case(Direction::InOut, "String", "'x' can't be an inout parameter because 'String' can only be an in parameter.")]
#[case(Direction::Out, "E", "'x' can't be an out parameter because Enum type can only be an in parameter.")]
#[case(Direction::Out, "IBar", "'x' can't be an out parameter because interface can only be an in parameter.")]
fn test_in_only_types(#[case] direction: Direction, #[case] signature: &str, #[case] expected: &str) {
    let report = validate_java(with_interface(vec![method(
        2,
        "void",
        "m",
        vec![arg(Some(direction), signature, "x")],
    )]));
    assert_error(&report, expected);
}

#[test]
fn test_java_only_immutable_argument_is_in_only() {
    let report = validate_java(vec![
        annotated_parcelable("Frozen", &[AnnotationType::JavaOnlyImmutable], Vec::new()),
        interface(
            "IFoo",
            vec![method(2, "void", "m", vec![arg(Some(Direction::Out), "Frozen", "f")])],
        ),
    ]);
    assert_error(
        &report,
        "'f' can't be an out parameter because @JavaOnlyImmutable can only be an in parameter.",
    );
}

#[test]
fn test_oneway_rules() {
    let returns = Method::new(loc(2), true, ty("int"), "count", Vec::new());
    let report = validate_java(with_interface(vec![returns]));
    assert_error(&report, "oneway method 'count' cannot return a value");

    let report = validate_java(with_interface(vec![oneway(
        2,
        "fill",
        vec![arg(Some(Direction::Out), "int[]", "values")],
    )]));
    assert_error(&report, "oneway method 'fill' cannot have out parameters");
}

#[test]
fn test_oneway_interface_applies_to_every_method() {
    let members = Members::new().with_method(method(2, "int", "count", Vec::new()));
    let report = validate_java(vec![DefinedType::Interface(Interface::new(
        header("IFoo"),
        true,
        members,
    ))]);
    assert_error(&report, "oneway method 'count' cannot return a value");
}

#[test]
fn test_duplicate_method_cites_previous_definition() {
    let report = validate_java(with_interface(vec![
        method(2, "void", "m", Vec::new()),
        method(3, "void", "m", vec![arg(Some(Direction::In), "int", "a")]),
    ]));
    assert_error(&report, "attempt to redefine method m");
    let duplicate = report.errors().next().expect("an error");
    assert_eq!(duplicate.location, loc(3));
    assert_eq!(duplicate.related[0].location, loc(2));
}

#[test]
fn test_duplicate_argument_name() {
    let report = validate_java(with_interface(vec![method(
        2,
        "void",
        "m",
        vec![arg(Some(Direction::In), "int", "a"), arg(Some(Direction::In), "long", "a")],
    )]));
    assert_error(&report, "method 'm' has duplicate argument name 'a'");
}

#[rstest]
#[case("class", "Argument name 'class' is a Java or aidl keyword")]
#[case("_aidl_data", "Argument name '_aidl_data' cannot begin with '_aidl'")]
fn test_reserved_argument_names(#[case] name: &str, #[case] expected: &str) {
    let report = validate_java(with_interface(vec![method(
        2,
        "void",
        "m",
        vec![arg(Some(Direction::In), "int", name)],
    )]));
    assert_error(&report, expected);
}

#[rstest]
#[case(method(2, "IBinder", "asBinder", Vec::new()), "method asBinder() is reserved for internal use.")]
#[case(
    method(2, "String", "getTransactionName", vec![arg(Some(Direction::In), "int", "code")]),
    "method getTransactionName(int) is reserved for internal use."
)]
fn test_reserved_method_signatures(#[case] reserved: Method, #[case] expected: &str) {
    let report = validate_java(with_interface(vec![reserved]));
    assert_error(&report, expected);
}

#[test]
fn test_parcelable_holder_in_signatures() {
    let report = validate_java(with_interface(vec![method(2, "ParcelableHolder", "get", Vec::new())]));
    assert_error(&report, "ParcelableHolder cannot be a return type");

    let report = validate_java(with_interface(vec![method(
        2,
        "void",
        "set",
        vec![arg(Some(Direction::In), "ParcelableHolder", "holder")],
    )]));
    assert_error(&report, "ParcelableHolder cannot be an argument type");
}

#[test]
fn test_interface_cannot_have_fields() {
    let members = fields(vec![field(2, ty("int"), "x")]);
    let report = validate_java(vec![DefinedType::Interface(Interface::new(
        header("IFoo"),
        false,
        members,
    ))]);
    assert_error(&report, "Interface 'IFoo' cannot have fields.");
}

#[test]
fn test_advisories_do_not_fail_validation() {
    let report = validate_java(vec![interface(
        "Foo",
        vec![method(2, "void", "m", vec![arg(Some(Direction::InOut), "int[]", "values")])],
    )]);
    assert_valid(&report);
    let mut ids = warning_ids(&report);
    ids.sort();
    assert_eq!(ids, vec![DiagnosticId::InoutParameter, DiagnosticId::InterfaceName]);
    assert!(report.warnings().any(|w| {
        &*w.message == "values is 'inout'. Avoid inout parameters, they read like 'out' parameters but are also 'in'."
    }));
}

#[test]
fn test_method_errors_do_not_hide_later_methods() {
    let report = validate_java(with_interface(vec![
        method(2, "void", "first", vec![arg(None, "int[]", "a")]),
        method(3, "void", "second", vec![arg(Some(Direction::Out), "int", "b")]),
    ]));
    assert_eq!(error_messages(&report).len(), 2);
}

#[test]
fn test_descriptor_annotation() {
    let header = header("IFoo").with_annotations(annotations(vec![annotation_with(
        AnnotationType::Descriptor,
        "value",
        "android.foo.IFoo",
    )]));
    let iface = Interface::new(header, false, Members::new());
    assert_eq!(iface.descriptor(), "android.foo.IFoo");
    let report = validate_java(vec![DefinedType::Interface(iface)]);
    assert_valid(&report);
}

#[test]
fn test_interface_constants() {
    let members = Members::new()
        .with_constant(constant(2, "int", "VERSION", int("3")))
        .with_constant(constant(3, "String", "NAME", string("foo")))
        .with_constant(constant(4, "int", "NEXT", reference("VERSION")));
    let report = validate_java(vec![DefinedType::Interface(Interface::new(
        header("IFoo"),
        false,
        members,
    ))]);
    assert_valid(&report);
}
