use idl_sema::annotations::AnnotationType;
use idl_sema::model::{DefinedType, Direction, Interface, Members, StructuredParcelable, UnionDecl};
use idl_sema::types::DocumentId;
use idl_sema::Typenames;
use pretty_assertions::assert_eq;

use crate::helpers::builders::*;
use crate::helpers::diagnostic_helpers::*;

/// Validate `types` and dump the one at `index`.
fn dump_after_validation(types: Vec<DefinedType>, index: usize) -> String {
    let (typenames, id, report) = validated_registry(Vec::new(), types);
    assert_valid(&report);
    dump_at(&typenames, id, index)
}

fn dump_at(typenames: &Typenames, id: DocumentId, index: usize) -> String {
    let document = typenames.document(id).expect("document");
    document.defined_types()[index].dump(typenames)
}

#[test]
fn test_structured_parcelable_dump() {
    let header = header("P")
        .with_comments("/** @hide */")
        .with_annotations(annotations(vec![annotation(AnnotationType::VintfStability)]));
    let members = Members::new()
        .with_field(field(2, ty("int"), "a").with_default(int("1")))
        .with_field(field(3, nullable("String"), "s"))
        .with_field(field(4, ty("int"), "b").with_default(reference("MAX")))
        .with_constant(constant(5, "int", "MAX", int("10")));
    let parcelable = DefinedType::StructuredParcelable(StructuredParcelable::new(header, members));

    assert_eq!(
        dump_after_validation(vec![parcelable], 0),
        "/* @hide */\n\
         @VintfStability\n\
         parcelable P {\n\
         \x20 int a = 1;\n\
         \x20 @nullable String s;\n\
         \x20 int b = 10;\n\
         \x20 const int MAX = 10;\n\
         }\n"
    );
}

#[test]
fn test_enum_dump_shows_evaluated_values() {
    let header = header("E").with_annotations(annotations(vec![annotation_with(
        AnnotationType::Backing,
        "type",
        "int",
    )]));
    let decl = enumeration_with(
        header,
        vec![("A", None), ("B", None), ("C", Some(int("10"))), ("D", None)],
    );

    assert_eq!(
        dump_after_validation(vec![decl], 0),
        "@Backing(type=\"int\")\n\
         enum E {\n\
         \x20 A = 0,\n\
         \x20 B = 1,\n\
         \x20 C = 10,\n\
         \x20 D = 11,\n\
         }\n"
    );
}

#[test]
fn test_enum_dump_before_autofill_shows_expressions() {
    let (typenames, id) = registry(Vec::new(), vec![enumeration("E", &["A", "B"])]);
    assert_eq!(dump_at(&typenames, id, 0), "enum E {\n  A = 0,\n  B = (A + 1),\n}\n");
}

#[test]
fn test_union_dump_uses_canonical_enum_names() {
    let members = Members::new()
        .with_field(field(2, ty("E"), "e").with_default(reference("E.B")))
        .with_field(field(3, ty("int"), "n"));
    let types = vec![
        enumeration("E", &["A", "B"]),
        DefinedType::Union(UnionDecl::new(header("U"), members)),
    ];

    assert_eq!(
        dump_after_validation(types, 1),
        "union U {\n\
         \x20 p.E e = p.E.B;\n\
         \x20 int n;\n\
         }\n"
    );
}

#[test]
fn test_interface_dump() {
    let members = Members::new()
        .with_method(
            method(2, "int", "get", vec![arg(Some(Direction::In), "String", "key")]).with_id(5),
        )
        .with_method(
            oneway(3, "fire", vec![arg(Some(Direction::In), "int[]", "a")])
                .with_comments("/** @hide */"),
        )
        .with_constant(constant(4, "int", "VERSION", int("1")));
    let iface = DefinedType::Interface(Interface::new(header("IFoo"), false, members));

    assert_eq!(
        dump_after_validation(vec![iface], 0),
        "interface IFoo {\n\
         \x20 int get(in String key) = 5;\n\
         \x20 /* @hide */\n\
         \x20 oneway void fire(in int[] a);\n\
         \x20 const int VERSION = 1;\n\
         }\n"
    );
}

#[test]
fn test_unstructured_parcelable_dump() {
    assert_eq!(
        dump_after_validation(vec![unstructured("Opaque", "\"foo/Opaque.h\"")], 0),
        "parcelable Opaque ;\n"
    );
}
