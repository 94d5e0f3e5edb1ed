use idl_sema::Backend;
use idl_sema::types::TypeSpecifier;
use rstest::rstest;

use crate::helpers::builders::*;
use crate::helpers::diagnostic_helpers::*;

const ALL: &[Backend] = &[Backend::Java, Backend::Cpp, Backend::Ndk, Backend::Rust];

fn outcome(spec: TypeSpecifier) -> Vec<(Backend, bool)> {
    let report = validate_with(
        vec![
            parcelable("Bar", Vec::new()),
            parcelable("Holder", vec![field(2, spec, "f")]),
        ],
        ALL,
    );
    report.backends
}

#[rstest]
#[case("int[]", [true, true, true, true])]
#[case("IBinder[]", [true, true, false, false])]
#[case("FileDescriptor", [true, true, false, false])]
#[case("ParcelableHolder", [true, true, false, false])]
#[case("List<IBinder>", [true, true, false, true])]
#[case("List", [true, false, false, false])]
#[case("Map<String,String>", [true, false, false, false])]
#[case("CharSequence", [true, false, false, false])]
#[case("List[]", [false, false, false, false])]
#[case("List<String>", [true, true, true, true])]
fn test_backend_support(#[case] signature: &str, #[case] expected: [bool; 4]) {
    let expected = ALL.iter().copied().zip(expected).collect::<Vec<_>>();
    assert_eq!(outcome(ty(signature)), expected);
}

#[rstest]
#[case("ParcelFileDescriptor[]", [true, true, false, false])]
#[case("Bar[]", [true, true, false, false])]
#[case("String[]", [true, true, true, true])]
fn test_nullable_array_support(#[case] signature: &str, #[case] expected: [bool; 4]) {
    let expected = ALL.iter().copied().zip(expected).collect::<Vec<_>>();
    assert_eq!(outcome(nullable(signature)), expected);
}

#[test]
fn test_backend_messages_name_the_backend() {
    let report = validate_with(
        vec![parcelable("Holder", vec![field(2, ty("IBinder[]"), "binders")])],
        &[Backend::Rust],
    );
    assert_error(&report, "The Rust backend does not support array of IBinder");
}

#[test]
fn test_list_of_interface_rejected_by_ndk_only_message() {
    let report = validate_with(
        vec![parcelable("Holder", vec![field(2, ty("List<IBinder>"), "binders")])],
        &[Backend::Ndk],
    );
    assert_error(&report, "List<IBinder> is not supported. List in NDK doesn't support IBinder.");
}

#[test]
fn test_interface_method_types_are_checked_per_backend() {
    let report = validate_with(
        vec![interface("IFoo", vec![method(2, "FileDescriptor", "open", Vec::new())])],
        &[Backend::Java, Backend::Ndk],
    );
    assert_eq!(report.backend_valid(Backend::Java), Some(true));
    assert_eq!(report.backend_valid(Backend::Ndk), Some(false));
    assert_error(&report, "FileDescriptor isn't supported by the NDK backend.");
}

#[test]
fn test_unstructured_parcelable_needs_header_for_native_backends() {
    let report = validate_with(vec![unstructured("Opaque", "")], ALL);
    assert_eq!(
        report.backends,
        vec![
            (Backend::Java, true),
            (Backend::Cpp, false),
            (Backend::Ndk, false),
            (Backend::Rust, true),
        ]
    );
    assert_error(&report, "Unstructured parcelable must have C++ header defined.");
}
