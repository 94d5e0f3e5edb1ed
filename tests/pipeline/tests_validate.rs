use idl_sema::model::Direction;
use idl_sema::{Backend, DiagnosticId, InternalError, Options, Severity};

use crate::helpers::builders::*;
use crate::helpers::diagnostic_helpers::*;

#[test]
fn test_default_options_check_java() {
    let (_, _, report) = validated_registry(Vec::new(), vec![parcelable("P", Vec::new())]);
    assert_valid(&report);
    assert_eq!(report.backends, vec![(Backend::Java, true)]);
}

#[test]
fn test_backend_results_keep_request_order() {
    let report = validate_with(
        vec![parcelable("P", vec![field(2, ty("FileDescriptor"), "fd")])],
        &[Backend::Rust, Backend::Java, Backend::Ndk],
    );
    assert_eq!(
        report.backends,
        vec![(Backend::Rust, false), (Backend::Java, true), (Backend::Ndk, false)]
    );
    assert!(!report.valid);

    let messages = error_messages(&report);
    assert_eq!(
        messages,
        vec![
            "FileDescriptor isn't supported by the Rust backend.".to_string(),
            "FileDescriptor isn't supported by the NDK backend.".to_string(),
        ]
    );
}

#[test]
fn test_backend_list_option() {
    let options = Options::new().with_backend_list("java,ndk").expect("known backends");
    let report = try_validate(vec![parcelable("P", Vec::new())], &options).expect("no internal error");
    assert_eq!(report.backends, vec![(Backend::Java, true), (Backend::Ndk, true)]);
    assert!(Options::new().with_backend_list("java,go").is_err());
}

#[test]
fn test_resolution_failure_stops_before_checks() {
    let report = validate_java(vec![parcelable(
        "P",
        vec![field(2, ty("Missing"), "m"), field(3, ty("int"), "m")],
    )]);
    assert_eq!(error_messages(&report), vec!["Failed to resolve 'Missing'".to_string()]);
    assert!(report.backends.is_empty());
}

#[test]
fn test_generic_failure_skips_backend_checks() {
    let report = validate_with(
        vec![parcelable("P", vec![field(2, ty("List<int>"), "l")])],
        &[Backend::Java, Backend::Cpp],
    );
    assert!(!report.valid);
    assert!(report.backends.is_empty());
}

#[test]
fn test_sibling_errors_are_all_reported() {
    let report = validate_java(vec![
        parcelable("A", vec![field(2, ty("void"), "v")]),
        union("B", Vec::new()),
        interface(
            "IC",
            vec![method(4, "void", "m", vec![arg(Some(Direction::Out), "int", "x")])],
        ),
    ]);
    assert_eq!(error_messages(&report).len(), 3);
}

#[test]
fn test_advisories_can_be_disabled() {
    let types = || vec![interface("Foo", Vec::new())];

    let report = try_validate(types(), &Options::new()).expect("no internal error");
    assert!(report.valid);
    assert_eq!(warning_ids(&report), vec![DiagnosticId::InterfaceName]);
    let warning = report.warnings().next().expect("an advisory");
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(&*warning.message, "Interface names should start with I.");

    let options = Options::new().without_diagnostic(DiagnosticId::InterfaceName);
    let report = try_validate(types(), &options).expect("no internal error");
    assert!(report.valid);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_internal_error_aborts_run() {
    let result = try_validate(
        vec![parcelable("P", Vec::new()), enumeration("Empty", &[])],
        &Options::new(),
    );
    match result {
        Err(InternalError::Invariant { message, .. }) => {
            assert_eq!(message, "The enum 'Empty' has no enumerators.");
        }
        other => panic!("expected an invariant error, got {:?}", other),
    }
}
