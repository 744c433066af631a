//! Tests for chain construction, wrapping, classification and identity

use errpath::{class_of, render, values, Error, ErrorClass, NO_ERROR_MSG};
use std::io;

fn go_err(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Other, msg.to_string())
}

fn f_good() -> Option<Error> {
    None
}

fn f_bad() -> Error {
    errpath::new(ErrorClass::Unknown, "oops")
}

fn f_bad_nested() -> Error {
    errpath::wrap(Some(f_bad()), "second level oops")
}

fn f_bad_nested_absent() -> Error {
    errpath::wrap(None, "second level oops, no error")
}

fn f_bad_nested_values() -> Error {
    errpath::wrap_with_values(Some(f_bad_nested()), "mid level error string", || {
        values!["ducks"]
    })
}

fn f_bad_nested_top() -> Error {
    f_bad_nested_values().wrap("top level error string")
}

#[test]
fn absent_error_is_no_error_and_renders_empty() {
    let err = f_good();
    assert!(err.is_none());
    assert_eq!(render(err.as_ref()), "");

    let class = class_of(err.as_ref());
    assert_eq!(class.number(), 0);
    assert_eq!(class.what(), "NoError");
    assert_eq!(class.area(), "defaultErrors");
}

#[test]
fn new_records_single_frame_at_caller() {
    let err = f_bad();
    let path = err.path();

    assert_eq!(path.len(), 1);
    assert_eq!(path[0].function, "chain_test::f_bad");
    assert_eq!(path[0].file, "chain_test.rs");
    assert!(path[0].line > 0);
    assert_eq!(path[0].msg, "oops");
    assert!(err.origin_context().is_none());

    let class = err.class();
    assert_eq!(class.what(), "UnknownError");
    assert_eq!(class.area(), "defaultErrors");
    assert_eq!(class.number(), 1);
}

#[test]
fn is_compares_class_ordinals() {
    let err = f_bad();
    assert!(err.is(&f_bad()));
    assert!(err.is(&err));
    assert!(!err.is(&errpath::new(ErrorClass::Logic, "oops")));
    assert!(!err.is(&go_err("goErr1")));
    assert!(!err.is(&go_err("goErr2")));
}

#[test]
fn identical_text_alone_is_not_equivalence() {
    let a = errpath::new(ErrorClass::Logic, "same");
    let b = errpath::new(ErrorClass::Data, "same");
    assert_eq!(a.to_string(), b.to_string());
    assert!(!a.is(&b));
}

#[test]
fn wrap_error_keeps_foreign_text_and_identity() {
    let err = errpath::wrap_error(ErrorClass::Logic, go_err("goErr1"));
    assert_eq!(err.to_string(), "goErr1");
    assert!(err.is(&go_err("goErr1")));
    assert!(!err.is(&go_err("goErr2")));
    assert_eq!(err.class(), ErrorClass::Logic);
    assert!(err.origin_error().is_some());
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn wrap_error_matches_foreign_error_deeper_in_target_chain() {
    #[derive(Debug)]
    struct Outer(io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "outer")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    let err = errpath::wrap_error(ErrorClass::File, go_err("disk gone"));
    assert!(err.is(&Outer(go_err("disk gone"))));
    assert!(!err.is(&Outer(go_err("disk full"))));
}

#[test]
fn shared_foreign_error_matches_by_identity() {
    let shared: std::sync::Arc<dyn std::error::Error + Send + Sync> =
        std::sync::Arc::new(go_err("shared"));
    let err = errpath::wrap_shared_error(ErrorClass::Network, shared.clone());
    assert!(err.is(shared.as_ref()));
}

#[test]
fn wrap_error_of_absent_is_no_error() {
    let err = errpath::wrap_error_opt::<io::Error>(ErrorClass::Logic, None);
    assert_eq!(err.last_message(), NO_ERROR_MSG);
    assert_eq!(err.path()[0].msg, "no error");
    assert_eq!(err.class(), ErrorClass::NoError);
    assert!(err.origin_error().is_none());

    let err = errpath::wrap_error_opt(ErrorClass::Logic, Some(go_err("moose")));
    assert_eq!(err.path()[0].msg, "moose");
    assert_eq!(err.class(), ErrorClass::Logic);
}

#[test]
fn wrap_error_tags_frame_with_wrapped_error() {
    let err = errpath::wrap_error(ErrorClass::Logic, go_err("moose"));
    let vals = err.path()[0].values();
    assert_eq!(vals.len(), 2);
    assert_eq!(
        vals[0].as_item().and_then(|p| p.as_str()),
        Some("wrapped_error")
    );
    assert_eq!(vals[1].key(), Some("err"));
}

#[test]
fn wrap_error_with_msg_adds_second_frame() {
    let err = errpath::wrap_error_with_msg(ErrorClass::File, go_err("denied"), "opening config");
    assert_eq!(err.path().len(), 2);
    assert_eq!(err.to_string(), "denied; opening config");
    assert_eq!(err.last_message(), "opening config");
    assert_eq!(err.class(), ErrorClass::File);
}

#[test]
fn wrap_error_variants_of_absent_are_no_error() {
    let err =
        errpath::wrap_error_with_msg_opt::<io::Error>(ErrorClass::File, None, "opening config");
    assert_eq!(err.class(), ErrorClass::NoError);
    assert_eq!(err.to_string(), NO_ERROR_MSG);
    assert_eq!(err.path().len(), 1);

    let err = errpath::wrap_error_with_msg_opt(
        ErrorClass::File,
        Some(go_err("denied")),
        "opening config",
    );
    assert_eq!(err.to_string(), "denied; opening config");
    assert_eq!(err.class(), ErrorClass::File);

    let err =
        errpath::wrap_error_with_context_opt::<_, io::Error>(ErrorClass::Network, "req-7", None);
    assert_eq!(err.class(), ErrorClass::NoError);
    assert_eq!(err.last_message(), NO_ERROR_MSG);
    assert_eq!(err.origin_context_string(), "\"req-7\"");

    let err = errpath::wrap_error_with_context_opt(
        ErrorClass::Network,
        "req-8",
        Some(go_err("reset")),
    );
    assert_eq!(err.class(), ErrorClass::Network);
    assert_eq!(err.to_string(), "reset");
    assert!(err.origin_error().is_some());
}

#[test]
fn nested_wrap_appends_frames_in_call_order() {
    let err = f_bad_nested();
    let path = err.path();

    assert_eq!(path.len(), 2);
    assert_eq!(path[0].function, "chain_test::f_bad");
    assert_eq!(path[0].msg, "oops");
    assert_eq!(path[1].function, "chain_test::f_bad_nested");
    assert_eq!(path[1].msg, "second level oops");
    assert_eq!(err.to_string(), "oops; second level oops");

    // Survives conversion to a trait object.
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    assert_eq!(boxed.to_string(), "oops; second level oops");
}

#[test]
fn wrap_of_absent_creates_unknown_error() {
    let err = f_bad_nested_absent();
    let path = err.path();

    assert_eq!(path.len(), 1);
    assert_eq!(path[0].function, "chain_test::f_bad_nested_absent");
    assert_eq!(path[0].msg, "second level oops, no error");
    assert_eq!(err.to_string(), "second level oops, no error");
    assert_eq!(err.class(), ErrorClass::Unknown);
    assert!(err.origin_context().is_none());
}

#[test]
fn three_level_chain_renders_joined_messages() {
    let err = errpath::new(ErrorClass::Data, "a").wrap("b").wrap("c");
    assert_eq!(err.to_string(), "a; b; c");
    assert_eq!(err.path().len(), 3);
    assert_eq!(err.last_message(), "c");

    let err = errpath::wrap(Some(errpath::wrap(Some(errpath::new(ErrorClass::Data, "a")), "b")), "c");
    assert_eq!(err.to_string(), "a; b; c");
}

#[test]
fn upper_level_values_stay_on_their_frame() {
    let err = f_bad_nested_top();
    let path = err.path();

    assert_eq!(path.len(), 4);
    assert_eq!(path[1].function, "chain_test::f_bad_nested");
    assert_eq!(path[2].function, "chain_test::f_bad_nested_values");
    assert_eq!(path[3].function, "chain_test::f_bad_nested_top");
    assert!(path[0].values().is_empty());

    let vals = path[2].values();
    assert_eq!(vals.len(), 1);
    assert_eq!(vals[0].as_item().and_then(|p| p.as_str()), Some("ducks"));
    assert!(path[3].values().is_empty());
}

#[test]
fn wrap_with_values_of_absent_creates_unknown_error() {
    let err = errpath::wrap_with_values(None, "lost", || values!["x" => 1]);
    assert_eq!(err.class(), ErrorClass::Unknown);
    assert_eq!(err.path().len(), 1);
    assert_eq!(err.path()[0].values().len(), 1);
}

#[test]
fn set_class_only_upgrades_unknown() {
    let mut err = f_bad();
    err.set_class(ErrorClass::Logic);
    assert_eq!(err.class(), ErrorClass::Logic);

    err.set_class(ErrorClass::Data);
    assert_eq!(err.class(), ErrorClass::Logic);

    let mut err = errpath::new(ErrorClass::NoError, "fine");
    err.set_class(ErrorClass::Logic);
    assert_eq!(err.class(), ErrorClass::NoError);
}

#[test]
fn created_at_is_recent() {
    let before = chrono::Utc::now();
    let err = f_bad();
    let after = chrono::Utc::now();
    assert!(err.created_at() >= before);
    assert!(err.created_at() <= after);
}

#[test]
fn error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<Error>();
}

#[cfg(feature = "full-backtrace")]
#[test]
fn full_backtrace_starts_at_constructor_caller() {
    let err = f_bad();
    assert!(!err.backtrace().is_empty());
    assert!(err.backtrace()[0].starts_with("chain_test::f_bad@"));
}
