//! Unit tests for error construction and rendering.

use rstest::rstest;

use super::EnvTreeError;

#[rstest]
#[case("")]
#[case("___")]
fn invalid_domain_mentions_input(#[case] domain: &str) {
    let err = EnvTreeError::InvalidDomain {
        domain: domain.to_owned(),
    };
    assert!(err.to_string().contains(&format!("'{domain}'")));
}

#[test]
fn figment_errors_become_option_errors() {
    let err: EnvTreeError = figment::Error::from("bad flag").into();
    assert!(matches!(err, EnvTreeError::Options(_)));
    assert!(err.to_string().contains("bad flag"));
}

#[test]
fn extract_errors_keep_path_and_source() {
    let err = EnvTreeError::extract("db.port", figment::Error::from("not a number"));
    let EnvTreeError::Extract { path, source } = &err else {
        panic!("expected Extract, got {err:?}");
    };
    assert_eq!(path, "db.port");
    assert!(source.to_string().contains("not a number"));
    assert!(std::error::Error::source(&err).is_some());
}
