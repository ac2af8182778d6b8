use crate::tail::{FilterSpec, TailError, TailRequest, params};
use pretty_assertions::assert_eq;

#[test]
fn parses_every_parameter() {
    // Arrange
    let query = "log=access&pointer=120&startLineAt=2&lineMinLength=3&lineMaxLength=80\
                 &lineContains=GET&notLineContains=health&colorLineBegin=true&trimToSize=40";

    // Act
    let request = TailRequest::from_query(query).unwrap();

    // Assert
    assert_eq!(
        request,
        TailRequest {
            log_name: "access.log".into(),
            offset: Some(120),
            filters: FilterSpec {
                start_column: Some(2),
                min_length: Some(3),
                max_length: Some(80),
                must_contain: Some("GET".into()),
                must_not_contain: Some("health".into()),
                truncate_to: Some(40),
                highlight_prefix: true,
            },
        }
    );
}

#[test]
fn empty_query_is_first_load_of_default_log() {
    let request = TailRequest::from_query("").unwrap();

    assert_eq!(request.log_name, "error.log");
    assert!(request.is_first_load());
    assert!(request.filters.is_empty());
}

#[test]
fn empty_values_are_absent() {
    let request = TailRequest::from_query("log=&pointer=&lineContains=").unwrap();

    assert_eq!(request.log_name, "error.log");
    assert_eq!(request.offset, None);
    assert_eq!(request.filters.must_contain, None);
}

#[test]
fn values_are_percent_and_plus_decoded() {
    let request = TailRequest::from_query("lineContains=GET+%2Fapi%3Fx").unwrap();

    assert_eq!(request.filters.must_contain.as_deref(), Some("GET /api?x"));
}

#[test]
fn highlight_requires_literal_true() {
    for value in ["yes", "1", "TRUE"] {
        let request = TailRequest::from_query(&format!("colorLineBegin={value}")).unwrap();
        assert!(!request.filters.highlight_prefix, "{value}");
    }
}

#[test]
fn first_occurrence_wins() {
    let request = TailRequest::from_query("log=a&log=b").unwrap();

    assert_eq!(request.log_name, "a.log");
}

#[test]
fn unknown_parameters_are_ignored() {
    let request = TailRequest::from_query("foo=bar&log=app").unwrap();

    assert_eq!(request.log_name, "app.log");
}

#[test]
fn non_numeric_pointer_is_rejected() {
    let err = TailRequest::from_query("pointer=abc").unwrap_err();

    assert!(matches!(
        err,
        TailError::InvalidParameter { param: "pointer", ref value } if value == "abc"
    ));
    assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
}

#[test]
fn negative_numbers_are_rejected() {
    for param in [
        params::POINTER,
        params::START_LINE_AT,
        params::LINE_MIN_LENGTH,
        params::LINE_MAX_LENGTH,
        params::TRIM_TO_SIZE,
    ] {
        let err = TailRequest::from_query(&format!("{param}=-5")).unwrap_err();
        assert!(
            matches!(err, TailError::InvalidParameter { param: p, .. } if p == param),
            "{param}"
        );
    }
}

#[test]
fn echo_params_skip_pointer_and_unset_filters() {
    // Arrange
    let request = TailRequest::from_query(
        "log=access&pointer=99&lineMinLength=3&lineContains=a+b&colorLineBegin=true",
    )
    .unwrap();

    // Act
    let echoed = request.echo_params();

    // Assert
    assert_eq!(
        echoed,
        vec![
            (params::LOG, "access.log".to_string()),
            (params::LINE_MIN_LENGTH, "3".to_string()),
            (params::LINE_CONTAINS, "a b".to_string()),
            (params::COLOR_LINE_BEGIN, "true".to_string()),
        ]
    );
}

#[test]
fn to_query_parses_back_to_same_request() {
    // Arrange
    let request = TailRequest::new(
        Some("app/access"),
        Some(42),
        FilterSpec {
            must_contain: Some("a&b c".into()),
            truncate_to: Some(12),
            highlight_prefix: true,
            ..FilterSpec::default()
        },
    );

    // Act
    let parsed = TailRequest::from_query(&request.to_query()).unwrap();

    // Assert
    assert_eq!(parsed, request);
}
