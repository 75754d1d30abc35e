use hoverchart::loader::parse_document;
use hoverchart::{ChartConfig, ChartController, ChartError, Loader, SeriesDocument};

fn malformed_field(body: &str) -> String {
    match parse_document("inline", body) {
        Err(ChartError::MalformedDocument { field, .. }) => field,
        other => panic!("expected MalformedDocument, got {other:?}"),
    }
}

#[test]
fn loads_fixture() {
    let doc = Loader::default().load("tests/data/weight.json").unwrap();
    assert_eq!(doc.samples.len(), 4);
    assert_eq!(doc.unit, "kg");
    assert_eq!(doc.x_label, "Date");
    assert_eq!(doc.y_label, "Weight");
    assert_eq!(doc.title, "Body weight");
    assert_eq!(doc.samples[1].value, 17.2);
}

#[test]
fn reports_the_offending_field() {
    assert_eq!(
        malformed_field(r#"{"points":[],"xlabel":"x","ylabel":"y","title":"t"}"#),
        "unit"
    );
    assert_eq!(
        malformed_field(r#"{"points":{},"unit":"kg","xlabel":"x","ylabel":"y","title":"t"}"#),
        "points"
    );
    assert_eq!(
        malformed_field(
            r#"{"points":[{"datetime":"2021-03-05","y":"17"}],"unit":"kg","xlabel":"x","ylabel":"y","title":"t"}"#
        ),
        "points[0].y"
    );
    assert_eq!(
        malformed_field(
            r#"{"points":[{"datetime":"2021-03-05","y":1},{"datetime":"5 March","y":2}],"unit":"kg","xlabel":"x","ylabel":"y","title":"t"}"#
        ),
        "points[1].datetime"
    );
    assert_eq!(
        malformed_field(
            r#"{"points":[{"datetime":" 2021-03-05 ","y":1}],"unit":"kg","xlabel":"x","ylabel":"y","title":"t"}"#
        ),
        "points[0].datetime"
    );
    assert_eq!(malformed_field("[1, 2, 3]"), "<root>");
}

#[test]
fn broken_json_is_a_load_failure() {
    let err = parse_document("inline", "{\"points\": [").unwrap_err();
    assert!(matches!(err, ChartError::Fetch { .. }));
}

#[test]
fn empty_series_fails_before_drawing() {
    let doc = Loader::default().load("tests/data/empty.json").unwrap();
    assert!(doc.samples.is_empty());
    let err = ChartController::build("c", 600, doc, ChartConfig::default()).unwrap_err();
    assert!(matches!(err, ChartError::EmptySeries));
}

#[test]
fn wire_format_round_trips_through_json() {
    let doc = Loader::default().load("tests/data/weight.json").unwrap();
    let text = doc.to_json_string().unwrap();
    let again: SeriesDocument = parse_document("again", &text).unwrap();
    assert_eq!(doc, again);
    assert!(text.contains("\"datetime\": \"2021-03-01\""));
}

// Opt-in: cargo test --features online
#[cfg(feature = "online")]
#[test]
fn html_over_http_is_a_load_failure() {
    let err = Loader::default().load("https://example.com/").unwrap_err();
    assert!(matches!(err, ChartError::Fetch { .. }));
}
