//! Canonical-text stability across parse → REST → text → parse.

use instana_tagfilter::{map_to_rest, normalize, parse, TagFilter};

const EXPRESSIONS: &[&str] = &[
    "name EQUALS 1234",
    "service.name@src EQUALS 'shop'",
    "agent.tag:env@na NOT_EQUAL 'prod'",
    "call.http.status GREATER_OR_EQUAL_THAN 500 AND call.erroneous EQUALS true",
    "a IS_EMPTY OR b NOT_BLANK",
    "(a EQUALS 1 OR b EQUALS 2) AND c EQUALS 'x'",
    "a EQUALS 1 OR b EQUALS 2 AND (c EQUALS 3 OR d EQUALS 4)",
    "mobile.app.name ENDS_WITH 'it\\'s' AND mobile.os.version LESS_THAN -2.5",
    "x CONTAINS 'a:b@c' AND y NOT_STARTS_WITH 'p' AND z NOT_ENDS_WITH 's'",
];

fn canonical(text: &str) -> String {
    let rest = map_to_rest(&parse(text).unwrap());
    normalize(&rest).unwrap().expect("non-empty filter")
}

#[test]
fn reparsing_canonical_text_yields_same_tree() {
    for text in EXPRESSIONS {
        let original = parse(text).unwrap();
        let reparsed = parse(&canonical(text)).unwrap();
        assert_eq!(original, reparsed, "tree changed for {text}");
    }
}

#[test]
fn canonical_text_is_a_fixed_point() {
    for text in EXPRESSIONS {
        let once = canonical(text);
        assert_eq!(canonical(&once), once, "canonical form not stable for {text}");
    }
}

#[test]
fn rest_tree_is_stable_across_round_trip() {
    for text in EXPRESSIONS {
        let rest = map_to_rest(&parse(text).unwrap());
        let again = map_to_rest(&parse(&canonical(text)).unwrap());
        assert_eq!(rest, again, "REST tree changed for {text}");
    }
}

#[test]
fn known_canonical_forms() {
    assert_eq!(canonical("name EQUALS 1234"), "name@dest EQUALS 1234");
    assert_eq!(
        canonical("a equals 1 and (b equals 2 or c is_empty)"),
        "a@dest EQUALS 1 AND (b@dest EQUALS 2 OR c@dest IS_EMPTY)"
    );
}

#[test]
fn non_finite_numbers_are_rejected_up_front() {
    for text in ["x EQUALS 1e400", "x LESS_THAN -1e309"] {
        assert!(parse(text).is_err(), "{text} should not parse");
    }
}

#[test]
fn empty_filter_has_no_text() {
    assert_eq!(normalize(&TagFilter::empty()).unwrap(), None);
}
