use combinate::error::{Failure, ParseError};
use combinate::parser::{Outcome, expect, nofail};
use combinate::stream::Stream;

#[test]
fn into_result_renders_failures() {
    let input = Stream::new(vec!["bye"]);

    let failed = expect("hello").run(&input).into_result().unwrap_err();
    assert_eq!(
        failed,
        ParseError::Failed {
            message: "expected \"hello\", got \"bye\"".to_string(),
            found: Some("\"bye\"".to_string()),
            position: 0,
        }
    );

    let fatal = nofail(expect("hello")).run(&input).into_result().unwrap_err();
    assert!(fatal.is_fatal());
    assert_eq!(fatal.position(), 0);
}

#[test]
fn into_result_keeps_rest() {
    let input = Stream::new(vec!["hello", "world"]);
    let (value, rest) = expect("hello").run(&input).into_result().unwrap();
    assert_eq!(value, "hello");
    assert_eq!(rest, input.tail());
}

#[test]
fn every_outcome_has_a_position() {
    let input = Stream::new(vec!["a", "b"]);
    assert_eq!(expect("a").run(&input).position(), 1);
    assert_eq!(expect("b").run(&input.tail()).position(), 2);
    assert_eq!(expect("x").run(&input.tail()).position(), 1);
}

#[test]
fn outcome_display() {
    let ok: Outcome<i32, char> = Outcome::Ok(42, Stream::new(Vec::new()));
    assert_eq!(ok.to_string(), "42");

    let fail: Outcome<i32, char> = Outcome::Fail(Failure::new("no match", Some('x'), 3));
    assert_eq!(fail.to_string(), "Fail: no match");

    let error: Outcome<i32, char> = Outcome::Error(Failure::new("committed", None, 0));
    assert_eq!(error.to_string(), "Error: committed");
}

#[test]
fn parse_error_display() {
    let failed = ParseError::Failed {
        message: "expected \"x\", got \"y\"".to_string(),
        found: Some("\"y\"".to_string()),
        position: 2,
    };
    assert_eq!(
        failed.to_string(),
        "parse failed at token 2: expected \"x\", got \"y\""
    );

    let trailing = ParseError::TrailingInput {
        found: "\";\"".to_string(),
        position: 5,
    };
    assert_eq!(
        trailing.to_string(),
        "unexpected trailing input at token 5: \";\""
    );
}

#[test]
fn map_value_keeps_failures() {
    let failure: Outcome<i32, char> = Outcome::Fail(Failure::new("nope", None, 0));
    let mapped = failure.map_value(|value| value * 2);
    assert!(mapped.is_fail());
    assert_eq!(mapped.failure().map(|f| f.message.as_str()), Some("nope"));
}
