use combinate::parser::{
    Outcome, Parser, end_of_input, expect, expect_text, fail, item, satisfy, succeed,
};
use combinate::stream::Stream;

fn run<O>(source: &[&'static str], parser: &Parser<&'static str, O>) -> Outcome<O, &'static str> {
    parser.run(&Stream::new(source.to_vec()))
}

#[test]
fn succeed_consumes_nothing() {
    let parser = succeed("hello");
    let input = Stream::new(vec!["something"]);
    assert_eq!(parser.run(&input), Outcome::Ok("hello", input.clone()));
}

#[test]
fn succeed_on_empty_source() {
    let parser: Parser<&str, &str> = succeed("hello");
    let outcome = run(&[], &parser);
    assert_eq!(outcome.value(), Some(&"hello"));
    assert_eq!(outcome.position(), 0);
}

#[test]
fn fail_reports_current_token() {
    let parser: Parser<&str, ()> = fail("parser error");
    let outcome = run(&["hello"], &parser);
    let failure = outcome.failure().expect("expected a failure");
    assert!(outcome.is_fail());
    assert_eq!(failure.message, "parser error");
    assert_eq!(failure.found, Some("hello"));
    assert_eq!(failure.position, 0);
}

#[test]
fn satisfy_matches_predicate() {
    let parser = satisfy("'hello'", |token: &&str| *token == "hello");

    let outcome = run(&["hello"], &parser);
    assert_eq!(outcome.value(), Some(&"hello"));
    assert!(outcome.remaining().is_some_and(Stream::is_end));

    let outcome = run(&["good bye"], &parser);
    assert!(outcome.is_fail());
    assert_eq!(
        outcome.failure().map(|f| f.message.as_str()),
        Some("expected 'hello', got \"good bye\"")
    );
}

#[test]
fn satisfy_fails_at_end_of_input() {
    let parser = satisfy("anything", |_: &&str| true);
    let outcome = run(&[], &parser);
    let failure = outcome.failure().expect("expected a failure");
    assert!(outcome.is_fail());
    assert_eq!(failure.message, "unexpected end of input; expected anything");
    assert_eq!(failure.found, None);
}

#[test]
fn expect_value() {
    let parser = expect("hello");
    assert_eq!(run(&["hello"], &parser).into_option(), Some("hello"));
    assert!(run(&["bye"], &parser).is_fail());
}

#[test]
fn expect_value_leaves_rest() {
    let outcome = run(&["hello", "world"], &expect("hello"));
    let rest = outcome.remaining().expect("expected success");
    assert_eq!(rest.head(), Some("world"));
    assert_eq!(rest.position(), 1);
}

#[test]
fn expect_text_compares_rendered_tokens() {
    let parser: Parser<char, char> = expect_text("x");
    let outcome = parser.run(&Stream::new("xy".chars()));
    assert_eq!(outcome.value(), Some(&'x'));

    let outcome = parser.run(&Stream::new("yx".chars()));
    assert!(outcome.is_fail());
}

#[test]
fn expect_text_across_number_types() {
    let parser: Parser<u8, u8> = expect_text(7u64);
    assert_eq!(parser.parse([7u8]), Ok(7));
    assert!(parser.parse([8u8]).is_err());
}

#[test]
fn item_takes_any_token() {
    let parser = item("word");
    assert_eq!(run(&["anything"], &parser).into_option(), Some("anything"));

    let outcome = run(&[], &parser);
    assert_eq!(
        outcome.failure().map(|f| f.message.as_str()),
        Some("unexpected end of input; expected word")
    );
}

#[test]
fn end_of_input_only_at_end() {
    let parser = end_of_input();
    assert!(run(&[], &parser).is_ok());

    let outcome = run(&["extra"], &parser);
    assert!(outcome.is_fail());
    assert_eq!(outcome.failure().and_then(|f| f.found), Some("extra"));
}
