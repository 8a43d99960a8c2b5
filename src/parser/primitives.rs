//! Recognizers that consume at most one token.

use std::fmt::{Debug, Display};

use crate::error::Failure;
use crate::stream::Stream;

use super::{Outcome, Parser};

/// Always succeeds with `value`, consuming nothing.
pub fn succeed<T: 'static, O: Clone + 'static>(value: O) -> Parser<T, O> {
    Parser::new(move |input: &Stream<T>| Outcome::Ok(value.clone(), input.clone()))
}

/// Always fails with `message` at the current token, consuming nothing.
pub fn fail<T: Clone + 'static, O: 'static>(message: impl Into<String>) -> Parser<T, O> {
    let message = message.into();
    Parser::new(move |input: &Stream<T>| Outcome::Fail(Failure::at(message.clone(), input)))
}

/// Consumes one token if `predicate` accepts it.
///
/// `expected` describes what was wanted and ends up in the failure message.
/// End of input always fails, whatever the predicate says.
pub fn satisfy<T, F>(expected: impl Into<String>, predicate: F) -> Parser<T, T>
where
    T: Clone + Debug + 'static,
    F: Fn(&T) -> bool + 'static,
{
    let expected = expected.into();
    Parser::new(move |input: &Stream<T>| match input.head() {
        None => Outcome::Fail(Failure::new(
            format!("unexpected end of input; expected {expected}"),
            None,
            input.position(),
        )),
        Some(token) if predicate(&token) => Outcome::Ok(token, input.tail()),
        Some(token) => Outcome::Fail(Failure::new(
            format!("expected {expected}, got {token:?}"),
            Some(token),
            input.position(),
        )),
    })
}

/// Consumes one token equal to `value`.
pub fn expect<T>(value: T) -> Parser<T, T>
where
    T: Clone + Debug + PartialEq + 'static,
{
    satisfy(format!("{value:?}"), move |token| *token == value)
}

/// Consumes one token whose text equals the text of `value`.
///
/// Useful when tokens and the value being looked for are different types,
/// e.g. `char` tokens matched against a `&str`.
pub fn expect_text<T, V>(value: V) -> Parser<T, T>
where
    T: Clone + Debug + Display + 'static,
    V: Display,
{
    let text = value.to_string();
    satisfy(format!("'{text}'"), move |token: &T| token.to_string() == text)
}

/// Consumes any single token.
pub fn item<T>(expected: impl Into<String>) -> Parser<T, T>
where
    T: Clone + Debug + 'static,
{
    satisfy(expected, |_| true)
}

/// Succeeds, consuming nothing, only at end of input.
pub fn end_of_input<T>() -> Parser<T, ()>
where
    T: Clone + Debug + 'static,
{
    Parser::new(|input: &Stream<T>| match input.head() {
        None => Outcome::Ok((), input.clone()),
        Some(token) => Outcome::Fail(Failure::new(
            format!("expected end of input, got {token:?}"),
            Some(token),
            input.position(),
        )),
    })
}
