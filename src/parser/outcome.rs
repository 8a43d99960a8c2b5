use std::fmt;

use crate::error::{Failure, ParseError};
use crate::stream::Stream;

/// Result of running a parser against a stream.
///
/// `Fail` means "this alternative did not match": an enclosing
/// [`alternate`](super::alternate) may still try another branch. `Error`
/// means the parse cannot succeed past this point and is never caught by
/// any combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<O, T> {
    Ok(O, Stream<T>),
    Fail(Failure<T>),
    Error(Failure<T>),
}

impl<O, T> Outcome<O, T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(..))
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn value(&self) -> Option<&O> {
        match self {
            Outcome::Ok(value, _) => Some(value),
            _ => None,
        }
    }

    pub fn remaining(&self) -> Option<&Stream<T>> {
        match self {
            Outcome::Ok(_, rest) => Some(rest),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure<T>> {
        match self {
            Outcome::Fail(failure) | Outcome::Error(failure) => Some(failure),
            Outcome::Ok(..) => None,
        }
    }

    /// Token position reached: after the consumed input on success, at the
    /// offending token otherwise.
    pub fn position(&self) -> usize {
        match self {
            Outcome::Ok(_, rest) => rest.position(),
            Outcome::Fail(failure) | Outcome::Error(failure) => failure.position,
        }
    }

    pub fn map_value<U, F: FnOnce(O) -> U>(self, f: F) -> Outcome<U, T> {
        match self {
            Outcome::Ok(value, rest) => Outcome::Ok(f(value), rest),
            Outcome::Fail(failure) => Outcome::Fail(failure),
            Outcome::Error(failure) => Outcome::Error(failure),
        }
    }

    /// Continues a successful outcome; failures are forwarded unchanged.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U, T>
    where
        F: FnOnce(O, Stream<T>) -> Outcome<U, T>,
    {
        match self {
            Outcome::Ok(value, rest) => f(value, rest),
            Outcome::Fail(failure) => Outcome::Fail(failure),
            Outcome::Error(failure) => Outcome::Error(failure),
        }
    }

    pub fn into_option(self) -> Option<O> {
        match self {
            Outcome::Ok(value, _) => Some(value),
            _ => None,
        }
    }
}

impl<O, T: fmt::Debug> Outcome<O, T> {
    pub fn into_result(self) -> Result<(O, Stream<T>), ParseError> {
        match self {
            Outcome::Ok(value, rest) => Ok((value, rest)),
            Outcome::Fail(failure) => Err(failure.into_failed()),
            Outcome::Error(failure) => Err(failure.into_fatal()),
        }
    }
}

impl<O: fmt::Debug, T> fmt::Display for Outcome<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok(value, _) => write!(f, "{value:?}"),
            Outcome::Fail(failure) => write!(f, "Fail: {failure}"),
            Outcome::Error(failure) => write!(f, "Error: {failure}"),
        }
    }
}
