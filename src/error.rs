//! # Parse Failures
//!
//! Inside a parse, failure is plain data. A [`Failure`] records what went
//! wrong, the token that was found there, and where. Whether it is
//! recoverable or fatal is decided by the [`Outcome`] variant carrying it,
//! not by the failure itself, so committing to a branch only has to move a
//! failure from one variant to the other.
//!
//! At the API boundary a failure is rendered into a [`ParseError`], which
//! owns only strings and positions and can travel through `?` into
//! application error types.
//!
//! [`Outcome`]: crate::parser::Outcome

use std::fmt;

use thiserror::Error;

use crate::stream::Stream;

/// Diagnostic carried by failed outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure<T> {
    pub message: String,
    /// The offending token, `None` at end of input.
    pub found: Option<T>,
    pub position: usize,
}

impl<T> Failure<T> {
    pub fn new(message: impl Into<String>, found: Option<T>, position: usize) -> Self {
        Self {
            message: message.into(),
            found,
            position,
        }
    }
}

impl<T: Clone> Failure<T> {
    /// A failure located at the current position of `input`.
    pub fn at(message: impl Into<String>, input: &Stream<T>) -> Self {
        Self::new(message, input.head(), input.position())
    }
}

impl<T: fmt::Debug> Failure<T> {
    fn rendered_token(&self) -> Option<String> {
        self.found.as_ref().map(|token| format!("{token:?}"))
    }

    /// Renders this failure as a recoverable [`ParseError::Failed`].
    pub fn into_failed(self) -> ParseError {
        ParseError::Failed {
            found: self.rendered_token(),
            message: self.message,
            position: self.position,
        }
    }

    /// Renders this failure as a [`ParseError::Fatal`].
    pub fn into_fatal(self) -> ParseError {
        ParseError::Fatal {
            found: self.rendered_token(),
            message: self.message,
            position: self.position,
        }
    }
}

impl<T> fmt::Display for Failure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<T: fmt::Debug> std::error::Error for Failure<T> {}

/// Owned error returned by the top-level parse entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No alternative matched.
    #[error("parse failed at token {position}: {message}")]
    Failed {
        message: String,
        found: Option<String>,
        position: usize,
    },

    /// A committed branch failed.
    #[error("parse error at token {position}: {message}")]
    Fatal {
        message: String,
        found: Option<String>,
        position: usize,
    },

    /// The parser succeeded but did not consume the whole input.
    #[error("unexpected trailing input at token {position}: {found}")]
    TrailingInput { found: String, position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::Failed { position, .. }
            | ParseError::Fatal { position, .. }
            | ParseError::TrailingInput { position, .. } => *position,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Fatal { .. })
    }
}
