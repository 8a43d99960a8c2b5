//! # Combinate - Backtracking Parser Combinators
//!
//! Combinate is a small core for building recursive-descent parsers over any
//! sequence of tokens. Grammars are ordinary Rust values assembled from a
//! handful of combinators; running one against a token stream yields a
//! three-way outcome.
//!
//! ## Architecture Overview
//!
//! 1. **Stream** (`stream`) - A persistent, lazily evaluated position in a token source
//! 2. **Outcome** (`parser::Outcome`) - Success, recoverable failure, or fatal error
//! 3. **Parser** (`parser::Parser`) - An immutable, shareable function from stream to outcome
//! 4. **Combinators** (`parser`) - Sequencing, choice, repetition, commit and lazy reference
//!
//! ## Pipeline Flow
//!
//! ```text
//! Tokens (IntoIterator / Iterator)
//!     ↓
//! [Stream] → persistent positions, `None` at end of input
//!     ↓
//! [Parser] → Outcome::Ok(value, rest) | Outcome::Fail(..) | Outcome::Error(..)
//!     ↓
//! [Entry points] → Result<O, ParseError>
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Persistent Streams
//! Taking the tail of a stream never changes it. Alternation backtracks by
//! simply running the next branch on the stream it was given, with no
//! position bookkeeping.
//!
//! ### Fail vs. Error
//! A `Fail` lets an enclosing alternation try another branch. An `Error`
//! passes through every combinator to the top of the parse. [`parser::nofail`]
//! is the only way to turn one into the other.
//!
//! ### Explicit End of Input
//! The head of a stream is an `Option`: tokens never need a reserved
//! "empty" value to mark the end.
//!
//! ### Recursion
//! Rules refer to themselves through [`parser::wrap`] or
//! [`parser::recursive`]. Both count nesting depth against
//! [`config::ParseConfig::max_depth`] so runaway grammars end in an
//! `Error` rather than a stack overflow. Repetition runs in a loop and
//! never recurses.
//!
//! ## Module Structure
//!
//! - [`stream`] - Token streams over buffered and lazy sources
//! - [`parser`] - Parsers, outcomes, primitives and combinators
//! - [`error`] - Failure diagnostics and the top-level `ParseError`
//! - [`config`] - Recursion limit and repetition policy
//!
//! ## Example
//!
//! ```
//! use combinate::parser::{expect, item, separated};
//!
//! let list = expect("[")
//!     .xthen(separated(item("element"), expect(",")))
//!     .thenx(expect("]").commit());
//!
//! let parsed = list.parse(["[", "a", ",", "b", "]"]);
//! assert_eq!(parsed, Ok(vec!["a", "b"]));
//!
//! let error = list.parse(["[", "a", "b"]).unwrap_err();
//! assert!(error.is_fatal());
//! assert_eq!(error.position(), 2);
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod stream;

pub use error::{Failure, ParseError};
pub use parser::{Outcome, Parse, Parser};
pub use stream::Stream;
