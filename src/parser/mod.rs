mod combinators;
mod outcome;
mod primitives;

use std::fmt;
use std::rc::Rc;

use log::trace;

pub use combinators::*;
pub use outcome::Outcome;
pub use primitives::*;

use crate::error::ParseError;
use crate::stream::Stream;

type ParserFn<T, O> = Rc<dyn Fn(&Stream<T>) -> Outcome<O, T>>;

/// Anything that can be run against a stream position.
pub trait Parse<T, O> {
    fn run(&self, input: &Stream<T>) -> Outcome<O, T>;
}

// Allow closures to be parsers
impl<T, O, F: Fn(&Stream<T>) -> Outcome<O, T>> Parse<T, O> for F {
    fn run(&self, input: &Stream<T>) -> Outcome<O, T> {
        self(input)
    }
}

/// An immutable, shareable parser over tokens `T` producing `O`.
///
/// Combinators never modify a parser; they build new ones that close over
/// their inputs. Cloning shares the underlying function.
pub struct Parser<T, O> {
    parser: ParserFn<T, O>,
}

impl<T, O> Clone for Parser<T, O> {
    fn clone(&self) -> Self {
        Parser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T, O> fmt::Debug for Parser<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

impl<T: 'static, O: 'static> Parser<T, O> {
    pub fn new<P: Parse<T, O> + 'static>(parser: P) -> Self {
        Parser {
            parser: Rc::new(move |input: &Stream<T>| parser.run(input)),
        }
    }
}

impl<T, O> Parser<T, O> {
    pub fn run(&self, input: &Stream<T>) -> Outcome<O, T> {
        (self.parser)(input)
    }
}

impl<T, O> Parse<T, O> for Parser<T, O> {
    fn run(&self, input: &Stream<T>) -> Outcome<O, T> {
        Parser::run(self, input)
    }
}

// === Entry points ===

impl<T: Clone + fmt::Debug, O> Parser<T, O> {
    /// Parse all of `tokens`, failing if any input is left over.
    pub fn parse<I: IntoIterator<Item = T>>(&self, tokens: I) -> Result<O, ParseError> {
        self.parse_stream(&Stream::new(tokens))
    }

    /// Parse from `input` to its end, failing if any input is left over.
    pub fn parse_stream(&self, input: &Stream<T>) -> Result<O, ParseError> {
        let (value, rest) = self.parse_prefix_stream(input)?;
        match rest.head() {
            None => Ok(value),
            Some(token) => Err(ParseError::TrailingInput {
                found: format!("{token:?}"),
                position: rest.position(),
            }),
        }
    }

    /// Parse a prefix of `tokens`, returning the value and the unconsumed
    /// rest of the input.
    pub fn parse_prefix<I: IntoIterator<Item = T>>(
        &self,
        tokens: I,
    ) -> Result<(O, Stream<T>), ParseError> {
        self.parse_prefix_stream(&Stream::new(tokens))
    }

    fn parse_prefix_stream(&self, input: &Stream<T>) -> Result<(O, Stream<T>), ParseError> {
        trace!("parsing from token {}", input.position());
        let outcome = self.run(input);
        trace!("parse stopped at token {}", outcome.position());
        outcome.into_result()
    }
}
