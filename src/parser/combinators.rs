use std::cell::OnceCell;
use std::fmt::Debug;
use std::ops::{Add, BitOr, Mul, Shr, Sub};
use std::rc::Rc;

use log::{debug, warn};

use crate::config::RepeatPolicy;
use crate::error::Failure;
use crate::stream::Stream;

use super::{Outcome, Parser};

// === Combinators as methods ===

impl<T: Clone + 'static, O: 'static> Parser<T, O> {
    /// Monadic bind: run self, then choose the next parser from its value.
    pub fn bind<U: 'static, F>(self, f: F) -> Parser<T, U>
    where
        F: Fn(O) -> Parser<T, U> + 'static,
    {
        Parser::new(move |input: &Stream<T>| {
            self.run(input).and_then(|value, rest| f(value).run(&rest))
        })
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(O) -> U + 'static>(self, f: F) -> Parser<T, U> {
        Parser::new(move |input: &Stream<T>| self.run(input).map_value(&f))
    }

    /// Sequence: parse self then other, return (O, U)
    pub fn then<U: 'static>(self, other: Parser<T, U>) -> Parser<T, (O, U)> {
        Parser::new(move |input: &Stream<T>| {
            self.run(input)
                .and_then(|left, rest| other.run(&rest).map_value(|right| (left, right)))
        })
    }

    /// Keep right: parse self then other, discard self's result
    pub fn xthen<U: 'static>(self, other: Parser<T, U>) -> Parser<T, U> {
        Parser::new(move |input: &Stream<T>| {
            self.run(input).and_then(|_, rest| other.run(&rest))
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn thenx<U: 'static>(self, other: Parser<T, U>) -> Parser<T, O> {
        Parser::new(move |input: &Stream<T>| {
            self.run(input)
                .and_then(|left, rest| other.run(&rest).map_value(|_| left))
        })
    }

    /// Choice: try self, if it fails try other from the same position.
    /// A fatal error from self is returned without trying other.
    pub fn or(self, other: Parser<T, O>) -> Parser<T, O> {
        Parser::new(move |input: &Stream<T>| match self.run(input) {
            Outcome::Fail(_) => other.run(input),
            outcome => outcome,
        })
    }

    /// Replace the result with `value`
    pub fn value<U: Clone + 'static>(self, value: U) -> Parser<T, U> {
        self.map(move |_| value.clone())
    }

    /// Forbid backtracking past this parser. See [`nofail`].
    pub fn commit(self) -> Parser<T, O> {
        nofail(self)
    }
}

impl<T: Clone + Debug + 'static, O: 'static> Parser<T, O> {
    /// Add a label to this parser for better error messages
    pub fn label(self, name: impl Into<String>) -> Parser<T, O> {
        let name = name.into();
        Parser::new(move |input: &Stream<T>| match self.run(input) {
            Outcome::Fail(failure) => {
                let message = match &failure.found {
                    Some(token) => format!("expected {name}, got {token:?}"),
                    None => format!("unexpected end of input; expected {name}"),
                };
                Outcome::Fail(Failure { message, ..failure })
            }
            outcome => outcome,
        })
    }
}

// === Named combinators ===

pub fn bind<T, A, B, F>(parser: Parser<T, A>, f: F) -> Parser<T, B>
where
    T: Clone + 'static,
    A: 'static,
    B: 'static,
    F: Fn(A) -> Parser<T, B> + 'static,
{
    parser.bind(f)
}

pub fn map<T, A, B, F>(parser: Parser<T, A>, transform: F) -> Parser<T, B>
where
    T: Clone + 'static,
    A: 'static,
    B: 'static,
    F: Fn(A) -> B + 'static,
{
    parser.map(transform)
}

pub fn then<T: Clone + 'static, A: 'static, B: 'static>(
    p: Parser<T, A>,
    q: Parser<T, B>,
) -> Parser<T, (A, B)> {
    p.then(q)
}

pub fn xthen<T: Clone + 'static, A: 'static, B: 'static>(
    p: Parser<T, A>,
    q: Parser<T, B>,
) -> Parser<T, B> {
    p.xthen(q)
}

pub fn thenx<T: Clone + 'static, A: 'static, B: 'static>(
    p: Parser<T, A>,
    q: Parser<T, B>,
) -> Parser<T, A> {
    p.thenx(q)
}

pub fn alternate<T: Clone + 'static, O: 'static>(
    left: Parser<T, O>,
    right: Parser<T, O>,
) -> Parser<T, O> {
    left.or(right)
}

/// Optional: parse zero or one
pub fn option<T: Clone + 'static, O: 'static>(parser: Parser<T, O>) -> Parser<T, Option<O>> {
    Parser::new(move |input: &Stream<T>| match parser.run(input) {
        Outcome::Ok(value, rest) => Outcome::Ok(Some(value), rest),
        Outcome::Fail(_) => Outcome::Ok(None, input.clone()),
        Outcome::Error(failure) => Outcome::Error(failure),
    })
}

/// Whether the wrapped parser matched
pub fn option_flag<T: Clone + 'static, O: 'static>(parser: Parser<T, O>) -> Parser<T, bool> {
    option(parser).map(|matched| matched.is_some())
}

/// Parse zero or more occurrences
///
/// Stops at the first recoverable failure, leaving the input of that attempt
/// unconsumed. Runs in a loop, so long repetitions do not deepen the stack.
pub fn many<T: Clone + 'static, O: 'static>(parser: Parser<T, O>) -> Parser<T, Vec<O>> {
    Parser::new(move |input: &Stream<T>| {
        let mut items = Vec::new();
        let mut cursor = input.clone();
        loop {
            match parser.run(&cursor) {
                Outcome::Ok(item, rest) => {
                    if rest.position() == cursor.position() {
                        return stalled(items, cursor);
                    }
                    items.push(item);
                    cursor = rest;
                }
                Outcome::Fail(_) => break,
                Outcome::Error(failure) => return Outcome::Error(failure),
            }
        }
        Outcome::Ok(items, cursor)
    })
}

fn stalled<T: Clone, O>(items: Vec<O>, at: Stream<T>) -> Outcome<Vec<O>, T> {
    match at.config().repeat {
        RepeatPolicy::Stop => {
            debug!(
                "repetition stopped without progress at token {} after {} items",
                at.position(),
                items.len()
            );
            Outcome::Ok(items, at)
        }
        RepeatPolicy::Error => {
            Outcome::Error(Failure::at("repetition made no progress", &at))
        }
    }
}

/// Parse one or more occurrences
pub fn some<T: Clone + 'static, O: 'static>(parser: Parser<T, O>) -> Parser<T, Vec<O>> {
    parser.clone().then(many(parser)).map(cons)
}

/// One or more `parser` separated by `separator`, keeping only the items.
///
/// A trailing separator that is not followed by an item is left in the
/// input.
pub fn separated<T: Clone + 'static, A: 'static, B: 'static>(
    parser: Parser<T, A>,
    separator: Parser<T, B>,
) -> Parser<T, Vec<A>> {
    parser
        .clone()
        .then(many(separator.xthen(parser)))
        .map(cons)
}

/// Commit: turn a recoverable failure into a fatal error.
///
/// Place after an unambiguous prefix so a later mismatch is reported where
/// it happened instead of sending enclosing alternations down other
/// branches.
pub fn nofail<T: Clone + 'static, O: 'static>(parser: Parser<T, O>) -> Parser<T, O> {
    Parser::new(move |input: &Stream<T>| match parser.run(input) {
        Outcome::Fail(failure) => {
            debug!(
                "committed parse failed at token {}: {}",
                failure.position, failure.message
            );
            Outcome::Error(failure)
        }
        outcome => outcome,
    })
}

/// Defer building a parser until it is run.
///
/// `thunk` is called on every invocation, which lets a rule refer to itself
/// or to rules defined later:
///
/// ```
/// use combinate::parser::{Parser, expect, item, wrap};
///
/// fn nested() -> Parser<char, usize> {
///     expect('(')
///         .xthen(wrap(nested))
///         .thenx(expect(')'))
///         .map(|depth| depth + 1)
///         .or(item("atom").value(0))
/// }
///
/// assert_eq!(nested().parse("((x))".chars()), Ok(2));
/// ```
pub fn wrap<T, O, F>(thunk: F) -> Parser<T, O>
where
    T: Clone + 'static,
    O: 'static,
    F: Fn() -> Parser<T, O> + 'static,
{
    Parser::new(move |input: &Stream<T>| {
        let _level = match input.descend() {
            Ok(level) => level,
            Err(limit) => return recursion_limit(input, limit),
        };
        thunk().run(input)
    })
}

/// Build a self-referential rule once.
///
/// `define` receives a handle that runs the finished rule. The handle only
/// holds a weak reference, so the rule does not keep itself alive.
///
/// ```
/// use combinate::parser::{expect, item, recursive};
///
/// let nested = recursive(|nested| {
///     expect('[')
///         .xthen(nested)
///         .thenx(expect(']'))
///         .map(|depth: usize| depth + 1)
///         .or(item("atom").value(0))
/// });
///
/// assert_eq!(nested.parse("[[[x]]]".chars()), Ok(3));
/// ```
pub fn recursive<T, O, F>(define: F) -> Parser<T, O>
where
    T: Clone + 'static,
    O: 'static,
    F: FnOnce(Parser<T, O>) -> Parser<T, O>,
{
    let slot: Rc<OnceCell<Parser<T, O>>> = Rc::new(OnceCell::new());
    let weak = Rc::downgrade(&slot);

    let handle = Parser::new(move |input: &Stream<T>| {
        let Some(slot) = weak.upgrade() else {
            return Outcome::Error(Failure::at(
                "recursive rule used after it was dropped",
                input,
            ));
        };
        let _level = match input.descend() {
            Ok(level) => level,
            Err(limit) => return recursion_limit(input, limit),
        };
        match slot.get() {
            Some(rule) => rule.run(input),
            None => Outcome::Error(Failure::at(UNDEFINED_RULE, input)),
        }
    });

    let rule = define(handle);
    let _ = slot.set(rule);

    Parser::new(move |input: &Stream<T>| match slot.get() {
        Some(rule) => rule.run(input),
        None => Outcome::Error(Failure::at(UNDEFINED_RULE, input)),
    })
}

const UNDEFINED_RULE: &str = "recursive rule used before it was defined";

fn recursion_limit<T: Clone, O>(input: &Stream<T>, limit: usize) -> Outcome<O, T> {
    warn!(
        "recursion limit of {limit} exceeded at token {}",
        input.position()
    );
    Outcome::Error(Failure::at(
        format!("recursion limit of {limit} exceeded"),
        input,
    ))
}

/// Prepend the head of a `(head, tail)` pair to its tail.
pub fn cons<O>((head, mut tail): (O, Vec<O>)) -> Vec<O> {
    tail.insert(0, head);
    tail
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: Clone + 'static, O: 'static, U: 'static> Add<Parser<T, U>> for Parser<T, O> {
    type Output = Parser<T, (O, U)>;

    fn add(self, rhs: Parser<T, U>) -> Self::Output {
        self.then(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: Clone + 'static, O: 'static, U: 'static> Sub<Parser<T, U>> for Parser<T, O> {
    type Output = Parser<T, O>;

    fn sub(self, rhs: Parser<T, U>) -> Self::Output {
        self.thenx(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: Clone + 'static, O: 'static, U: 'static> Mul<Parser<T, U>> for Parser<T, O> {
    type Output = Parser<T, U>;

    fn mul(self, rhs: Parser<T, U>) -> Self::Output {
        self.xthen(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: Clone + 'static, O: 'static> BitOr<Parser<T, O>> for Parser<T, O> {
    type Output = Parser<T, O>;

    fn bitor(self, rhs: Parser<T, O>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T, O, U, F> Shr<F> for Parser<T, O>
where
    T: Clone + 'static,
    O: 'static,
    U: 'static,
    F: Fn(O) -> U + 'static,
{
    type Output = Parser<T, U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}
