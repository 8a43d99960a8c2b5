//! # Token Streams
//!
//! A [`Stream`] is an immutable position inside a token source. Advancing
//! with [`Stream::tail`] builds a new value and leaves the receiver alone, so
//! any position can be handed to as many parse attempts as needed. This is
//! what lets alternation backtrack without saving and restoring state.
//!
//! End of input is data, not a signal: [`Stream::head`] returns `None` once
//! the source is exhausted, and the tail of an exhausted stream is the
//! stream itself.
//!
//! Two kinds of source are supported:
//!
//! - buffered sources, collected from any `IntoIterator` up front
//! - lazy sources, which pull from an `Iterator` only when a parser first
//!   looks at a position and remember what they pulled

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::config::ParseConfig;

enum Source<T> {
    Buffered(Vec<T>),
    Lazy(RefCell<Pull<T>>),
}

impl<T: Clone> Source<T> {
    fn get(&self, index: usize) -> Option<T> {
        match self {
            Source::Buffered(tokens) => tokens.get(index).cloned(),
            Source::Lazy(pull) => {
                let mut pull = pull.borrow_mut();
                if pull.fill(index) {
                    pull.buffer.get(index).cloned()
                } else {
                    None
                }
            }
        }
    }

    fn has(&self, index: usize) -> bool {
        match self {
            Source::Buffered(tokens) => index < tokens.len(),
            Source::Lazy(pull) => pull.borrow_mut().fill(index),
        }
    }
}

/// Memoized view of an iterator. Once the iterator is exhausted it is
/// dropped, so the end of a lazy source stays the end.
struct Pull<T> {
    buffer: Vec<T>,
    pending: Option<Box<dyn Iterator<Item = T>>>,
}

impl<T> Pull<T> {
    fn fill(&mut self, index: usize) -> bool {
        while self.buffer.len() <= index {
            match self.pending.as_mut().and_then(Iterator::next) {
                Some(token) => self.buffer.push(token),
                None => {
                    self.pending = None;
                    return false;
                }
            }
        }
        true
    }
}

/// State shared by every position of one source.
struct Context {
    config: ParseConfig,
    depth: Cell<usize>,
}

/// Tracks one level of rule nesting; the level is released on drop.
pub(crate) struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

/// A persistent position in a token source.
///
/// Cloning is cheap: the source is shared and only the position is copied.
pub struct Stream<T> {
    source: Rc<Source<T>>,
    context: Rc<Context>,
    index: usize,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Stream {
            source: Rc::clone(&self.source),
            context: Rc::clone(&self.context),
            index: self.index,
        }
    }
}

impl<T: Clone> Stream<T> {
    /// Creates a stream over a finite collection of tokens.
    pub fn new<I: IntoIterator<Item = T>>(tokens: I) -> Self {
        Self::with_config(tokens, ParseConfig::default())
    }

    pub fn with_config<I: IntoIterator<Item = T>>(tokens: I, config: ParseConfig) -> Self {
        Self::from_source(Source::Buffered(tokens.into_iter().collect()), config)
    }

    /// Creates a stream that pulls tokens from `tokens` on demand.
    ///
    /// Nothing is read from the iterator until a parser inspects a position,
    /// and nothing past the furthest inspected position is ever read.
    pub fn lazy<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::lazy_with_config(tokens, ParseConfig::default())
    }

    pub fn lazy_with_config<I>(tokens: I, config: ParseConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let pull = Pull {
            buffer: Vec::new(),
            pending: Some(Box::new(tokens.into_iter())),
        };
        Self::from_source(Source::Lazy(RefCell::new(pull)), config)
    }

    fn from_source(source: Source<T>, config: ParseConfig) -> Self {
        Stream {
            source: Rc::new(source),
            context: Rc::new(Context {
                config,
                depth: Cell::new(0),
            }),
            index: 0,
        }
    }

    /// The token at this position, or `None` at end of input.
    pub fn head(&self) -> Option<T> {
        self.source.get(self.index)
    }

    /// The stream after this position. At end of input this is the same
    /// stream again.
    pub fn tail(&self) -> Self {
        if self.is_end() {
            return self.clone();
        }
        Stream {
            source: Rc::clone(&self.source),
            context: Rc::clone(&self.context),
            index: self.index + 1,
        }
    }

    pub fn is_end(&self) -> bool {
        !self.source.has(self.index)
    }
}

impl<T> Stream<T> {
    /// Zero-based index of the current token. At end of input this is the
    /// number of tokens in the source.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> &ParseConfig {
        &self.context.config
    }

    /// Enters one level of rule nesting, or returns the configured limit if
    /// entering would exceed it.
    pub(crate) fn descend(&self) -> Result<DepthGuard<'_>, usize> {
        let depth = self.context.depth.get();
        if let Some(limit) = self.context.config.max_depth {
            if depth >= limit {
                return Err(limit);
            }
        }
        self.context.depth.set(depth + 1);
        Ok(DepthGuard {
            depth: &self.context.depth,
        })
    }
}

impl<T> PartialEq for Stream<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.source, &other.source) && self.index == other.index
    }
}

impl<T> Eq for Stream<T> {}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("position", &self.index)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + fmt::Display> fmt::Display for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.head() {
            Some(token) => write!(f, "[{token}, ...]"),
            None => f.write_str("[END]"),
        }
    }
}
