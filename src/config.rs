//! Parse-time settings attached to a [`Stream`](crate::stream::Stream).

/// Default nesting limit for lazily referenced rules.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What a repetition does when its inner parser succeeds without consuming
/// any input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatPolicy {
    /// End the repetition. The zero-width match is not recorded.
    #[default]
    Stop,
    /// Abort the parse with a fatal error at the stalled position.
    Error,
}

/// Settings shared by every position of a stream.
///
/// ```
/// use combinate::config::{ParseConfig, RepeatPolicy};
///
/// let config = ParseConfig::default()
///     .with_max_depth(64)
///     .with_repeat_policy(RepeatPolicy::Error);
/// assert_eq!(config.max_depth, Some(64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum nesting of `wrap`/`recursive` references; `None` disables the
    /// check.
    pub max_depth: Option<usize>,
    pub repeat: RepeatPolicy,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            repeat: RepeatPolicy::default(),
        }
    }
}

impl ParseConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn without_depth_limit(mut self) -> Self {
        self.max_depth = None;
        self
    }

    pub fn with_repeat_policy(mut self, repeat: RepeatPolicy) -> Self {
        self.repeat = repeat;
        self
    }
}
