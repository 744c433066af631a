//! Stack filter configuration

use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Environment variable holding extra comma-separated denylist entries
pub const DENYLIST_ENV: &str = "ERRPATH_STACK_DENYLIST";

/// Default number of raw frames inspected per walk
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Patterns for frames that belong to this crate, the unwinder, or the runtime.
///
/// Qualified `<Self as Trait>` frames are internal only when the trait is
/// ours or the unwinder's, or when both sides are library paths. A caller's
/// own trait implemented on a std type stays visible.
const INTERNAL_PATTERNS: &[&str] = &[
    r"^errpath::",
    r"^backtrace::",
    r"^(?:std|core|alloc|test)::",
    r"^<.+? as (?:errpath|backtrace)::",
    r"^<(?:std|core|alloc|test|errpath|backtrace)::.+? as (?:std|core|alloc|test)::",
    r" as (?:core|std)::ops::function::Fn",
    r"^__rust",
    r"^_?_Unwind_\w+$",
    r"^rust_begin_unwind$",
    r"^(?:main|_start|__libc_start_\w+|start_thread|__?clone3?)$",
];

/// Errors raised while building a [`StackFilter`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A pattern failed to compile
    #[error("invalid {list} pattern: {source}")]
    Pattern {
        /// Which list held the bad pattern
        list: &'static str,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
    /// Configuration text could not be parsed
    #[error("invalid walker configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Which frames the stack walker hides.
///
/// A frame is retained when its function name matches an allow pattern, or
/// when it matches no internal pattern and is not on the denylist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Regexes for library-internal and runtime function names
    pub internal_patterns: Vec<String>,
    /// Regexes that always retain a frame
    pub allow_patterns: Vec<String>,
    /// Exact function names of caller-side wrappers (loggers, transaction helpers)
    pub denylist: Vec<String>,
    /// Raw frames inspected before giving up
    pub max_depth: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            internal_patterns: INTERNAL_PATTERNS.iter().map(ToString::to_string).collect(),
            allow_patterns: Vec::new(),
            denylist: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WalkerConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Default configuration extended with [`DENYLIST_ENV`]
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(DENYLIST_ENV) {
            config.denylist.extend(
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(ToString::to_string),
            );
        }
        config
    }

    /// Add caller-side wrapper names to the denylist
    #[must_use]
    pub fn deny<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.denylist.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add patterns that always retain a frame
    #[must_use]
    pub fn allow<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }
}

/// Compiled form of a [`WalkerConfig`]
#[derive(Debug, Clone)]
pub struct StackFilter {
    internal: RegexSet,
    allow: RegexSet,
    denylist: HashSet<String>,
    max_depth: usize,
    config: WalkerConfig,
}

impl StackFilter {
    /// Compile a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] when a pattern does not compile.
    pub fn new(config: &WalkerConfig) -> Result<Self> {
        let internal = RegexSet::new(&config.internal_patterns).map_err(|source| {
            ConfigError::Pattern {
                list: "internal",
                source,
            }
        })?;
        let allow = RegexSet::new(&config.allow_patterns).map_err(|source| ConfigError::Pattern {
            list: "allow",
            source,
        })?;
        Ok(Self {
            internal,
            allow,
            denylist: config.denylist.iter().cloned().collect(),
            max_depth: config.max_depth,
            config: config.clone(),
        })
    }

    /// Whether a frame for `function` is reported to callers
    #[must_use]
    pub fn retains(&self, function: &str) -> bool {
        if self.allow.is_match(function) {
            return true;
        }
        !self.internal.is_match(function) && !self.denylist.contains(function)
    }

    /// Raw frames inspected per walk
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The configuration this filter was compiled from
    #[must_use]
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }
}

impl Default for StackFilter {
    fn default() -> Self {
        // The built-in patterns always compile.
        Self::new(&WalkerConfig::default()).unwrap_or_else(|_| Self {
            internal: RegexSet::empty(),
            allow: RegexSet::empty(),
            denylist: HashSet::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            config: WalkerConfig::default(),
        })
    }
}

/// Strip any leading directories from a file name
#[must_use]
pub fn strip_dir(file: &str) -> &str {
    static DIR: once_cell::sync::Lazy<Option<Regex>> =
        once_cell::sync::Lazy::new(|| Regex::new(r"^.*[/\\]").ok());
    match DIR.as_ref().and_then(|re| re.find(file)) {
        Some(m) => &file[m.end()..],
        None => file,
    }
}
