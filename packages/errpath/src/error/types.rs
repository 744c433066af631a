//! Core error types and definitions

use super::values::{resolve, Payload, ValueSource, Values};
use crate::class::ErrorClass;
use crate::stack::{self, config::strip_dir};
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use std::panic::Location;
use std::sync::Arc;

/// A foreign error kept for identity comparisons
pub(crate) type Foreign = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// An annotated error chain.
///
/// Created by one constructor call, then extended in place by wrap calls as
/// it travels up the stack. An `Error` has a single owner at a time: every
/// mutating operation takes `self` or `&mut self`, and no internal locking is
/// done. Do not share one chain between concurrent workers and keep
/// extending it.
pub struct Error {
    pub(super) inner: Box<ErrorInner>,
}

pub(super) struct ErrorInner {
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Wrapped foreign error
    pub origin_error: Option<Foreign>,
    /// Context snapshot; `None` means no context was ever attached
    pub origin_context: Option<Payload>,
    pub class: ErrorClass,
    /// Never empty
    pub path: Vec<PathFrame>,
    /// Filtered stack captured at creation
    #[cfg(feature = "full-backtrace")]
    pub backtrace: Vec<String>,
}

/// One annotation point in an error's life
pub struct PathFrame {
    /// File name without directories
    pub file: String,
    /// Line number
    pub line: u32,
    /// Enclosing function
    pub function: String,
    /// Message given at this point
    pub msg: String,
    pub(super) sources: Vec<ValueSource>,
    pub(super) resolved: OnceCell<Values>,
}

impl PathFrame {
    /// Capture a frame at the nearest retained caller.
    ///
    /// `fallback` supplies file and line when the walker cannot.
    pub(crate) fn capture(msg: impl Into<String>, fallback: &'static Location<'static>) -> Self {
        let (_, mut frame) = stack::call_location();
        // Symbols without debug info still name the function but lose file and line.
        if frame.line == 0 || frame.file == "unknown" {
            frame.file = strip_dir(fallback.file()).to_string();
            frame.line = fallback.line();
        }
        Self {
            file: frame.file,
            line: frame.line,
            function: frame.function,
            msg: msg.into(),
            sources: Vec::new(),
            resolved: OnceCell::new(),
        }
    }

    /// Resolve this frame's values.
    ///
    /// Value functions run on the first read after they were attached and the
    /// result is cached; a panicking function contributes a single `panic` pair.
    #[must_use]
    pub fn values(&self) -> Values {
        if self.sources.is_empty() {
            return Values::new();
        }
        self.resolved.get_or_init(|| resolve(&self.sources)).clone()
    }

    /// Whether any value source is attached
    #[must_use]
    pub fn has_values(&self) -> bool {
        !self.sources.is_empty()
    }

    pub(super) fn push_source(&mut self, source: ValueSource) {
        self.sources.push(source);
        self.resolved = OnceCell::new();
    }
}

impl std::fmt::Debug for PathFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathFrame")
            .field("file", &self.file)
            .field("line", &self.line)
            .field("function", &self.function)
            .field("msg", &self.msg)
            .field("value_sources", &self.sources.len())
            .finish()
    }
}

impl Error {
    /// The ordered frames, oldest first; never empty
    #[must_use]
    pub fn path(&self) -> &[PathFrame] {
        &self.inner.path
    }

    /// The classification
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        self.inner.class.clone()
    }

    /// When the chain was created
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// The captured context snapshot, if any
    #[must_use]
    pub fn origin_context(&self) -> Option<&Payload> {
        self.inner.origin_context.as_ref()
    }

    /// Debug rendering of the context snapshot, empty when there is none
    #[must_use]
    pub fn origin_context_string(&self) -> String {
        self.inner
            .origin_context
            .as_ref()
            .map(Payload::dump)
            .unwrap_or_default()
    }

    /// The wrapped foreign error, if this chain was built from one
    #[must_use]
    pub fn origin_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.inner.origin_error.as_deref()
    }

    /// Message of the most recent frame
    #[must_use]
    pub fn last_message(&self) -> &str {
        self.inner.path.last().map_or("", |frame| frame.msg.as_str())
    }

    /// Filtered stack captured when the chain was created
    #[cfg(feature = "full-backtrace")]
    #[must_use]
    pub fn backtrace(&self) -> &[String] {
        &self.inner.backtrace
    }
}

/// Class of a possibly absent error: `NoError` when absent
#[must_use]
pub fn class_of(err: Option<&Error>) -> ErrorClass {
    err.map_or(ErrorClass::NoError, Error::class)
}

/// Chain text of a possibly absent error: empty when absent
#[must_use]
pub fn render(err: Option<&Error>) -> String {
    err.map(ToString::to_string).unwrap_or_default()
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
