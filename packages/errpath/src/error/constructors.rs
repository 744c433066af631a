//! Error constructors and combinators
//!
//! Every function here is total: absent inputs degrade to a well-defined
//! error instead of failing. All of them are `#[track_caller]` so the source
//! location survives when no symbolized stack is available.

use super::types::{Error, ErrorInner, Foreign, PathFrame};
use super::values::{Payload, Value, ValueSource, Values, V};
use crate::class::ErrorClass;
use chrono::Utc;
use std::any::Any;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Message of the error produced from an absent foreign error
pub const NO_ERROR_MSG: &str = "no error";

/// Tag attached to frames holding a wrapped foreign error
pub const WRAPPED_ERROR_TAG: &str = "wrapped_error";

impl Error {
    #[track_caller]
    fn with_frame(class: ErrorClass, msg: impl Into<String>) -> Self {
        let frame = PathFrame::capture(msg, Location::caller());
        Self {
            inner: Box::new(ErrorInner {
                created_at: Utc::now(),
                origin_error: None,
                origin_context: None,
                class,
                path: vec![frame],
                #[cfg(feature = "full-backtrace")]
                backtrace: crate::stack::filtered_stack().0,
            }),
        }
    }

    #[track_caller]
    fn from_foreign(class: ErrorClass, err: Option<Foreign>) -> Self {
        let Some(err) = err else {
            return Self::with_frame(ErrorClass::NoError, NO_ERROR_MSG);
        };
        let mut e = Self::with_frame(class, err.to_string());
        let tagged = Arc::clone(&err);
        e.inner.origin_error = Some(err);
        e.last_frame_mut()
            .push_source(ValueSource::Lazy(Box::new(move || {
                vec![
                    Value::item(WRAPPED_ERROR_TAG),
                    Value::Pair(V {
                        k: "err".to_string(),
                        i: Payload::new(Arc::clone(&tagged)),
                    }),
                ]
            })));
        e
    }

    fn last_frame_mut(&mut self) -> &mut PathFrame {
        let last = self.inner.path.len() - 1;
        &mut self.inner.path[last]
    }

    fn set_context_once<C: fmt::Debug + Any + Send + Sync>(&mut self, ctx: C) {
        if self.inner.origin_context.is_none() {
            self.inner.origin_context = Some(Payload::new(ctx));
        }
    }

    /// Append a frame captured at the caller's location
    #[track_caller]
    #[must_use]
    pub fn wrap(mut self, msg: impl Into<String>) -> Self {
        let frame = PathFrame::capture(msg, Location::caller());
        self.inner.path.push(frame);
        self
    }

    /// Append a frame with a value function
    #[track_caller]
    #[must_use]
    pub fn wrap_with_values<F>(self, msg: impl Into<String>, values: F) -> Self
    where
        F: Fn() -> Values + Send + Sync + 'static,
    {
        self.wrap(msg).add_values(values)
    }

    /// Attach a key-tagged value to the last frame
    #[must_use]
    pub fn add_value<T: fmt::Debug + Any + Send + Sync>(
        mut self,
        key: impl Into<String>,
        value: T,
    ) -> Self {
        self.last_frame_mut()
            .push_source(ValueSource::Eager(vec![Value::pair(key, value)]));
        self
    }

    /// Extend the last frame's values with another value function.
    ///
    /// Values already attached resolve first; the new ones are appended.
    #[must_use]
    pub fn add_values<F>(mut self, values: F) -> Self
    where
        F: Fn() -> Values + Send + Sync + 'static,
    {
        self.last_frame_mut()
            .push_source(ValueSource::Lazy(Box::new(values)));
        self
    }

    /// Attach a context snapshot unless one is already present
    #[must_use]
    pub fn with_context<C: fmt::Debug + Any + Send + Sync>(mut self, ctx: C) -> Self {
        self.set_context_once(ctx);
        self
    }

    /// Reclassify, only if the current class is [`ErrorClass::Unknown`]
    pub fn set_class(&mut self, class: ErrorClass) {
        if !self.inner.class.is_unknown() {
            return;
        }
        log::trace!("reclassifying {} as {}", self.inner.class, class);
        self.inner.class = class;
    }
}

/// Create an error with one frame
#[track_caller]
#[must_use]
pub fn new(class: ErrorClass, msg: impl Into<String>) -> Error {
    Error::with_frame(class, msg)
}

/// Create an error carrying a context snapshot
#[track_caller]
#[must_use]
pub fn new_with_context<C>(class: ErrorClass, ctx: C, msg: impl Into<String>) -> Error
where
    C: fmt::Debug + Any + Send + Sync,
{
    Error::with_frame(class, msg).with_context(ctx)
}

/// Create an error whose frame resolves values lazily
#[track_caller]
#[must_use]
pub fn new_with_values<F>(class: ErrorClass, msg: impl Into<String>, values: F) -> Error
where
    F: Fn() -> Values + Send + Sync + 'static,
{
    Error::with_frame(class, msg).add_values(values)
}

/// Create an error with both a context snapshot and a value function
#[track_caller]
#[must_use]
pub fn full<C, F>(class: ErrorClass, ctx: C, msg: impl Into<String>, values: F) -> Error
where
    C: fmt::Debug + Any + Send + Sync,
    F: Fn() -> Values + Send + Sync + 'static,
{
    new_with_context(class, ctx, msg).add_values(values)
}

/// Append a frame; an absent error becomes a new `UnknownError`
#[track_caller]
#[must_use]
pub fn wrap(err: Option<Error>, msg: impl Into<String>) -> Error {
    match err {
        Some(e) => e.wrap(msg),
        None => Error::with_frame(ErrorClass::Unknown, msg),
    }
}

/// Wrap a foreign error; its text becomes the first frame's message
#[track_caller]
#[must_use]
pub fn wrap_error<E>(class: ErrorClass, err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::from_foreign(class, Some(Arc::new(err)))
}

/// Like [`wrap_error`]; `None` yields a `NoError` chain with message "no error"
#[track_caller]
#[must_use]
pub fn wrap_error_opt<E>(class: ErrorClass, err: Option<E>) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::from_foreign(class, err.map(|e| Arc::new(e) as Foreign))
}

/// Wrap a foreign error that is already shared, keeping pointer identity
#[track_caller]
#[must_use]
pub fn wrap_shared_error(
    class: ErrorClass,
    err: Arc<dyn std::error::Error + Send + Sync + 'static>,
) -> Error {
    Error::from_foreign(class, Some(err))
}

/// Wrap a foreign error and append a second frame with `msg`
#[track_caller]
#[must_use]
pub fn wrap_error_with_msg<E>(class: ErrorClass, err: E, msg: impl Into<String>) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    wrap_error(class, err).wrap(msg)
}

/// Wrap a foreign error and attach a context snapshot
#[track_caller]
#[must_use]
pub fn wrap_error_with_context<C, E>(class: ErrorClass, ctx: C, err: E) -> Error
where
    C: fmt::Debug + Any + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    wrap_error(class, err).with_context(ctx)
}

/// Like [`wrap_error_with_msg`]; `None` yields a single-frame `NoError` chain
/// with message "no error" and `msg` is dropped
#[track_caller]
#[must_use]
pub fn wrap_error_with_msg_opt<E>(
    class: ErrorClass,
    err: Option<E>,
    msg: impl Into<String>,
) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    match err {
        Some(e) => wrap_error_with_msg(class, e, msg),
        None => Error::from_foreign(class, None),
    }
}

/// Like [`wrap_error_with_context`]; `None` yields a `NoError` chain with
/// message "no error" that still carries `ctx`
#[track_caller]
#[must_use]
pub fn wrap_error_with_context_opt<C, E>(class: ErrorClass, ctx: C, err: Option<E>) -> Error
where
    C: fmt::Debug + Any + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    Error::from_foreign(class, err.map(|e| Arc::new(e) as Foreign)).with_context(ctx)
}

/// Append a frame with a value function; an absent error becomes a new `UnknownError`
#[track_caller]
#[must_use]
pub fn wrap_with_values<F>(err: Option<Error>, msg: impl Into<String>, values: F) -> Error
where
    F: Fn() -> Values + Send + Sync + 'static,
{
    match err {
        Some(e) => e.wrap_with_values(msg, values),
        None => new_with_values(ErrorClass::Unknown, msg, values),
    }
}

/// Wrap with values, attaching `ctx` only if no context was captured yet.
///
/// An absent error becomes a new error of `class` carrying `ctx`.
#[track_caller]
#[must_use]
pub fn full_wrap<C, F>(
    class: ErrorClass,
    ctx: C,
    err: Option<Error>,
    msg: impl Into<String>,
    values: F,
) -> Error
where
    C: fmt::Debug + Any + Send + Sync,
    F: Fn() -> Values + Send + Sync + 'static,
{
    match err {
        Some(e) => e.with_context(ctx).wrap_with_values(msg, values),
        None => full(class, ctx, msg, values),
    }
}
