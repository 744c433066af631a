//! Extension traits for `Result` and `Option`

use super::constructors::{new, wrap_error, wrap_error_with_msg};
use super::types::Error;
use crate::class::ErrorClass;
use std::any::Any;
use std::fmt;

/// Annotate results that already carry an [`Error`]
pub trait ResultExt<T> {
    /// Append a frame to the error
    fn wrap_err(self, msg: impl Into<String>) -> Result<T, Error>;

    /// Attach a key-tagged value to the error's last frame
    fn with_value<P: fmt::Debug + Any + Send + Sync>(
        self,
        key: impl Into<String>,
        value: P,
    ) -> Result<T, Error>;
}

impl<T> ResultExt<T> for Result<T, Error> {
    #[track_caller]
    fn wrap_err(self, msg: impl Into<String>) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.wrap(msg)),
        }
    }

    fn with_value<P: fmt::Debug + Any + Send + Sync>(
        self,
        key: impl Into<String>,
        value: P,
    ) -> Result<T, Error> {
        self.map_err(|e| e.add_value(key, value))
    }
}

/// Turn results carrying a foreign error into annotated chains
pub trait ForeignResultExt<T> {
    /// Wrap the foreign error under `class`
    fn classify(self, class: ErrorClass) -> Result<T, Error>;

    /// Wrap the foreign error under `class` and add a frame with `msg`
    fn classify_with_msg(self, class: ErrorClass, msg: impl Into<String>) -> Result<T, Error>;
}

impl<T, E> ForeignResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn classify(self, class: ErrorClass) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(wrap_error(class, e)),
        }
    }

    #[track_caller]
    fn classify_with_msg(self, class: ErrorClass, msg: impl Into<String>) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(wrap_error_with_msg(class, e, msg)),
        }
    }
}

/// Turn a missing value into an annotated chain
pub trait OptionExt<T> {
    /// `Some(v)` becomes `Ok(v)`, `None` a new error of `class`
    fn ok_or_class(self, class: ErrorClass, msg: impl Into<String>) -> Result<T, Error>;
}

impl<T> OptionExt<T> for Option<T> {
    #[track_caller]
    fn ok_or_class(self, class: ErrorClass, msg: impl Into<String>) -> Result<T, Error> {
        match self {
            Some(v) => Ok(v),
            None => Err(new(class, msg)),
        }
    }
}
