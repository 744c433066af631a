//! Error classification
//!
//! Every [`Error`](crate::Error) carries exactly one [`ErrorClass`]. The
//! built-in catalogue is closed; callers that need more classes implement
//! [`Classify`] and register them through [`ErrorClass::custom`].

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Namespace shared by every built-in class
pub const DEFAULT_AREA: &str = "defaultErrors";

/// Highest ordinal used by the built-in catalogue
pub const MAX_BUILTIN_NUMBER: u32 = 12;

/// The capability every error class exposes
pub trait Classify: fmt::Debug + Send + Sync {
    /// Class name
    fn what(&self) -> &str;
    /// Taxonomy namespace
    fn area(&self) -> &str;
    /// Stable, never reused ordinal
    fn number(&self) -> u32;
}

/// Errors raised while registering a custom class
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassError {
    /// The ordinal belongs to the built-in catalogue
    #[error("class {what} claims reserved number {number} (0..={max} are built in)", max = MAX_BUILTIN_NUMBER)]
    Reserved {
        /// Name of the rejected class
        what: String,
        /// Ordinal it asked for
        number: u32,
    },
}

/// Classification of an error
#[derive(Debug, Clone, Default)]
pub enum ErrorClass {
    /// Zero or absent errors
    NoError,
    /// Fallback when nothing better is known; never assign it on purpose
    #[default]
    Unknown,
    /// Internal or assumed logic was violated
    Logic,
    /// What was looked for is not there
    NotFound,
    /// Database errors or inconsistent data
    Data,
    /// Wrapped panics
    Panic,
    /// Filesystem errors
    File,
    /// Network errors
    Network,
    /// Transient network errors the caller may retry later
    NetworkTemp,
    /// External execution failed
    Execution,
    /// External API errors (not network errors)
    Api,
    /// Validation of data failed
    Validation,
    /// State violation or incomplete application state
    State,
    /// Caller-defined class
    Custom(Arc<dyn Classify>),
}

impl ErrorClass {
    /// Register a caller-defined class.
    ///
    /// # Errors
    ///
    /// Returns [`ClassError::Reserved`] when the class claims an ordinal
    /// owned by the built-in catalogue.
    pub fn custom<C: Classify + 'static>(class: C) -> Result<Self, ClassError> {
        if class.number() <= MAX_BUILTIN_NUMBER {
            return Err(ClassError::Reserved {
                what: class.what().to_string(),
                number: class.number(),
            });
        }
        Ok(Self::Custom(Arc::new(class)))
    }

    /// Every built-in class in ordinal order
    #[must_use]
    pub fn builtin() -> [Self; 13] {
        [
            Self::NoError,
            Self::Unknown,
            Self::Logic,
            Self::NotFound,
            Self::Data,
            Self::Panic,
            Self::File,
            Self::Network,
            Self::NetworkTemp,
            Self::Execution,
            Self::Api,
            Self::Validation,
            Self::State,
        ]
    }

    /// Look up a built-in class by ordinal
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        Self::builtin().into_iter().find(|c| c.number() == number)
    }

    /// Class name
    #[must_use]
    pub fn what(&self) -> &str {
        match self {
            Self::NoError => "NoError",
            Self::Unknown => "UnknownError",
            Self::Logic => "LogicError",
            Self::NotFound => "NotFoundError",
            Self::Data => "DataError",
            Self::Panic => "PanicError",
            Self::File => "FileError",
            Self::Network => "NetworkError",
            Self::NetworkTemp => "NetworkTempError",
            Self::Execution => "ExecutionError",
            Self::Api => "APIError",
            Self::Validation => "ValidationError",
            Self::State => "StateError",
            Self::Custom(c) => c.what(),
        }
    }

    /// Taxonomy namespace
    #[must_use]
    pub fn area(&self) -> &str {
        match self {
            Self::Custom(c) => c.area(),
            _ => DEFAULT_AREA,
        }
    }

    /// Stable ordinal
    #[must_use]
    pub fn number(&self) -> u32 {
        match self {
            Self::NoError => 0,
            Self::Unknown => 1,
            Self::Logic => 2,
            Self::NotFound => 3,
            Self::Data => 4,
            Self::Panic => 5,
            Self::File => 6,
            Self::Network => 7,
            Self::NetworkTemp => 8,
            Self::Execution => 9,
            Self::Api => 10,
            Self::Validation => 11,
            Self::State => 12,
            Self::Custom(c) => c.number(),
        }
    }

    /// Whether the class hints that a retry may succeed.
    ///
    /// Nothing in this crate retries; the hint is for the caller.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NetworkTemp)
    }

    /// True for the fallback class, the only one [`Error::set_class`](crate::Error::set_class) overwrites
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.number() == 1
    }
}

impl Classify for ErrorClass {
    fn what(&self) -> &str {
        ErrorClass::what(self)
    }

    fn area(&self) -> &str {
        ErrorClass::area(self)
    }

    fn number(&self) -> u32 {
        ErrorClass::number(self)
    }
}

// Classes compare by ordinal only.
impl PartialEq for ErrorClass {
    fn eq(&self, other: &Self) -> bool {
        self.number() == other.number()
    }
}

impl Eq for ErrorClass {}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.what())
    }
}
