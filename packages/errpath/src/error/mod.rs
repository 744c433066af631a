//! Annotated error chains
//!
//! Provides the chain data model:
//! - One classification per chain, upgradable once from `UnknownError`
//! - An ordered path of frames with call-site, message and values
//! - Lazy, panic-isolated value resolution
//! - A first-wins context snapshot and the wrapped foreign error

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;
pub mod values;

pub use constructors::{
    full, full_wrap, new, new_with_context, new_with_values, wrap, wrap_error,
    wrap_error_opt, wrap_error_with_context, wrap_error_with_context_opt, wrap_error_with_msg,
    wrap_error_with_msg_opt, wrap_shared_error, wrap_with_values, NO_ERROR_MSG,
    WRAPPED_ERROR_TAG,
};
pub use extensions::{ForeignResultExt, OptionExt, ResultExt};
pub use logging::LoggingTransformer;
pub use types::{class_of, render, Error, PathFrame, Result};
pub use values::{Payload, Value, ValueFunc, Values, PANIC_KEY, V};
