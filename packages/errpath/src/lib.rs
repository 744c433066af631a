//! Annotated error chains with call-site capture
//!
//! An [`Error`] records a classification and a path of frames. Each frame
//! holds the nearest interesting caller location, a message and optional
//! lazily resolved values. Wrapping an error on its way up the stack appends
//! a frame, giving a backtrace with a semantic payload at every step.
//!
//! ```
//! use errpath::{values, ErrorClass};
//!
//! fn load(id: u32) -> errpath::Result<()> {
//!     Err(errpath::new_with_values(ErrorClass::NotFound, "no such record", move || {
//!         values!["id" => id]
//!     }))
//! }
//!
//! let err = load(7).map_err(|e| e.wrap("loading profile")).unwrap_err();
//! assert_eq!(err.to_string(), "no such record; loading profile");
//! assert_eq!(err.class(), ErrorClass::NotFound);
//! ```
//!
//! The crate does no I/O; formatters in [`output`] render finished chains and
//! [`LoggingTransformer`] hands them to the `log` facade.

pub mod class;
pub mod error;
pub mod output;
pub mod stack;

pub use class::{ClassError, Classify, ErrorClass, DEFAULT_AREA};
pub use error::*;
pub use output::{ErrorJson, PathJson};
pub use stack::{CallFrame, WalkerConfig};
