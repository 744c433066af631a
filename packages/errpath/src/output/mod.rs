//! Renderers for finished chains
//!
//! Both formatters only read the chain through its public accessors and
//! resolve frame values on the way.

pub mod console;
pub mod json;

pub use json::{ErrorJson, PathJson, JSON_KIND};
