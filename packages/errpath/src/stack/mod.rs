//! Stack walker
//!
//! Finds the nearest "interesting" caller of an error constructor. Frames from
//! this crate, the unwinder and the Rust runtime are hidden by pattern, and
//! caller-side wrappers (logging facades, transaction helpers) by an explicit
//! denylist. Both lists are configuration: the process-wide filter can be
//! replaced with [`configure`] or extended with [`extend_denylist`].

pub mod config;
pub mod walker;

pub use config::{ConfigError, StackFilter, WalkerConfig, DENYLIST_ENV};
pub use walker::{CallFrame, NO_FRAME};

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::sync::Arc;

static ACTIVE: Lazy<ArcSwap<StackFilter>> = Lazy::new(|| {
    let config = WalkerConfig::from_env();
    let filter = StackFilter::new(&config).unwrap_or_default();
    ArcSwap::from_pointee(filter)
});

/// The filter used by every constructor
#[must_use]
pub fn active_filter() -> Arc<StackFilter> {
    ACTIVE.load_full()
}

/// Replace the process-wide filter.
///
/// # Errors
///
/// Returns [`ConfigError::Pattern`] if a pattern fails to compile; the
/// previous filter stays active.
pub fn configure(config: &WalkerConfig) -> config::Result<()> {
    let filter = StackFilter::new(config)?;
    log::debug!(
        "stack filter reconfigured: {} internal, {} allow, {} denied",
        config.internal_patterns.len(),
        config.allow_patterns.len(),
        config.denylist.len()
    );
    ACTIVE.store(Arc::new(filter));
    Ok(())
}

/// Add caller-side wrapper names to the process-wide denylist
pub fn extend_denylist<I, S>(names: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    ACTIVE.rcu(|current| {
        let config = current.config().clone().deny(names.iter().cloned());
        // Only the denylist changed, so the existing patterns still compile.
        match StackFilter::new(&config) {
            Ok(filter) => Arc::new(filter),
            Err(_) => Arc::clone(current),
        }
    });
}

/// Nearest retained caller frame, per the process-wide filter
#[must_use]
pub fn call_location() -> (String, CallFrame) {
    ACTIVE.load().call_location()
}

/// All retained frames, nearest first, per the process-wide filter
#[must_use]
pub fn filtered_stack() -> (Vec<String>, Vec<CallFrame>) {
    ACTIVE.load().filtered_stack()
}
