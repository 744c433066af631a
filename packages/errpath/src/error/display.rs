//! Display and trait implementations for Error

use super::types::Error;
use std::error::Error as StdError;
use std::fmt;

/// Separator between frame messages in the chain text
pub const MSG_SEPARATOR: &str = "; ";

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.inner.path.iter().enumerate() {
            if i > 0 {
                f.write_str(MSG_SEPARATOR)?;
            }
            f.write_str(&frame.msg)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("class", &self.inner.class.what())
            .field("created_at", &self.inner.created_at)
            .field("context", &self.inner.origin_context)
            .field("origin_error", &self.inner.origin_error)
            .field("path", &self.inner.path)
            .finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .origin_error
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl Error {
    /// Whether `target` is equivalent to this error.
    ///
    /// Another [`Error`] matches when the class ordinals are equal. Otherwise,
    /// if this chain wraps a foreign error, `target` or anything in its
    /// `source()` chain matches when it is the same object or has the same
    /// type-revealing `Debug` output and the same text. Identical chain text
    /// alone never counts.
    #[must_use]
    pub fn is(&self, target: &(dyn StdError + 'static)) -> bool {
        if let Some(other) = target.downcast_ref::<Error>() {
            if self.inner.class.number() == other.inner.class.number() {
                return true;
            }
        }

        let Some(origin) = self.inner.origin_error.as_deref() else {
            return false;
        };
        let mut candidate = Some(target);
        while let Some(err) = candidate {
            if same_error(err, origin) {
                return true;
            }
            candidate = err.source();
        }
        false
    }
}

fn same_error(a: &(dyn StdError + 'static), b: &(dyn StdError + Send + Sync + 'static)) -> bool {
    let a_ptr = a as *const dyn StdError as *const ();
    let b_ptr = b as *const (dyn StdError + Send + Sync) as *const ();
    if a_ptr == b_ptr {
        return true;
    }
    a.to_string() == b.to_string() && format!("{a:?}") == format!("{b:?}")
}
