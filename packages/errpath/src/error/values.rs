//! Structured values attached to path frames

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Key used for the synthetic value produced by a panicking value function
pub const PANIC_KEY: &str = "panic";

/// Anything that can be carried as a payload
pub trait Dump: fmt::Debug + Any + Send + Sync {
    /// Upcast for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T: fmt::Debug + Any + Send + Sync> Dump for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Opaque, cheaply clonable payload value
#[derive(Clone)]
pub struct Payload(Arc<dyn Dump>);

impl Payload {
    /// Wrap any debuggable value
    pub fn new<T: fmt::Debug + Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the value as `T`, if that is what it holds
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).as_any().downcast_ref::<T>()
    }

    /// Borrow the value as text when it holds a `&'static str` or `String`
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<&'static str>()
            .copied()
            .or_else(|| self.downcast_ref::<String>().map(String::as_str))
    }

    /// Debug rendering used by the formatters
    #[must_use]
    pub fn dump(&self) -> String {
        format!("{:?}", self.0)
    }

    /// Text if the payload is a string, the dump otherwise
    #[must_use]
    pub fn text(&self) -> String {
        self.as_str().map_or_else(|| self.dump(), ToString::to_string)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// A key-tagged payload; formatters special-case some keys
#[derive(Clone)]
pub struct V {
    /// Tag
    pub k: String,
    /// Payload
    pub i: Payload,
}

impl V {
    /// Build a pair
    pub fn new<T: fmt::Debug + Any + Send + Sync>(key: impl Into<String>, value: T) -> Self {
        Self {
            k: key.into(),
            i: Payload::new(value),
        }
    }
}

impl fmt::Debug for V {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("V")
            .field("K", &self.k)
            .field("I", &self.i)
            .finish()
    }
}

/// One value attached to a frame
#[derive(Clone)]
pub enum Value {
    /// Untagged payload
    Item(Payload),
    /// Key-tagged payload
    Pair(V),
}

impl Value {
    /// Untagged value
    pub fn item<T: fmt::Debug + Any + Send + Sync>(value: T) -> Self {
        Self::Item(Payload::new(value))
    }

    /// Key-tagged value
    pub fn pair<T: fmt::Debug + Any + Send + Sync>(key: impl Into<String>, value: T) -> Self {
        Self::Pair(V::new(key, value))
    }

    /// The pair, if this is one
    #[must_use]
    pub fn as_pair(&self) -> Option<&V> {
        match self {
            Self::Pair(v) => Some(v),
            Self::Item(_) => None,
        }
    }

    /// The untagged payload, if this is one
    #[must_use]
    pub fn as_item(&self) -> Option<&Payload> {
        match self {
            Self::Item(p) => Some(p),
            Self::Pair(_) => None,
        }
    }

    /// The key of a pair
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.as_pair().map(|v| v.k.as_str())
    }

    /// Debug rendering used by the formatters
    #[must_use]
    pub fn dump(&self) -> String {
        format!("{self:?}")
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(p) => fmt::Debug::fmt(p, f),
            Self::Pair(v) => fmt::Debug::fmt(v, f),
        }
    }
}

/// Values attached to one frame
pub type Values = Vec<Value>;

/// Deferred producer of frame values, usually capturing caller locals
pub type ValueFunc = Box<dyn Fn() -> Values + Send + Sync>;

/// Where a frame gets its values from, in attachment order
pub(crate) enum ValueSource {
    Eager(Values),
    Lazy(ValueFunc),
}

impl ValueSource {
    fn resolve_into(&self, out: &mut Values) {
        match self {
            Self::Eager(values) => out.extend(values.iter().cloned()),
            Self::Lazy(func) => out.extend(invoke(func)),
        }
    }
}

/// Run every source in order and concatenate what they produce
pub(crate) fn resolve(sources: &[ValueSource]) -> Values {
    let mut out = Values::new();
    for source in sources {
        source.resolve_into(&mut out);
    }
    out
}

fn invoke(func: &ValueFunc) -> Values {
    match catch_unwind(AssertUnwindSafe(|| func())) {
        Ok(values) => values,
        Err(panic) => {
            let msg = panic_message(panic.as_ref());
            log::warn!("value function panicked: {msg}");
            vec![Value::pair(PANIC_KEY, format!("PANIC in ValFunc: {msg}"))]
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(err) = panic.downcast_ref::<Box<dyn std::error::Error + Send + Sync>>() {
        err.to_string()
    } else {
        "unknown".to_string()
    }
}
