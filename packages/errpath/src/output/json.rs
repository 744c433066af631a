//! JSON rendering of a chain

use crate::error::{Error, PathFrame};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of the `Kind` field
pub const JSON_KIND: &str = "errorBacktrace";

/// One frame of the JSON record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PathJson {
    /// `function@file:line -> message`
    pub caller: String,
    /// Dumped values of the frame
    pub values: Vec<String>,
}

/// JSON record of a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorJson {
    /// Always [`JSON_KIND`]
    pub kind: String,
    /// Context snapshot rendering, empty when absent
    pub context: String,
    /// Last frame's message
    pub message: String,
    /// Class name
    pub class: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Frames, oldest first
    pub path: Vec<PathJson>,
}

impl From<&PathFrame> for PathJson {
    fn from(frame: &PathFrame) -> Self {
        Self {
            caller: format!(
                "{}@{}:{} -> {}",
                frame.function, frame.file, frame.line, frame.msg
            ),
            values: frame.values().iter().map(|v| v.dump()).collect(),
        }
    }
}

impl Error {
    /// Structured record of the whole chain
    #[must_use]
    pub fn to_json(&self) -> ErrorJson {
        ErrorJson {
            kind: JSON_KIND.to_string(),
            context: self.origin_context_string(),
            message: self.last_message().to_string(),
            class: self.class().what().to_string(),
            created_at: self.created_at(),
            path: self.path().iter().map(PathJson::from).collect(),
        }
    }

    /// The record as a `serde_json::Value`
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        value_or_null(&self.to_json())
    }

    /// The record as JSON text.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_json())
    }
}

/// Serialize to a JSON value, logging and yielding `Null` on failure
fn value_or_null<T: Serialize>(record: &T) -> Value {
    match serde_json::to_value(record) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("error record could not be serialized ({e}), using null");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggingTransformer;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    #[test]
    fn failed_serialization_yields_null() {
        LoggingTransformer::init_test();
        assert_eq!(value_or_null(&Unserializable), Value::Null);
        assert_eq!(value_or_null(&JSON_KIND), Value::from(JSON_KIND));
    }
}
