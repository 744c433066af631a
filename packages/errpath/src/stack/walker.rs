//! Call-stack capture and filtering

use super::config::{strip_dir, StackFilter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering of the sentinel frame
pub const NO_FRAME: &str = "(none)";

/// One retained stack frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallFrame {
    /// File name without directories
    pub file: String,
    /// Line number, 0 when unknown
    pub line: u32,
    /// Demangled function path without the symbol hash
    pub function: String,
}

impl CallFrame {
    /// Frame reported when nothing usable was captured
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            file: "unknown".to_string(),
            line: 0,
            function: "unknown".to_string(),
        }
    }

    /// Whether this is the [`CallFrame::unknown`] sentinel
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.line == 0 && self.file == "unknown" && self.function == "unknown"
    }
}

impl fmt::Display for CallFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.function, self.file, self.line)
    }
}

impl StackFilter {
    /// Nearest retained frame of the current stack and its rendering.
    ///
    /// Falls back to `("(none)", CallFrame::unknown())` when no frame survives.
    #[must_use]
    pub fn call_location(&self) -> (String, CallFrame) {
        match self.walk(Some(1)).into_iter().next() {
            Some(frame) => (frame.to_string(), frame),
            None => {
                log::debug!("stack walk retained no frames, using sentinel location");
                (NO_FRAME.to_string(), CallFrame::unknown())
            }
        }
    }

    /// Every retained frame, nearest first, with their renderings
    #[must_use]
    pub fn filtered_stack(&self) -> (Vec<String>, Vec<CallFrame>) {
        let frames = self.walk(None);
        let rendered = frames.iter().map(ToString::to_string).collect();
        (rendered, frames)
    }

    fn walk(&self, limit: Option<usize>) -> Vec<CallFrame> {
        let mut retained = Vec::new();
        let mut depth = 0;

        backtrace::trace(|frame| {
            depth += 1;
            if depth > self.max_depth() {
                return false;
            }

            // Inlined calls resolve to several symbols for one raw frame.
            backtrace::resolve_frame(frame, |symbol| {
                if limit.is_some_and(|n| retained.len() >= n) {
                    return;
                }
                let Some(name) = symbol.name() else {
                    return;
                };
                let function = format!("{name:#}");
                if !self.retains(&function) {
                    return;
                }
                let file = symbol
                    .filename()
                    .map(|path| strip_dir(&path.to_string_lossy()).to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                retained.push(CallFrame {
                    file,
                    line: symbol.lineno().unwrap_or(0),
                    function,
                });
            });

            limit.map_or(true, |n| retained.len() < n)
        });

        retained
    }
}
