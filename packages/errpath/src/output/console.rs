//! Console summary of a chain

use crate::error::{Error, Value, V};
use std::fmt::Write;

const HEADER: &str = "!! --Error--------------------------- !!";
const FOOTER: &str = "!! -----------------------------Error-- !!";
const ARROW: &str = "- ->";
const VALUE: &str = "- --$";

/// Label for value keys that get dedicated rendering
fn label(pair: &V) -> Option<&'static str> {
    match pair.k.as_str() {
        "db_error" => Some(" DB Error "),
        "io_error" => Some(" IO Error "),
        "validation" => Some(" validation "),
        // Only text is highlighted as json/sql.
        "json" if pair.i.as_str().is_some() => Some(" json "),
        "sql" if pair.i.as_str().is_some() => Some(" sql "),
        _ => None,
    }
}

fn write_value(out: &mut String, value: &Value) {
    let _ = match value {
        Value::Pair(pair) => match label(pair) {
            Some(label) => writeln!(out, "{VALUE} {label}: {}", pair.i.text()),
            None => writeln!(out, "{VALUE}  {}  => {:?}", pair.k, pair.i),
        },
        Value::Item(item) => writeln!(out, "{VALUE} {item:?}"),
    };
}

impl Error {
    /// Multi-line, bordered summary suitable for a terminal
    #[must_use]
    pub fn summarize_console(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{HEADER}\n- err: {}", self.last_message());

        let ctx = self.origin_context_string();
        if !ctx.is_empty() {
            let _ = writeln!(out, "{ARROW} {ctx}");
        }

        for frame in self.path() {
            let _ = writeln!(
                out,
                "{ARROW} {}:{}/{} -> {}",
                frame.file, frame.line, frame.function, frame.msg
            );
            for value in frame.values() {
                write_value(&mut out, &value);
            }
        }

        out.push_str(FOOTER);
        out.push('\n');
        out
    }
}
