use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::errors::{caret_line, Error, LoadError, Result};
use crate::value::Value;

/// Parses JSON text into a [`Value`].
pub fn from_str(text: &str) -> std::result::Result<Value, LoadError> {
    serde_json::from_str::<serde_json::Value>(text)
        .map(Value::from)
        .map_err(|e| load_error(text, &e))
}

/// Reads and parses a JSON file.
pub fn from_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.is_empty() {
        return Err(Error::EmptyFile(path.to_path_buf()));
    }
    debug!(path = %path.display(), bytes = text.len(), "loading document");
    Ok(from_str(&text)?)
}

impl FromStr for Value {
    type Err = LoadError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        from_str(s)
    }
}

fn load_error(text: &str, err: &serde_json::Error) -> LoadError {
    // serde_json appends the location to its message; it is reported separately here.
    let full = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();

    let (mut line, mut column) = (err.line(), err.column());
    // A token cut short by a line break is reported at column 0 of the next
    // line; point at the break itself instead.
    if column == 0 && line > 1 {
        line -= 1;
        column = text.lines().nth(line - 1).map_or(0, str::len) + 1;
    }

    let source_line = text.lines().nth(line.saturating_sub(1)).unwrap_or("");
    let number = line.to_string();
    let padding = number.len() + 1 + column.saturating_sub(1);
    let excerpt = format!("{number}:{source_line}\n{}", caret_line(&padding));

    LoadError {
        message,
        line,
        column,
        excerpt,
    }
}
