//! Indented text rendering of values and nodelists.
//!
//! This is the form values take inside error messages and on `jple` output:
//! two-space indentation, one member or element per line, `[ ]` and `{ }` for
//! empty containers.

use std::fmt;

use itertools::Itertools;

use crate::value::{Nodelist, Value};

impl Value {
    pub fn to_pretty_string(&self) -> String {
        render(self, 1)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pretty_string())
    }
}

/// Renders a nodelist as if it were a JSON array.
pub fn render_nodelist(nodes: &Nodelist<'_>) -> String {
    render_seq(nodes.iter().map(|n| &**n), 1)
}

fn render(value: &Value, level: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => format!("\"{}\"", escape(s)),
        Value::Array(items) => render_seq(items.iter(), level),
        Value::Object(members) => {
            if members.is_empty() {
                return "{ }".to_string();
            }
            let pad = "  ".repeat(level);
            let body = members
                .iter()
                .map(|(k, v)| format!("{pad}\"{}\": {}", escape(k), render(v, level + 1)))
                .join(",\n");
            format!("{{\n{body}\n{}}}", "  ".repeat(level - 1))
        }
    }
}

fn render_seq<'v>(items: impl ExactSizeIterator<Item = &'v Value>, level: usize) -> String {
    if items.len() == 0 {
        return "[ ]".to_string();
    }
    let pad = "  ".repeat(level);
    let body = items
        .map(|v| format!("{pad}{}", render(v, level + 1)))
        .join(",\n");
    format!("[\n{body}\n{}]", "  ".repeat(level - 1))
}

/// Shortest round-trip form, switching to exponent notation outside
/// `1e-6 <= |n| < 1e21`.
fn format_number(n: f64) -> String {
    let magnitude = n.abs();
    if n.is_finite() && n != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        format!("{n:e}")
    } else {
        n.to_string()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}
