//! Output formatters for command results.
//!
//! Every command builds a serializable result and hands it to
//! [`format_output`]; the global `--format` flag picks the rendering.

use anyhow::Result;
use apigen_core::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

/// Formats `data` according to `format`.
///
/// # Errors
///
/// Returns an error if `data` cannot be serialized.
///
/// # Examples
///
/// ```
/// use apigen_cli::formatters::format_output;
/// use apigen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     profile: String,
///     artifacts: usize,
/// }
///
/// let summary = Summary { profile: "objc".to_string(), artifacts: 4 };
///
/// let json = format_output(&summary, OutputFormat::Json)?;
/// assert!(json.contains("\"profile\": \"objc\""));
///
/// let text = format_output(&summary, OutputFormat::Text)?;
/// assert!(text.lines().any(|line| line == "artifacts: 4"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as indented JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain `key: value` lines for scripts.
pub mod text {
    use super::{Result, Serialize, Value};

    /// Formats data as one line per leaf value, keyed by its dotted path.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten(&value, "", &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(value: &Value, path: &str, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, inner) in map {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    flatten(inner, &child, lines);
                }
            }
            Value::Array(items) => {
                for (index, inner) in items.iter().enumerate() {
                    flatten(inner, &format!("{path}[{index}]"), lines);
                }
            }
            Value::String(s) => lines.push(format!("{path}: {s}")),
            other => lines.push(format!("{path}: {other}")),
        }
    }
}

/// Colorized output for terminals.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value};
    use std::fmt::Write;

    /// Formats data as an indented, colorized tree.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        render(&value, 0, &mut out)?;
        Ok(out.trim_end().to_string())
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(_) | Value::Object(_) => String::new(),
        }
    }

    fn render(value: &Value, depth: usize, out: &mut String) -> Result<()> {
        let pad = "  ".repeat(depth);
        match value {
            Value::Object(map) => {
                for (key, inner) in map {
                    match inner {
                        Value::Object(_) | Value::Array(_) => {
                            writeln!(out, "{pad}{}:", key.blue().bold())?;
                            render(inner, depth + 1, out)?;
                        }
                        _ => writeln!(out, "{pad}{}: {}", key.blue().bold(), scalar(inner))?,
                    }
                }
            }
            Value::Array(items) if items.is_empty() => writeln!(out, "{pad}{}", "(none)".dimmed())?,
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Object(_) | Value::Array(_) => {
                            writeln!(out, "{pad}-")?;
                            render(item, depth + 1, out)?;
                        }
                        _ => writeln!(out, "{pad}- {}", scalar(item))?,
                    }
                }
            }
            _ => writeln!(out, "{pad}{}", scalar(value))?,
        }
        Ok(())
    }
}
