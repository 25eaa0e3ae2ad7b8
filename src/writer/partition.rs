//! Hive-style partition directory names.

use std::fmt::Write as _;
use std::path::PathBuf;

/// Directory value used for null or empty partition values.
pub const DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

fn needs_escape(c: char) -> bool {
    matches!(
        c,
        '\u{00}'..='\u{1F}'
            | '\u{7F}'
            | '"'
            | '#'
            | '%'
            | '\''
            | '*'
            | '/'
            | ':'
            | '='
            | '?'
            | '\\'
            | '{'
            | '['
            | ']'
            | '^'
    )
}

/// Percent-escape the characters that cannot appear in a partition
/// directory name.
pub fn escape_partition_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if needs_escape(c) {
            let _ = write!(escaped, "%{:02X}", c as u32);
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Relative directory for a row with the given partition `values`, one
/// `<column>=<value>` segment per column.
pub fn partition_dir(columns: &[&str], values: &[Option<String>]) -> PathBuf {
    columns
        .iter()
        .zip(values)
        .map(|(column, value)| match value.as_deref() {
            Some(value) if !value.is_empty() => {
                format!("{column}={}", escape_partition_value(value))
            }
            _ => format!("{column}={DEFAULT_PARTITION}"),
        })
        .collect()
}
