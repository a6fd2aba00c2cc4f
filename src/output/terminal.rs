//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use colored::Colorize;

/// Width of the label column in [`format_fields`].
pub const LABEL_WIDTH: usize = 16;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// One `"label", "value"` line per field, labels padded to [`LABEL_WIDTH`].
pub fn format_fields(fields: &[(&str, String)], color: bool) -> String {
    fields
        .iter()
        .map(|(label, value)| {
            let label = format_field(label, LABEL_WIDTH);
            let label = if color {
                label.cyan().to_string()
            } else {
                label
            };
            format!("{label}, {}", format_field(value, 0))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_format_fields_plain() {
        let fields = [("network", "10.0.0.0".to_string()), ("prefix_length", "8".to_string())];
        assert_eq!(
            format_fields(&fields, false),
            "       \"network\", \"10.0.0.0\"\n \"prefix_length\", \"8\""
        );
    }
}
