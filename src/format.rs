//! Small text helpers shared by the composer and the export adapter.

/// Printed in place of a blank reading or field.
pub const PLACEHOLDER: &str = "—";

/// Reorders `YYYY-MM-DD` into `MM-DD-YYYY`.
///
/// No calendar validation happens. An empty string stays empty and anything
/// that is not exactly three `-`-separated parts is returned unchanged.
pub fn format_date_us(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{}-{}-{}", month, day, year),
        _ => date.to_string(),
    }
}

/// `value`, or the placeholder when it is blank.
pub fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}
