//! Numeric formatting helpers for INPUT# and PRINT#
//!
//! The I/O core never converts numbers inline; PRINT# delegates to the
//! to-string helpers and INPUT# delegates to the permissive parsers here.

/// Canonical text form of an integer value
pub fn int_to_string(value: i32) -> String {
    value.to_string()
}

/// Canonical text form of a float value (shortest round-trip form)
pub fn float_to_string(value: f64) -> String {
    value.to_string()
}

/// Permissive INPUT-style integer parsing.
///
/// Surrounding whitespace is tolerated and a fractional value truncates;
/// anything else reads as 0 with a diagnostic.
pub fn parse_integer(text: &str) -> i32 {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i32>() {
        return value;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return value as i32;
    }
    log::warn!("INPUT#: bad integer: [{}]", text);
    0
}

/// Permissive INPUT-style float parsing; malformed input reads as 0
pub fn parse_float(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            log::warn!("INPUT#: bad number: [{}]", text);
            0.0
        }
    }
}
