//! String literal escaping
//!
//! Every site that embeds caller-supplied text inside a SPARQL string literal
//! goes through [`quote_literal`], so the escaping rules live in one place.

use crate::error::{BridgeError, BridgeResult};

/// Escape text for use between the double quotes of a SPARQL `STRING_LITERAL2`.
///
/// Handles: `\` → `\\`, `"` → `\"`, and the control characters that have an
/// `ECHAR` form (`\n`, `\r`, `\t`, `\b`, `\f`). Other control characters pass
/// through unchanged; use [`check_no_controls`] to reject them.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c => out.push(c),
        }
    }
    out
}

/// Escape and wrap text in double quotes.
pub fn quote_literal(value: &str) -> String {
    format!("\"{}\"", escape_literal(value))
}

/// Reject text containing control characters that have no `ECHAR` form.
///
/// `\n`, `\r`, `\t`, `\b` and `\f` are accepted; [`escape_literal`] writes
/// them as backslash escapes.
pub fn check_no_controls(value: &str, what: &str) -> BridgeResult<()> {
    match value.chars().find(|c| c.is_control() && !has_echar(*c)) {
        Some(c) => Err(BridgeError::invalid(format!(
            "{} contains control character U+{:04X}",
            what, c as u32
        ))),
        None => Ok(()),
    }
}

fn has_echar(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t' | '\u{08}' | '\u{0C}')
}
