//! Turning shader file names and lines into valid C++ tokens.

use crate::EmbedError;

/// Derives the variable name of a shader from its file name.
///
/// Every character which is not an ASCII letter, digit or `_` becomes `_`,
/// so `basic.vert` is declared as `basic_vert`. Names starting with a digit get a leading `_`.
///
/// # Errors
///
/// Fails for an empty file name.
#[inline]
pub fn identifier_for(file_name: &str) -> Result<String, EmbedError> {
    if file_name.is_empty() {
        return Err(EmbedError::InvalidName(file_name.to_owned()));
    }

    let mut identifier: String = file_name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if identifier.starts_with(|ch: char| ch.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    Ok(identifier)
}

/// Escapes `text` for use inside of a double quoted C string literal.
///
/// Tabs are kept as they are, every other ASCII control character is escaped,
/// as a raw line break would end the literal.
#[inline]
#[must_use]
pub fn escape_line(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\t' => escaped.push(ch),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            control if control.is_ascii_control() => {
                // Always three octal digits, so a digit after the escape stays a digit.
                let code = u32::from(control);
                escaped.push('\\');
                for shift in [6, 3, 0] {
                    escaped.extend(char::from_digit((code >> shift) & 0o7, 8));
                }
            }
            other => escaped.push(other),
        }
    }
    escaped
}
