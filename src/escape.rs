//! Escape sequence codec for resource values.
//!
//! Resource values are stored in memory in decoded form; the text format
//! uses escape sequences so that values with leading spaces, embedded
//! newlines or backslashes survive serialization. This module provides the
//! two pure functions converting between the forms.
//!
//! # Escape Syntax
//!
//! - `\n` - newline
//! - `\\` - backslash
//! - `\ ` - space (required for a leading space, which the parser would
//!   otherwise strip as whitespace)
//! - `\NNN` - exactly three octal digits, the byte with that value
//!
//! A backslash followed by any other character decodes to that character
//! alone; a trailing lone backslash is kept.
//!
//! # Examples
//!
//! ```
//! use xrm::escape;
//!
//! assert_eq!(escape::decode(r"a\nb"), "a\nb");
//! assert_eq!(escape::decode(r"\101"), "A");
//! assert_eq!(escape::encode(" padded"), r"\ padded");
//! ```

/// Decodes the escape sequences in a serialized value.
///
/// Works on bytes: an octal escape may produce a byte sequence that is not
/// valid UTF-8, in which case the offending bytes are replaced with
/// U+FFFD rather than failing the line.
pub fn decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        match bytes.get(i + 1).copied() {
            // Trailing lone backslash is kept as-is.
            None => {
                out.push(b'\\');
                i += 1;
            }
            Some(b' ') => {
                out.push(b' ');
                i += 2;
            }
            Some(b'n') => {
                out.push(b'\n');
                i += 2;
            }
            Some(b'\\') => {
                out.push(b'\\');
                i += 2;
            }
            Some(d1)
                if is_octal(d1)
                    && i + 3 < bytes.len()
                    && is_octal(bytes[i + 2])
                    && is_octal(bytes[i + 3]) =>
            {
                let value = (u32::from(d1 - b'0') << 6)
                    | (u32::from(bytes[i + 2] - b'0') << 3)
                    | u32::from(bytes[i + 3] - b'0');
                out.push((value & 0xff) as u8);
                i += 4;
            }
            // Unknown escape: the backslash is dropped, the character kept.
            Some(other) => {
                out.push(other);
                i += 2;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Encodes a value for the text format.
///
/// Emits `\ ` for a leading space and `\\` / `\n` for every backslash and
/// newline; all other characters pass through verbatim.
pub fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    let rest = if let Some(stripped) = value.strip_prefix(' ') {
        out.push_str("\\ ");
        stripped
    } else {
        value
    };

    for ch in rest.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }

    out
}

fn is_octal(b: u8) -> bool {
    (b'0'..=b'7').contains(&b)
}
