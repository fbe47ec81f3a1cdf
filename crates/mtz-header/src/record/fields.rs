//! Field helpers shared by record decoding and encoding.

use std::str::FromStr;

use crate::error::FormatError;

use super::{Keyword, RECORD_LEN};

/// Split a record payload into fields, honoring single and double quotes.
///
/// Quotes group words containing spaces and are removed from the token.
/// A backslash escapes the next character outside single quotes.
pub fn tokenize(keyword: Keyword, text: &str) -> Result<Vec<String>, FormatError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => current.push(inner),
                        None => return Err(FormatError::UnterminatedQuote { keyword }),
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return Err(FormatError::UnterminatedQuote { keyword }),
                        },
                        Some(inner) => current.push(inner),
                        None => return Err(FormatError::UnterminatedQuote { keyword }),
                    }
                }
            }
            '\\' => {
                in_token = true;
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Split on whitespace and require an exact field count.
pub fn split_exact<'a>(
    keyword: Keyword,
    text: &'a str,
    count: usize,
    expected: &'static str,
) -> Result<Vec<&'a str>, FormatError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != count {
        return Err(FormatError::FieldCount {
            keyword,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Require an exact token count.
pub fn expect_arity(
    keyword: Keyword,
    tokens: &[String],
    count: usize,
    expected: &'static str,
) -> Result<(), FormatError> {
    if tokens.len() == count {
        Ok(())
    } else {
        Err(FormatError::FieldCount {
            keyword,
            expected,
            found: tokens.len(),
        })
    }
}

/// Parse an integer field.
pub fn parse_int(keyword: Keyword, value: &str) -> Result<i32, FormatError> {
    parse_value(keyword, value, "integer")
}

/// Parse a floating-point field.
pub fn parse_float(keyword: Keyword, value: &str) -> Result<f32, FormatError> {
    parse_value(keyword, value, "float")
}

/// Parse a hexadecimal field.
pub fn parse_hex(keyword: Keyword, value: &str) -> Result<u32, FormatError> {
    let trimmed = value.trim();
    u32::from_str_radix(trimmed, 16)
        .map_err(|_| FormatError::invalid_field(keyword, trimmed, "hexadecimal integer"))
}

/// Parse a non-negative count field.
pub fn parse_count(keyword: Keyword, value: &str) -> Result<usize, FormatError> {
    parse_value(keyword, value, "count")
}

fn parse_value<T: FromStr>(
    keyword: Keyword,
    value: &str,
    expected: &'static str,
) -> Result<T, FormatError> {
    let trimmed = value.trim();
    trimmed
        .parse::<T>()
        .map_err(|_| FormatError::invalid_field(keyword, trimmed, expected))
}

/// Parse a run of whitespace separated floats into a fixed array.
pub fn parse_floats<const N: usize>(
    keyword: Keyword,
    fields: &[&str],
) -> Result<[f32; N], FormatError> {
    let mut values = [0.0f32; N];
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = parse_float(keyword, field)?;
    }
    Ok(values)
}

/// Read a fixed-column slice, trimming surrounding spaces.
///
/// Offsets are bytes of the raw record. `end` of `None` reads to the end;
/// slices beyond the record are empty.
pub fn read_slice(bytes: &[u8], start: usize, end: Option<usize>) -> String {
    let end = end.unwrap_or(bytes.len()).min(bytes.len());
    bytes
        .get(start..end)
        .map(|slice| String::from_utf8_lossy(slice).trim().to_string())
        .unwrap_or_default()
}

/// Quote a field when the tokenizer would otherwise split or drop it.
pub fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));
    if !needs_quotes {
        value.to_string()
    } else if !value.contains('\'') {
        format!("'{value}'")
    } else {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    }
}

/// Space-pad a record line to the fixed record length.
pub fn pad_record(keyword: Keyword, line: &str) -> Result<[u8; RECORD_LEN], FormatError> {
    let bytes = line.as_bytes();
    if bytes.len() > RECORD_LEN {
        return Err(FormatError::unencodable(
            keyword,
            format!("{} bytes exceed the {RECORD_LEN}-byte record", bytes.len()),
        ));
    }
    let mut record = [b' '; RECORD_LEN];
    record[..bytes.len()].copy_from_slice(bytes);
    Ok(record)
}

/// Require a fixed-column value to fit its field width.
pub fn check_width(keyword: Keyword, value: &str, width: usize) -> Result<(), FormatError> {
    if value.len() > width {
        return Err(FormatError::unencodable(
            keyword,
            format!("{value:?} is wider than {width} characters"),
        ));
    }
    Ok(())
}
