//! Static require scanning.
//!
//! Collects the literal names passed to `require(...)` calls in a source
//! file. Comments, string literals, and template literals are skipped, and
//! only calls with a single string-literal argument count; dynamic requires
//! are ignored because resolution happens entirely at build time.

/// Mark which bytes of `source` are code, as opposed to comments, string
/// literals, or template literals. Regex literals are not recognized; a
/// `require` inside one would be a false positive, which the resolver then
/// reports as a missing name, and a quote inside one (`/['"]/`) opens a
/// phantom string that mis-masks the rest of the line. Template literals
/// are masked whole, so a `require` inside a `${...}` interpolation is not
/// picked up; requires belong in plain statements.
pub(crate) fn code_mask(source: &str) -> Vec<bool> {
    let bytes = source.as_bytes();
    let mut mask = vec![true; bytes.len()];
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    mask[i] = false;
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                mask[i] = false;
                mask[i + 1] = false;
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                        mask[i] = false;
                        mask[i + 1] = false;
                        i += 2;
                        break;
                    }
                    mask[i] = false;
                    i += 1;
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                mask[i] = false;
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == b'\\' && i + 1 < bytes.len() {
                        mask[i] = false;
                        mask[i + 1] = false;
                        i += 2;
                        continue;
                    }
                    // Unterminated ' and " strings end at the newline.
                    let closes = bytes[i] == quote || (quote != b'`' && bytes[i] == b'\n');
                    mask[i] = false;
                    i += 1;
                    if closes {
                        break;
                    }
                }
            }
            _ => i += 1,
        }
    }
    mask
}

/// 1-based line and column of a byte offset.
pub(crate) fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (index, ch) in source.char_indices() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

const KEYWORD: &[u8] = b"require";

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Collect the distinct literal require names in `source`, in order of
/// first appearance.
pub fn scan_requires(source: &str) -> Vec<String> {
    let bytes = source.as_bytes();
    let mask = code_mask(source);
    let mut names: Vec<String> = Vec::new();
    let mut i = 0;
    while i + KEYWORD.len() <= bytes.len() {
        if !mask[i] || &bytes[i..i + KEYWORD.len()] != KEYWORD {
            i += 1;
            continue;
        }
        // Not a call if it is part of a longer identifier or a member access.
        if i > 0 && (is_ident_byte(bytes[i - 1]) || bytes[i - 1] == b'.') {
            i += KEYWORD.len();
            continue;
        }
        let mut j = i + KEYWORD.len();
        if j < bytes.len() && is_ident_byte(bytes[j]) {
            i = j;
            continue;
        }
        j = skip_ws(bytes, j);
        if bytes.get(j) != Some(&b'(') {
            i += KEYWORD.len();
            continue;
        }
        j = skip_ws(bytes, j + 1);
        let quote = match bytes.get(j) {
            Some(&(q @ (b'"' | b'\''))) => q,
            _ => {
                i = j.max(i + KEYWORD.len());
                continue;
            }
        };
        j += 1;
        let start = j;
        while j < bytes.len() && bytes[j] != quote && bytes[j] != b'\\' && bytes[j] != b'\n' {
            j += 1;
        }
        if bytes.get(j) != Some(&quote) {
            i = j;
            continue;
        }
        let name = &source[start..j];
        let close = skip_ws(bytes, j + 1);
        if bytes.get(close) == Some(&b')') && !name.is_empty() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            i = close + 1;
        } else {
            i = j + 1;
        }
    }
    names
}
