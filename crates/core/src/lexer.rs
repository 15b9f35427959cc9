//! Java text flattening: comments and string/char literals are masked out,
//! then every whitespace run collapses to one space.
//!
//! Downstream matching works on the single-line result, so braces, keywords or
//! semicolons that only appear inside comments or literals never reach it.

/// Replace comments with a space and literal contents with empty literals.
///
/// Total: an unterminated comment or text block masks through end of input,
/// an unterminated string or char literal ends at the line break.
pub fn mask_opaque_spans(src: &str) -> String {
    let bytes = src.as_bytes();
    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut copy_from = 0;
    let mut i = 0;

    while i < len {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                out.push_str(&src[copy_from..i]);
                out.push(' ');
                i = find_byte(bytes, i + 2, b'\n').unwrap_or(len);
                copy_from = i;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&src[copy_from..i]);
                out.push(' ');
                i = find_seq(bytes, i + 2, b"*/").map(|end| end + 2).unwrap_or(len);
                copy_from = i;
            }
            b'"' if bytes[i..].starts_with(b"\"\"\"") => {
                out.push_str(&src[copy_from..i]);
                out.push_str("\"\"");
                i = skip_text_block(bytes, i + 3);
                copy_from = i;
            }
            quote @ (b'"' | b'\'') => {
                out.push_str(&src[copy_from..i]);
                out.push(quote as char);
                out.push(quote as char);
                i = skip_quoted(bytes, i + 1, quote);
                copy_from = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&src[copy_from..]);
    out
}

/// Collapse every whitespace run (newlines included) into a single space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Mask, then normalize. This is the text every later stage matches against.
pub fn normalize_source(src: &str) -> String {
    normalize_whitespace(&mask_opaque_spans(src))
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes.get(from..)?.iter().position(|&b| b == needle).map(|p| from + p)
}

fn find_seq(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes.get(from..)?.windows(needle.len()).position(|w| w == needle).map(|p| from + p)
}

/// Returns the index just past the closing quote, or the line break / end of
/// input for an unterminated literal.
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_text_block(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i..].starts_with(b"\"\"\"") {
            return i + 3;
        } else {
            i += 1;
        }
    }
    bytes.len()
}
