//! Removal of nested private type declarations from an isolated class body,
//! so their members never leak into the public stub.

use regex::Regex;

/// Result of stripping. `truncated` is set when a nested declaration's braces
/// never balanced; `text` then ends just before that declaration's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    pub text: String,
    pub removed: usize,
    pub truncated: bool,
}

pub struct PrivateScopeStripper {
    header: Regex,
}

impl Default for PrivateScopeStripper {
    fn default() -> Self {
        Self::new()
    }
}

impl PrivateScopeStripper {
    pub fn new() -> Self {
        let header = Regex::new(
            r"\bprivate (?:(?:static|final|abstract|strictfp) )*(?:class|interface|enum|record) ",
        )
        .unwrap();
        Self { header }
    }

    /// Repeatedly cut the next private nested declaration, header through its
    /// matching closing brace. An unbalanced declaration is cut through the end
    /// of the text so none of its members survive.
    pub fn strip(&self, body: &str) -> Stripped {
        let mut text = body.to_string();
        let mut removed = 0;

        while let Some(m) = self.header.find(&text) {
            let start = m.start();
            let close = text[m.end()..]
                .find('{')
                .and_then(|p| matching_brace(&text, m.end() + p));
            let Some(close) = close else {
                text.truncate(start);
                return Stripped { text, removed, truncated: true };
            };

            let mut end = close + 1;
            if text[end..].starts_with(' ') {
                end += 1;
            }
            text.replace_range(start..end, "");
            removed += 1;
        }

        Stripped { text, removed, truncated: false }
    }
}

/// Index of the `}` closing the `{` at `open`, counting nested depth.
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
