//! Qualifying-class detection and class-body isolation on normalized text.

use regex::Regex;
use std::path::Path;

/// Finds `public class <Identifier> extends <base>` declarations and slices
/// out the text spanning the class.
pub struct ClassLocator {
    base_class: String,
    declaration: Regex,
}

impl ClassLocator {
    pub fn new(base_class: &str) -> Self {
        let pattern = format!(r"\bpublic class [A-Za-z0-9_$]+ extends {}\b", regex::escape(base_class));
        Self { base_class: base_class.to_string(), declaration: Regex::new(&pattern).unwrap() }
    }

    pub fn base_class(&self) -> &str {
        &self.base_class
    }

    /// True when the normalized text declares a public class extending the base class.
    pub fn is_qualifying(&self, normalized: &str) -> bool {
        self.declaration.is_match(normalized)
    }

    /// Slice from `class <class_name> extends <base>` through the last `}` in
    /// the text. `None` when either boundary is missing or they are out of order.
    pub fn isolate<'a>(&self, normalized: &'a str, class_name: &str) -> Option<&'a str> {
        let header = format!("class {class_name} extends {}", self.base_class);
        let start = normalized.find(&header)?;
        let end = normalized.rfind('}')?;
        if start >= end {
            return None;
        }
        Some(&normalized[start..=end])
    }
}

/// Class name of a source file: its file name without the extension.
pub fn class_name_from_path(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(|s| s.to_string())
}
