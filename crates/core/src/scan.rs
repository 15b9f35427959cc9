use crate::error::{Result, SimplifierError};
use crate::extract::{append_superclass_methods, SignatureExtractor};
use crate::lexer::normalize_source;
use crate::locate::{class_name_from_path, ClassLocator};
use crate::strip::PrivateScopeStripper;
use crate::types::*;
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// File discovery
// ---------------------------------------------------------------------------

/// Every regular file under `root` whose name ends in `.java`, in a stable
/// (file-name sorted) walk order. Directories named in `skip_dirs` are not entered.
pub fn java_files(root: &Path, skip_dirs: &HashSet<String>) -> Result<Vec<PathBuf>> {
    let skip = skip_dirs.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if entry.depth() > 0 && entry.file_type().is_some_and(|ft| ft.is_dir()) {
                let name = entry.file_name().to_string_lossy();
                return !skip.contains(name.as_ref());
            }
            true
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry =
            entry.map_err(|source| SimplifierError::Walk { path: root.to_path_buf(), source })?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(".java") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

// ---------------------------------------------------------------------------
// SSO scanning
// ---------------------------------------------------------------------------

/// Per-file pipeline: normalize, locate, strip, extract, augment.
pub struct SsoScanner<'a> {
    config: &'a SimplifierConfig,
    locator: ClassLocator,
    stripper: PrivateScopeStripper,
    extractor: SignatureExtractor<'a>,
}

impl<'a> SsoScanner<'a> {
    pub fn new(config: &'a SimplifierConfig) -> Self {
        Self {
            config,
            locator: ClassLocator::new(&config.base_class),
            stripper: PrivateScopeStripper::new(),
            extractor: SignatureExtractor::new(&config.types),
        }
    }

    /// Build a [`SourceUnit`] from one file's text, or `None` when the file
    /// holds no qualifying class or its class boundaries can't be found.
    pub fn scan_source(&self, path: &Path, content: &str) -> Option<SourceUnit> {
        let normalized = normalize_source(content);
        if !self.locator.is_qualifying(&normalized) {
            return None;
        }

        let class_name = class_name_from_path(path)?;
        info!(class = class_name.as_str(), path = %path.display(), "SSO found");

        let Some(body) = self.locator.isolate(&normalized, &class_name) else {
            debug!(
                class = class_name.as_str(),
                base = self.locator.base_class(),
                "Class header not found under file name or no closing brace, skipping"
            );
            return None;
        };

        let stripped = self.stripper.strip(body);
        if stripped.truncated {
            warn!(
                path = %path.display(),
                removed = stripped.removed,
                "Unbalanced braces in private nested declaration; extracting only the text before it"
            );
        }

        let mut methods = self.extractor.methods(&stripped.text);
        append_superclass_methods(&mut methods, &self.config.superclass_methods);

        Some(SourceUnit {
            file_path: path.to_path_buf(),
            class_name,
            package: self.extractor.package_name(&normalized),
            methods,
            fields: self.extractor.fields(&stripped.text),
        })
    }

    /// Read every `.java` file under `root` and collect the qualifying units,
    /// sorted by class name. Any read or walk error aborts the scan.
    pub fn scan_dir(&self, root: &Path) -> Result<Vec<SourceUnit>> {
        let mut units = Vec::new();
        for path in java_files(root, &self.config.skip_dirs)? {
            let bytes =
                fs::read(&path).map_err(|source| SimplifierError::Read { path: path.clone(), source })?;
            let content = String::from_utf8_lossy(&bytes);
            if let Some(unit) = self.scan_source(&path, &content) {
                units.push(unit);
            }
        }
        sort_units(&mut units);
        Ok(units)
    }
}

/// Scan `root` for ServerSideObject subclasses using `config`.
pub fn scan_for_ssos(root: &Path, config: &SimplifierConfig) -> Result<Vec<SourceUnit>> {
    SsoScanner::new(config).scan_dir(root)
}

/// Order by class name; ties (same class name in different packages) by path.
pub fn sort_units(units: &mut [SourceUnit]) {
    units.sort_by(|a, b| {
        a.class_name.cmp(&b.class_name).then_with(|| a.file_path.cmp(&b.file_path))
    });
}
