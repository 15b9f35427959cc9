//! SSO Simplifier: regenerate ServerSideObject Java classes as public-surface stubs.
//!
//! Scans a directory tree for `public class X extends ServerSideObject`, recovers
//! each class's package and public method/field signatures, and writes a stub
//! class with the same package, name and public methods but trivial bodies.
//!
//! # Modules
//!
//! - [`types`]: Signature model, allowed-type table, configuration
//! - [`lexer`]: Comment/literal masking and whitespace normalization
//! - [`locate`]: Qualifying-class detection and class-body isolation
//! - [`strip`]: Removal of nested private declarations
//! - [`extract`]: Package, method and field extraction; superclass augmentation
//! - [`scan`]: `.java` discovery and per-file scanning
//! - [`stubs`]: Stub rendering and writing
//! - [`compile`]: `javac` + `jar` invocation
//! - [`error`]: Error types

pub mod compile;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod locate;
pub mod scan;
pub mod strip;
pub mod stubs;
pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use error::{Result, SimplifierError};
use extract::SignatureExtractor;
use types::*;

// ---------------------------------------------------------------------------
// sso-simplifier.toml config loading
// ---------------------------------------------------------------------------

/// Config file looked up in the input root when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "sso-simplifier.toml";

/// Known keys in `sso-simplifier.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["base_class", "skip_dirs", "superclass_methods"];

/// Levenshtein distance between a config key and a known key, in chars.
fn edit_distance(key: &str, known: &str) -> usize {
    let known: Vec<char> = known.chars().collect();
    let mut row: Vec<usize> = (0..=known.len()).collect();
    for (i, kc) in key.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &c) in known.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if kc == c { diagonal } else { 1 + diagonal.min(above).min(row[j]) };
            diagonal = above;
        }
    }
    row[known.len()]
}

/// Load configuration: defaults merged with `explicit`, or with
/// `<input_root>/sso-simplifier.toml` when that exists.
///
/// A config file that was found but can't be read or parsed is an error.
pub fn load_config(input_root: &Path, explicit: Option<&Path>) -> Result<SimplifierConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = input_root.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return Ok(SimplifierConfig::default());
            }
            candidate
        }
    };

    debug!(path = %path.display(), "Loading config");
    let content = fs::read_to_string(&path)
        .map_err(|e| SimplifierError::Config { path: path.clone(), message: e.to_string() })?;
    parse_config(&content).map_err(|message| SimplifierError::Config { path, message })
}

/// Parse `sso-simplifier.toml` content on top of [`SimplifierConfig::default`].
/// Unknown keys trigger a warning with a typo suggestion.
pub fn parse_config(content: &str) -> std::result::Result<SimplifierConfig, String> {
    let table = content.parse::<toml::Table>().map_err(|e| e.to_string())?;
    let mut config = SimplifierConfig::default();

    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let suggestion = KNOWN_CONFIG_KEYS.iter().min_by_key(|k| edit_distance(key, k));
        match suggestion {
            Some(s) if edit_distance(key, s) <= 3 => warn!(
                key = key.as_str(),
                suggestion = *s,
                "Unknown key in {CONFIG_FILE_NAME}, did you mean '{s}'?"
            ),
            _ => warn!(
                key = key.as_str(),
                "Unknown key in {CONFIG_FILE_NAME} (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            ),
        }
    }

    if let Some(value) = table.get("base_class") {
        let base = value.as_str().ok_or("`base_class` must be a string")?;
        if base.trim().is_empty() {
            return Err("`base_class` must not be empty".to_string());
        }
        config.base_class = base.trim().to_string();
    }

    // skip_dirs: merge with defaults
    if let Some(value) = table.get("skip_dirs") {
        for dir in string_array(value, "skip_dirs")? {
            config.skip_dirs.insert(dir.to_string());
        }
    }

    // superclass_methods: replaces the built-in contract
    if let Some(value) = table.get("superclass_methods") {
        let decls = string_array(value, "superclass_methods")?;
        let methods: Vec<MethodSignature> = {
            let extractor = SignatureExtractor::new(&config.types);
            decls
                .into_iter()
                .filter_map(|decl| {
                    let parsed = extractor.parse_declaration(decl);
                    if parsed.is_none() {
                        warn!(declaration = decl, "Ignoring superclass method with unsupported signature");
                    }
                    parsed
                })
                .collect()
        };
        config.superclass_methods = methods;
    }

    Ok(config)
}

fn string_array<'a>(value: &'a toml::Value, key: &str) -> std::result::Result<Vec<&'a str>, String> {
    let items = value.as_array().ok_or_else(|| format!("`{key}` must be an array of strings"))?;
    items
        .iter()
        .map(|v| v.as_str().ok_or_else(|| format!("`{key}` must be an array of strings")))
        .collect()
}

// ---------------------------------------------------------------------------
// Scan + write pipeline
// ---------------------------------------------------------------------------

/// Result of one scan-then-write cycle.
#[derive(Debug)]
pub struct SimplifyReport {
    /// Units found, sorted by class name.
    pub units: Vec<SourceUnit>,
    pub written: Vec<PathBuf>,
    /// Per-unit write failures; the remaining units were still written.
    pub failures: Vec<SimplifierError>,
}

/// Scan `input` and write one stub per qualifying class into `output`.
///
/// Scan errors abort; write errors are collected in the report.
pub fn simplify(input: &Path, output: &Path, config: &SimplifierConfig) -> Result<SimplifyReport> {
    info!(input = %input.display(), base = config.base_class.as_str(), "Scanning for SSOs");
    let units = scan::scan_for_ssos(input, config)?;
    let outcome = stubs::write_stubs(output, &units, &config.types);
    info!(
        found = units.len(),
        written = outcome.written.len(),
        failed = outcome.failures.len(),
        "Simplification complete"
    );
    Ok(SimplifyReport { units, written: outcome.written, failures: outcome.failures })
}
