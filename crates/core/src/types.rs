//! Core types shared across the simplifier: the signature model recovered from
//! ServerSideObject sources, the allowed-type table, the inherited base-class
//! contract, and runtime configuration.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// Return type of methods whose stub body is empty.
pub const VOID: &str = "void";

/// Superclass every qualifying class extends unless overridden in config.
pub const DEFAULT_BASE_CLASS: &str = "ServerSideObject";

// ---------------------------------------------------------------------------
// Signature model
// ---------------------------------------------------------------------------

/// A single method parameter: `<type> <name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self { ty: ty.into(), name: name.into() }
    }
}

/// A public method signature. Only ever built for methods whose return and
/// parameter types passed the [`TypeTable`] check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    pub access: String,
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
}

impl MethodSignature {
    pub fn public(
        return_type: impl Into<String>,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            access: "public".to_string(),
            return_type: return_type.into(),
            name: name.into(),
            parameters,
        }
    }

    pub fn is_void(&self) -> bool {
        self.return_type == VOID
    }

    /// Same name and same ordered parameter types (Java overload identity).
    pub fn same_signature(&self, other: &MethodSignature) -> bool {
        self.name == other.name
            && self.parameters.len() == other.parameters.len()
            && self.parameters.iter().zip(&other.parameters).all(|(a, b)| a.ty == b.ty)
    }
}

/// A public field: `<type> <name>`. Not filtered by the type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSignature {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

/// One qualifying class discovered during a scan.
///
/// `class_name` comes from the file name, not from the identifier after `class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceUnit {
    pub file_path: PathBuf,
    pub class_name: String,
    pub package: String,
    pub methods: Vec<MethodSignature>,
    pub fields: Vec<FieldSignature>,
}

// ---------------------------------------------------------------------------
// Allowed-type table
// ---------------------------------------------------------------------------

const JAVA_DEFAULTS: &[(&str, &str)] = &[
    ("boolean", "false"),
    ("byte", "0"),
    ("char", "'\\0'"),
    ("short", "0"),
    ("int", "0"),
    ("long", "0L"),
    ("float", "0.0f"),
    ("double", "0.0"),
    ("String", "null"),
];

/// Maps each permitted type to the literal a stub returns for it.
///
/// Sole authority for which methods survive extraction and what their stub
/// bodies return. `void` is accepted as a return type but never as a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTable {
    defaults: BTreeMap<String, String>,
}

impl TypeTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { defaults: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// The primitive types plus `String`.
    pub fn java_defaults() -> Self {
        Self::new(JAVA_DEFAULTS.iter().copied())
    }

    pub fn default_literal(&self, ty: &str) -> Option<&str> {
        self.defaults.get(ty).map(String::as_str)
    }

    pub fn accepts_parameter(&self, ty: &str) -> bool {
        self.defaults.contains_key(ty)
    }

    pub fn accepts_return(&self, ty: &str) -> bool {
        ty == VOID || self.defaults.contains_key(ty)
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::java_defaults()
    }
}

/// Public methods every ServerSideObject inherits, in their simplified form.
pub fn default_superclass_methods() -> Vec<MethodSignature> {
    vec![MethodSignature::public("String", "getLastError", Vec::new())]
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Runtime configuration. Built once at startup (defaults merged with
/// `sso-simplifier.toml`) and passed to the scanner and stub writer.
#[derive(Debug, Clone)]
pub struct SimplifierConfig {
    /// Superclass name that marks a qualifying class.
    pub base_class: String,
    /// Directory names never descended into during the walk.
    pub skip_dirs: HashSet<String>,
    pub types: TypeTable,
    /// Appended to every unit's method list.
    pub superclass_methods: Vec<MethodSignature>,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            base_class: DEFAULT_BASE_CLASS.to_string(),
            skip_dirs: [".git", ".svn", ".hg"].iter().map(|s| s.to_string()).collect(),
            types: TypeTable::java_defaults(),
            superclass_methods: default_superclass_methods(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_is_return_only() {
        let table = TypeTable::default();
        assert!(table.accepts_return("void"));
        assert!(!table.accepts_parameter("void"));
        assert_eq!(table.default_literal("void"), None);
    }

    #[test]
    fn test_default_literals() {
        let table = TypeTable::default();
        assert_eq!(table.default_literal("boolean"), Some("false"));
        assert_eq!(table.default_literal("char"), Some("'\\0'"));
        assert_eq!(table.default_literal("long"), Some("0L"));
        assert_eq!(table.default_literal("String"), Some("null"));
        assert_eq!(table.default_literal("Integer"), None);
        assert!(!table.accepts_return("Foo"));
    }

    #[test]
    fn test_same_signature_ignores_param_names_and_return() {
        let a = MethodSignature::public("int", "get", vec![Parameter::new("int", "a")]);
        let b = MethodSignature::public("String", "get", vec![Parameter::new("int", "other")]);
        let c = MethodSignature::public("int", "get", vec![Parameter::new("long", "a")]);
        assert!(a.same_signature(&b));
        assert!(!a.same_signature(&c));
    }

    #[test]
    fn test_superclass_contract() {
        let methods = default_superclass_methods();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "getLastError");
        assert_eq!(methods[0].return_type, "String");
        assert!(methods[0].parameters.is_empty());
    }
}
