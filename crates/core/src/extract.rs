//! Signature extraction from a stripped, normalized class body, plus the
//! superclass augmentation step.
//!
//! Per-match failures are never errors: a method with a disallowed return or
//! parameter type, a malformed parameter, or a declaration shape that doesn't
//! fit simply yields nothing.

use crate::types::{FieldSignature, MethodSignature, Parameter, TypeTable};
use regex::Regex;
use tracing::debug;

/// Compiled patterns plus the type table that filters their matches.
pub struct SignatureExtractor<'a> {
    types: &'a TypeTable,
    package: Regex,
    method: Regex,
    method_tail: Regex,
    field: Regex,
}

impl<'a> SignatureExtractor<'a> {
    pub fn new(types: &'a TypeTable) -> Self {
        Self {
            types,
            package: Regex::new(r"\bpackage ([A-Za-z0-9_.]+) ?;").unwrap(),
            method: Regex::new(r"\bpublic ([A-Za-z0-9_$<>\[\]]+) ([A-Za-z0-9_$]+) ?\(").unwrap(),
            // After the parameter list: a body, `;`, or a throws clause.
            method_tail: Regex::new(r"^ ?(?:\{|;|throws )").unwrap(),
            field: Regex::new(
                r"\bpublic (?:(?:static|final|transient|volatile) )*([A-Za-z0-9_$<>\[\].]+) ([A-Za-z0-9_$]+) ?(?:= ?[^;]*)?;",
            )
            .unwrap(),
        }
    }

    /// First `package x.y.z;` in the whole normalized file, or empty.
    pub fn package_name(&self, normalized: &str) -> String {
        self.package
            .captures(normalized)
            .map(|c| c[1].to_string())
            .unwrap_or_default()
    }

    /// Public methods whose return type and every parameter type are allowed.
    pub fn methods(&self, body: &str) -> Vec<MethodSignature> {
        let mut methods = Vec::new();
        for caps in self.method.captures_iter(body) {
            let (return_type, name) = (&caps[1], &caps[2]);
            let open = caps.get(0).map_or(0, |m| m.end());
            let Some(close) = closing_paren(body, open) else {
                debug!(method = name, "Dropping method with unclosed parameter list");
                continue;
            };
            if !self.method_tail.is_match(&body[close + 1..]) {
                continue;
            }
            let params = &body[open..close];

            if !self.types.accepts_return(return_type) {
                debug!(method = name, return_type, "Dropping method with unsupported return type");
                continue;
            }

            let parameters = extract_parameters(params);
            if let Some(bad) = parameters.iter().find(|p| !self.types.accepts_parameter(&p.ty)) {
                debug!(method = name, param_type = bad.ty.as_str(), "Dropping method with unsupported parameter type");
                continue;
            }

            methods.push(MethodSignature::public(return_type, name, parameters));
        }
        methods
    }

    /// Public fields, unfiltered by the type table.
    pub fn fields(&self, body: &str) -> Vec<FieldSignature> {
        self.field
            .captures_iter(body)
            .map(|c| FieldSignature { ty: c[1].to_string(), name: c[2].to_string() })
            .collect()
    }

    /// Parse a bare declaration such as `String getLastError()` using the same
    /// rules as extraction. Used for configured superclass methods.
    pub fn parse_declaration(&self, decl: &str) -> Option<MethodSignature> {
        let text = format!("public {} {{", crate::lexer::normalize_whitespace(decl));
        let mut found = self.methods(&text);
        if found.len() == 1 {
            found.pop()
        } else {
            None
        }
    }
}

/// Index of the `)` that closes a list whose `(` ends just before `from`.
fn closing_paren(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in text.bytes().enumerate().skip(from) {
        match b {
            b'(' => depth += 1,
            b')' => {
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

/// Split a raw parameter list into `(type, name)` pairs.
///
/// Annotations (with their arguments) and leading `final` are skipped; pieces
/// with fewer than two remaining tokens are dropped. Commas inside `<...>` or
/// annotation arguments don't split.
pub fn extract_parameters(list: &str) -> Vec<Parameter> {
    split_top_level(list)
        .into_iter()
        .filter_map(|piece| {
            let piece = drop_annotations(piece);
            let mut tokens = piece.split_whitespace().skip_while(|t| *t == "final");
            let ty = tokens.next()?;
            let name = tokens.next()?;
            Some(Parameter::new(ty, name))
        })
        .collect()
}

/// Replace each `@Name` or `@Name(...)` with a space.
fn drop_annotations(piece: &str) -> String {
    let mut out = String::with_capacity(piece.len());
    let mut rest = piece;
    while let Some(at) = rest.find('@') {
        out.push_str(&rest[..at]);
        out.push(' ');
        let after = &rest[at + 1..];
        let name_end = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.')))
            .unwrap_or(after.len());
        rest = &after[name_end..];
        let args = rest.trim_start();
        if args.starts_with('(') {
            rest = match closing_paren(args, 1) {
                Some(close) => &args[close + 1..],
                None => "",
            };
        }
    }
    out.push_str(rest);
    out
}

fn split_top_level(list: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, ch) in list.char_indices() {
        match ch {
            '<' | '(' => depth += 1,
            '>' | ')' => depth -= 1,
            ',' if depth <= 0 => {
                pieces.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&list[start..]);
    pieces
}

/// Append the inherited base-class methods, skipping any the class already
/// declares with the same signature.
pub fn append_superclass_methods(methods: &mut Vec<MethodSignature>, inherited: &[MethodSignature]) {
    for method in inherited {
        if !methods.iter().any(|m| m.same_signature(method)) {
            methods.push(method.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::default_superclass_methods;

    fn names(methods: &[MethodSignature]) -> Vec<&str> {
        methods.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_package_first_match() {
        let table = TypeTable::default();
        let ex = SignatureExtractor::new(&table);
        assert_eq!(ex.package_name("package com.acme.sso; package other;"), "com.acme.sso");
        assert_eq!(ex.package_name("public class A {}"), "");
    }

    #[test]
    fn test_methods_filtered_by_type_table() {
        let table = TypeTable::default();
        let ex = SignatureExtractor::new(&table);
        let body = "class A extends ServerSideObject { \
                    public int getX() { return x; } \
                    public boolean isY() { return y; } \
                    public void reset() { } \
                    public Foo getFoo() { return foo; } \
                    public void apply(Foo foo) { } \
                    public String describe(int a, String b) { return \"\"; } }";
        let methods = ex.methods(body);
        assert_eq!(names(&methods), ["getX", "isY", "reset", "describe"]);
        assert_eq!(methods[3].parameters, vec![Parameter::new("int", "a"), Parameter::new("String", "b")]);
        assert!(methods.iter().all(|m| m.access == "public"));
    }

    #[test]
    fn test_method_declaration_shapes() {
        let table = TypeTable::default();
        let ex = SignatureExtractor::new(&table);
        let body = "public int a() throws java.io.IOException { } \
                    public abstract int skipped(); \
                    public int b();  \
                    public long c (long v) { } \
                    public int notMethod(x) + 1";
        assert_eq!(names(&ex.methods(body)), ["a", "b", "c"]);
    }

    #[test]
    fn test_constructor_and_static_not_extracted() {
        let table = TypeTable::default();
        let ex = SignatureExtractor::new(&table);
        let body = "public Pump(int rate) { } public static int count() { return 0; }";
        assert!(ex.methods(body).is_empty());
    }

    #[test]
    fn test_parameters_skip_final_and_annotations() {
        let params = extract_parameters("final int a, @Deprecated String b, @A @B final long c");
        assert_eq!(
            params,
            vec![Parameter::new("int", "a"), Parameter::new("String", "b"), Parameter::new("long", "c")]
        );
    }

    #[test]
    fn test_parameters_annotation_arguments() {
        let params = extract_parameters("@Named(\"\") String s, @Range(min = 1, max = 9) final int n");
        assert_eq!(params, vec![Parameter::new("String", "s"), Parameter::new("int", "n")]);
    }

    #[test]
    fn test_annotated_parameter_with_arguments_keeps_method() {
        let table = TypeTable::default();
        let ex = SignatureExtractor::new(&table);
        let body = "public void f(@Named(\"\") String s) { } \
                    public int g(@Range(min = 0, max = 5) int v) throws java.io.IOException { } \
                    public int h() { return 0; }";
        let methods = ex.methods(body);
        assert_eq!(names(&methods), ["f", "g", "h"]);
        assert_eq!(methods[0].parameters, vec![Parameter::new("String", "s")]);
        assert_eq!(methods[1].parameters, vec![Parameter::new("int", "v")]);
    }

    #[test]
    fn test_unclosed_parameter_list_dropped() {
        let table = TypeTable::default();
        let ex = SignatureExtractor::new(&table);
        assert!(ex.methods("public int broken(int a { }").is_empty());
    }

    #[test]
    fn test_parameters_malformed_piece_dropped() {
        assert!(extract_parameters("").is_empty());
        assert!(extract_parameters(" ").is_empty());
        assert_eq!(extract_parameters("int, String s"), vec![Parameter::new("String", "s")]);
    }

    #[test]
    fn test_generic_parameter_not_split_and_rejected() {
        let params = extract_parameters("Map<String, Integer> m, int n");
        assert_eq!(params.len(), 2);
        assert_eq!(params[1], Parameter::new("int", "n"));
        let table = TypeTable::default();
        let ex = SignatureExtractor::new(&table);
        assert!(ex.methods("public void load(Map<String, Integer> m) { }").is_empty());
    }

    #[test]
    fn test_fields_with_modifiers_and_initializers() {
        let table = TypeTable::default();
        let ex = SignatureExtractor::new(&table);
        let body = "public int count; public static final String NAME = \"\"; \
                    public transient volatile Foo foo = new Foo(1, 2); \
                    private int hidden; public int method() { }";
        let fields = ex.fields(body);
        let pairs: Vec<(&str, &str)> = fields.iter().map(|f| (f.ty.as_str(), f.name.as_str())).collect();
        assert_eq!(pairs, [("int", "count"), ("String", "NAME"), ("Foo", "foo")]);
    }

    #[test]
    fn test_parse_declaration() {
        let table = TypeTable::default();
        let ex = SignatureExtractor::new(&table);
        let m = ex.parse_declaration("String  getLastError()").unwrap();
        assert_eq!(m, MethodSignature::public("String", "getLastError", vec![]));
        assert!(ex.parse_declaration("Foo getFoo()").is_none());
        assert!(ex.parse_declaration("not a method").is_none());
    }

    #[test]
    fn test_superclass_methods_appended_once() {
        let inherited = default_superclass_methods();
        let mut methods = vec![MethodSignature::public("int", "getX", vec![])];
        append_superclass_methods(&mut methods, &inherited);
        assert_eq!(names(&methods), ["getX", "getLastError"]);

        let mut declared = vec![MethodSignature::public("String", "getLastError", vec![])];
        append_superclass_methods(&mut declared, &inherited);
        assert_eq!(declared.len(), 1);
    }
}
