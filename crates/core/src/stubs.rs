// ---------------------------------------------------------------------------
// Stub generation: same package, class name and public methods, trivial bodies
// ---------------------------------------------------------------------------

use crate::error::{Result, SimplifierError};
use crate::types::{MethodSignature, SourceUnit, TypeTable};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const INDENT: &str = "    ";

/// Render the simplified source for one unit: package line, class header,
/// empty public constructor, then one stub per method in declared order.
///
/// The package line is omitted when the source had none.
pub fn render_stub(unit: &SourceUnit, types: &TypeTable) -> String {
    let mut out = String::new();
    if !unit.package.is_empty() {
        out.push_str(&format!("package {};\n\n", unit.package));
    }
    out.push_str(&format!("public class {} {{\n\n", unit.class_name));
    out.push_str(&format!("{INDENT}public {}() {{}}\n\n", unit.class_name));

    for method in &unit.methods {
        out.push_str(&render_method(method, types));
        out.push('\n');
    }

    out.push_str("}\n");
    out
}

fn render_method(method: &MethodSignature, types: &TypeTable) -> String {
    let params = method
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = format!(
        "{INDENT}{} {} {}({params}) {{\n",
        method.access, method.return_type, method.name
    );
    if !method.is_void() {
        // Extraction never admits a return type outside the table; null keeps
        // the output compilable for reference types if one slips through.
        let literal = types.default_literal(&method.return_type).unwrap_or("null");
        out.push_str(&format!("{INDENT}{INDENT}return {literal};\n"));
    }
    out.push_str(&format!("{INDENT}}}\n"));
    out
}

/// Output path for a unit: `<output_dir>/<ClassName>.java`.
pub fn stub_path(output_dir: &Path, unit: &SourceUnit) -> PathBuf {
    output_dir.join(format!("{}.java", unit.class_name))
}

/// Create `output_dir` if needed and write the unit's stub into it.
pub fn write_stub(output_dir: &Path, unit: &SourceUnit, types: &TypeTable) -> Result<PathBuf> {
    let write_err = |path: &Path, source| SimplifierError::Write {
        class: unit.class_name.clone(),
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(output_dir).map_err(|e| write_err(output_dir, e))?;
    let path = stub_path(output_dir, unit);
    fs::write(&path, render_stub(unit, types)).map_err(|e| write_err(&path, e))?;
    Ok(path)
}

/// Stubs written and per-unit failures from one batch.
#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub written: Vec<PathBuf>,
    pub failures: Vec<SimplifierError>,
}

/// Write every unit; a failure for one unit is recorded and the rest continue.
pub fn write_stubs(output_dir: &Path, units: &[SourceUnit], types: &TypeTable) -> WriteOutcome {
    let mut outcome = WriteOutcome::default();
    for unit in units {
        match write_stub(output_dir, unit, types) {
            Ok(path) => {
                info!(class = unit.class_name.as_str(), path = %path.display(), "Stub written");
                outcome.written.push(path);
            }
            Err(e) => {
                warn!(class = unit.class_name.as_str(), error = %e, "Stub write failed");
                outcome.failures.push(e);
            }
        }
    }
    outcome
}
