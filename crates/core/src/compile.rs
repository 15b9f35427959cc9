//! Compile written stubs with `javac` and bundle the output directory with `jar`.

use crate::error::{Result, SimplifierError};
use crate::scan::java_files;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// External tool commands. Defaults resolve `javac` and `jar` from `PATH`.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub javac: String,
    pub jar: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self { javac: "javac".to_string(), jar: "jar".to_string() }
    }
}

/// Archive file name with `.jar` appended when missing.
pub fn archive_file_name(name: &str) -> String {
    if name.ends_with(".jar") {
        name.to_string()
    } else {
        format!("{name}.jar")
    }
}

/// Compile every `.java` file under `output_dir` into that same directory,
/// then archive the directory as `<output_dir>/<archive_name>.jar`.
///
/// Already-written stubs are left in place whatever happens.
pub fn compile_archive(output_dir: &Path, archive_name: &str, toolchain: &Toolchain) -> Result<PathBuf> {
    let sources = java_files(output_dir, &HashSet::new())?;
    if sources.is_empty() {
        return Err(SimplifierError::NoJavaFiles { dir: output_dir.to_path_buf() });
    }

    info!(files = sources.len(), "Compiling simplified SSOs");
    run_tool(&toolchain.javac, Command::new(&toolchain.javac).arg("-d").arg(output_dir).args(&sources))?;

    let archive = output_dir.join(archive_file_name(archive_name));
    run_tool(
        &toolchain.jar,
        Command::new(&toolchain.jar).arg("cf").arg(&archive).arg("-C").arg(output_dir).arg("."),
    )?;

    info!(archive = %archive.display(), "Archive created");
    Ok(archive)
}

fn run_tool(tool: &str, cmd: &mut Command) -> Result<()> {
    let output = cmd
        .output()
        .map_err(|source| SimplifierError::Spawn { tool: tool.to_string(), source })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(SimplifierError::Tool {
            tool: tool.to_string(),
            status: output.status,
            output: format!("{stdout}{stderr}").trim_end().to_string(),
        });
    }
    if !stdout.trim().is_empty() {
        debug!(tool, output = %stdout.trim_end(), "Tool output");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_archive_file_name() {
        assert_eq!(archive_file_name("gallery"), "gallery.jar");
        assert_eq!(archive_file_name("gallery.jar"), "gallery.jar");
        assert_eq!(archive_file_name("gallery.zip"), "gallery.zip.jar");
    }

    #[test]
    fn test_compile_empty_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = compile_archive(dir.path(), "out", &Toolchain::default()).unwrap_err();
        assert!(matches!(err, SimplifierError::NoJavaFiles { .. }));
    }

    #[test]
    fn test_compile_missing_compiler() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("Pump.java"), "public class Pump {}").unwrap();
        let toolchain = Toolchain {
            javac: "sso-simplifier-test-no-such-javac".to_string(),
            jar: "sso-simplifier-test-no-such-jar".to_string(),
        };
        let err = compile_archive(dir.path(), "out", &toolchain).unwrap_err();
        assert!(matches!(err, SimplifierError::Spawn { ref tool, .. } if tool == "sso-simplifier-test-no-such-javac"));
        assert!(dir.path().join("Pump.java").exists());
    }
}
