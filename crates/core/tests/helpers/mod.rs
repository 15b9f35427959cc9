//! Test harness for pipeline integration tests.
//!
//! Copies a fixture source tree into a temp dir and provides a separate empty
//! output directory, so every test scans and writes in isolation.

pub mod fixtures;

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestProject {
    pub input: PathBuf,
    pub output: PathBuf,
    _temp_dir: TempDir,
}

impl TestProject {
    /// Create a project from a named fixture directory under `tests/fixtures`.
    pub fn from_fixture(name: &str) -> Self {
        let fixture_src = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
        assert!(fixture_src.exists(), "Fixture '{name}' not found at {}", fixture_src.display());

        let project = Self::empty();
        let copied = fixtures::copy_fixture_tree(&fixture_src, &project.input);
        assert!(copied > 0, "Fixture '{name}' has no .java sources");
        project
    }

    /// Create a project with an empty input tree.
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("src");
        let output = temp_dir.path().join("out");
        std::fs::create_dir_all(&input).expect("Failed to create input dir");
        TestProject { input, output, _temp_dir: temp_dir }
    }

    /// Write a source file (creating parent dirs) relative to the input root.
    pub fn add_source(&self, rel_path: &str, content: &str) {
        let path = self.input.join(rel_path);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create source dir");
        std::fs::write(path, content).expect("Failed to write source");
    }

    /// Read a generated stub by class name.
    pub fn stub(&self, class_name: &str) -> String {
        let path = self.output.join(format!("{class_name}.java"));
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Missing stub {}: {e}", path.display()))
    }
}
