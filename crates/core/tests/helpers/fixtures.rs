//! Fixture tree copying for integration tests.

use std::path::{Path, PathBuf};

/// Copy every file under `src` into `dst`, keeping relative paths.
/// Returns the number of `.java` sources copied.
pub fn copy_fixture_tree(src: &Path, dst: &Path) -> usize {
    let mut pending: Vec<(PathBuf, PathBuf)> = vec![(src.to_path_buf(), dst.to_path_buf())];
    let mut java_sources = 0;

    while let Some((from, to)) = pending.pop() {
        std::fs::create_dir_all(&to).expect("Failed to create fixture dir");
        for entry in std::fs::read_dir(&from).expect("Failed to read fixture dir") {
            let entry = entry.expect("Failed to read fixture entry");
            let target = to.join(entry.file_name());
            if entry.path().is_dir() {
                pending.push((entry.path(), target));
                continue;
            }
            std::fs::copy(entry.path(), &target).expect("Failed to copy fixture file");
            if target.extension().is_some_and(|e| e == "java") {
                java_sources += 1;
            }
        }
    }
    java_sources
}
