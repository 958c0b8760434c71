use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary project directory
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file under `root`, creating parent directories as needed
pub fn create_test_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let file_path = root.join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}
