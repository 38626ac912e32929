#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    /// Writes a YAML schema built from `(name, datatype)` pairs.
    pub fn write_schema(&self, name: &str, columns: &[(&str, &str)]) -> PathBuf {
        let mut yaml = String::from("columns:\n");
        for (column, datatype) in columns {
            yaml.push_str(&format!("  - name: {column}\n    datatype: {datatype}\n"));
        }
        self.write(name, &yaml)
    }
}

pub fn cli() -> Command {
    Command::cargo_bin("schema-merge").expect("binary exists")
}
