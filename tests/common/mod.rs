//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch directory holding source documents for one `combine` run.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents.as_bytes()).expect("write fixture");
        path
    }

    /// Write the `{"op":"add"}` program and `{"a":1,"b":2}` input pair.
    pub fn example_sources(&self) -> (PathBuf, PathBuf) {
        (
            self.write("program.json", r#"{"op":"add"}"#),
            self.write("input.json", r#"{"a":1,"b":2}"#),
        )
    }
}

pub fn run_combine<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_combine"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run combine")
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("read output");
    serde_json::from_str(&text).expect("output is JSON")
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
