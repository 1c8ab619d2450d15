//! Error taxonomy for a combine run.
//!
//! Every variant names the stage that failed (read, parse, serialize, write)
//! and, where one exists, the file involved so the CLI diagnostic can point
//! at it directly.
use std::fmt;
use std::path::PathBuf;

/// Which source a document was loaded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Program,
    ProgramInput,
    Layout,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentRole::Program => "program",
            DocumentRole::ProgramInput => "program input",
            DocumentRole::Layout => "layout",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    #[error("read {role} file {}", .path.display())]
    Read {
        role: DocumentRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {role} JSON from {origin}")]
    Parse {
        role: DocumentRole,
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialize combined document")]
    Serialize(#[source] serde_json::Error),

    #[error("write output file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
