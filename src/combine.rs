//! Nest a program document and its input (and optionally a layout) into one
//! JSON object and write it out.
//!
//! The two output shapes keep the key orders their consumers already rely
//! on: the prover input file leads with `program_input`, while the plain
//! bundle leads with `program`.
use crate::error::{CombineError, DocumentRole};
use crate::layout::{self, LayoutSource};
use crate::staging::publish_bytes;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineOptions {
    /// Presence selects the three-key prover input shape.
    pub layout: Option<LayoutSource>,
    /// Spaces per indent level; `0` writes compact JSON.
    pub indent: usize,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            layout: None,
            indent: DEFAULT_INDENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    /// `{program, program_input}`
    ProgramBundle,
    /// `{program_input, layout, program}`
    ProverInput,
}

impl OutputShape {
    pub fn label(self) -> &'static str {
        match self {
            OutputShape::ProgramBundle => "program bundle",
            OutputShape::ProverInput => "prover input",
        }
    }
}

#[derive(Serialize)]
struct ProgramBundle<'a> {
    program: &'a Value,
    program_input: &'a Value,
}

#[derive(Serialize)]
struct ProverInput<'a> {
    program_input: &'a Value,
    layout: &'a Value,
    program: &'a Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedDocument {
    pub program: Value,
    pub program_input: Value,
    pub layout: Option<Value>,
}

impl CombinedDocument {
    pub fn shape(&self) -> OutputShape {
        match self.layout {
            Some(_) => OutputShape::ProverInput,
            None => OutputShape::ProgramBundle,
        }
    }

    pub fn to_json_bytes(&self, indent: usize) -> Result<Vec<u8>, CombineError> {
        let encoded = match &self.layout {
            Some(layout) => encode(
                &ProverInput {
                    program_input: &self.program_input,
                    layout,
                    program: &self.program,
                },
                indent,
            ),
            None => encode(
                &ProgramBundle {
                    program: &self.program,
                    program_input: &self.program_input,
                },
                indent,
            ),
        };
        encoded.map_err(CombineError::Serialize)
    }
}

fn encode<T: Serialize>(value: &T, indent: usize) -> Result<Vec<u8>, serde_json::Error> {
    if indent == 0 {
        return serde_json::to_vec(value);
    }
    let indent = vec![b' '; indent];
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
    value.serialize(&mut serializer)?;
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineSummary {
    pub shape: OutputShape,
    pub output: PathBuf,
    pub bytes: usize,
}

/// Load a JSON document, keeping object key order as written.
pub fn read_document(path: &Path, role: DocumentRole) -> Result<Value, CombineError> {
    let bytes = fs::read(path).map_err(|source| CombineError::Read {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_slice(&bytes).map_err(|source| CombineError::Parse {
        role,
        origin: path.display().to_string(),
        source,
    })?;
    tracing::debug!(%role, path = %path.display(), bytes = bytes.len(), "loaded document");
    Ok(value)
}

/// Read both sources, then the layout, then write the combined document.
///
/// Sources are read in order and fully parsed before anything is written; a
/// failure on the program file stops the run before the input file is opened.
pub fn combine(
    program_path: &Path,
    input_path: &Path,
    output_path: &Path,
    options: &CombineOptions,
) -> Result<CombineSummary, CombineError> {
    let start = Instant::now();
    let program = read_document(program_path, DocumentRole::Program)?;
    let program_input = read_document(input_path, DocumentRole::ProgramInput)?;
    let layout = options
        .layout
        .as_ref()
        .map(LayoutSource::resolve)
        .transpose()?;
    if let Some(layout) = &layout {
        layout::warn_if_unknown(layout);
    }

    let document = CombinedDocument {
        program,
        program_input,
        layout,
    };
    let shape = document.shape();
    let bytes = document.to_json_bytes(options.indent)?;
    publish_bytes(output_path, &bytes)?;

    tracing::info!(
        shape = shape.label(),
        output = %output_path.display(),
        bytes = bytes.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "combine complete"
    );
    Ok(CombineSummary {
        shape,
        output: output_path.to_path_buf(),
        bytes: bytes.len(),
    })
}

#[cfg(test)]
#[path = "combine_tests.rs"]
mod tests;
