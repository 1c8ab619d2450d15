//! CLI argument parsing for the combiner.
//!
//! Positional handling stays here so `combine::combine` never sees argv.
use crate::combine::{CombineOptions, DEFAULT_INDENT};
use crate::layout::LayoutSource;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "combine",
    version,
    about = "Combine a program and its input into one JSON document",
    after_help = concat!(
        "Forms:\n",
        "  combine <program> <input> <output>           Write {program, program_input}\n",
        "  combine <program> <input> <layout> <output>  Write {program_input, layout, program}\n",
        "\n",
        "Examples:\n",
        "  combine program.json input.json out.json\n",
        "  combine program.json input.json recursive prover_input.json\n",
        "  combine program.json input.json --layout-file layout.json prover_input.json"
    )
)]
pub struct RootArgs {
    /// PROGRAM INPUT [LAYOUT] OUTPUT
    #[arg(value_name = "ARG", num_args = 3..=4, required = true)]
    pub positionals: Vec<OsString>,

    /// Spaces per indent level in the output (0 for compact JSON)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    /// Parse the positional layout value as JSON instead of embedding a string
    #[arg(long, conflicts_with = "layout_file")]
    pub layout_json: bool,

    /// Load the layout value from a JSON file
    #[arg(long, value_name = "PATH")]
    pub layout_file: Option<PathBuf>,

    /// Emit debug logging to stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Fully resolved paths and options for one combine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: CombineOptions,
}

impl RootArgs {
    pub fn into_invocation(self) -> Result<Invocation, clap::Error> {
        let (program, input, literal, output) = match self.positionals.as_slice() {
            [program, input, output] => (program, input, None, output),
            [program, input, layout, output] => (program, input, Some(layout), output),
            other => {
                return Err(usage_error(
                    ErrorKind::WrongNumberOfValues,
                    format!("expected 3 or 4 positional arguments, got {}", other.len()),
                ))
            }
        };

        let layout = match (literal, self.layout_file) {
            (Some(_), Some(_)) => {
                return Err(usage_error(
                    ErrorKind::ArgumentConflict,
                    "--layout-file cannot be combined with a positional layout value",
                ))
            }
            (Some(raw), None) => {
                let text = layout_text(raw)?;
                if self.layout_json {
                    Some(LayoutSource::Json(text))
                } else {
                    Some(LayoutSource::Literal(text))
                }
            }
            (None, Some(path)) => Some(LayoutSource::File(path)),
            (None, None) if self.layout_json => {
                return Err(usage_error(
                    ErrorKind::MissingRequiredArgument,
                    "--layout-json requires a positional layout value",
                ))
            }
            (None, None) => None,
        };

        Ok(Invocation {
            program: PathBuf::from(program),
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            options: CombineOptions {
                layout,
                indent: self.indent,
            },
        })
    }
}

// Paths may be any OS string; the layout literal is embedded as JSON text.
fn layout_text(raw: &OsString) -> Result<String, clap::Error> {
    raw.to_str()
        .map(str::to_string)
        .ok_or_else(|| usage_error(ErrorKind::InvalidUtf8, "layout value must be valid UTF-8"))
}

fn usage_error(kind: ErrorKind, message: impl std::fmt::Display) -> clap::Error {
    RootArgs::command().error(kind, message)
}
