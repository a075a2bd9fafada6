//! Program Loader.
//!
//! Reads assembly from a string or a file and assembles it. Decode errors are
//! batched so callers can report every bad line before anything runs.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::isa::asm::{ParseError, assemble};
use crate::isa::instruction::Instruction;

/// Failure to produce a runnable program.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// One or more lines failed to decode.
    #[error("{}", render_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// The source contains no instructions.
    #[error("program contains no instructions")]
    Empty,
}

fn render_parse_errors(errors: &[ParseError]) -> String {
    let mut out = format!("{} decode error(s):", errors.len());
    for e in errors {
        let _ = write!(out, "\n  {e}");
    }
    out
}

/// Assembles `source` into a program.
pub fn load_program(source: &str) -> Result<Vec<Instruction>, LoadError> {
    let program = assemble(source).map_err(LoadError::Parse)?;
    if program.is_empty() {
        return Err(LoadError::Empty);
    }
    debug!(instructions = program.len(), "program assembled");
    Ok(program)
}

/// Reads and assembles the file at `path`.
pub fn load_program_file(path: impl AsRef<Path>) -> Result<Vec<Instruction>, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_program(&source)
}
