use std::{io, path::PathBuf};

use crate::ast::CommandKind;

/// Failures raised while classifying or translating a single VM command.
///
/// None of these are recovered from: the translation aborts and the caller
/// discards whatever output was produced so far.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("`{kind}` has no operand {position}")]
    InvalidOperand { kind: CommandKind, position: u8 },

    #[error("unknown segment `{0}`")]
    UnknownSegment(String),

    #[error("unsupported operation `{0}`")]
    UnsupportedOperation(String),

    #[error("unrecognized command `{0}`")]
    UnrecognizedCommand(String),

    #[error("`{command}` needs {value}, which does not fit in an A-instruction")]
    ImmediateOutOfRange { command: String, value: u32 },

    #[error("index {index} is out of range for segment `{segment}`")]
    IndexOutOfRange { segment: &'static str, index: u16 },

    #[error("{reason} in `{text}`")]
    Syntax { text: String, reason: String },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<TranslateError>,
    },
}

impl TranslateError {
    pub(crate) fn at_line(self, line: usize) -> Self {
        TranslateError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

/// Errors surfaced by the file-level driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is neither a directory nor a .vm file", .0.display())]
    NotVmSource(PathBuf),

    #[error("no .vm files found in {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("{unit}: {source}")]
    Translate {
        unit: String,
        #[source]
        source: TranslateError,
    },
}

pub type Result<T, E = TranslateError> = std::result::Result<T, E>;
