use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TilingError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{}: {source}", path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: StructureError,
    },

    #[error("failed to read description file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write generated header {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A malformed description, located by its 1-based line number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct StructureError {
    pub line: usize,
    pub kind: StructureErrorKind,
}

impl StructureError {
    pub fn new(line: usize, kind: StructureErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureErrorKind {
    /// `BEGIN_TILING_DATA_DEF` while `open` is still being defined.
    NestedBegin { open: String },
    /// `END_TILING_DATA_DEF` with no struct open.
    UnmatchedEnd,
    /// A field directive outside of any struct.
    FieldOutsideStruct { field: String },
    /// End of file reached while `open` was still being defined.
    Unterminated { open: String },
    ArityMismatch {
        directive: &'static str,
        expected: usize,
        found: usize,
    },
    EmptyArgument {
        directive: &'static str,
        index: usize,
    },
    MissingArguments { directive: &'static str },
    /// Identifier that only starts with a directive keyword.
    MisspelledDirective { word: String, directive: &'static str },
}

impl fmt::Display for StructureErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NestedBegin { open } => {
                write!(f, "struct begins while `{open}` is still open")
            }
            Self::UnmatchedEnd => write!(f, "struct end without a matching begin"),
            Self::FieldOutsideStruct { field } => {
                write!(f, "field `{field}` declared outside of a struct")
            }
            Self::Unterminated { open } => {
                write!(f, "struct `{open}` is never closed")
            }
            Self::ArityMismatch {
                directive,
                expected,
                found,
            } => write!(
                f,
                "{directive} expects {expected} argument(s), found {found}"
            ),
            Self::EmptyArgument { directive, index } => {
                write!(f, "{directive} argument {index} is empty")
            }
            Self::MissingArguments { directive } => {
                write!(f, "{directive} is missing its argument list")
            }
            Self::MisspelledDirective { word, directive } => {
                write!(f, "`{word}` is not a directive (did you mean {directive}?)")
            }
        }
    }
}
