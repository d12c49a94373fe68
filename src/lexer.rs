//! Lexer for tiling-data description files.
//!
//! Turns raw file text into a flat [`Directive`] stream. A line is a
//! directive when its leading identifier starts with one of the five
//! keywords; every other line (includes, comments, registration macros,
//! blank lines) is skipped without inspection.

use crate::error::{StructureError, StructureErrorKind};

pub const BEGIN: &str = "BEGIN_TILING_DATA_DEF";
pub const FIELD: &str = "TILING_DATA_FIELD_DEF";
pub const FIELD_ARR: &str = "TILING_DATA_FIELD_DEF_ARR";
pub const FIELD_STRUCT: &str = "TILING_DATA_FIELD_DEF_STRUCT";
pub const END: &str = "END_TILING_DATA_DEF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Begin,
    Field,
    FieldArr,
    FieldStruct,
    End,
}

impl DirectiveKind {
    /// Resolve an identifier by keyword prefix. The array and nested
    /// keywords extend the scalar one, so they are tried before it.
    fn from_word(word: &str) -> Option<Self> {
        [
            Self::Begin,
            Self::FieldArr,
            Self::FieldStruct,
            Self::Field,
            Self::End,
        ]
        .into_iter()
        .find(|kind| word.starts_with(kind.keyword()))
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Begin => BEGIN,
            Self::Field => FIELD,
            Self::FieldArr => FIELD_ARR,
            Self::FieldStruct => FIELD_STRUCT,
            Self::End => END,
        }
    }

    /// Number of arguments the directive takes. `None` means any.
    pub fn arity(self) -> Option<usize> {
        match self {
            Self::Begin => Some(1),
            Self::Field | Self::FieldStruct => Some(2),
            Self::FieldArr => Some(3),
            Self::End => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// 1-based source line.
    pub line: usize,
    pub kind: DirectiveKind,
    /// Identifier as written. Differs from `kind.keyword()` when the line
    /// only starts with the keyword, e.g. `TILING_DATA_FIELD_DEF_V2`.
    pub word: String,
    pub args: Vec<String>,
}

pub fn tokenize(source: &str) -> Result<Vec<Directive>, StructureError> {
    let mut directives = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        let word_len = line
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(line.len());
        let word = &line[..word_len];
        let Some(kind) = DirectiveKind::from_word(word) else {
            continue;
        };

        let line_no = idx + 1;
        let args = match argument_list(&line[word_len..]) {
            Some(inner) => split_args(inner),
            // END_TILING_DATA_DEF; is how the macro is usually written.
            None if kind == DirectiveKind::End => Vec::new(),
            None => {
                return Err(StructureError::new(
                    line_no,
                    StructureErrorKind::MissingArguments {
                        directive: kind.keyword(),
                    },
                ))
            }
        };

        directives.push(Directive {
            line: line_no,
            kind,
            word: word.to_string(),
            args,
        });
    }

    Ok(directives)
}

/// Text between the opening paren and the last closing paren.
fn argument_list(rest: &str) -> Option<&str> {
    let rest = rest.trim_start().strip_prefix('(')?;
    let close = rest.rfind(')')?;
    Some(&rest[..close])
}

fn split_args(inner: &str) -> Vec<String> {
    inner.split(',').map(|a| a.trim().to_string()).collect()
}
