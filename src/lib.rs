//! Tiling-data header generator
//!
//! Scans a source tree for `*tilingdata.h` description files and compiles
//! their `BEGIN_TILING_DATA_DEF` / `TILING_DATA_FIELD_DEF*` /
//! `END_TILING_DATA_DEF` directives into packed C++ structs collected in a
//! single generated header.

pub mod compiler;
pub mod config;
pub mod emit;
pub mod error;
pub mod header;
pub mod ir;
pub mod lexer;
pub mod locator;
pub mod parser;

pub use compiler::{compile_file, compile_source};
pub use config::GeneratorConfig;
pub use error::{StructureError, StructureErrorKind, TilingError};
pub use header::{assemble, generate, GeneratedHeader};
pub use ir::{Field, Item, StructDef};
pub use locator::Locator;
