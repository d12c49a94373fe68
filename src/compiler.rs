use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::emit;
use crate::error::{StructureError, TilingError};
use crate::parser;

/// Compile description text into struct definitions.
///
/// Text without any recognized directive compiles to an empty string.
/// `config` is used as given; [`crate::assemble`] and [`crate::generate`]
/// validate it first.
pub fn compile_source(source: &str, config: &GeneratorConfig) -> Result<String, StructureError> {
    let items = parser::parse(source, config)?;
    Ok(emit::render(&items))
}

/// Compile one description file. A path that does not exist contributes
/// nothing and is only reported as a warning.
pub fn compile_file(path: &Path, config: &GeneratorConfig) -> Result<String, TilingError> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("no tiling description file at {}, skipping", path.display());
            return Ok(String::new());
        }
        Err(e) => {
            return Err(TilingError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    info!("generating tiling definitions from {}", path.display());
    compile_source(&source, config).map_err(|source| TilingError::Structure {
        path: path.to_path_buf(),
        source,
    })
}
