//! Header assembly and persistence.
//!
//! The whole header is built in memory first; the destination is opened only
//! once the text is complete, so a failed run never leaves a half-written
//! file behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::compiler;
use crate::config::GeneratorConfig;
use crate::error::TilingError;
use crate::locator::Locator;

/// The aggregated header and the description files it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHeader {
    pub text: String,
    pub sources: Vec<PathBuf>,
}

impl GeneratedHeader {
    /// Concatenate prologue, the compiled text of `sources` in order, and
    /// epilogue. Any structure error aborts the assembly.
    pub fn from_sources(sources: Vec<PathBuf>, config: &GeneratorConfig) -> Result<Self, TilingError> {
        config.validate()?;
        let mut text = config.prologue();
        for path in &sources {
            text.push_str(&compiler::compile_file(path, config)?);
        }
        text.push_str(&config.epilogue());
        Ok(Self { text, sources })
    }

    /// Write the header to `dest`, creating parent directories and
    /// truncating any existing file.
    pub fn persist(&self, dest: &Path) -> Result<(), TilingError> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| TilingError::Persistence {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(dest, &self.text).map_err(|e| TilingError::Persistence {
            path: dest.to_path_buf(),
            source: e,
        })?;
        debug!("wrote {} bytes to {}", self.text.len(), dest.display());
        Ok(())
    }
}

/// Locate and compile every description file under `root`.
pub fn assemble(root: &Path, config: &GeneratorConfig) -> Result<GeneratedHeader, TilingError> {
    config.validate()?;
    let sources = Locator::locate(root, config);
    info!("found {} tiling description files under {}", sources.len(), root.display());
    GeneratedHeader::from_sources(sources, config)
}

/// Assemble the header for `root` and write it to `dest`.
pub fn generate(root: &Path, dest: &Path, config: &GeneratorConfig) -> Result<GeneratedHeader, TilingError> {
    let header = assemble(root, config)?;
    header.persist(dest)?;
    Ok(header)
}
