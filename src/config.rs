//! Generator configuration.
//!
//! Every knob the locator, compiler and assembler need lives in one
//! immutable [`GeneratorConfig`]. The defaults reproduce the header the
//! kernel build has always consumed; a TOML file may override them:
//!
//! ```toml
//! suffix = "tilingdata.h"
//! pack-alignment = 8
//! include-guard = "__TIKCFW_KERNEL_TILING_H_"
//! debug-macro = "ASCENDC_CPU_DEBUG"
//! debug-includes = ["cstdint", "cstring"]
//! strict = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::TilingError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// File-name suffix marking a description file.
    pub suffix: String,

    /// Alignment passed to `#pragma pack(push, N)`.
    pub pack_alignment: u32,

    /// Include-guard macro wrapping the whole header.
    pub include_guard: String,

    /// Macro enabling the debug-mode include block.
    pub debug_macro: String,

    /// Standard headers included in debug mode. Empty drops the block.
    pub debug_includes: Vec<String>,

    /// Reject malformed nesting and arity instead of emitting it as-is.
    pub strict: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            suffix: "tilingdata.h".to_string(),
            pack_alignment: 8,
            include_guard: "__TIKCFW_KERNEL_TILING_H_".to_string(),
            debug_macro: "ASCENDC_CPU_DEBUG".to_string(),
            debug_includes: vec!["cstdint".to_string(), "cstring".to_string()],
            strict: true,
        }
    }
}

impl GeneratorConfig {
    /// Load a config file, or return the default if `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, TilingError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| {
            TilingError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: GeneratorConfig = toml::from_str(&content).map_err(|e| {
            TilingError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TilingError> {
        if self.suffix.is_empty() {
            return Err(TilingError::Config("suffix must not be empty".into()));
        }
        if !(1..=16).contains(&self.pack_alignment) || !self.pack_alignment.is_power_of_two() {
            return Err(TilingError::Config(format!(
                "pack-alignment must be a power of two between 1 and 16, got {}",
                self.pack_alignment
            )));
        }
        if self.include_guard.is_empty() {
            return Err(TilingError::Config("include-guard must not be empty".into()));
        }
        if !self.debug_includes.is_empty() && self.debug_macro.is_empty() {
            return Err(TilingError::Config(
                "debug-macro must be set when debug-includes is non-empty".into(),
            ));
        }
        Ok(())
    }

    /// Text preceding all struct definitions.
    pub fn prologue(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("#ifndef {}\n", self.include_guard));
        out.push_str(&format!("#define {}\n\n", self.include_guard));
        if !self.debug_includes.is_empty() {
            out.push_str(&format!("#if defined({})\n", self.debug_macro));
            for include in &self.debug_includes {
                out.push_str(&format!("#include <{}>\n", include));
            }
            out.push_str("#endif\n\n");
        }
        out
    }

    /// Text following all struct definitions.
    pub fn epilogue(&self) -> String {
        "#endif\n".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prologue_matches_kernel_header() {
        let cfg = GeneratorConfig::default();
        assert_eq!(
            cfg.prologue(),
            "#ifndef __TIKCFW_KERNEL_TILING_H_\n\
             #define __TIKCFW_KERNEL_TILING_H_\n\
             \n\
             #if defined(ASCENDC_CPU_DEBUG)\n\
             #include <cstdint>\n\
             #include <cstring>\n\
             #endif\n\
             \n"
        );
        assert_eq!(cfg.epilogue(), "#endif\n");
    }

    #[test]
    fn empty_includes_drop_debug_block() {
        let cfg = GeneratorConfig {
            debug_includes: Vec::new(),
            ..Default::default()
        };
        assert!(!cfg.prologue().contains("#if defined"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: GeneratorConfig = toml::from_str("pack-alignment = 4\nstrict = false\n").unwrap();
        assert_eq!(cfg.pack_alignment, 4);
        assert!(!cfg.strict);
        assert_eq!(cfg.suffix, "tilingdata.h");
    }

    #[test]
    fn rejects_bad_alignment() {
        let cfg = GeneratorConfig {
            pack_alignment: 6,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(TilingError::Config(_))));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GeneratorConfig::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, TilingError::Config(_)));
    }

    #[test]
    fn load_none_is_default() {
        assert_eq!(GeneratorConfig::load(None).unwrap(), GeneratorConfig::default());
    }
}
