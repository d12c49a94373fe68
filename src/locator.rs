use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::GeneratorConfig;

/// Locator walks a source tree for tiling description files.
///
/// ```text
/// src-root/
/// ├── add/add_custom_tilingdata.h      → selected
/// ├── add/add_custom.cpp               → ignored
/// └── matmul/v2/mm_tilingdata.h        → selected
/// ```
///
/// The result is sorted by the path's byte string so repeated runs produce
/// the same header regardless of directory listing order.
pub struct Locator;

impl Locator {
    /// Return every file under `root` whose name ends with the configured
    /// suffix. A missing root yields an empty list.
    pub fn locate(root: &Path, config: &GeneratorConfig) -> Vec<PathBuf> {
        if !root.is_dir() {
            debug!("Locator: source root {:?} does not exist, skipping", root);
            return Vec::new();
        }

        let mut files = Vec::new();
        Self::walk(root, &config.suffix, &mut files);
        files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        debug!("Locator: found {} description files under {:?}", files.len(), root);
        files
    }

    fn walk(dir: &Path, suffix: &str, files: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Locator: cannot read {:?}: {}, skipping", dir, e);
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Locator: bad entry in {:?}: {}, skipping", dir, e);
                    continue;
                }
            };
            let path = entry.path();
            // Symlinked directories are not followed.
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                Self::walk(&path, suffix, files);
            } else if Self::matches(&path, suffix) && path.is_file() {
                files.push(path);
            }
        }
    }

    fn matches(path: &Path, suffix: &str) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().ends_with(suffix))
            .unwrap_or(false)
    }
}
