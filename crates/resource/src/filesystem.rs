//! Directory-backed asset provider.
//!
//! Asset paths are resolved relative to a fixed asset directory (typically the
//! directory the application serves its static files from). Paths that would
//! leave that directory are refused.

use fieldreport_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Loads assets from a directory on the local filesystem.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    asset_dir: PathBuf,
    /// Canonical form of `asset_dir`, if it existed at construction time.
    canonical_dir: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(asset_dir: P) -> Self {
        let asset_dir = asset_dir.as_ref().to_path_buf();
        let canonical_dir = asset_dir.canonicalize().ok();
        Self {
            asset_dir,
            canonical_dir,
        }
    }

    /// Resolves `path` inside the asset directory, or `None` if it escapes it.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute() {
            return None;
        }
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        let full_path = self.asset_dir.join(relative);
        match (full_path.canonicalize(), &self.canonical_dir) {
            // Symlinks may still point outside the directory.
            (Ok(canonical), Some(base)) if !canonical.starts_with(base) => None,
            (Ok(canonical), Some(_)) => Some(canonical),
            _ => Some(full_path),
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve(path)
            .ok_or_else(|| ResourceError::OutsideAssetDir(path.to_string()))?;

        log::debug!("Loading asset '{}' from {}", path, full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::Unreadable {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}
