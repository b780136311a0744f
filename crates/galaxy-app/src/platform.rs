//! Platform directory resolution.

use std::io;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "galaxy-viewer";

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where the viewer keeps its files.
///
/// `config_dir` holds `config.ron`; `log_dir` holds the debug-build JSON log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the OS configuration directory without touching the disk.
    pub fn resolve() -> Result<Self, PlatformError> {
        let base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        Ok(Self::resolve_with_root(&base))
    }

    /// Directories for an explicit config location, e.g. from `--config`.
    pub fn from_config_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            log_dir: config_dir.join("logs"),
        }
    }

    /// Directories rooted under `root`, laid out as on a real system.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self::from_config_dir(&root.join(APP_NAME))
    }

    /// Create all directories on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
