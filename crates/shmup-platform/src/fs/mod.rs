//! Filesystem service.
//!
//! Files are opened through a [`FileSystem`] rooted at a base directory and
//! usually buffered whole into memory with [`FileHandle::upload_to_ram`]
//! before the engine parses them.

mod error;
mod handle;
mod path;

pub use error::FsError;
pub use handle::FileHandle;
pub use path::{extension, file_name_only};

use std::path::{Path, PathBuf};

/// Default game data directory, relative to the base directory.
pub const DEFAULT_GAME_DIR: &str = "data/";

/// Resolves engine paths and opens files.
#[derive(Debug, Clone)]
pub struct FileSystem {
    base: PathBuf,
    game_dir: PathBuf,
}

impl FileSystem {
    /// Filesystem rooted at `base`. Relative paths passed to [`open`](Self::open)
    /// are resolved against it.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            game_dir: PathBuf::from(DEFAULT_GAME_DIR),
        }
    }

    pub fn with_game_dir(mut self, game_dir: impl Into<PathBuf>) -> Self {
        self.game_dir = game_dir.into();
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }

    /// Opens `path` for reading. Nothing is buffered yet.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<FileHandle, FsError> {
        let full = self.resolve(path);
        log::debug!("opening '{}'", full.display());

        match FileHandle::open(&full) {
            Ok(handle) => Ok(handle),
            Err(e) => {
                log::warn!("failed to open '{}': {e}", full.display());
                Err(e)
            }
        }
    }

    /// Opens `path` and buffers it whole.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<FileHandle, FsError> {
        let mut handle = self.open(path)?;
        handle.upload_to_ram()?;
        Ok(handle)
    }
}

impl Default for FileSystem {
    /// Rooted at the process working directory.
    fn default() -> Self {
        Self::new(".")
    }
}
