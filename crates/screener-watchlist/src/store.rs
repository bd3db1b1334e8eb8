//! Best-effort persistence of a watchlist to a JSON file.

use crate::{Result, Watchlist, WatchlistError};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// A watchlist file on disk.
///
/// Loading never fails: a missing or unreadable file yields the default
/// watchlist. Saving replaces the file atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    /// A store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored watchlist, falling back to the default on any
    /// problem.
    #[must_use]
    pub fn load(&self) -> Watchlist {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no stored watchlist, starting fresh");
            return Watchlist::default();
        }

        match import_file(&self.path) {
            Ok(list) => list,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable watchlist");
                Watchlist::default()
            }
        }
    }

    /// Write the watchlist, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Io`] if the file cannot be written.
    pub fn save(&self, list: &Watchlist) -> Result<()> {
        export_file(list, &self.path)
    }
}

/// Read and validate a watchlist export.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid export.
pub fn import_file(path: &Path) -> Result<Watchlist> {
    let text = fs::read_to_string(path).map_err(|e| WatchlistError::io(path, e))?;
    Watchlist::import_json(&text)
}

/// Write a watchlist export via a temporary file and rename.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails.
pub fn export_file(list: &Watchlist, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| WatchlistError::io(parent, e))?;
    }

    let json = list.export_json()?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| WatchlistError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| WatchlistError::io(path, e))?;

    debug!(path = %path.display(), tabs = list.tabs().len(), "saved watchlist");
    Ok(())
}
