//! File discovery module for station file directories
//!
//! Lists the regular files of a single directory. Station corpora are flat,
//! so there is no recursion; non-`.dat` files are returned as well and get
//! flagged during validation.

use crate::error::Result;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// File discovery component for a station directory
#[derive(Debug)]
pub struct FileDiscovery {
    directory: PathBuf,
    non_data_count: usize,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            non_data_count: 0,
        }
    }

    /// Number of discovered files without the data extension
    pub fn non_data_count(&self) -> usize {
        self.non_data_count
    }

    /// Discover every regular file in the directory, sorted by path
    ///
    /// Only failing to open the directory is an error. An entry that cannot
    /// be inspected is skipped, and a listing that breaks off part way
    /// returns the files seen so far.
    pub async fn discover_files(&mut self, data_extension: &str) -> Result<Vec<PathBuf>> {
        debug!("Listing station files in: {}", self.directory.display());

        let mut files = Vec::new();
        let mut dir = fs::read_dir(&self.directory).await?;

        loop {
            let entry = match dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(
                        "Listing of {} stopped after {} files: {}",
                        self.directory.display(),
                        files.len(),
                        e
                    );
                    break;
                }
            };
            let file_type = entry.file_type().await;
            if let Some(path) = keep_regular_file(entry.path(), file_type) {
                files.push(path);
            }
        }

        files.sort();
        self.non_data_count = files
            .iter()
            .filter(|path| !is_data_file(path, data_extension))
            .count();

        debug!(
            "Found {} files ({} without .{} extension)",
            files.len(),
            self.non_data_count,
            data_extension
        );

        Ok(files)
    }
}

/// Keep `path` when it is a regular file; entries that cannot be stat'ed are skipped
fn keep_regular_file(path: PathBuf, file_type: io::Result<std::fs::FileType>) -> Option<PathBuf> {
    match file_type {
        Ok(file_type) if file_type.is_file() => Some(path),
        Ok(_) => None,
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

/// Check if a path carries the data file extension
fn is_data_file(path: &Path, data_extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == data_extension)
}
