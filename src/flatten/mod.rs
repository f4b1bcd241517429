//! Repository flattening
//!
//! Walks the tracked files of a repository in index order and concatenates
//! every text file into a single [`PromptBlob`]. Binary and unreadable files
//! are skipped; any other filesystem failure aborts the scan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{FileEntry, FlattenProgress, PromptBlob};
use crate::utils::is_binary_file;

pub mod listing;

pub use listing::list_tracked_files;

/// Errors raised while flattening a repository
#[derive(Debug, Error)]
pub enum FlattenError {
    /// The root does not exist, is not a directory or cannot be accessed.
    #[error("cannot access directory {}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No repository encloses the root, or its index cannot be read.
    #[error("failed to list tracked files in {}: {message}", path.display())]
    Listing { path: PathBuf, message: String },

    /// A tracked file could not be stat'ed (e.g. deleted from the worktree).
    #[error("failed to stat {path}")]
    Stat {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A file classified as text could not be read.
    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Flatten the tracked text files under `root` into a prompt blob.
///
/// `on_progress` is called once per listed file, after the decision for that
/// file is made. The process working directory is left untouched.
pub fn flatten<F>(root: &Path, mut on_progress: F) -> Result<PromptBlob, FlattenError>
where
    F: FnMut(&FlattenProgress),
{
    let root = resolve_root(root)?;
    let files = list_tracked_files(&root)?;

    let mut blob = PromptBlob::new();
    for relative in files.into_iter().filter(|p| !p.is_empty()) {
        let full_path = root.join(&relative);

        if let Err(source) = fs::metadata(&full_path) {
            return Err(FlattenError::Stat { path: relative, source });
        }

        if is_binary_file(&full_path) {
            let notice = FlattenProgress::Skipped(relative);
            tracing::debug!("Skipping binary file {}", notice.path());
            blob.record_skip(notice.path());
            on_progress(&notice);
            continue;
        }

        let content = match fs::read(&full_path) {
            Ok(content) => content,
            Err(source) => return Err(FlattenError::Read { path: relative, source }),
        };
        if std::str::from_utf8(&content).is_err() {
            tracing::warn!("{} is not valid UTF-8; invalid sequences will be replaced", relative);
        }

        let entry = FileEntry::new(relative, content);
        blob.push_file(&entry);
        on_progress(&FlattenProgress::Read(entry.path));
    }

    tracing::info!(
        "Flattened {} files ({} skipped, {} bytes)",
        blob.included().len(),
        blob.skipped().len(),
        blob.len()
    );
    Ok(blob)
}

fn resolve_root(root: &Path) -> Result<PathBuf, FlattenError> {
    let directory_err =
        |source: io::Error| FlattenError::Directory { path: root.to_path_buf(), source };

    let resolved = root.canonicalize().map_err(directory_err)?;
    let metadata = fs::metadata(&resolved).map_err(directory_err)?;
    if !metadata.is_dir() {
        return Err(directory_err(io::Error::new(io::ErrorKind::InvalidInput, "not a directory")));
    }
    // Listing the directory surfaces permission problems before git does.
    fs::read_dir(&resolved).map_err(directory_err)?;
    Ok(resolved)
}
