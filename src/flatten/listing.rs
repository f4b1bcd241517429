//! Tracked-file listing backed by libgit2

use git2::Repository;
use std::path::{Component, Path};

use super::FlattenError;

/// List the files tracked in the index under `root`.
///
/// Paths are relative to `root`, `/`-separated and in index order, which is
/// the order `git ls-files` prints them in. `root` must already be canonical.
pub fn list_tracked_files(root: &Path) -> Result<Vec<String>, FlattenError> {
    let listing_err = |message: String| FlattenError::Listing { path: root.to_path_buf(), message };

    let repo = Repository::discover(root).map_err(|e| listing_err(e.message().to_string()))?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| listing_err("repository has no working tree".to_string()))?;
    let workdir = workdir
        .canonicalize()
        .map_err(|e| listing_err(format!("cannot resolve working tree: {e}")))?;

    let prefix = index_prefix(root, &workdir).ok_or_else(|| {
        listing_err(format!("not inside the working tree of {}", workdir.display()))
    })?;

    let index = repo.index().map_err(|e| listing_err(e.message().to_string()))?;

    let mut files: Vec<String> = Vec::with_capacity(index.len());
    for entry in index.iter() {
        let path = String::from_utf8_lossy(&entry.path);
        let Some(relative) = strip_index_prefix(&path, &prefix) else {
            continue;
        };
        // Conflicted paths appear once per stage.
        if files.last().map(String::as_str) == Some(relative) {
            continue;
        }
        files.push(relative.to_string());
    }

    tracing::debug!("Listed {} tracked files under {}", files.len(), root.display());
    Ok(files)
}

/// Index path prefix (`a/b/`) for `root`, or `None` when `root` is outside the
/// working tree or inside the `.git` directory.
fn index_prefix(root: &Path, workdir: &Path) -> Option<String> {
    let relative = root.strip_prefix(workdir).ok()?;
    let mut prefix = String::new();
    for component in relative.components() {
        let Component::Normal(part) = component else {
            return None;
        };
        let part = part.to_str()?;
        if prefix.is_empty() && part == ".git" {
            return None;
        }
        prefix.push_str(part);
        prefix.push('/');
    }
    Some(prefix)
}

fn strip_index_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        Some(path)
    } else {
        path.strip_prefix(prefix)
    }
}
