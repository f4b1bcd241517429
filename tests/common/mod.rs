//! Shared fixtures for integration tests.

#![allow(dead_code)]

use git2::Repository;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A throwaway repository whose index is built with libgit2.
pub struct TestRepo {
    repo: Repository,
    temp: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("temp dir");
        let repo = Repository::init(temp.path()).expect("init repo");
        Self { repo, temp }
    }

    /// The a.txt / b.bin pair used throughout the tests.
    pub fn with_text_and_binary() -> Self {
        let fixture = Self::new();
        fixture.track("a.txt", b"hello");
        fixture.track("b.bin", &[0x00, 0x01, 0x02, 0x03]);
        fixture
    }

    pub fn track(&self, path: &str, content: &[u8]) {
        let full = self.temp.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&full, content).expect("write file");
        let mut index = self.repo.index().expect("index");
        index.add_path(Path::new(path)).expect("add path");
        index.write().expect("write index");
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }
}

/// A working directory holding a `.env` file.
pub fn env_dir(lines: &[String]) -> TempDir {
    let dir = TempDir::new().expect("temp cwd");
    fs::write(dir.path().join(".env"), lines.join("\n") + "\n").expect("write .env");
    dir
}
