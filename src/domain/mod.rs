//! Core domain types
//!
//! Defines the file entries read from a repository, the flattened prompt blob
//! and the constants shared by the flattener and the dispatcher.

/// Default Gemini model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default upper bound for a single generation request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Text placed before the flattened files in every prompt.
pub const PROMPT_PREAMBLE: &str = "Here are all the files in the current project:\n";

/// Fence wrapped around each file body in the blob.
pub const FENCE: &str = "```";

/// A tracked file read from the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the flatten root, `/`-separated
    pub path: String,

    /// Raw file content
    pub content: Vec<u8>,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, content: Vec<u8>) -> Self {
        Self { path: path.into(), content }
    }

    /// Render this entry as a blob fragment.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD since the prompt travels as JSON.
    pub fn to_fragment(&self) -> String {
        let body = String::from_utf8_lossy(&self.content);
        format!("\nContent of {}:\n{FENCE}\n{}\n{FENCE}\n", self.path, body)
    }
}

/// Per-file notice emitted while flattening
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlattenProgress {
    /// File classified as binary (or unreadable) and left out
    Skipped(String),
    /// File read and appended to the blob
    Read(String),
}

impl FlattenProgress {
    pub fn path(&self) -> &str {
        match self {
            FlattenProgress::Skipped(path) | FlattenProgress::Read(path) => path,
        }
    }
}

impl std::fmt::Display for FlattenProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlattenProgress::Skipped(path) => write!(f, "skipping {path}"),
            FlattenProgress::Read(path) => write!(f, "reading {path}"),
        }
    }
}

/// Ordered concatenation of file fragments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptBlob {
    text: String,
    included: Vec<String>,
    skipped: Vec<String>,
}

impl PromptBlob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text file's fragment.
    pub fn push_file(&mut self, entry: &FileEntry) {
        self.text.push_str(&entry.to_fragment());
        self.included.push(entry.path.clone());
    }

    /// Record a path that was left out of the blob.
    pub fn record_skip(&mut self, path: impl Into<String>) {
        self.skipped.push(path.into());
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn included(&self) -> &[String] {
        &self.included
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Size of the blob text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }
}

/// One generated result returned by the model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    /// Concatenated text parts of the candidate
    pub text: String,

    /// Why generation stopped, when the service reports it
    pub finish_reason: Option<String>,
}

/// Everything the generation service returned for one prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    pub candidates: Vec<Candidate>,

    /// Set when the prompt itself was blocked
    pub block_reason: Option<String>,
}
