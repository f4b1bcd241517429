//! Binary/text classification

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected by the text heuristic.
pub const SNIFF_LEN: usize = 4;

/// Returns true when every inspected leading byte is printable ASCII.
///
/// Only the first [`SNIFF_LEN`] bytes are inspected. Shorter inputs inspect
/// what they have, so an empty slice counts as text.
pub fn looks_like_text(data: &[u8]) -> bool {
    data.iter().take(SNIFF_LEN).all(|b| (0x20..=0x7e).contains(b))
}

/// Classify a file as binary from its leading bytes.
///
/// A file that cannot be read is reported as binary so callers skip it.
pub fn is_binary_file(path: &Path) -> bool {
    match read_prefix(path) {
        Ok(data) => !looks_like_text(&data),
        Err(err) => {
            tracing::debug!("Treating unreadable {} as binary: {}", path.display(), err);
            true
        }
    }
}

fn read_prefix(path: &Path) -> io::Result<Vec<u8>> {
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?.take(SNIFF_LEN as u64).read_to_end(&mut prefix)?;
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn printable_prefix_is_text() {
        assert!(looks_like_text(b"hello"));
        assert!(looks_like_text(b"~ ~ \x00\x01"));
    }

    #[test]
    fn control_or_high_bytes_in_prefix_are_binary() {
        assert!(!looks_like_text(b"\x00\x01\x02\x03"));
        assert!(!looks_like_text(b"abc\n"));
        assert!(!looks_like_text(b"ab\x7fc"));
        assert!(!looks_like_text("héllo".as_bytes()));
    }

    #[test]
    fn short_inputs_inspect_available_bytes() {
        assert!(looks_like_text(b""));
        assert!(looks_like_text(b"hi"));
        assert!(looks_like_text(b"abc"));
        assert!(!looks_like_text(b"\x00"));
        assert!(!looks_like_text(b"a\n"));
    }

    #[test]
    fn unreadable_path_is_binary() {
        let temp = TempDir::new().expect("temp dir");
        assert!(is_binary_file(&temp.path().join("missing.txt")));
        // A directory cannot be read as a file.
        assert!(is_binary_file(temp.path()));
    }

    #[test]
    fn file_classification_uses_contents() {
        let temp = TempDir::new().expect("temp dir");
        let text = temp.path().join("a.txt");
        let bin = temp.path().join("b.bin");
        std::fs::write(&text, "hello").expect("write text");
        std::fs::write(&bin, [0u8, 1, 2, 3]).expect("write bin");
        assert!(!is_binary_file(&text));
        assert!(is_binary_file(&bin));
    }
}
