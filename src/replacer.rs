use crate::error::{ReplaceError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A candidate file that contained at least one occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Path of the rewritten file
    pub path: PathBuf,

    /// Byte offsets of each occurrence in the original content
    pub offsets: Vec<usize>,
}

/// Find every occurrence of `needle` in `content`
///
/// Matches are leftmost-first and non-overlapping, the same matches
/// `str::replace` substitutes. Offsets are byte positions.
///
/// # Arguments
/// * `content` - The content to scan
/// * `needle` - The literal text to look for
///
/// # Returns
/// * `Vec<usize>` - Offsets in increasing order
pub fn find_offsets(content: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }

    content.match_indices(needle).map(|(offset, _)| offset).collect()
}

/// Replace content in a single file
///
/// The file is only rewritten when the search text occurs in it. Its
/// permission bits are restored after the write.
///
/// # Arguments
/// * `path` - File to process
/// * `from` - The string to replace
/// * `to` - The replacement string
///
/// # Returns
/// * `Result<Option<FileRecord>>` - The record of a rewritten file, `None` if untouched
pub fn replace_in_file(path: &Path, from: &str, to: &str) -> Result<Option<FileRecord>> {
    let permissions = fs::metadata(path)
        .map_err(|e| ReplaceError::traversal("failed to stat", path, e))?
        .permissions();

    let content = fs::read_to_string(path)
        .map_err(|e| ReplaceError::traversal("failed to read", path, e))?;

    let offsets = find_offsets(&content, from);
    if offsets.is_empty() {
        return Ok(None);
    }

    let replaced = content.replace(from, to);
    fs::write(path, replaced)
        .map_err(|e| ReplaceError::traversal("failed to write", path, e))?;
    fs::set_permissions(path, permissions)
        .map_err(|e| ReplaceError::traversal("failed to restore permissions on", path, e))?;

    Ok(Some(FileRecord {
        path: path.to_path_buf(),
        offsets,
    }))
}
