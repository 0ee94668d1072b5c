use crate::args::Invocation;
use crate::error::Result;
use crate::replacer;
use crate::report::ReplaceLog;
use ignore::WalkBuilder;
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Extension a file name must end with to be processed
const CANDIDATE_SUFFIX: &str = ".txt";

/// Totals for one run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    /// Candidate files read
    pub files_scanned: usize,

    /// Files rewritten
    pub files_modified: usize,

    /// Occurrences replaced across all files
    pub replacements: usize,
}

/// Whether a file name qualifies for replacement
pub fn is_candidate_name(name: &str) -> bool {
    name.ends_with(CANDIDATE_SUFFIX)
}

/// Lazily walk `root` and yield every candidate file
///
/// Every entry is visited depth-first in file name order: hidden files and
/// ignore files are not honoured, and symlinks are not followed. Walk errors
/// are yielded as they happen. A candidate whose canonical path equals `skip`
/// is left out; the run's own log file is passed here.
pub fn candidates(root: &Path, skip: Option<PathBuf>) -> impl Iterator<Item = Result<PathBuf>> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    walker.filter_map(move |result| match result {
        Ok(entry) => {
            let is_file = entry.file_type().map_or(false, |ft| ft.is_file());
            let is_candidate = entry
                .file_name()
                .to_str()
                .map_or(false, is_candidate_name);
            if !is_file || !is_candidate || is_skipped(entry.path(), skip.as_deref()) {
                return None;
            }
            Some(Ok(entry.into_path()))
        }
        Err(err) => Some(Err(err.into())),
    })
}

fn is_skipped(path: &Path, skip: Option<&Path>) -> bool {
    match skip {
        Some(skip) => fs::canonicalize(path).map_or(false, |p| p == skip),
        None => false,
    }
}

/// Scan a directory tree and replace content in every candidate file
///
/// Stops at the first error; files already rewritten stay rewritten and
/// their blocks stay in the log.
///
/// # Arguments
/// * `invocation` - Validated run description
/// * `log` - Report that receives one block per rewritten file
/// * `skip` - Canonical path of a file never to touch (the log file itself)
///
/// # Returns
/// * `Result<Summary>` - Totals for the run
pub fn scan_and_replace<W: Write>(
    invocation: &Invocation,
    log: &mut ReplaceLog<W>,
    skip: Option<&Path>,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for path in candidates(&invocation.target_directory, skip.map(Path::to_path_buf)) {
        let path = path?;
        summary.files_scanned += 1;

        match replacer::replace_in_file(&path, &invocation.search_text, &invocation.replacement_text)? {
            Some(record) => {
                info!("Replaced text in file {}", record.path.display());
                summary.files_modified += 1;
                summary.replacements += record.offsets.len();
                log.record(&record)?;
            }
            None => debug!("No replacements made in file: {}", path.display()),
        }
    }

    log.finish()?;
    Ok(summary)
}
