use crate::error::{ReplaceError, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

/// A validated replacement run
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Root of the tree to scan
    pub target_directory: PathBuf,

    /// Literal text to search for
    pub search_text: String,

    /// Text written in place of every occurrence
    pub replacement_text: String,
}

/// Command line arguments parser
#[derive(Parser, Debug)]
#[command(author, version, about = "Replace a literal string in every .txt file under a directory")]
#[command(name = "txtswap")]
pub struct Args {
    /// Directory to scan recursively
    pub directory: PathBuf,

    /// Text to replace
    #[arg(allow_hyphen_values = true)]
    pub old_text: String,

    /// Replacement text
    #[arg(allow_hyphen_values = true)]
    pub new_text: String,

    /// Directory where the run's log file is written
    #[arg(long = "log-dir", value_name = "DIR", default_value = ".")]
    pub log_dir: PathBuf,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parse command line arguments and validate them
///
/// Wrong arity is reported by clap, which prints the usage and exits.
pub fn parse() -> Result<(Args, Invocation)> {
    let args = Args::parse();
    let invocation = validate_args(&args)?;
    Ok((args, invocation))
}

/// Validate parsed arguments and check the target directory
///
/// # Arguments
/// * `args` - Parsed command line arguments
///
/// # Returns
/// * `Result<Invocation>` - The run description if every precondition holds
pub fn validate_args(args: &Args) -> Result<Invocation> {
    if args.old_text.is_empty() {
        return Err(ReplaceError::Usage("empty search text is not allowed".to_string()));
    }

    check_directory(&args.directory)?;

    Ok(Invocation {
        target_directory: args.directory.clone(),
        search_text: args.old_text.clone(),
        replacement_text: args.new_text.clone(),
    })
}

/// Verify that `dir` exists and resolves to a directory
pub fn check_directory(dir: &Path) -> Result<()> {
    let metadata = fs::metadata(dir).map_err(|e| ReplaceError::Path {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !metadata.is_dir() {
        return Err(ReplaceError::Path {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(())
}
