mod args;
mod error;
mod replacer;
mod report;
mod scanner;

use anyhow::{Context, Result};
use chrono::Local;
use log::{error, info};
use report::ReplaceLog;
use std::fs;
use std::process;

/// Main entry point of the application
/// Handles argument parsing and executes the program with error handling
fn main() {
    let (args, invocation) = match args::parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            init_logger(false);
            error!("{}", e);
            process::exit(1);
        }
    };

    init_logger(args.verbose);

    // The log file is dropped (and flushed) before we get here
    if let Err(e) = run(&args, &invocation) {
        error!("{:#}", e);
        process::exit(1);
    }
}

/// Configure diagnostics on stderr, honouring `RUST_LOG` when it is set
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}

/// Runs the replacement over the whole tree
///
/// # Arguments
/// * `args` - Parsed command line arguments
/// * `invocation` - Validated run description
fn run(args: &args::Args, invocation: &args::Invocation) -> Result<()> {
    let started = Local::now();
    let (mut log, log_path) = ReplaceLog::create_in(
        &args.log_dir,
        &started,
        &invocation.search_text,
        &invocation.replacement_text,
    )?;

    // The log may sit inside the target tree; it must never be rewritten
    let own_log = fs::canonicalize(&log_path)
        .with_context(|| format!("Failed to resolve log file: {}", log_path.display()))?;

    let outcome = scanner::scan_and_replace(invocation, &mut log, Some(&own_log));

    // Flush on both paths so the blocks written before a failure survive
    let flushed = log.flush();

    let summary = outcome.with_context(|| {
        format!("Aborted while processing {}", invocation.target_directory.display())
    })?;
    flushed.with_context(|| format!("Failed to flush log file: {}", log_path.display()))?;

    info!(
        "Scanned {} file(s), modified {}, {} replacement(s); log written to {}",
        summary.files_scanned,
        summary.files_modified,
        summary.replacements,
        log_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;
    use tempfile::TempDir;

    fn parse(target: &Path, log_dir: &Path, from: &str, to: &str) -> (args::Args, args::Invocation) {
        let args = args::Args::try_parse_from([
            "txtswap",
            "--log-dir",
            log_dir.to_str().unwrap(),
            target.to_str().unwrap(),
            from,
            to,
        ])
        .unwrap();
        let invocation = args::validate_args(&args).unwrap();
        (args, invocation)
    }

    fn single_log(dir: &Path) -> String {
        let logs: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map_or(false, |name| name.starts_with("log-"))
            })
            .collect();
        assert_eq!(logs.len(), 1);
        fs::read_to_string(&logs[0]).unwrap()
    }

    #[test]
    fn test_log_is_flushed_when_walk_aborts() {
        let tree = TempDir::new().unwrap();
        let log_dir = TempDir::new().unwrap();
        fs::write(tree.path().join("a.txt"), "foo bar foo").unwrap();
        fs::write(tree.path().join("b.txt"), [0xff, 0xfe, b'f', b'o', b'o']).unwrap();

        let (args, invocation) = parse(tree.path(), log_dir.path(), "foo", "baz");
        assert!(run(&args, &invocation).is_err());

        let log = single_log(log_dir.path());
        assert!(log.contains(&format!("File: {}", tree.path().join("a.txt").display())));
        assert!(log.contains("  8: \"foo\" -> \"baz\""));
        assert!(!log.contains("b.txt"));
        assert!(!log.contains("No replacements made"));
    }

    #[test]
    fn test_log_inside_target_tree_is_left_alone() {
        let tree = TempDir::new().unwrap();
        fs::write(tree.path().join("a.txt"), "foo").unwrap();
        fs::write(tree.path().join("z.txt"), "foo").unwrap();

        let (args, invocation) = parse(tree.path(), tree.path(), "foo", "x");
        run(&args, &invocation).unwrap();

        let log = single_log(tree.path());
        assert_eq!(log.matches("File: ").count(), 2);
        assert!(!log.contains("log-"));
        assert_eq!(log.matches("\"foo\" -> \"x\"").count(), 2);
    }
}
