//! ctree - copy and remove directory trees
//!
//! A small command-line front-end for the treeutil library.

use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use thiserror::Error;
use tracing::Level;
use treeutil::{CopyTreeBuilder, Error as TreeError, RmTreeOptions, rm_tree};

/// ctree - copy a directory tree with its metadata
///
/// Usage:
///   ctree SOURCE DEST
///   ctree --remove PATH
#[derive(Parser, Debug)]
#[command(name = "ctree", version, about, long_about = None)]
struct Args {
    /// Source directory or file (the tree to delete with --remove)
    source: PathBuf,

    /// Destination path
    #[arg(required_unless_present = "remove", conflicts_with = "remove")]
    dest: Option<PathBuf>,

    /// Recreate symlinks instead of copying their targets
    #[arg(short = 's', long)]
    symlinks: bool,

    /// Skip entries whose name matches GLOB (repeatable)
    #[arg(short = 'i', long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,

    /// Skip symlinks whose target does not exist
    #[arg(long)]
    ignore_dangling_symlinks: bool,

    /// Copy file contents only, without permissions or timestamps
    #[arg(long)]
    content_only: bool,

    /// Remove the SOURCE tree instead of copying it
    #[arg(long)]
    remove: bool,

    /// Keep going and stay silent when a removal step fails
    #[arg(long, requires = "remove")]
    ignore_errors: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Missing destination operand after '{}'", operand.display())]
    MissingDestination { operand: PathBuf },

    #[error("Invalid ignore pattern: {source}")]
    Pattern { source: TreeError },

    #[error("Failed to copy {} to {}: {source}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        source: TreeError,
    },

    #[error("Failed to remove {}: {count} errors", path.display())]
    Remove { path: PathBuf, count: usize },

    #[error("Failed to remove {}: {source}", path.display())]
    RemoveAborted { path: PathBuf, source: TreeError },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(error) = run(args) {
        tracing::error!("{error}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> CliResult<()> {
    if args.remove {
        return remove(args.source, args.ignore_errors);
    }

    let Some(dest) = args.dest else {
        return Err(CliError::MissingDestination {
            operand: args.source,
        });
    };

    let mut builder = CopyTreeBuilder::new(&args.source, &dest);
    if args.symlinks {
        builder = builder.symlinks();
    }
    if !args.ignore.is_empty() {
        builder = builder
            .ignore_patterns(&args.ignore)
            .map_err(|source| CliError::Pattern { source })?;
    }
    if args.ignore_dangling_symlinks {
        builder = builder.ignore_dangling_symlinks();
    }
    if args.content_only {
        builder = builder.content_only();
    }

    tracing::debug!(options = ?builder.options(), "starting copy");

    let written = builder.run().map_err(|source| CliError::Copy {
        src: args.source.clone(),
        dst: dest.clone(),
        source,
    })?;

    tracing::info!(
        "Copied {} to {}",
        args.source.display(),
        written.display()
    );
    Ok(())
}

fn remove(path: PathBuf, ignore_errors: bool) -> CliResult<()> {
    let mut count = 0usize;

    let options = if ignore_errors {
        RmTreeOptions::default().with_ignore_errors()
    } else {
        RmTreeOptions::default().with_on_error(|op, path, error| {
            count += 1;
            tracing::warn!("{op} failed on {}: {error}", path.display());
        })
    };

    rm_tree(&path, options).map_err(|source| CliError::RemoveAborted {
        path: path.clone(),
        source,
    })?;

    if count > 0 {
        return Err(CliError::Remove { path, count });
    }

    tracing::debug!(path = %path.display(), "removed tree");
    Ok(())
}
