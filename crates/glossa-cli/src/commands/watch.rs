//! Implementation of the `glossa watch` command.

use std::fs::canonicalize;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use miette::{miette, Result};
use tracing::info;

use crate::watch::{watch, PathFilter, Regenerator};

/// Arguments for the watch command.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Shell command that regenerates the translation files
    #[arg(long, env = "GLOSSA_WATCH_COMMAND")]
    pub command: String,

    /// Glob pattern, relative to the root, of files that trigger a run (repeatable)
    #[arg(long = "pattern", default_value = "lang/**/*.php")]
    pub patterns: Vec<String>,

    /// Directory to watch; the command also runs here
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Quiet period before a batch of changes triggers a run
    #[arg(long, env = "GLOSSA_DEBOUNCE_MS", default_value_t = 500)]
    pub debounce_ms: u64,

    /// Do not run the command once at startup
    #[arg(long)]
    pub no_initial: bool,
}

/// Run the watch command. Returns only when the watcher shuts down.
pub fn run_watch(args: WatchArgs) -> Result<i32> {
    let root = canonicalize(&args.root)
        .map_err(|e| miette!("Cannot watch {}: {}", args.root.display(), e))?;
    let filter = PathFilter::new(&root, &args.patterns)
        .map_err(|e| miette!("Invalid watch pattern: {}", e))?;
    let regenerator = Regenerator::new(args.command, &root);

    info!(
        patterns = ?args.patterns,
        "regenerating with `{}`",
        regenerator.command()
    );
    if !args.no_initial {
        regenerator.trigger();
    }

    watch(&filter, &regenerator, Duration::from_millis(args.debounce_ms))
        .map_err(|e| miette!("File watcher failed: {}", e))?;

    Ok(exitcode::OK)
}
