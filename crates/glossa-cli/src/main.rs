//! glossa CLI entry point.
//!
//! Provides command-line tools for working with translation tables:
//! - `glossa translate` - Resolve a key the way the runtime does
//! - `glossa check` - Validate translation JSON files
//! - `glossa coverage` - Report missing keys per locale
//! - `glossa watch` - Rerun the translation generator when sources change

mod commands;
mod output;
mod watch;

use std::io;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_coverage, run_translate, run_watch, CheckArgs, CoverageArgs, TranslateArgs,
    WatchArgs,
};
use tracing_subscriber::EnvFilter;

/// Translation table tools.
#[derive(Debug, Parser)]
#[command(name = "glossa")]
#[command(about = "Translation table tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a translation key
    Translate(TranslateArgs),
    /// Check translation JSON files
    Check(CheckArgs),
    /// Report translation coverage across locales
    Coverage(CoverageArgs),
    /// Regenerate translations when language sources change
    Watch(WatchArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `--verbose` forces `debug`; otherwise `RUST_LOG` or `info`.
fn init_logging(verbose: bool, color_when: ColorWhen) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(!matches!(color_when, ColorWhen::Never))
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    init_logging(cli.verbose, cli.color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Translate(args) => run_translate(args),
        Commands::Check(args) => run_check(args),
        Commands::Coverage(args) => run_coverage(args),
        Commands::Watch(args) => run_watch(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
