//! htmlrefs CLI - build-time rewriting of marked blocks in HTML files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod discover;

#[derive(Parser)]
#[command(name = "htmlrefs")]
#[command(about = "Replace or remove ref blocks in HTML files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to htmlrefs.toml config file
    #[arg(short, long, default_value = "htmlrefs.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default htmlrefs.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Rewrite HTML files
    Build {
        /// Files or directories to process (defaults to files.src in the config)
        paths: Vec<PathBuf>,

        /// Output directory (defaults to files.dest, or rewrite in place)
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Render everything but write nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// List the blocks found in HTML files
    Scan {
        /// Files or directories to scan (defaults to files.src in the config)
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build {
            paths,
            dest,
            dry_run,
        } => {
            commands::build::run(&cli.config, paths, dest, dry_run)?;
        }
        Commands::Scan { paths } => {
            commands::scan::run(&cli.config, paths)?;
        }
    }

    Ok(())
}
