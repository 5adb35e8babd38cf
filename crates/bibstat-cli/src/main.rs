//! bibstat - author and keyword statistics for a journal archive
//!
//! Turns a bibliographic CSV export into per-author and per-keyword
//! summary tables and browses them from the terminal.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "bibstat")]
#[command(about = "Author and keyword statistics for a journal archive")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./bibstat.toml or ~/.config/bibstat/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Bibliographic CSV export (overrides [input] path)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// NBN substring identifying the institution's own rows
    #[arg(long, global = true)]
    marker: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Write cleaned articles, author and keyword tables
    Prepare(cmd::prepare::PrepareArgs),
    /// Filter articles by keywords and authors, per-year breakdown
    Explore(cmd::explore::ExploreArgs),
    /// Rank authors by article count, page count or active period
    Authors(cmd::summary::RankArgs),
    /// Rank keywords by article count, page count or active period
    Keywords(cmd::summary::RankArgs),
    /// Keywords used by an author, or authors using a keyword
    Usage(cmd::usage::UsageArgs),
    /// Show one article and its outbound links
    Article(cmd::article::ArticleArgs),
    /// List author or keyword vocabulary with frequencies
    Vocab(cmd::vocab::VocabArgs),
    /// Check whether derived tables still match the export
    Status(cmd::status::StatusArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = bibstat_core::ProgressContext::new();

    // TTY: quiet unless --debug, spinners show activity
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = is_tty && !cli.debug;
    bibstat_core::init_logging(quiet, cli.debug, multi);

    let mut config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };
    if let Some(input) = cli.input {
        config.input.path = input;
    }
    if let Some(marker) = cli.marker {
        config.archive.institution_marker = marker;
    }

    match cli.command {
        Command::Prepare(args) => cmd::prepare::run(args, &config, &progress),
        Command::Explore(args) => cmd::explore::run(args, &config, &progress),
        Command::Authors(args) => {
            cmd::summary::run(args, bibstat_archive::Field::Authors, &config, &progress)
        }
        Command::Keywords(args) => {
            cmd::summary::run(args, bibstat_archive::Field::Keywords, &config, &progress)
        }
        Command::Usage(args) => cmd::usage::run(args, &config, &progress),
        Command::Article(args) => cmd::article::run(args, &config, &progress),
        Command::Vocab(args) => cmd::vocab::run(args, &config, &progress),
        Command::Status(args) => cmd::status::run(args, &config),
        Command::Config => cmd::show_config(&config),
    }
}
