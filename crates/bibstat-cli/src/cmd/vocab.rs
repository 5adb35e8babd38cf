//! `bibstat vocab` - selectable tokens with frequencies

use anyhow::Result;
use clap::{Args, ValueEnum};
use comfy_table::Cell;

use bibstat_archive::Field;
use bibstat_core::ProgressContext;

use crate::config::Config;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FieldArg {
    Authors,
    Keywords,
}

impl From<FieldArg> for Field {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Authors => Self::Authors,
            FieldArg::Keywords => Self::Keywords,
        }
    }
}

#[derive(Args, Debug)]
pub struct VocabArgs {
    /// Which field to list
    #[arg(value_enum)]
    pub field: FieldArg,

    /// Show at most this many tokens
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print bare tokens, one per line
    #[arg(long)]
    pub plain: bool,
}

pub fn run(args: VocabArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let archive = super::load_archive(config, progress)?;
    let vocab = archive.vocabulary(args.field.into());
    let limit = args.limit.unwrap_or(usize::MAX);

    if args.plain {
        for token in vocab.tokens().take(limit) {
            println!("{token}");
        }
        return Ok(());
    }

    let mut table = super::new_table(&["Token", "Articles"]);
    for (token, n) in vocab.entries().iter().take(limit) {
        table.add_row(vec![Cell::new(token), Cell::new(n)]);
    }
    println!("{table}");
    Ok(())
}
