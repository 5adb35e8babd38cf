//! `bibstat authors` / `bibstat keywords` - ranked summary tables

use anyhow::Result;
use clap::{Args, ValueEnum};
use comfy_table::Cell;

use bibstat_archive::view::{SortKey, ranked};
use bibstat_archive::{Field, TokenSummary};
use bibstat_core::ProgressContext;

use crate::config::Config;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Article count
    Articles,
    /// Page count
    Pages,
    /// Active period (earliest article first)
    Period,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Articles => Self::Articles,
            SortArg::Pages => Self::Pages,
            SortArg::Period => Self::Period,
        }
    }
}

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Ranking column
    #[arg(short, long, value_enum, default_value = "articles")]
    pub sort: SortArg,

    /// Show at most this many rows
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn summary_row(row: &TokenSummary) -> Vec<Cell> {
    vec![
        Cell::new(&row.token),
        Cell::new(row.articles_total),
        Cell::new(row.pages_total),
        Cell::new(opt(row.earliest_year)),
        Cell::new(opt(row.latest_year)),
        Cell::new(opt(row.active_years())),
        Cell::new(row.article_mean.map(|m| format!("{m:.0}")).unwrap_or_default()),
    ]
}

pub fn run(args: RankArgs, field: Field, config: &Config, progress: &ProgressContext) -> Result<()> {
    let archive = super::load_archive(config, progress)?;
    let table_rows = ranked(archive.summaries(field), args.sort.into(), args.limit);

    let key = match field {
        Field::Authors => "Author",
        Field::Keywords => "Keyword",
    };
    let mut table = super::new_table(&[
        key, "Articles", "Pages", "Earliest", "Latest", "Years", "Mean",
    ]);
    for row in table_rows {
        table.add_row(summary_row(row));
    }
    println!("{table}");
    Ok(())
}
