//! `bibstat explore` - filter articles by keyword and author tokens

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;

use bibstat_archive::view::by_year;
use bibstat_archive::{Archive, Field, Selection};
use bibstat_core::{ProgressContext, fmt_num};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ExploreArgs {
    /// Keyword to select (repeatable, OR)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Author to select (repeatable, OR)
    #[arg(short, long = "author")]
    pub authors: Vec<String>,

    /// Also list the selected articles
    #[arg(long)]
    pub list: bool,
}

fn warn_unknown(archive: &Archive, field: Field, tokens: &[String]) {
    for token in tokens {
        if archive.summaries(field).get(token).is_none() {
            log::warn!("Unknown {field} token: {token:?}");
        }
    }
}

pub fn run(args: ExploreArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let archive = super::load_archive(config, progress)?;

    warn_unknown(&archive, Field::Keywords, &args.keywords);
    warn_unknown(&archive, Field::Authors, &args.authors);

    let selection = Selection {
        keywords: args.keywords,
        authors: args.authors,
    };
    if selection.is_everything() {
        log::debug!("No tokens selected, showing all articles");
    }
    let hits = selection.apply(archive.articles());

    println!("{} articles selected", fmt_num(hits.len()));
    if hits.is_empty() {
        return Ok(());
    }

    let mut table = super::new_table(&["Year", "Articles", "Pages"]);
    for bucket in by_year(&hits) {
        table.add_row(vec![
            Cell::new(bucket.year),
            Cell::new(bucket.articles),
            Cell::new(bucket.pages),
        ]);
    }
    println!("{table}");

    if args.list {
        let mut list = super::new_table(&["Year", "Pages", "Title", "Authors", "PID"]);
        for a in &hits {
            list.add_row(vec![
                Cell::new(a.year),
                Cell::new(a.page_count().map(|p| p.to_string()).unwrap_or_default()),
                Cell::new(&a.title),
                Cell::new(a.authors.join("; ")),
                Cell::new(&a.pid),
            ]);
        }
        println!("{list}");
    }
    Ok(())
}
