//! `bibstat usage` - co-occurrence lists (keywords by author and vice versa)

use anyhow::{Result, bail};
use clap::Args;
use comfy_table::Cell;

use bibstat_archive::Field;
use bibstat_archive::view::co_occurring;
use bibstat_core::ProgressContext;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct UsageArgs {
    /// Author whose keywords to list
    #[arg(short, long, conflicts_with = "keyword")]
    pub author: Option<String>,

    /// Keyword whose authors to list
    #[arg(short, long)]
    pub keyword: Option<String>,
}

pub fn run(args: UsageArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let (field, token) = match (args.author, args.keyword) {
        (Some(author), _) => (Field::Authors, author),
        (None, Some(keyword)) => (Field::Keywords, keyword),
        (None, None) => bail!("pass --author or --keyword"),
    };

    let archive = super::load_archive(config, progress)?;
    let list = co_occurring(&archive, field, &token);
    if list.is_empty() {
        println!("No {} recorded for {token:?}", field.other());
        return Ok(());
    }

    let header = match field {
        Field::Authors => "Keyword",
        Field::Keywords => "Author",
    };
    let mut table = super::new_table(&[header, "Articles"]);
    for (other, n) in list {
        table.add_row(vec![Cell::new(other), Cell::new(n)]);
    }
    println!("{token}\n{table}");
    Ok(())
}
