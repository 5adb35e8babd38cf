//! `bibstat article` - article detail with resolver and full-text links

use anyhow::Result;
use clap::Args;

use bibstat_core::ProgressContext;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ArticleArgs {
    /// Article PID
    pub pid: String,
}

pub fn run(args: ArticleArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let archive = super::load_archive(config, progress)?;

    let Some(article) = archive.article(&args.pid) else {
        println!("No article with PID {:?}", args.pid);
        return Ok(());
    };
    log::debug!("Selected article: {} ({})", article.title, article.nbn);

    let links = config.link_templates().render(article);
    let pages = article
        .page_count()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut table = super::new_table(&["Field", "Value"]);
    let rows = [
        ("Title", article.title.clone()),
        ("Year", article.year.to_string()),
        ("Pages", pages),
        ("Authors", article.authors.join("; ")),
        ("Keywords", article.keywords.join("; ")),
        ("NBN", article.nbn.clone()),
        ("Resolver", links.resolver),
        ("PDF", links.pdf),
        ("Voyant", links.voyant),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }
    println!("{table}");
    Ok(())
}
