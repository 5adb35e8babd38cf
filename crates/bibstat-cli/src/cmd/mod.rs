pub mod article;
pub mod explore;
pub mod prepare;
pub mod status;
pub mod summary;
pub mod usage;
pub mod vocab;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use bibstat_archive::Archive;
use bibstat_core::{ProgressContext, fmt_num};

use crate::config::Config;

/// Load and aggregate the configured export behind a spinner.
pub fn load_archive(config: &Config, progress: &ProgressContext) -> Result<Archive> {
    let path = &config.input.path;
    let pb = progress.stage_line("load");
    pb.set_message(format!("{}", path.display()));

    let archive = Archive::load(path, &config.archive_config())
        .with_context(|| format!("Failed to load export: {}", path.display()));
    pb.finish_and_clear();
    let archive = archive?;

    log::debug!(
        "Archive ready: {} articles",
        fmt_num(archive.articles().len())
    );
    Ok(archive)
}

/// Table with the workspace's rounded UTF-8 preset and cyan headers.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

pub fn show_config(config: &Config) -> Result<()> {
    eprintln!("\n{}", config_table(config));
    Ok(())
}

/// Effective settings, one row each.
pub fn config_table(config: &Config) -> Table {
    let mut table = new_table(&["Setting", "Value"]);

    table.add_row(vec![
        "Input export".to_string(),
        config.input.path.display().to_string(),
    ]);
    table.add_row(vec![
        "Output directory".to_string(),
        config.output.dir.display().to_string(),
    ]);
    table.add_row(vec![
        "Institution marker".to_string(),
        config.archive.institution_marker.clone(),
    ]);
    table.add_row(vec![
        "Author stop words".to_string(),
        config.stop_words.authors.len().to_string(),
    ]);
    table.add_row(vec![
        "Keyword stop words".to_string(),
        config.stop_words.keywords.len().to_string(),
    ]);
    table.add_row(vec!["Resolver link".to_string(), config.links.resolver.clone()]);
    table.add_row(vec!["PDF link".to_string(), config.links.pdf.clone()]);
    table.add_row(vec!["Voyant link".to_string(), config.links.voyant.clone()]);

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_table_lists_every_link_template() {
        let mut config = Config::default();
        config.links.voyant = "https://voyant.example/?input={pdf}".to_string();
        let rendered = config_table(&config).to_string();
        for label in ["Resolver link", "PDF link", "Voyant link"] {
            assert!(rendered.contains(label), "{label} missing");
        }
        assert!(rendered.contains("https://voyant.example/?input={pdf}"));
    }
}
