//! `bibstat status` - compare derived tables with the current export

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color};

use bibstat_archive::ExportManifest;
use bibstat_core::fmt_num;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output directory (overrides [output] dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: StatusArgs, config: &Config) -> Result<()> {
    let dir = args.output.unwrap_or_else(|| config.output.dir.clone());
    let manifest = match ExportManifest::read_from(&dir) {
        Ok(m) => m,
        Err(e) => {
            log::debug!("{e:#}");
            println!(
                "No derived tables in {}; run `bibstat prepare`",
                dir.display()
            );
            return Ok(());
        }
    };

    let marker = &config.archive.institution_marker;
    let marker_changed = manifest.marker_changed(marker);
    let stale = manifest.is_stale(&config.input.path, marker)?;
    let modified = manifest.modified_outputs(&dir);

    let mut table = super::new_table(&["Status", "Value"]);
    table.add_row(vec![
        Cell::new("Export"),
        Cell::new(config.input.path.display().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Prepared at"),
        Cell::new(manifest.created_at.format("%Y-%m-%d %H:%M UTC").to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Articles"),
        Cell::new(fmt_num(manifest.retained)),
    ]);
    table.add_row(vec![
        Cell::new("Institution marker"),
        if marker_changed {
            Cell::new(format!("{} (prepared with {})", marker, manifest.institution_marker))
                .fg(Color::Yellow)
        } else {
            Cell::new(marker).fg(Color::Green)
        },
    ]);
    table.add_row(vec![
        Cell::new("Out of date"),
        if stale {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            Cell::new("no").fg(Color::Green)
        },
    ]);
    table.add_row(vec![
        Cell::new("Modified outputs"),
        if modified.is_empty() {
            Cell::new("none").fg(Color::Green)
        } else {
            Cell::new(modified.join(", ")).fg(Color::Yellow)
        },
    ]);
    println!("{table}");

    if stale || !modified.is_empty() {
        log::warn!("Derived tables are out of date; run `bibstat prepare`");
    }
    Ok(())
}
