//! `bibstat prepare` - regenerate the derived tables from the export

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color};

use bibstat_core::{ProgressContext, fmt_num, pct};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Output directory (overrides [output] dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: PrepareArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let archive = super::load_archive(config, progress)?;
    let out_dir = args.output.unwrap_or_else(|| config.output.dir.clone());

    let pb = progress.stage_line("write");
    pb.set_message(format!("{}", out_dir.display()));
    let manifest = archive.write_outputs(
        &out_dir,
        &config.input.path,
        &config.archive.institution_marker,
    );
    pb.finish_and_clear();
    let manifest = manifest?;

    log::info!(
        "Wrote {} authors and {} keywords to {}",
        fmt_num(manifest.authors),
        fmt_num(manifest.keywords),
        out_dir.display()
    );

    let mut table = super::new_table(&["Prepare", "Value", "%"]);
    table.add_row(vec![
        Cell::new("Rows scanned"),
        Cell::new(fmt_num(manifest.rows_scanned)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Other institutions"),
        Cell::new(fmt_num(manifest.excluded)),
        Cell::new(format!(
            "{:.1}",
            pct(manifest.excluded, manifest.rows_scanned)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Articles retained").fg(Color::Green),
        Cell::new(fmt_num(manifest.retained)).fg(Color::Green),
        Cell::new(format!(
            "{:.1}",
            pct(manifest.retained, manifest.rows_scanned)
        ))
        .fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Authors"),
        Cell::new(fmt_num(manifest.authors)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Keywords"),
        Cell::new(fmt_num(manifest.keywords)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Output"),
        Cell::new(out_dir.display().to_string()),
        Cell::new(""),
    ]);

    progress.println(format!("\n{table}"));
    Ok(())
}
