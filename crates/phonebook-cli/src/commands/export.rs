use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use phonebook_core::PhoneBook;
use phonebook_source::write_export;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Omit the UTF-8 byte order mark
    #[arg(long)]
    pub no_bom: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportReport {
    pub output: String,
    pub count: usize,
}

pub fn export(ctx: &Context<'_>, args: ExportArgs) -> Result<()> {
    let book = ctx.load_book()?;
    let out = args.out.unwrap_or_else(|| ctx.config.export.path.clone());
    let report = write_book(ctx, &book, &out, !args.no_bom && ctx.config.export.bom)?;

    if ctx.json {
        return print_json(&report);
    }
    println!("wrote {} records to {}", report.count, report.output);
    Ok(())
}

pub fn write_book(ctx: &Context<'_>, book: &PhoneBook, out: &Path, bom: bool) -> Result<ExportReport> {
    write_export(out, book.records(), &ctx.config.export.header, bom)
        .with_context(|| format!("write export {}", out.display()))?;
    Ok(ExportReport {
        output: out.display().to_string(),
        count: book.len(),
    })
}
