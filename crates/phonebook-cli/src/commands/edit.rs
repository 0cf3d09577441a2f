use crate::commands::export::{write_book, ExportReport};
use crate::commands::{format_record_line, print_json, Context, RecordItem};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use phonebook_core::{PhoneBook, Record, SourceFormat};
use phonebook_source::{load_location, SourceLocation};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum EditCommand {
    /// Overwrite fields of the record at INDEX
    Set(SetArgs),
    /// Append a record
    Add(AddArgs),
    /// Remove the record at INDEX
    Rm(RemoveArgs),
}

#[derive(Debug, Args)]
pub struct SetArgs {
    pub index: usize,
    #[arg(long)]
    pub place: Option<String>,
    #[arg(long)]
    pub number: Option<String>,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub place: String,
    #[arg(long, default_value = "")]
    pub number: String,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    pub index: usize,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EditReport<'a> {
    action: &'static str,
    record: RecordItem<'a>,
    export: ExportReport,
}

pub fn set_record(ctx: &Context<'_>, args: SetArgs) -> Result<()> {
    if args.place.is_none() && args.number.is_none() {
        return Err(invalid_input("no updates provided"));
    }

    let out = export_path(ctx, args.out);
    let mut book = load_base(ctx, &out)?;
    let current = book.get(args.index).cloned().unwrap_or_default();
    let updated = Record::new(
        args.place.unwrap_or(current.place),
        args.number.unwrap_or(current.number),
    )
    .trim();
    book.replace(args.index, updated.clone())?;
    finish(ctx, &book, "updated", args.index, &updated, &out)
}

pub fn add_record(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let out = export_path(ctx, args.out);
    let mut book = load_base(ctx, &out)?;
    let record = Record::new(args.place, args.number).trim();
    let index = book.append(record.clone())?;
    finish(ctx, &book, "added", index, &record, &out)
}

pub fn remove_record(ctx: &Context<'_>, args: RemoveArgs) -> Result<()> {
    let out = export_path(ctx, args.out);
    let mut book = load_base(ctx, &out)?;
    let removed = book.remove(args.index)?;
    finish(ctx, &book, "removed", args.index, &removed, &out)
}

fn export_path(ctx: &Context<'_>, out: Option<PathBuf>) -> PathBuf {
    out.unwrap_or_else(|| ctx.config.export.path.clone())
}

/// An existing export file holds the edits made so far, so it is the base for
/// the next edit. Without one, edits start from the source.
fn load_base(ctx: &Context<'_>, out: &Path) -> Result<PhoneBook> {
    if !out.is_file() {
        return ctx.load_book();
    }
    debug!(path = %out.display(), "editing existing export");
    let location = SourceLocation::File(out.to_path_buf());
    let loaded = load_location(
        &location,
        SourceFormat::Delimited,
        &ctx.config.tree_options(),
    )
    .with_context(|| format!("load export {}", out.display()))?;
    Ok(PhoneBook::from_records(loaded.records))
}

fn finish(
    ctx: &Context<'_>,
    book: &PhoneBook,
    action: &'static str,
    index: usize,
    record: &Record,
    out: &Path,
) -> Result<()> {
    let export = write_book(ctx, book, out, ctx.config.export.bom)?;
    let item = RecordItem::new(index, record);

    if ctx.json {
        return print_json(&EditReport {
            action,
            record: item,
            export,
        });
    }
    println!("{} {}", action, format_record_line(&item));
    println!("wrote {} records to {}", export.count, export.output);
    Ok(())
}
