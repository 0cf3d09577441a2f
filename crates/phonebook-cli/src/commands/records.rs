use crate::commands::{format_record_line, print_json, Context, RecordItem};
use anyhow::Result;
use clap::Args;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ListArgs {}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Substring matched case-insensitively against place and number
    pub query: String,
}

pub fn list(ctx: &Context<'_>, _args: ListArgs) -> Result<()> {
    let loaded = ctx.load()?;
    if !ctx.json {
        if let Some(as_of) = loaded.as_of.as_deref() {
            println!("as of {}", as_of);
        }
    }
    let items: Vec<RecordItem<'_>> = loaded
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| RecordItem::new(index, record))
        .collect();
    print_items(ctx, &items)
}

pub fn search(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    let book = ctx.load_book()?;
    let positions = book.search_positions(&args.query);
    debug!(
        query = %args.query,
        matched = positions.len(),
        total = book.len(),
        "search complete"
    );
    let items: Vec<RecordItem<'_>> = positions
        .into_iter()
        .filter_map(|index| book.get(index).map(|record| RecordItem::new(index, record)))
        .collect();
    print_items(ctx, &items)
}

fn print_items(ctx: &Context<'_>, items: &[RecordItem<'_>]) -> Result<()> {
    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no results");
        return Ok(());
    }

    for item in items {
        println!("{}", format_record_line(item));
    }
    Ok(())
}
