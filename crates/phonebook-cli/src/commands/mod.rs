use anyhow::{Context as _, Result};
use phonebook_config::AppConfig;
use phonebook_core::{PhoneBook, Record, SourceFormat};
use phonebook_source::{load_location, Loaded, SourceLocation};
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod edit;
pub mod export;
pub mod records;
pub mod staff;
pub mod tui;

pub struct Context<'a> {
    pub config: &'a AppConfig,
    pub location: SourceLocation,
    pub format: SourceFormat,
    pub json: bool,
}

impl Context<'_> {
    pub fn load(&self) -> Result<Loaded> {
        load_location(&self.location, self.format, &self.config.tree_options())
            .with_context(|| format!("load phonebook from {}", self.location))
    }

    pub fn load_book(&self) -> Result<PhoneBook> {
        Ok(PhoneBook::from_records(self.load()?.records))
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    Delimited,
    Tree,
}

impl From<FormatArg> for SourceFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Delimited => SourceFormat::Delimited,
            FormatArg::Tree => SourceFormat::Tree,
        }
    }
}

/// A record together with its position in the canonical list, which is the
/// index the `edit` commands take.
#[derive(Debug, Serialize)]
pub struct RecordItem<'a> {
    pub index: usize,
    pub place: &'a str,
    pub number: &'a str,
}

impl<'a> RecordItem<'a> {
    pub fn new(index: usize, record: &'a Record) -> Self {
        Self {
            index,
            place: &record.place,
            number: &record.number,
        }
    }
}

pub fn format_record_line(item: &RecordItem<'_>) -> String {
    let place = if item.place.is_empty() { "-" } else { item.place };
    format!("{}  {}  {}", item.index, place, item.number)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{format_record_line, RecordItem};
    use phonebook_core::Record;

    #[test]
    fn record_lines_show_index_place_and_number() {
        let record = Record::new("ICU", "1234 / 1235");
        assert_eq!(
            format_record_line(&RecordItem::new(4, &record)),
            "4  ICU  1234 / 1235"
        );
    }

    #[test]
    fn empty_place_is_rendered_as_dash() {
        let record = Record::new("", "5678");
        assert_eq!(format_record_line(&RecordItem::new(0, &record)), "0  -  5678");
    }
}
