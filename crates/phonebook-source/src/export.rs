use std::fs;
use std::path::Path;

use phonebook_core::domain::Record;
use phonebook_core::to_delimited;
use tracing::debug;

use crate::Result;

pub const BOM: char = '\u{feff}';

/// Writes the delimited export, creating parent directories as needed.
pub fn write_export(path: &Path, records: &[Record], header: &str, bom: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let body = to_delimited(records, header);
    let mut contents = String::with_capacity(body.len() + BOM.len_utf8());
    if bom {
        contents.push(BOM);
    }
    contents.push_str(&body);
    fs::write(path, contents)?;

    debug!(path = %path.display(), records = records.len(), "export written");
    Ok(())
}
