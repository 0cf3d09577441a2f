use anyhow::{Context as _, Result};
use phonebook_config::ExportConfig;
use phonebook_core::{SourceFormat, TreeOptions};
use phonebook_source::{load_location, write_export, SourceLocation};

use crate::app::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Load,
    Save,
}

/// Where the directory comes from and where edits are written.
#[derive(Debug, Clone)]
pub struct Session {
    pub location: SourceLocation,
    pub format: SourceFormat,
    pub options: TreeOptions,
    pub export: ExportConfig,
}

pub fn execute_action(app: &mut App, session: &Session, action: Action) -> Result<()> {
    match action {
        Action::Load => {
            // The current list stays in place when the load fails.
            let loaded = load_location(&session.location, session.format, &session.options)
                .with_context(|| format!("load {}", session.location))?;
            let count = loaded.records.len();
            app.apply_loaded(loaded);
            app.set_status(format!("Loaded {} entries from {}", count, session.location));
            app.clear_error();
        }
        Action::Save => {
            let path = &session.export.path;
            write_export(
                path,
                app.book.records(),
                &session.export.header,
                session.export.bom,
            )
            .with_context(|| format!("write {}", path.display()))?;
            app.dirty = false;
            app.set_status(format!(
                "Saved {} entries to {}",
                app.book.len(),
                path.display()
            ));
            app.clear_error();
        }
    }

    Ok(())
}
