mod actions;
mod app;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::actions::{execute_action, Session};
use crate::app::App;
use phonebook_core::SourceFormat;
use phonebook_source::SourceLocation;

#[derive(Debug, Parser)]
#[command(name = "phonebook-tui", version, about = "phonebook TUI")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    #[arg(long)]
    edit: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
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

fn main() -> Result<()> {
    let args = Args::parse();

    let config = phonebook_config::load(args.config).with_context(|| "load config")?;
    let format = match (args.format, args.source.as_deref()) {
        (Some(format), _) => SourceFormat::from(format),
        (None, Some(raw)) => SourceFormat::infer(raw),
        (None, None) => config.source_format(),
    };
    let raw_source = args.source.unwrap_or_else(|| config.source.clone());
    let location =
        SourceLocation::parse(&raw_source).with_context(|| "resolve source location")?;

    let session = Session {
        location,
        format,
        options: config.tree_options(),
        export: config.export,
    };
    let mut app = App::new(args.edit);

    let mut terminal = TerminalGuard::new()?;
    run_app(&mut terminal, &session, &mut app)
}

fn run_app(terminal: &mut TerminalGuard, session: &Session, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        while let Some(action) = app.next_action() {
            if let Err(err) = execute_action(app, session, action) {
                app.set_error(format!("{:#}", err));
            }
        }

        terminal.terminal_mut().draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
