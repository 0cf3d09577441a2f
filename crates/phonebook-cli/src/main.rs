mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, edit, export, records, staff, tui, Context, FormatArg};
use crate::error::{exit_code_for, report_error};
use phonebook_config as config;
use phonebook_core::SourceFormat;
use phonebook_source::SourceLocation;

#[derive(Debug, Parser)]
#[command(name = "phonebook", version, about = "phonebook CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// File path or http(s) URL of the directory source
    #[arg(long, global = true)]
    source: Option<String>,
    #[arg(long, global = true, value_enum)]
    format: Option<FormatArg>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    List(records::ListArgs),
    Search(records::SearchArgs),
    Export(export::ExportArgs),
    #[command(subcommand)]
    Edit(edit::EditCommand),
    /// Regroup a staff directory export into a department tree
    #[command(name = "convert-staff")]
    ConvertStaff(staff::ConvertStaffArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    Tui(tui::TuiArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        source,
        format,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        Command::ConvertStaff(args) => staff::convert_staff(args, json),
        Command::Tui(args) => tui::launch(config_path, source, format, args, verbose),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path.clone()) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let format = match (format, source.as_deref()) {
                (Some(format), _) => SourceFormat::from(format),
                (None, Some(raw)) => SourceFormat::infer(raw),
                (None, None) => app_config.source_format(),
            };
            let raw_source = source.unwrap_or_else(|| app_config.source.clone());
            let location =
                SourceLocation::parse(&raw_source).with_context(|| "resolve source location")?;
            debug!(source = %location, format = format.as_str(), "source resolved");

            let ctx = Context {
                config: &app_config,
                location,
                format,
                json,
            };

            match command {
                Command::List(args) => records::list(&ctx, args),
                Command::Search(args) => records::search(&ctx, args),
                Command::Export(args) => export::export(&ctx, args),
                Command::Edit(cmd) => match cmd {
                    edit::EditCommand::Set(args) => edit::set_record(&ctx, args),
                    edit::EditCommand::Add(args) => edit::add_record(&ctx, args),
                    edit::EditCommand::Rm(args) => edit::remove_record(&ctx, args),
                },
                Command::Completions(_) => {
                    unreachable!("completions command handled before source resolution")
                }
                Command::ConvertStaff(_) => {
                    unreachable!("convert-staff command handled before source resolution")
                }
                Command::Tui(_) => unreachable!("tui command handled before source resolution"),
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
