use crate::commands::FormatArg;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use std::env;
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, Args)]
pub struct TuiArgs {
    /// Start in edit mode instead of search mode
    #[arg(long)]
    pub edit: bool,
}

pub fn launch(
    config_path: Option<PathBuf>,
    source: Option<String>,
    format: Option<FormatArg>,
    args: TuiArgs,
    verbose: bool,
) -> Result<()> {
    let mut command = build_command(config_path, source, format, &args);
    if verbose {
        eprintln!("tui: {:?}", command);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        let status = command.status().map_err(exec_error)?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn build_command(
    config_path: Option<PathBuf>,
    source: Option<String>,
    format: Option<FormatArg>,
    args: &TuiArgs,
) -> Command {
    let mut command = Command::new(find_tui_binary());
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }
    if let Some(source) = source {
        command.arg("--source").arg(source);
    }
    if let Some(value) = format.and_then(|format| format.to_possible_value()) {
        command.arg("--format").arg(value.get_name());
    }
    if args.edit {
        command.arg("--edit");
    }
    command
}

fn find_tui_binary() -> PathBuf {
    let name = format!("phonebook-tui{}", env::consts::EXE_SUFFIX);
    if let Ok(current) = env::current_exe() {
        if let Some(dir) = current.parent() {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "phonebook-tui binary not found; build it with `cargo build -p phonebook-tui` or install the package"
        );
    }
    anyhow!("launch phonebook-tui failed: {}", err)
}
