use crate::commands::print_json;
use anyhow::{Context as _, Result};
use clap::Args;
use phonebook_source::staff::{convert_file, read_roster};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ConvertStaffArgs {
    /// Staff directory JSON with a `hospital_staff_directory.staff_list` array
    pub input: PathBuf,
    /// Write the grouped tree here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ConvertReport {
    output: String,
    departments: usize,
    staff: usize,
}

pub fn convert_staff(args: ConvertStaffArgs, json: bool) -> Result<()> {
    let Some(out) = args.out else {
        let roster = read_roster(&args.input)
            .with_context(|| format!("read staff directory {}", args.input.display()))?;
        println!("{}", roster.to_json()?);
        return Ok(());
    };

    let roster = convert_file(&args.input, &out)
        .with_context(|| format!("convert staff directory {}", args.input.display()))?;
    let report = ConvertReport {
        output: out.display().to_string(),
        departments: roster.departments().len(),
        staff: roster
            .departments()
            .iter()
            .map(|(_, names)| names.len())
            .sum(),
    };
    if json {
        return print_json(&report);
    }
    println!(
        "wrote {} departments ({} staff) to {}",
        report.departments, report.staff, report.output
    );
    Ok(())
}
