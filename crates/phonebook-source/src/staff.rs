//! Regrouping of a hospital staff export into a department tree.
//!
//! The input is `{"hospital_staff_directory": {"staff_list": [{"department":
//! ..., "name": ...}, ...]}}`; the output maps each department to the names
//! listed under it, in first-appearance order. The output is itself a valid
//! tree source.

use std::fs;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::{Result, SourceError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentRoster {
    departments: Vec<(String, Vec<String>)>,
}

impl DepartmentRoster {
    pub fn departments(&self) -> &[(String, Vec<String>)] {
        &self.departments
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    fn push(&mut self, department: &str, name: &str) {
        match self
            .departments
            .iter_mut()
            .find(|(existing, _)| existing == department)
        {
            Some((_, names)) => names.push(name.to_string()),
            None => self
                .departments
                .push((department.to_string(), vec![name.to_string()])),
        }
    }

    /// Pretty JSON with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer).map_err(|err| SourceError::Parse {
            format: "staff",
            message: err.to_string(),
        })?;
        String::from_utf8(buf).map_err(|err| SourceError::Parse {
            format: "staff",
            message: err.to_string(),
        })
    }
}

impl Serialize for DepartmentRoster {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.departments.len()))?;
        for (department, names) in &self.departments {
            map.serialize_entry(department, names)?;
        }
        map.end()
    }
}

/// Entries without a non-empty department and name are skipped.
pub fn group_by_department(text: &str) -> Result<DepartmentRoster> {
    let document: Value = serde_json::from_str(text).map_err(|err| SourceError::Parse {
        format: "staff",
        message: err.to_string(),
    })?;

    let mut roster = DepartmentRoster::default();
    let staff = document
        .get("hospital_staff_directory")
        .and_then(|directory| directory.get("staff_list"))
        .and_then(Value::as_array);
    for entry in staff.into_iter().flatten() {
        let department = entry.get("department").and_then(Value::as_str);
        let name = entry.get("name").and_then(Value::as_str);
        if let (Some(department), Some(name)) = (department, name) {
            if !department.is_empty() && !name.is_empty() {
                roster.push(department, name);
            }
        }
    }
    Ok(roster)
}

pub fn read_roster(input: &Path) -> Result<DepartmentRoster> {
    let text = match fs::read_to_string(input) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(SourceError::NotFound(input.display().to_string()))
        }
        Err(err) => return Err(err.into()),
    };
    group_by_department(&text)
}

pub fn convert_file(input: &Path, output: &Path) -> Result<DepartmentRoster> {
    let roster = read_roster(input)?;
    fs::write(output, roster.to_json()?)?;
    Ok(roster)
}
