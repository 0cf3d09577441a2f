use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use phonebook_core::{SourceFormat, TreeOptions, DEFAULT_HEADER};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "phonebook";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_SOURCE: &str = "PhoneBook.json";
pub const DEFAULT_EXPORT_PATH: &str = "PhoneBook.csv";
pub const DEFAULT_METADATA_KEY: &str = "기준일";
pub const DEFAULT_SKIPPED_KEYS: [&str; 5] = ["한국원자력의학원", "진료과", "주요전화", "임원진", "공통"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: String,
    pub format: Option<SourceFormat>,
    pub tree: TreeConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone)]
pub struct TreeConfig {
    pub skipped_keys: Vec<String>,
    pub metadata_key: String,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub path: PathBuf,
    pub header: String,
    pub bom: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            format: None,
            tree: TreeConfig {
                skipped_keys: DEFAULT_SKIPPED_KEYS
                    .iter()
                    .map(|key| key.to_string())
                    .collect(),
                metadata_key: DEFAULT_METADATA_KEY.to_string(),
            },
            export: ExportConfig {
                path: PathBuf::from(DEFAULT_EXPORT_PATH),
                header: DEFAULT_HEADER.to_string(),
                bom: true,
            },
        }
    }
}

impl AppConfig {
    /// Explicit `format`, else inferred from the source location.
    pub fn source_format(&self) -> SourceFormat {
        self.format.unwrap_or_else(|| SourceFormat::infer(&self.source))
    }

    pub fn tree_options(&self) -> TreeOptions {
        self.tree.options()
    }
}

impl TreeConfig {
    pub fn options(&self) -> TreeOptions {
        TreeOptions::new(self.skipped_keys.iter().cloned(), self.metadata_key.clone())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid source value: {0:?}")]
    InvalidSource(String),
    #[error("invalid skipped key: {0:?}")]
    InvalidSkippedKey(String),
    #[error("invalid metadata key: {0:?}")]
    InvalidMetadataKey(String),
    #[error("invalid export header (expected two columns): {0:?}")]
    InvalidExportHeader(String),
    #[error("invalid export path: {0}")]
    InvalidExportPath(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    source: Option<String>,
    format: Option<SourceFormat>,
    tree: Option<TreeFile>,
    export: Option<ExportFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TreeFile {
    skipped_keys: Option<Vec<String>>,
    metadata_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExportFile {
    path: Option<PathBuf>,
    header: Option<String>,
    bom: Option<bool>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(source) = parsed.source {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidSource(source));
        }
        config.source = trimmed.to_string();
    }

    if let Some(format) = parsed.format {
        config.format = Some(format);
    }

    if let Some(tree) = parsed.tree {
        if let Some(keys) = tree.skipped_keys {
            let mut skipped = Vec::with_capacity(keys.len());
            for key in keys {
                if key.trim().is_empty() {
                    return Err(ConfigError::InvalidSkippedKey(key));
                }
                if !skipped.contains(&key) {
                    skipped.push(key);
                }
            }
            config.tree.skipped_keys = skipped;
        }
        if let Some(key) = tree.metadata_key {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidMetadataKey(key));
            }
            config.tree.metadata_key = key;
        }
    }

    if let Some(export) = parsed.export {
        if let Some(path) = export.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidExportPath(path));
            }
            config.export.path = path;
        }
        if let Some(header) = export.header {
            config.export.header = validate_header(&header)?;
        }
        if let Some(bom) = export.bom {
            config.export.bom = bom;
        }
    }

    Ok(config)
}

fn validate_header(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let columns: Vec<&str> = trimmed.split(',').collect();
    if columns.len() != 2 || columns.iter().any(|column| column.trim().is_empty()) {
        return Err(ConfigError::InvalidExportHeader(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        load, load_at_path, merge_config, AppConfig, ConfigError, ConfigFile, ExportFile,
        TreeFile, DEFAULT_METADATA_KEY,
    };
    use phonebook_core::SourceFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn empty_file() -> ConfigFile {
        ConfigFile {
            source: None,
            format: None,
            tree: None,
            export: None,
        }
    }

    #[test]
    fn defaults_cover_hospital_directory() {
        let config = AppConfig::default();
        let options = config.tree_options();
        assert!(options.is_skipped("진료과"));
        assert!(options.is_skipped("공통"));
        assert_eq!(options.metadata_key, DEFAULT_METADATA_KEY);
        assert_eq!(config.source_format(), SourceFormat::Tree);
        assert_eq!(config.export.header, "장소,내선번호");
        assert!(config.export.bom);
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            source: Some(" directory.csv ".to_string()),
            format: None,
            tree: Some(TreeFile {
                skipped_keys: Some(vec![
                    "Hospital".to_string(),
                    "Hospital".to_string(),
                    "Departments".to_string(),
                ]),
                metadata_key: Some("as_of".to_string()),
            }),
            export: Some(ExportFile {
                path: Some(PathBuf::from("out/list.csv")),
                header: Some("place,number".to_string()),
                bom: Some(false),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.source, "directory.csv");
        assert_eq!(merged.source_format(), SourceFormat::Delimited);
        assert_eq!(merged.tree.skipped_keys, vec!["Hospital", "Departments"]);
        assert_eq!(merged.tree.metadata_key, "as_of");
        assert_eq!(merged.export.path, PathBuf::from("out/list.csv"));
        assert_eq!(merged.export.header, "place,number");
        assert!(!merged.export.bom);
    }

    #[test]
    fn explicit_format_beats_inference() {
        let mut parsed = empty_file();
        parsed.source = Some("directory.csv".to_string());
        parsed.format = Some(SourceFormat::Tree);
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.source_format(), SourceFormat::Tree);
    }

    #[test]
    fn blank_values_are_rejected() {
        let mut parsed = empty_file();
        parsed.tree = Some(TreeFile {
            skipped_keys: Some(vec![" ".to_string()]),
            metadata_key: None,
        });
        assert!(matches!(
            merge_config(parsed),
            Err(ConfigError::InvalidSkippedKey(_))
        ));

        let mut parsed = empty_file();
        parsed.tree = Some(TreeFile {
            skipped_keys: None,
            metadata_key: Some(String::new()),
        });
        assert!(matches!(
            merge_config(parsed),
            Err(ConfigError::InvalidMetadataKey(_))
        ));

        let mut parsed = empty_file();
        parsed.source = Some("  ".to_string());
        assert!(matches!(
            merge_config(parsed),
            Err(ConfigError::InvalidSource(_))
        ));
    }

    #[test]
    fn export_header_needs_two_columns() {
        for header in ["place", "a,b,c", "place,", ""] {
            let mut parsed = empty_file();
            parsed.export = Some(ExportFile {
                path: None,
                header: Some(header.to_string()),
                bom: None,
            });
            assert!(
                matches!(merge_config(parsed), Err(ConfigError::InvalidExportHeader(_))),
                "header {header:?} should be rejected"
            );
        }
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "source = \"https://intranet.example/PhoneBook.json\"\n\
             [tree]\nskipped_keys = [\"본원\"]\nmetadata_key = \"updated\"\n\
             [export]\nbom = false\n",
        )
        .expect("write config");

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.source, "https://intranet.example/PhoneBook.json");
        assert_eq!(config.tree.skipped_keys, vec!["본원"]);
        assert_eq!(config.tree.metadata_key, "updated");
        assert!(!config.export.bom);
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "sauce = \"typo\"\n").expect("write config");
        let err = load(Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
