use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePfamConfig {
    pub cache_directory: Option<PathBuf>,
    pub url_template: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub offline: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileReportsConfig {
    pub log_file: Option<PathBuf>,
    pub general_statistics_file: Option<PathBuf>,
    pub matched_statistics_file: Option<PathBuf>,
    pub where_ligand_file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub pdb_directory: Option<PathBuf>,
    pub ligands: Option<Vec<String>>,
    pub pfam: Option<FilePfamConfig>,
    pub reports: Option<FileReportsConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
