use directories::ProjectDirs;
use std::path::PathBuf;

pub const PFAM_URL_TEMPLATE: &str = "http://pfam.xfam.org/protein?output=xml&acc={accession}";

/// Placeholder substituted with the UniProt accession in the URL template.
pub const ACCESSION_PLACEHOLDER: &str = "{accession}";

pub struct DefaultsConfig {
    pub url_template: String,
    pub timeout_seconds: u64,
    pub offline: bool,
    pub cache_directory: Option<PathBuf>, // None if the OS cache dir is unknown
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            url_template: PFAM_URL_TEMPLATE.to_string(),
            timeout_seconds: 30,
            offline: false,
            cache_directory: ProjectDirs::from("org", "ligdom", "ligdom")
                .map(|dirs| dirs.cache_dir().join("pfam")),
        }
    }
}
