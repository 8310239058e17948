use crate::pfam::PfamSettings;
use ligdom::engine::config::ScanConfig;
use std::path::PathBuf;

/// Output files of a scan; each report is written only when its path is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportPaths {
    pub log_file: Option<PathBuf>,
    pub general_statistics_file: Option<PathBuf>,
    pub matched_statistics_file: Option<PathBuf>,
    pub where_ligand_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pdb_directory: PathBuf,
    pub batch_size: Option<usize>,
    pub environment: bool,
    pub pfam: PfamSettings,
    pub reports: ReportPaths,
    pub core_config: ScanConfig,
}
