use super::defaults::{ACCESSION_PLACEHOLDER, DefaultsConfig};
use super::file::FileConfig;
use super::models::{AppConfig, ReportPaths};
use crate::cli::ScanArgs;
use crate::error::{CliError, Result};
use crate::pfam::PfamSettings;
use ligdom::engine::config::ScanConfigBuilder;
use std::time::Duration;

pub fn build_config(args: &ScanArgs) -> Result<AppConfig> {
    let file_config = match &args.config {
        Some(config_path) => FileConfig::from_file(config_path)?,
        None => FileConfig::default(),
    };
    merge(args, file_config, DefaultsConfig::default())
}

fn merge(args: &ScanArgs, mut file_config: FileConfig, defaults: DefaultsConfig) -> Result<AppConfig> {
    let pdb_directory = args
        .pdb_directory
        .clone()
        .or(file_config.pdb_directory.take())
        .ok_or_else(|| {
            CliError::Config(
                "`pdb-directory` is required either in the config file or via --pdb-directory."
                    .to_string(),
            )
        })?;

    let ligands = if args.ligands.is_empty() {
        file_config.ligands.take().unwrap_or_default()
    } else {
        args.ligands.clone()
    };
    if ligands.iter().all(|name| name.trim().is_empty()) {
        return Err(CliError::Config(
            "At least one ligand name is required (`ligands` or --ligand).".to_string(),
        ));
    }

    if args.batch_size == Some(0) {
        return Err(CliError::Argument(
            "--batch-size must be at least 1.".to_string(),
        ));
    }

    let pfam_file = file_config.pfam.take().unwrap_or_default();
    let cache_directory = args
        .cache_directory
        .clone()
        .or(pfam_file.cache_directory)
        .or(defaults.cache_directory)
        .ok_or_else(|| {
            CliError::Config("Could not determine a Pfam cache directory.".to_string())
        })?;
    let url_template = pfam_file.url_template.unwrap_or(defaults.url_template);
    if !url_template.contains(ACCESSION_PLACEHOLDER) {
        return Err(CliError::Config(format!(
            "`pfam.url-template` must contain the {} placeholder.",
            ACCESSION_PLACEHOLDER
        )));
    }
    let timeout_seconds = pfam_file.timeout_seconds.unwrap_or(defaults.timeout_seconds);
    if timeout_seconds == 0 {
        return Err(CliError::Config(
            "`pfam.timeout-seconds` must be positive.".to_string(),
        ));
    }

    let reports_file = file_config.reports.take().unwrap_or_default();
    let reports = ReportPaths {
        log_file: reports_file.log_file,
        general_statistics_file: reports_file.general_statistics_file,
        matched_statistics_file: reports_file.matched_statistics_file,
        where_ligand_file: reports_file.where_ligand_file,
    };

    let core_config = ScanConfigBuilder::new()
        .ligand_names(ligands)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        pdb_directory,
        batch_size: args.batch_size,
        environment: args.environment,
        pfam: PfamSettings {
            cache_directory,
            url_template,
            timeout: Duration::from_secs(timeout_seconds),
            offline: args.offline || pfam_file.offline.unwrap_or(defaults.offline),
        },
        reports,
        core_config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn scan_args(extra: &[&str]) -> ScanArgs {
        let mut argv = vec!["ligdom", "scan"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Scan(args) => args,
            _ => panic!("expected 'scan' subcommand"),
        }
    }

    fn defaults() -> DefaultsConfig {
        DefaultsConfig {
            cache_directory: Some(PathBuf::from("/default/cache")),
            ..DefaultsConfig::default()
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("scan.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn file_values_are_loaded_and_defaults_fill_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(
            dir.path(),
            r#"
            pdb-directory = "data/pdb"
            ligands = ["HEM", "FAD"]

            [reports]
            log-file = "out/log.txt"
            where-ligand-file = "out/where.txt"
            "#,
        );
        let args = scan_args(&["-c", config_path.to_str().unwrap()]);
        let file_config = FileConfig::from_file(&config_path).unwrap();

        let config = merge(&args, file_config, defaults()).unwrap();

        assert_eq!(config.pdb_directory, PathBuf::from("data/pdb"));
        assert!(config.core_config.pdb.is_ligand("HEM"));
        assert!(config.core_config.pdb.is_ligand("FAD"));
        assert_eq!(config.pfam.cache_directory, PathBuf::from("/default/cache"));
        assert!(config.pfam.url_template.contains(ACCESSION_PLACEHOLDER));
        assert_eq!(config.pfam.timeout, Duration::from_secs(30));
        assert!(!config.pfam.offline);
        assert_eq!(config.reports.log_file, Some(PathBuf::from("out/log.txt")));
        assert_eq!(config.reports.general_statistics_file, None);
        assert!(!config.environment);
        assert_eq!(config.batch_size, None);
    }

    #[test]
    fn cli_arguments_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(
            dir.path(),
            r#"
            pdb-directory = "data/pdb"
            ligands = ["HEM"]

            [pfam]
            cache-directory = "data/xml"
            timeout-seconds = 5
            "#,
        );
        let args = scan_args(&[
            "-c",
            config_path.to_str().unwrap(),
            "--pdb-directory",
            "other/pdb",
            "--cache-directory",
            "other/xml",
            "-l",
            "ATP",
            "--offline",
            "--environment",
            "-b",
            "3",
        ]);
        let file_config = FileConfig::from_file(&config_path).unwrap();

        let config = merge(&args, file_config, defaults()).unwrap();

        assert_eq!(config.pdb_directory, PathBuf::from("other/pdb"));
        assert_eq!(config.pfam.cache_directory, PathBuf::from("other/xml"));
        assert_eq!(config.pfam.timeout, Duration::from_secs(5));
        assert!(config.core_config.pdb.is_ligand("ATP"));
        assert!(!config.core_config.pdb.is_ligand("HEM"));
        assert!(config.pfam.offline);
        assert!(config.environment);
        assert_eq!(config.batch_size, Some(3));
    }

    #[test]
    fn missing_required_values_are_reported() {
        let args = scan_args(&["-l", "HEM"]);
        let result = merge(&args, FileConfig::default(), defaults());
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("pdb-directory")));

        let args = scan_args(&["--pdb-directory", "pdb"]);
        let result = merge(&args, FileConfig::default(), defaults());
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("ligand")));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let args = scan_args(&["--pdb-directory", "pdb", "-l", "HEM", "-b", "0"]);
        let result = merge(&args, FileConfig::default(), defaults());
        assert!(matches!(result, Err(CliError::Argument(_))));

        let args = scan_args(&["--pdb-directory", "pdb", "-l", "HEM"]);
        let file_config: FileConfig =
            toml::from_str("[pfam]\nurl-template = \"http://example.org/protein\"").unwrap();
        let result = merge(&args, file_config, defaults());
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("url-template")));
    }

    #[test]
    fn unknown_keys_are_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), "pdb_directory = \"data/pdb\"\n");
        let result = FileConfig::from_file(&config_path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
