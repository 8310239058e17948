use crate::cli::ScanArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::pfam::PfamClient;
use crate::report::structure_log::{self, LogDetail};
use crate::report::{ScanTally, StructureFindings, statistics, where_ligand};
use crate::utils::progress::CliProgressHandler;
use ligdom::core::models::structure::Structure;
use ligdom::engine::progress::ProgressReporter;
use ligdom::workflows;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::runtime::Handle;
use tracing::{info, warn};

const PDB_EXTENSION: &str = "pdb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScanSummary {
    processed: usize,
    skipped: usize,
}

pub async fn run(args: ScanArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;

    let paths = collect_pdb_files(&config.pdb_directory, config.batch_size)?;
    if paths.is_empty() {
        warn!(
            "No *.{} files found in {:?}.",
            PDB_EXTENSION, &config.pdb_directory
        );
    }

    let client = PfamClient::new(config.pfam.clone(), Handle::current())?;
    fs::create_dir_all(client.cache().directory())?;
    info!(
        "Pfam documents are cached in {:?}{}.",
        client.cache().directory(),
        if config.pfam.offline { " (offline)" } else { "" }
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Scanning {} structure file(s)...", paths.len());
    info!("Invoking the core batch scan workflow...");

    let structures = tokio::task::block_in_place(|| {
        workflows::scan::run_batch(&paths, &config.core_config, &client, &reporter)
    });

    let summary = write_reports(&paths, &structures, &config)?;
    println!(
        "Processed {} structures ({} skipped)",
        summary.processed, summary.skipped
    );
    Ok(())
}

/// Lists the `*.pdb` files directly inside `directory`, sorted by path and cut
/// to the first `batch_size`.
fn collect_pdb_files(directory: &Path, batch_size: Option<usize>) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory).map_err(|e| {
        CliError::Config(format!(
            "Cannot read PDB directory '{}': {}",
            directory.display(),
            e
        ))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_pdb = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PDB_EXTENSION));
        if is_pdb && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if let Some(limit) = batch_size {
        paths.truncate(limit);
    }
    Ok(paths)
}

struct ReportFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ReportFile {
    fn create(path: &Path) -> Result<Self> {
        let report_error = |source: io::Error| CliError::Report {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(report_error)?;
        }
        let file = File::create(path).map_err(report_error)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    fn write_with(
        &mut self,
        write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    ) -> Result<()> {
        write(&mut self.writer).map_err(|source| CliError::Report {
            path: self.path.clone(),
            source,
        })
    }

    fn finish(mut self) -> Result<()> {
        self.write_with(|writer| writer.flush())?;
        info!("Report written to {:?}", &self.path);
        Ok(())
    }
}

fn write_report(
    path: Option<&Path>,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let mut report = ReportFile::create(path)?;
    report.write_with(write)?;
    report.finish()
}

/// Runs contact matching on every valid structure and writes the configured
/// reports. `paths` and `structures` are parallel slices in batch order.
fn write_reports(paths: &[PathBuf], structures: &[Structure], config: &AppConfig) -> Result<ScanSummary> {
    let cutoff = config.core_config.contact_cutoff;
    let detail = LogDetail::from_environment_flag(config.environment);
    let mut log = config
        .reports
        .log_file
        .as_deref()
        .map(ReportFile::create)
        .transpose()?;

    let mut tally = ScanTally::default();
    let mut skipped = Vec::new();

    for (position, (path, structure)) in paths.iter().zip(structures).enumerate() {
        if !structure.is_valid() {
            println!("Skipped: {:<32} ({})", path.display(), position + 1);
            skipped.push(path.clone());
            continue;
        }

        let findings = StructureFindings::collect(structure, cutoff)?;
        if let Some(log) = log.as_mut() {
            log.write_with(|w| structure_log::write_structure(w, &findings, detail))?;
        }
        tally.record(&findings);
        println!("Done: {:<32} ({})", path.display(), position + 1);
    }

    if let Some(mut log) = log {
        log.write_with(|w| structure_log::write_skipped(w, &skipped))?;
        log.finish()?;
    }

    let reports = &config.reports;
    write_report(reports.general_statistics_file.as_deref(), |w| {
        statistics::write_general_statistics(w, &tally)
    })?;
    write_report(reports.matched_statistics_file.as_deref(), |w| {
        statistics::write_matched_statistics(w, &tally)
    })?;
    write_report(reports.where_ligand_file.as_deref(), |w| {
        where_ligand::write_where_ligand(w, &tally)
    })?;

    Ok(ScanSummary {
        processed: structures.len(),
        skipped: skipped.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportPaths;
    use crate::pfam::PfamSettings;
    use crate::report::test_support::heme_structure;
    use ligdom::core::models::structure::StructureIssue;
    use ligdom::engine::config::ScanConfigBuilder;
    use std::time::Duration;

    const HEME_PDB: &str = "\
DBREF  1HEM A    1   141  UNP    P69905   HBA_HUMAN        1    141
ATOM      1 CA   ALA A  10       0.000   0.000   0.000  1.00  0.00           C
TER       2      ALA A  10
HETATM    1 FE   HEM A 500       3.000   0.000   0.000  1.00  0.00           C
";

    const GLOBIN_XML: &str = r#"<pfam><matches><match accession="PF00042" id="Globin"><location start="5" end="15"/></match></matches></pfam>"#;

    fn app_config(root: &Path, reports: ReportPaths) -> AppConfig {
        AppConfig {
            pdb_directory: root.join("pdb"),
            batch_size: None,
            environment: false,
            pfam: PfamSettings {
                cache_directory: root.join("xml"),
                url_template: "http://127.0.0.1:9/?acc={accession}".to_string(),
                timeout: Duration::from_secs(1),
                offline: true,
            },
            reports,
            core_config: ScanConfigBuilder::new().ligand_names(["HEM"]).build().unwrap(),
        }
    }

    #[test]
    fn pdb_files_are_filtered_sorted_and_truncated() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2abc.pdb", "1abc.PDB", "3abc.pdb", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdb")).unwrap();

        let all = collect_pdb_files(dir.path(), None).unwrap();
        let names: Vec<_> = all
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["1abc.PDB", "2abc.pdb", "3abc.pdb"]);

        assert_eq!(collect_pdb_files(dir.path(), Some(2)).unwrap().len(), 2);
        assert_eq!(collect_pdb_files(dir.path(), Some(50)).unwrap().len(), 3);
    }

    #[test]
    fn missing_pdb_directory_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_pdb_files(&dir.path().join("absent"), None);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn reports_cover_valid_structures_and_list_skipped_ones() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let reports = ReportPaths {
            log_file: Some(out.join("log.txt")),
            general_statistics_file: Some(out.join("general.txt")),
            matched_statistics_file: Some(out.join("matched.txt")),
            where_ligand_file: Some(out.join("where.txt")),
        };
        let config = app_config(dir.path(), reports);

        let paths = [PathBuf::from("pdb/1hem.pdb"), PathBuf::from("pdb/9bad.pdb")];
        let broken = Structure::invalid(
            "9BAD",
            StructureIssue::UnclosedChain {
                chain_id: "A".into(),
            },
        );
        let structures = [heme_structure("1HEM"), broken];

        let summary = write_reports(&paths, &structures, &config).unwrap();
        assert_eq!(
            summary,
            ScanSummary {
                processed: 2,
                skipped: 1
            }
        );

        let log = fs::read_to_string(out.join("log.txt")).unwrap();
        assert!(log.starts_with("PDB_ID: 1HEM\n"));
        assert!(!log.contains("PDB_ID: 9BAD"));
        assert!(log.ends_with("SKIPPED PDB FILES:\npdb/9bad.pdb\n"));

        let general = fs::read_to_string(out.join("general.txt")).unwrap();
        assert_eq!(general.lines().count(), 2);
        let matched = fs::read_to_string(out.join("matched.txt")).unwrap();
        assert!(matched.contains("Ligand name: HEM"));
        let where_ligand = fs::read_to_string(out.join("where.txt")).unwrap();
        assert_eq!(where_ligand.lines().count(), 2);
    }

    #[test]
    fn unset_report_paths_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = app_config(dir.path(), ReportPaths::default());

        let summary = write_reports(
            &[PathBuf::from("1hem.pdb")],
            &[heme_structure("1HEM")],
            &config,
        )
        .unwrap();

        assert_eq!(summary.skipped, 0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn offline_scan_uses_cached_documents_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pdb")).unwrap();
        fs::create_dir_all(root.join("xml")).unwrap();
        fs::write(root.join("pdb/pdb1hem.pdb"), HEME_PDB).unwrap();
        fs::write(root.join("pdb/pdb2hem.pdb"), HEME_PDB).unwrap();
        fs::write(root.join("xml/1HEM_A_P69905.xml"), GLOBIN_XML).unwrap();

        let config_path = root.join("scan.toml");
        fs::write(
            &config_path,
            format!(
                "pdb-directory = {:?}\nligands = [\"HEM\"]\n\n[pfam]\ncache-directory = {:?}\noffline = true\n\n[reports]\nlog-file = {:?}\n",
                root.join("pdb"),
                root.join("xml"),
                root.join("log.txt"),
            ),
        )
        .unwrap();

        let args = ScanArgs {
            config: Some(config_path),
            pdb_directory: None,
            ligands: Vec::new(),
            batch_size: None,
            cache_directory: None,
            offline: false,
            environment: false,
        };
        run(args).await.unwrap();

        let log = fs::read_to_string(root.join("log.txt")).unwrap();
        assert!(log.starts_with("PDB_ID: 1HEM\n"));
        assert!(log.contains("Pfam_domain -> PF00042    Globin"));
        assert!(log.contains("Ligand -> HEM 500"));
        assert!(log.ends_with(&format!(
            "SKIPPED PDB FILES:\n{}\n",
            root.join("pdb/pdb2hem.pdb").display()
        )));
    }
}
