use crate::core::io::pdb::load_structure;
use crate::core::models::structure::Structure;
use crate::engine::annotation::{DomainSource, resolve_domains};
use crate::engine::config::ScanConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::validation::validate_chains;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs parse, validate and resolve for a single structure file.
///
/// Failures at any stage are recorded on the returned [`Structure`]; check
/// [`Structure::is_valid`] before using it.
#[instrument(skip_all, name = "scan_structure", fields(path = %path.display()))]
pub fn process_structure<S>(path: &Path, config: &ScanConfig, source: &S) -> Structure
where
    S: DomainSource + ?Sized,
{
    let mut structure = load_structure(path, &config.pdb);
    if structure.is_valid() {
        validate_chains(&mut structure);
    }
    resolve_domains(&mut structure, source);

    if structure.is_valid() {
        debug!(
            structure = %structure.id(),
            domains = structure.domains().len(),
            "Structure ready for contact matching."
        );
    } else {
        for issue in structure.issues() {
            warn!(structure = %structure.id(), %issue, "Structure will be skipped.");
        }
    }
    structure
}

/// Processes every file in `paths` independently and returns the structures in
/// input order.
///
/// With the `parallel` feature the files are spread across the rayon thread
/// pool, one structure per worker. `source` is shared between workers.
#[instrument(skip_all, name = "scan_batch", fields(files = paths.len()))]
pub fn run_batch<S>(
    paths: &[PathBuf],
    config: &ScanConfig,
    source: &S,
    reporter: &ProgressReporter,
) -> Vec<Structure>
where
    S: DomainSource + Sync + ?Sized,
{
    info!("Scanning {} structure file(s).", paths.len());
    reporter.report(Progress::PhaseStart {
        name: "Parsing Structures",
    });
    reporter.report(Progress::TaskStart {
        total_steps: paths.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = paths.iter();

    #[cfg(feature = "parallel")]
    let iterator = paths.par_iter();

    let structures: Vec<Structure> = iterator
        .map(|path| {
            let structure = process_structure(path, config, source);
            if let Some(issue) = structure.issues().first() {
                reporter.report(Progress::Message(format!(
                    "Skipping {}: {}",
                    structure.id(),
                    issue
                )));
            }
            reporter.report(Progress::TaskIncrement);
            structure
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let skipped = structures.iter().filter(|s| !s.is_valid()).count();
    info!(
        valid = structures.len() - skipped,
        skipped, "Batch scan finished."
    );
    structures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::StructureIssue;
    use crate::engine::annotation::{DomainDocument, DomainHit, HitLocation, InMemoryDomainSource};
    use crate::engine::config::ScanConfigBuilder;
    use crate::engine::contacts::ContactMatcher;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn atom_line(record: &str, name: &str, res: &str, chain: &str, seq: isize, xyz: [f64; 3]) -> String {
        format!(
            "{:<6}{:>5} {:<4} {:>3} {:1}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}           C",
            record, 1, name, res, chain, seq, xyz[0], xyz[1], xyz[2], 1.0, 0.0
        )
    }

    fn ter_line(res: &str, chain: &str, seq: isize) -> String {
        format!("TER   {:>5}      {:>3} {:1}{:>4}", 2, res, chain, seq)
    }

    fn heme_protein() -> String {
        [
            "DBREF  1HEM A    1   141  UNP    P69905   HBA_HUMAN        1    141".to_string(),
            atom_line("ATOM", "CA", "ALA", "A", 10, [0.0, 0.0, 0.0]),
            ter_line("ALA", "A", 10),
            atom_line("HETATM", "FE", "HEM", "A", 500, [3.0, 0.0, 0.0]),
        ]
        .join("\n")
    }

    fn globin_source() -> InMemoryDomainSource {
        InMemoryDomainSource::new().with_document(
            "A",
            "P69905",
            DomainDocument {
                hits: vec![DomainHit {
                    accession: "PF00042".into(),
                    id: "Globin".into(),
                    locations: vec![HitLocation::new("5", "15")],
                }],
            },
        )
    }

    fn config() -> ScanConfig {
        ScanConfigBuilder::new().ligand_names(["HEM"]).build().unwrap()
    }

    #[test]
    fn pipeline_produces_matchable_structure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdb1hem.pdb");
        fs::write(&path, heme_protein()).unwrap();

        let structure = process_structure(&path, &config(), &globin_source());

        assert!(structure.is_valid());
        assert_eq!(structure.id(), "1HEM");
        assert_eq!(structure.domains().len(), 1);

        let matches = ContactMatcher::new(&structure)
            .unwrap()
            .ligands_binding_domains();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].ligand.name(), "HEM");
        assert_eq!(matches[0].domain.domain_id, "Globin");
    }

    #[test]
    fn missing_terminator_invalidates_structure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2abc.pdb");
        fs::write(&path, atom_line("ATOM", "CA", "ALA", "A", 1, [0.0, 0.0, 0.0])).unwrap();

        let structure = process_structure(&path, &config(), &InMemoryDomainSource::new());

        assert!(!structure.is_valid());
        assert!(structure.chains().is_empty());
        assert!(matches!(
            structure.issues(),
            [StructureIssue::UnclosedChain { chain_id }] if chain_id == "A"
        ));
    }

    #[test]
    fn annotation_failure_invalidates_structure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1hem.pdb");
        fs::write(&path, heme_protein()).unwrap();

        let structure = process_structure(&path, &config(), &InMemoryDomainSource::new());

        assert!(!structure.is_valid());
        assert!(structure.domains().is_empty());
    }

    #[test]
    fn batch_keeps_input_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("1hem.pdb");
        let missing = dir.path().join("9zzz.pdb");
        let also_good = dir.path().join("2hem.pdb");
        fs::write(&good, heme_protein()).unwrap();
        fs::write(&also_good, heme_protein()).unwrap();

        let increments = AtomicUsize::new(0);
        let messages = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskIncrement => {
                increments.fetch_add(1, Ordering::SeqCst);
            }
            Progress::Message(text) => {
                assert!(text.starts_with("Skipping 9ZZZ: "));
                messages.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }));

        let paths = vec![good, missing, also_good];
        let structures = run_batch(&paths, &config(), &globin_source(), &reporter);
        drop(reporter);

        let ids: Vec<_> = structures.iter().map(Structure::id).collect();
        assert_eq!(ids, ["1HEM", "9ZZZ", "2HEM"]);
        let validity: Vec<_> = structures.iter().map(Structure::is_valid).collect();
        assert_eq!(validity, [true, false, true]);
        assert!(matches!(
            structures[1].issues(),
            [StructureIssue::SourceNotFound { .. }]
        ));
        assert_eq!(increments.load(Ordering::SeqCst), 3);
        assert_eq!(messages.load(Ordering::SeqCst), 1);
    }
}
