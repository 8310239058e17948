use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::builder::StructureBuilder;
use crate::core::models::fields::MalformedRecord;
use crate::core::models::ligand::Ligand;
use crate::core::models::residue::{ChainTerminator, Residue};
use crate::core::models::structure::{Structure, StructureIssue, structure_id_from_path};
use crate::core::models::xref::CrossReference;
use phf::phf_map;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Database name a `DBREF` record must carry to be kept as a cross-reference.
pub const UNIPROT_DATABASE: &str = "UNP";

// Fixed column ranges (0-based, end-exclusive) of the coordinate records.
const COL_RECORD: (usize, usize) = (0, 6);
const COL_ATOM_NAME: (usize, usize) = (12, 16);
const COL_RES_NAME: (usize, usize) = (17, 20);
const COL_CHAIN_ID: (usize, usize) = (21, 22);
const COL_RES_SEQ: (usize, usize) = (22, 26);
const COL_X: (usize, usize) = (30, 38);
const COL_Y: (usize, usize) = (38, 46);
const COL_Z: (usize, usize) = (46, 54);
const COL_ELEMENT: (usize, usize) = (76, 78);

// Column ranges of DBREF records.
const COL_DBREF_CHAIN_ID: (usize, usize) = (12, 13);
const COL_DBREF_DATABASE: (usize, usize) = (26, 32);
const COL_DBREF_ACCESSION: (usize, usize) = (33, 41);
const COL_DBREF_ENTRY_ID: (usize, usize) = (42, 54);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Atom,
    HetAtom,
    Terminator,
    DbRef,
}

// Keyed by the untrimmed six-column record tag.
static RECORD_KINDS: phf::Map<&'static str, RecordKind> = phf_map! {
    "ATOM  " => RecordKind::Atom,
    "HETATM" => RecordKind::HetAtom,
    "TER   " => RecordKind::Terminator,
    "DBREF " => RecordKind::DbRef,
};

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Read error on line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("Malformed record on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: MalformedRecord,
    },
    #[error("Terminator record on line {line} does not close any chain")]
    OrphanTerminator { line: usize },
}

impl PdbError {
    /// The 0-based index of the line that caused the failure, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            PdbError::Io(_) => None,
            PdbError::Read { line, .. }
            | PdbError::Malformed { line, .. }
            | PdbError::OrphanTerminator { line } => Some(*line),
        }
    }
}

/// Options for reading PDB coordinate files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdbOptions {
    /// Residue names of heterogens that are grouped into ligands. Any other
    /// heterogen is treated as an ordinary chain atom.
    pub ligand_names: HashSet<String>,
}

impl PdbOptions {
    pub fn with_ligands<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ligand_names: names
                .into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .collect(),
        }
    }

    pub fn is_ligand(&self, residue_name: &str) -> bool {
        self.ligand_names.contains(residue_name)
    }
}

/// Returns the text in `[start, end)`, clipped to the line length, trimmed.
fn slice_and_trim(line: &str, (start, end): (usize, usize)) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("").trim()
}

/// Looks up the record kind from columns 0-6 as written. Lines shorter than
/// the tag field match nothing.
fn record_kind(line: &str) -> Option<RecordKind> {
    let (start, end) = COL_RECORD;
    line.get(start..end)
        .and_then(|tag| RECORD_KINDS.get(tag))
        .copied()
}

fn read_atom(line: &str) -> Result<Atom, MalformedRecord> {
    Atom::from_fields(
        slice_and_trim(line, COL_ATOM_NAME),
        slice_and_trim(line, COL_ELEMENT),
        slice_and_trim(line, COL_X),
        slice_and_trim(line, COL_Y),
        slice_and_trim(line, COL_Z),
    )
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Options = PdbOptions;
    type Error = PdbError;

    fn read_from(
        id: &str,
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<Structure, Self::Error> {
        let mut builder = StructureBuilder::new(id);

        for (line_idx, line_res) in reader.lines().enumerate() {
            let line = line_res.map_err(|source| PdbError::Read {
                line: line_idx,
                source,
            })?;
            let malformed = |source: MalformedRecord| PdbError::Malformed {
                line: line_idx,
                source,
            };

            let Some(kind) = record_kind(&line) else {
                continue;
            };

            match kind {
                RecordKind::HetAtom if options.is_ligand(slice_and_trim(&line, COL_RES_NAME)) => {
                    let atom = read_atom(&line).map_err(malformed)?;
                    let ligand = Ligand::from_fields(
                        slice_and_trim(&line, COL_RES_NAME),
                        slice_and_trim(&line, COL_RES_SEQ),
                    )
                    .map_err(malformed)?;
                    builder.add_ligand_atom(ligand, atom);
                }
                RecordKind::Atom | RecordKind::HetAtom => {
                    let atom = read_atom(&line).map_err(malformed)?;
                    let residue = Residue::from_fields(
                        slice_and_trim(&line, COL_RES_NAME),
                        slice_and_trim(&line, COL_RES_SEQ),
                    )
                    .map_err(malformed)?;
                    builder.add_chain_atom(slice_and_trim(&line, COL_CHAIN_ID), residue, atom);
                }
                RecordKind::Terminator => {
                    let terminator = ChainTerminator::from_fields(
                        slice_and_trim(&line, COL_RES_NAME),
                        slice_and_trim(&line, COL_RES_SEQ),
                    )
                    .map_err(malformed)?;
                    builder
                        .terminate_chain(terminator)
                        .map_err(|_| PdbError::OrphanTerminator { line: line_idx })?;
                }
                RecordKind::DbRef => {
                    if slice_and_trim(&line, COL_DBREF_DATABASE) == UNIPROT_DATABASE {
                        builder.add_cross_reference(CrossReference::new(
                            slice_and_trim(&line, COL_DBREF_CHAIN_ID),
                            slice_and_trim(&line, COL_DBREF_ACCESSION),
                            slice_and_trim(&line, COL_DBREF_ENTRY_ID),
                        ));
                    }
                }
            }
        }

        Ok(builder.build())
    }
}

/// Parses the PDB file at `path` into a [`Structure`].
///
/// This never fails outright: a file that cannot be opened yields an empty,
/// invalid structure carrying [`StructureIssue::SourceNotFound`], and a record
/// that fails to parse discards everything read so far and yields an empty,
/// invalid structure carrying [`StructureIssue::MalformedRecord`] with the
/// 0-based line index.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_structure(path: &Path, options: &PdbOptions) -> Structure {
    let id = structure_id_from_path(path);

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(error = %e, "Structure file could not be opened.");
            return Structure::invalid(
                &id,
                StructureIssue::SourceNotFound {
                    path: path.to_path_buf(),
                },
            );
        }
    };

    match PdbFile::read_from(&id, &mut BufReader::new(file), options) {
        Ok(structure) => {
            debug!(
                structure = %id,
                chains = structure.chains().len(),
                ligands = structure.ligands().len(),
                cross_references = structure.cross_references().len(),
                "Parsed structure file."
            );
            structure
        }
        Err(e) => {
            warn!(structure = %id, error = %e, "Structure file has an error.");
            let issue = match e.line() {
                Some(line) => StructureIssue::MalformedRecord {
                    line,
                    detail: e.to_string(),
                },
                None => StructureIssue::SourceNotFound {
                    path: path.to_path_buf(),
                },
            };
            Structure::invalid(&id, issue)
        }
    }
}
