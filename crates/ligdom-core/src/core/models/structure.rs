use super::chain::Chain;
use super::domain::DomainAnnotation;
use super::ligand::Ligand;
use super::xref::CrossReference;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Length of the identifier code derived from a structure file name.
pub const STRUCTURE_ID_LEN: usize = 4;

/// A problem that makes a whole [`Structure`] untrustworthy downstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureIssue {
    #[error("source file '{path}' could not be opened", path = path.display())]
    SourceNotFound { path: PathBuf },

    #[error("malformed record on line {line}: {detail}")]
    MalformedRecord { line: usize, detail: String },

    #[error("chain '{chain_id}' is not closed by a terminator record")]
    UnclosedChain { chain_id: String },

    #[error("domain annotations unavailable for chain '{chain_id}' ({accession}): {reason}")]
    AnnotationUnavailable {
        chain_id: String,
        accession: String,
        reason: String,
    },
}

/// A parsed macromolecular structure.
///
/// A structure starts out valid and empty, is filled in file order by the
/// record parser, and then passes through validation and domain resolution.
/// Any step may record a [`StructureIssue`], which permanently marks the
/// structure as invalid; callers must check [`Structure::is_valid`] before
/// trusting its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    id: String,
    valid: bool,
    issues: Vec<StructureIssue>,
    pub(crate) chains: Vec<Chain>,
    pub(crate) ligands: Vec<Ligand>,
    pub(crate) cross_references: Vec<CrossReference>,
    pub(crate) domains: Vec<DomainAnnotation>,
}

impl Structure {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            valid: true,
            issues: Vec::new(),
            chains: Vec::new(),
            ligands: Vec::new(),
            cross_references: Vec::new(),
            domains: Vec::new(),
        }
    }

    /// Creates an empty structure that is already marked invalid.
    pub fn invalid(id: &str, issue: StructureIssue) -> Self {
        let mut structure = Self::new(id);
        structure.record_issue(issue);
        structure
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn issues(&self) -> &[StructureIssue] {
        &self.issues
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn ligands(&self) -> &[Ligand] {
        &self.ligands
    }

    pub fn cross_references(&self) -> &[CrossReference] {
        &self.cross_references
    }

    pub fn domains(&self) -> &[DomainAnnotation] {
        &self.domains
    }

    pub fn push_chain(&mut self, chain: Chain) {
        self.chains.push(chain);
    }

    pub fn push_cross_reference(&mut self, xref: CrossReference) {
        self.cross_references.push(xref);
    }

    pub(crate) fn extend_domains(&mut self, domains: impl IntoIterator<Item = DomainAnnotation>) {
        self.domains.extend(domains);
    }

    /// Records `issue` and marks the structure invalid.
    pub fn record_issue(&mut self, issue: StructureIssue) {
        self.valid = false;
        self.issues.push(issue);
    }
}

/// Derives the structure identifier from a file path: the four characters
/// immediately preceding the extension, upper-cased.
///
/// Names with no extension use their last four characters; names shorter than
/// four characters are used whole.
pub fn structure_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let chars: Vec<char> = stem.chars().collect();
    let start = chars.len().saturating_sub(STRUCTURE_ID_LEN);
    chars[start..].iter().collect::<String>().to_uppercase()
}
