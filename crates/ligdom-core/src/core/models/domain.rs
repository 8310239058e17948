use super::fields::{MalformedRecord, parse_int};
use std::fmt;

/// A protein domain assigned to a residue-number interval of one chain.
///
/// The interval is inclusive on both ends and lives in the chain's residue
/// sequence-number space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainAnnotation {
    pub chain_id: String,
    pub accession: String,
    pub domain_id: String,
    pub start: isize,
    pub end: isize,
}

impl DomainAnnotation {
    pub fn new(chain_id: &str, accession: &str, domain_id: &str, start: isize, end: isize) -> Self {
        Self {
            chain_id: chain_id.trim().to_string(),
            accession: accession.trim().to_string(),
            domain_id: domain_id.trim().to_string(),
            start,
            end,
        }
    }

    /// Builds an annotation from raw attribute text.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRecord`] if `start` or `end` is not an integer.
    pub fn from_fields(
        chain_id: &str,
        accession: &str,
        domain_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Self, MalformedRecord> {
        Ok(Self::new(
            chain_id,
            accession,
            domain_id,
            parse_int("start", start)?,
            parse_int("end", end)?,
        ))
    }

    /// Whether `seq_number` lies within `[start, end]`.
    pub fn contains(&self, seq_number: isize) -> bool {
        self.start <= seq_number && seq_number <= self.end
    }
}

impl fmt::Display for DomainAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pfam_domain -> {:<10} {:<23} {:<8} ({:<5} - {:>5})",
            self.accession, self.domain_id, self.chain_id, self.start, self.end
        )
    }
}
