//! Report files written by `ligdom scan`.
//!
//! Contact matching runs once per valid structure into a [`StructureFindings`],
//! which feeds the per-structure log immediately and is folded into a
//! [`ScanTally`] for the statistics written after the batch.

pub mod statistics;
pub mod structure_log;
pub mod where_ligand;

use ligdom::core::models::structure::Structure;
use ligdom::engine::contacts::{ContactMatcher, ContactRecord, DomainMatch};
use ligdom::engine::error::EngineError;

pub struct StructureFindings<'a> {
    pub structure: &'a Structure,
    pub environment: Vec<ContactRecord<'a>>,
    pub binding_domains: Vec<DomainMatch<'a>>,
    pub binding_domains_detailed: Vec<DomainMatch<'a>>,
}

impl<'a> StructureFindings<'a> {
    pub fn collect(structure: &'a Structure, cutoff: f64) -> Result<Self, EngineError> {
        let matcher = ContactMatcher::new(structure)?.with_cutoff(cutoff);
        Ok(Self {
            structure,
            environment: matcher.ligands_environment(),
            binding_domains: matcher.ligands_binding_domains(),
            binding_domains_detailed: matcher.ligands_binding_domains_detailed(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub accession: String,
    pub domain_id: String,
    pub ligand: String,
}

impl BindingKey {
    fn from_match(m: &DomainMatch<'_>) -> Self {
        Self {
            accession: m.domain.accession.clone(),
            domain_id: m.domain.domain_id.clone(),
            ligand: m.ligand.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereLigandRow {
    pub domain_id: String,
    pub ligand: String,
    pub residue: String,
}

/// Batch-wide accumulation of findings, in structure order.
#[derive(Debug, Default)]
pub struct ScanTally {
    pub(crate) domains: Vec<(String, String)>, // (accession, id) of every annotation
    pub(crate) bindings: Vec<BindingKey>,
    pub(crate) detailed_bindings: Vec<BindingKey>,
    pub(crate) where_ligand: Vec<WhereLigandRow>,
}

impl ScanTally {
    pub fn record(&mut self, findings: &StructureFindings<'_>) {
        self.domains.extend(
            findings
                .structure
                .domains()
                .iter()
                .map(|d| (d.accession.clone(), d.domain_id.clone())),
        );
        self.bindings
            .extend(findings.binding_domains.iter().map(BindingKey::from_match));
        self.detailed_bindings.extend(
            findings
                .binding_domains_detailed
                .iter()
                .map(BindingKey::from_match),
        );
        self.where_ligand
            .extend(findings.environment.iter().filter_map(|record| {
                let site = record.site?;
                let domain = site.domain?;
                Some(WhereLigandRow {
                    domain_id: domain.domain_id.clone(),
                    ligand: record.ligand.name().to_string(),
                    residue: site.residue.name().to_string(),
                })
            }));
    }
}
