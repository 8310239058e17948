use crate::core::models::domain::DomainAnnotation;
use crate::core::models::ligand::Ligand;
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::{CONTACT_DISTANCE_ANGSTROMS, in_contact};
use crate::engine::error::EngineError;
use itertools::{Itertools, iproduct};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, instrument};

/// The protein side of a ligand contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSite<'a> {
    pub residue: &'a Residue,
    pub chain_id: &'a str,
    pub domain: Option<&'a DomainAnnotation>, // None if no domain covers the residue
}

/// One row of a ligand environment.
///
/// `site` is `None` for a ligand that touches no residue at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRecord<'a> {
    pub ligand: &'a Ligand,
    pub site: Option<ContactSite<'a>>,
}

impl ContactRecord<'_> {
    pub fn domain(&self) -> Option<&DomainAnnotation> {
        self.site.and_then(|site| site.domain)
    }
}

impl fmt::Display for ContactRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ligand)?;
        let Some(site) = self.site else {
            return Ok(());
        };
        write!(f, " {} {:<8}", site.residue, site.chain_id)?;
        if let Some(domain) = site.domain {
            write!(
                f,
                " Pfam domain -> {:<10} {:<23} ({:<5} - {:>5})",
                domain.accession, domain.domain_id, domain.start, domain.end
            )?;
        }
        Ok(())
    }
}

/// A ligand found in contact with a domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainMatch<'a> {
    pub ligand: &'a Ligand,
    pub domain: &'a DomainAnnotation,
}

/// Computes ligand contacts over a validated, annotated [`Structure`].
///
/// All results borrow from the structure. Every operation is pure, so calling
/// it twice yields the same rows in the same order.
#[derive(Debug, Clone, Copy)]
pub struct ContactMatcher<'a> {
    structure: &'a Structure,
    cutoff: f64,
}

impl<'a> ContactMatcher<'a> {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidStructure`] if `structure` is not valid.
    pub fn new(structure: &'a Structure) -> Result<Self, EngineError> {
        if !structure.is_valid() {
            return Err(EngineError::InvalidStructure {
                id: structure.id().to_string(),
            });
        }
        Ok(Self {
            structure,
            cutoff: CONTACT_DISTANCE_ANGSTROMS,
        })
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    fn touches(&self, ligand: &Ligand, residue: &Residue) -> bool {
        iproduct!(residue.heavy_atoms(), ligand.heavy_atoms())
            .any(|(a, b)| in_contact(a, b, self.cutoff))
    }

    fn covering_domains(
        &self,
        chain_id: &'a str,
        seq_number: isize,
    ) -> impl Iterator<Item = &'a DomainAnnotation> {
        self.structure
            .domains()
            .iter()
            .filter(move |d| d.chain_id == chain_id && d.contains(seq_number))
    }

    /// Lists every ligand-residue contact, resolved against domain intervals.
    ///
    /// Contacts are unique per (ligand name, ligand number, residue name,
    /// residue number, chain). A contact yields one row per covering domain,
    /// or one row without a domain. Ligands with no contact are appended last,
    /// one row each without a site.
    #[instrument(skip_all, fields(structure = %self.structure.id()))]
    pub fn ligands_environment(&self) -> Vec<ContactRecord<'a>> {
        let structure = self.structure;
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for ligand in structure.ligands() {
            for chain in structure.chains() {
                for residue in chain.residues() {
                    if !self.touches(ligand, residue) {
                        continue;
                    }
                    let key = (
                        ligand.name(),
                        ligand.seq_number(),
                        residue.name(),
                        residue.seq_number(),
                        chain.id(),
                    );
                    if !seen.insert(key) {
                        continue;
                    }

                    let site = |domain| ContactRecord {
                        ligand,
                        site: Some(ContactSite {
                            residue,
                            chain_id: chain.id(),
                            domain,
                        }),
                    };
                    let before = records.len();
                    records.extend(
                        self.covering_domains(chain.id(), residue.seq_number())
                            .map(|domain| site(Some(domain))),
                    );
                    if records.len() == before {
                        records.push(site(None));
                    }
                }
            }
        }

        let contacted: HashSet<_> = records.iter().map(|r| r.ligand.key()).collect();
        let isolated = structure
            .ligands()
            .iter()
            .filter(|ligand| !contacted.contains(&ligand.key()))
            .map(|ligand| ContactRecord { ligand, site: None })
            .collect_vec();

        debug!(
            contacts = records.len(),
            isolated = isolated.len(),
            "Computed ligand environment."
        );
        records.extend(isolated);
        records
    }

    /// Distinct (ligand name, domain) pairs in first-seen order.
    pub fn ligands_binding_domains(&self) -> Vec<DomainMatch<'a>> {
        self.domain_matches()
            .unique_by(|m| (m.ligand.name(), m.domain))
            .collect()
    }

    /// Distinct (ligand name, ligand number, domain) triples in first-seen
    /// order; separate ligand instances in one domain are kept apart.
    pub fn ligands_binding_domains_detailed(&self) -> Vec<DomainMatch<'a>> {
        self.domain_matches()
            .unique_by(|m| (m.ligand.name(), m.ligand.seq_number(), m.domain))
            .collect()
    }

    fn domain_matches(&self) -> impl Iterator<Item = DomainMatch<'a>> {
        self.ligands_environment()
            .into_iter()
            .filter_map(|record| {
                let domain = record.site?.domain?;
                Some(DomainMatch {
                    ligand: record.ligand,
                    domain,
                })
            })
    }
}
