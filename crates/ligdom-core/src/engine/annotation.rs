use crate::core::models::domain::DomainAnnotation;
use crate::core::models::structure::{Structure, StructureIssue};
use crate::core::models::xref::CrossReference;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// A domain-annotation document as returned by a [`DomainSource`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainDocument {
    pub hits: Vec<DomainHit>,
}

/// One matched domain family and the places it occurs on the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainHit {
    pub accession: String,
    pub id: String,
    pub locations: Vec<HitLocation>,
}

/// A single occurrence of a [`DomainHit`]; bounds are kept as the raw
/// attribute text and coerced when annotations are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitLocation {
    pub start: String,
    pub end: String,
}

impl HitLocation {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainSourceError {
    #[error("no annotation document available for {accession}: {reason}")]
    Unavailable { accession: String, reason: String },
    #[error("annotation document for {accession} is malformed: {reason}")]
    Malformed { accession: String, reason: String },
}

/// Supplies domain-annotation documents for cross-referenced chains.
///
/// Implementations own all retrieval concerns (caching, network access,
/// document parsing). Each call is treated as one atomic step that either
/// yields a whole document or fails.
pub trait DomainSource {
    /// Returns the annotation document for `xref` within structure `structure_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainSourceError`] if no document can be produced.
    fn fetch(
        &self,
        structure_id: &str,
        xref: &CrossReference,
    ) -> Result<DomainDocument, DomainSourceError>;
}

/// A [`DomainSource`] backed by documents held in memory, keyed by
/// `(chain id, accession)`. Lookups for unknown keys fail as unavailable.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDomainSource {
    documents: HashMap<(String, String), DomainDocument>,
}

impl InMemoryDomainSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chain_id: &str, accession: &str, document: DomainDocument) {
        self.documents
            .insert((chain_id.to_string(), accession.to_string()), document);
    }

    pub fn with_document(mut self, chain_id: &str, accession: &str, document: DomainDocument) -> Self {
        self.insert(chain_id, accession, document);
        self
    }
}

impl DomainSource for InMemoryDomainSource {
    fn fetch(
        &self,
        _structure_id: &str,
        xref: &CrossReference,
    ) -> Result<DomainDocument, DomainSourceError> {
        self.documents
            .get(&(xref.chain_id.clone(), xref.accession.clone()))
            .cloned()
            .ok_or_else(|| DomainSourceError::Unavailable {
                accession: xref.accession.clone(),
                reason: format!("no document registered for chain {}", xref.chain_id),
            })
    }
}

/// Flattens a document into one annotation per (hit, location) pair, in
/// document order.
fn flatten_document(
    xref: &CrossReference,
    document: &DomainDocument,
) -> Result<Vec<DomainAnnotation>, DomainSourceError> {
    let mut annotations = Vec::new();
    for hit in &document.hits {
        for location in &hit.locations {
            let annotation = DomainAnnotation::from_fields(
                &xref.chain_id,
                &hit.accession,
                &hit.id,
                &location.start,
                &location.end,
            )
            .map_err(|e| DomainSourceError::Malformed {
                accession: xref.accession.clone(),
                reason: e.to_string(),
            })?;
            annotations.push(annotation);
        }
    }
    Ok(annotations)
}

/// Attaches domain annotations for every cross-reference of `structure`.
///
/// Does nothing for an invalid structure. The operation is all-or-nothing: if
/// any cross-reference fails, the structure is marked invalid and none of the
/// annotations gathered for it are attached.
#[instrument(skip_all, fields(structure = %structure.id()))]
pub fn resolve_domains<S: DomainSource + ?Sized>(structure: &mut Structure, source: &S) {
    if !structure.is_valid() {
        debug!("Skipping domain resolution for invalid structure.");
        return;
    }

    let mut collected = Vec::new();
    for xref in structure.cross_references() {
        let result = source
            .fetch(structure.id(), xref)
            .and_then(|document| flatten_document(xref, &document));
        match result {
            Ok(annotations) => {
                debug!(
                    chain = %xref.chain_id,
                    accession = %xref.accession,
                    domains = annotations.len(),
                    "Resolved domain annotations."
                );
                collected.extend(annotations);
            }
            Err(e) => {
                warn!(
                    chain = %xref.chain_id,
                    accession = %xref.accession,
                    error = %e,
                    "Could not get domain information."
                );
                let issue = StructureIssue::AnnotationUnavailable {
                    chain_id: xref.chain_id.clone(),
                    accession: xref.accession.clone(),
                    reason: e.to_string(),
                };
                structure.record_issue(issue);
                return;
            }
        }
    }

    info!(domains = collected.len(), "Attached domain annotations.");
    structure.extend_domains(collected);
}
