use crate::core::models::structure::{Structure, StructureIssue};
use tracing::{instrument, warn};

/// Enforces that every chain of a freshly parsed structure was closed by a
/// terminator record.
///
/// Closed chains have their terminator consumed; unclosed chains are removed
/// and the structure is marked invalid. Relative order of the remaining chains
/// is preserved. Must run exactly once, right after parsing.
///
/// # Return
///
/// Returns the number of chains that were dropped.
#[instrument(skip_all, fields(structure = %structure.id()))]
pub fn validate_chains(structure: &mut Structure) -> usize {
    let mut unclosed = Vec::new();

    structure.chains.retain_mut(|chain| match chain.terminator.take() {
        Some(_) => true,
        None => {
            unclosed.push(chain.id().to_string());
            false
        }
    });

    for chain_id in &unclosed {
        warn!(chain = %chain_id, "Dropping chain without terminator record.");
    }
    let dropped = unclosed.len();
    for chain_id in unclosed {
        structure.record_issue(StructureIssue::UnclosedChain { chain_id });
    }
    dropped
}
