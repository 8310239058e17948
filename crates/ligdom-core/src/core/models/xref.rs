use std::fmt;

/// A link from a chain to a UniProt sequence entry, taken from a `DBREF` record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrossReference {
    pub chain_id: String,
    pub accession: String,
    pub entry_id: String,
}

impl CrossReference {
    pub fn new(chain_id: &str, accession: &str, entry_id: &str) -> Self {
        Self {
            chain_id: chain_id.trim().to_string(),
            accession: accession.trim().to_string(),
            entry_id: entry_id.trim().to_string(),
        }
    }
}

impl fmt::Display for CrossReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UNP Record -> chain: {}, UNP accession: {}, ID code: {}",
            self.chain_id, self.accession, self.entry_id
        )
    }
}
