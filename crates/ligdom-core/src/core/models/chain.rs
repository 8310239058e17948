use super::residue::{ChainTerminator, Residue};
use std::fmt;

const RESIDUES_PER_ROW: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    id: String,                                     // Chain identifier (e.g., "A", "B")
    residues: Vec<Residue>,                         // Residues in file order
    pub(crate) terminator: Option<ChainTerminator>, // Closing marker, consumed by validation
}

impl Chain {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            residues: Vec::new(),
            terminator: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn push_residue(&mut self, residue: Residue) {
        self.residues.push(residue);
    }

    pub(crate) fn residue_mut(&mut self, index: usize) -> Option<&mut Residue> {
        self.residues.get_mut(index)
    }

    pub(crate) fn last_residue(&self) -> Option<&Residue> {
        self.residues.last()
    }

    /// Whether a terminator record has closed this chain and has not yet been
    /// consumed by validation.
    pub fn is_terminated(&self) -> bool {
        self.terminator.is_some()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = format!("CHAIN: {} --> ", self.id);
        write!(f, "{}", arrow)?;
        for (i, residue) in self.residues.iter().enumerate() {
            write!(f, "{}", residue.name())?;
            if (i + 1) % RESIDUES_PER_ROW == 0 && i + 1 < self.residues.len() {
                write!(f, "\n{}", " ".repeat(arrow.len()))?;
            } else if i + 1 < self.residues.len() {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}
