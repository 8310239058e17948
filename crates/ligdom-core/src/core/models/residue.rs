use super::atom::Atom;
use super::fields::{MalformedRecord, parse_int};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    name: String,      // Three-letter residue code (e.g., "ALA", "HIS")
    seq_number: isize, // Residue sequence number from the source file
    atoms: Vec<Atom>,  // Atoms in file order
}

impl Residue {
    pub fn new(name: &str, seq_number: isize) -> Self {
        Self {
            name: name.trim().to_string(),
            seq_number,
            atoms: Vec::new(),
        }
    }

    pub fn from_fields(name: &str, seq_number: &str) -> Result<Self, MalformedRecord> {
        Ok(Self::new(name, parse_int("resSeq", seq_number)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seq_number(&self) -> isize {
        self.seq_number
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Atoms that take part in contact detection.
    pub fn heavy_atoms(&self) -> impl Iterator<Item = &Atom> + Clone {
        self.atoms.iter().filter(|atom| !atom.is_hydrogen())
    }

    pub fn push_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Residue -> {} {:<4}", self.name, self.seq_number)
    }
}

/// End-of-chain marker taken from a terminator record.
///
/// Only the parser and the post-validator ever see it; a validated
/// [`Chain`](super::chain::Chain) no longer carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTerminator {
    pub residue_name: String,
    pub seq_number: isize,
}

impl ChainTerminator {
    pub fn new(residue_name: &str, seq_number: isize) -> Self {
        Self {
            residue_name: residue_name.trim().to_string(),
            seq_number,
        }
    }

    pub fn from_fields(residue_name: &str, seq_number: &str) -> Result<Self, MalformedRecord> {
        Ok(Self::new(residue_name, parse_int("resSeq", seq_number)?))
    }
}
