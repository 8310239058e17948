use super::atom::Atom;
use super::fields::{MalformedRecord, parse_int};
use std::fmt;

/// A bound small molecule, grouped from consecutive heterogen-atom records.
///
/// Structurally a ligand mirrors a [`Residue`](super::residue::Residue), but it
/// belongs to the structure as a whole rather than to any chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Ligand {
    name: String,
    seq_number: isize,
    atoms: Vec<Atom>,
}

impl Ligand {
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

    pub fn heavy_atoms(&self) -> impl Iterator<Item = &Atom> + Clone {
        self.atoms.iter().filter(|atom| !atom.is_hydrogen())
    }

    pub fn push_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// The `(name, sequence number)` pair identifying this ligand instance.
    pub fn key(&self) -> (&str, isize) {
        (&self.name, self.seq_number)
    }
}

impl fmt::Display for Ligand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ligand -> {} {:<8}", self.name, self.seq_number)
    }
}
