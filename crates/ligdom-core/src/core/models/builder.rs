use super::atom::Atom;
use super::chain::Chain;
use super::ligand::Ligand;
use super::residue::{ChainTerminator, Residue};
use super::structure::Structure;
use super::xref::CrossReference;

/// Incrementally assembles a [`Structure`] from a stream of records.
///
/// The builder tracks where the next atom belongs through explicit cursors
/// into the structure's collections instead of inspecting the tail of a
/// growing list. Entities are only ever appended, never reordered.
///
/// A terminator closes the chain cursor, so a later atom repeating the chain
/// identifier starts a new [`Chain`] rather than extending the closed one.
/// This keeps the terminator as the last entry of every chain.
#[derive(Debug)]
pub struct StructureBuilder {
    structure: Structure,

    // --- Cursors into the structure being built ---
    current_chain: Option<usize>,
    current_residue: Option<usize>,
    current_ligand: Option<usize>,
}

/// Returned by [`StructureBuilder::terminate_chain`] when no chain is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoOpenChain;

impl StructureBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            structure: Structure::new(id),
            current_chain: None,
            current_residue: None,
            current_ligand: None,
        }
    }

    /// Adds a polymer atom, opening a new chain and/or residue when the chain
    /// identifier or sequence number differs from the current one.
    pub fn add_chain_atom(&mut self, chain_id: &str, residue: Residue, atom: Atom) -> &mut Self {
        let chain_id = chain_id.trim();
        let chain_idx = match self.current_chain {
            Some(idx) if self.structure.chains[idx].id() == chain_id => idx,
            _ => self.start_chain(chain_id),
        };

        let chain = &mut self.structure.chains[chain_idx];
        let continues_residue = self.current_residue.is_some()
            && chain
                .last_residue()
                .is_some_and(|last| last.seq_number() == residue.seq_number());

        let res_idx = if continues_residue {
            chain.residues().len() - 1
        } else {
            chain.push_residue(residue);
            chain.residues().len() - 1
        };
        self.current_residue = Some(res_idx);

        if let Some(current) = chain.residue_mut(res_idx) {
            current.push_atom(atom);
        }
        self
    }

    /// Adds a ligand atom; it joins the current ligand when the sequence
    /// numbers agree, otherwise it opens a new ligand.
    ///
    /// Only the sequence number is compared, so atoms of two different
    /// molecules sharing a number merge into one ligand if nothing with a
    /// different number separates them.
    pub fn add_ligand_atom(&mut self, ligand: Ligand, atom: Atom) -> &mut Self {
        let ligands = &mut self.structure.ligands;
        let idx = match self.current_ligand {
            Some(idx) if ligands[idx].seq_number() == ligand.seq_number() => idx,
            _ => {
                ligands.push(ligand);
                ligands.len() - 1
            }
        };
        ligands[idx].push_atom(atom);
        self.current_ligand = Some(idx);
        self
    }

    /// Closes the current chain with `terminator`.
    ///
    /// Subsequent atoms open a new chain even if they repeat this chain's
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NoOpenChain`] if no chain is currently open.
    pub fn terminate_chain(&mut self, terminator: ChainTerminator) -> Result<&mut Self, NoOpenChain> {
        let idx = self.current_chain.take().ok_or(NoOpenChain)?;
        self.structure.chains[idx].terminator = Some(terminator);
        self.current_residue = None;
        Ok(self)
    }

    pub fn add_cross_reference(&mut self, xref: CrossReference) -> &mut Self {
        self.structure.push_cross_reference(xref);
        self
    }

    pub fn build(self) -> Structure {
        self.structure
    }

    fn start_chain(&mut self, chain_id: &str) -> usize {
        self.structure.push_chain(Chain::new(chain_id));
        let idx = self.structure.chains.len() - 1;
        self.current_chain = Some(idx);
        self.current_residue = None;
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn atom(name: &str) -> Atom {
        Atom::new(name, "", Point3::origin())
    }

    #[test]
    fn atoms_with_same_chain_and_number_share_a_residue() {
        let mut builder = StructureBuilder::new("1ABC");
        builder
            .add_chain_atom("A", Residue::new("ALA", 1), atom("N"))
            .add_chain_atom("A", Residue::new("ALA", 1), atom("CA"))
            .add_chain_atom("A", Residue::new("GLY", 2), atom("N"));
        let structure = builder.build();

        assert_eq!(structure.chains().len(), 1);
        let residues = structure.chains()[0].residues();
        assert_eq!(residues.len(), 2);
        assert_eq!(residues[0].atoms().len(), 2);
        assert_eq!(residues[1].name(), "GLY");
    }

    #[test]
    fn chain_change_opens_new_chain_and_residue() {
        let mut builder = StructureBuilder::new("1ABC");
        builder
            .add_chain_atom("A", Residue::new("ALA", 1), atom("N"))
            .add_chain_atom("B", Residue::new("ALA", 1), atom("N"));
        let structure = builder.build();

        let ids: Vec<_> = structure.chains().iter().map(Chain::id).collect();
        assert_eq!(ids, ["A", "B"]);
        assert_eq!(structure.chains()[1].residues().len(), 1);
    }

    #[test]
    fn terminator_closes_chain_and_next_atom_opens_another() {
        let mut builder = StructureBuilder::new("1ABC");
        builder.add_chain_atom("A", Residue::new("ALA", 1), atom("N"));
        builder
            .terminate_chain(ChainTerminator::new("ALA", 1))
            .unwrap();
        builder.add_chain_atom("A", Residue::new("HOH", 301), atom("O"));
        let structure = builder.build();

        assert_eq!(structure.chains().len(), 2);
        assert!(structure.chains()[0].is_terminated());
        assert!(!structure.chains()[1].is_terminated());
    }

    #[test]
    fn terminator_without_open_chain_is_rejected() {
        let mut builder = StructureBuilder::new("1ABC");
        assert_eq!(
            builder.terminate_chain(ChainTerminator::new("ALA", 1)).err(),
            Some(NoOpenChain)
        );
    }

    #[test]
    fn ligand_atoms_group_by_sequence_number() {
        let mut builder = StructureBuilder::new("1ABC");
        builder
            .add_ligand_atom(Ligand::new("HEM", 500), atom("FE"))
            .add_ligand_atom(Ligand::new("HEM", 500), atom("NA"))
            .add_ligand_atom(Ligand::new("HEM", 501), atom("FE"));
        let structure = builder.build();

        assert_eq!(structure.ligands().len(), 2);
        let names: Vec<_> = structure.ligands()[0].atoms().iter().map(Atom::name).collect();
        assert_eq!(names, ["FE", "NA"]);
    }

    #[test]
    fn ligands_sharing_a_number_merge_when_contiguous() {
        let mut builder = StructureBuilder::new("1ABC");
        builder
            .add_ligand_atom(Ligand::new("HEM", 500), atom("FE"))
            .add_ligand_atom(Ligand::new("SO4", 500), atom("S"));
        let structure = builder.build();

        assert_eq!(structure.ligands().len(), 1);
        assert_eq!(structure.ligands()[0].name(), "HEM");
        assert_eq!(structure.ligands()[0].atoms().len(), 2);
    }

    #[test]
    fn chain_atoms_do_not_disturb_ligand_cursor() {
        let mut builder = StructureBuilder::new("1ABC");
        builder
            .add_ligand_atom(Ligand::new("HEM", 500), atom("FE"))
            .add_chain_atom("A", Residue::new("ALA", 500), atom("CA"))
            .add_ligand_atom(Ligand::new("HEM", 500), atom("NA"));
        let structure = builder.build();

        assert_eq!(structure.ligands().len(), 1);
        assert_eq!(structure.ligands()[0].atoms().len(), 2);
    }
}
