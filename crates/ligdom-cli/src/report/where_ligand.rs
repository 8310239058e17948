use super::{ScanTally, WhereLigandRow};
use itertools::Itertools;
use std::io::{self, Write};

/// Residue kinds seen in contact with one ligand inside one domain family.
#[derive(Debug, PartialEq, Eq)]
struct BindingSite<'a> {
    domain_id: &'a str,
    ligand: &'a str,
    residues: Vec<&'a str>,
}

/// Groups rows by (domain family, ligand). Groups follow the order of the
/// rows sorted by domain family; residue names are unique and sorted.
fn binding_sites(rows: &[WhereLigandRow]) -> Vec<BindingSite<'_>> {
    let mut sorted: Vec<&WhereLigandRow> = rows.iter().collect();
    sorted.sort_by(|a, b| a.domain_id.cmp(&b.domain_id));

    let mut sites: Vec<BindingSite<'_>> = Vec::new();
    for row in sorted {
        let existing = sites
            .iter_mut()
            .find(|site| site.domain_id == row.domain_id && site.ligand == row.ligand);
        match existing {
            Some(site) => site.residues.push(&row.residue),
            None => sites.push(BindingSite {
                domain_id: &row.domain_id,
                ligand: &row.ligand,
                residues: vec![&row.residue],
            }),
        }
    }

    for site in &mut sites {
        site.residues = site.residues.iter().copied().sorted().dedup().collect();
    }
    sites
}

/// Writes one line per (domain family, ligand) listing the residue kinds
/// that line the binding site.
pub fn write_where_ligand<W: Write>(out: &mut W, tally: &ScanTally) -> io::Result<()> {
    for site in binding_sites(&tally.where_ligand) {
        writeln!(
            out,
            "{:<23} {:<4}    [{}]",
            site.domain_id,
            site.ligand,
            site.residues.join(" ")
        )?;
    }
    Ok(())
}
