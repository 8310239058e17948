use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use ligdom::core::io::pdb::{PdbFile, PdbOptions};
use ligdom::core::io::traits::StructureFile;
use ligdom::core::models::structure::{Structure, structure_id_from_path};
use ligdom::engine::validation::validate_chains;
use std::io::{self, Write};
use tracing::info;

pub async fn run(args: InspectArgs) -> Result<()> {
    let options = PdbOptions::with_ligands(&args.ligands);
    let id = structure_id_from_path(&args.file);

    info!("Loading input structure from {:?}", &args.file);
    let mut structure =
        PdbFile::read_from_path(&id, &args.file, &options).map_err(|e| CliError::FileParsing {
            path: args.file.clone(),
            source: e.into(),
        })?;
    validate_chains(&mut structure);

    let stdout = io::stdout();
    render_structure(&mut stdout.lock(), &structure)?;
    Ok(())
}

fn render_structure<W: Write>(out: &mut W, structure: &Structure) -> io::Result<()> {
    writeln!(out, "PDB_ID: {}", structure.id())?;
    writeln!(out)?;

    for chain in structure.chains() {
        writeln!(out, "{chain}")?;
    }
    if structure.chains().is_empty() {
        writeln!(out, "< no chains found >")?;
    }
    writeln!(out)?;

    for ligand in structure.ligands() {
        writeln!(out, "{ligand}")?;
    }
    if structure.ligands().is_empty() {
        writeln!(out, "< no ligands found >")?;
    }
    writeln!(out)?;

    for xref in structure.cross_references() {
        writeln!(out, "{xref}")?;
    }

    if !structure.is_valid() {
        writeln!(out)?;
        writeln!(out, "ISSUES:")?;
        for issue in structure.issues() {
            writeln!(out, "  {issue}")?;
        }
    }
    Ok(())
}
