use super::StructureFindings;
use std::io::{self, Write};
use std::path::PathBuf;

const SEPARATOR_WIDTH: usize = 150;

/// Which contact view follows the domain architecture of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDetail {
    MatchedDomains,
    Environment,
}

impl LogDetail {
    pub fn from_environment_flag(environment: bool) -> Self {
        if environment {
            Self::Environment
        } else {
            Self::MatchedDomains
        }
    }
}

/// Appends the block for one successfully processed structure.
pub fn write_structure<W: Write>(
    out: &mut W,
    findings: &StructureFindings<'_>,
    detail: LogDetail,
) -> io::Result<()> {
    let structure = findings.structure;
    writeln!(out, "PDB_ID: {}", structure.id())?;
    writeln!(out)?;
    writeln!(out, "DOMAIN ARCHITECTURE:")?;
    if structure.domains().is_empty() {
        writeln!(out, "< no domains found >")?;
    }
    for domain in structure.domains() {
        writeln!(out, "{domain}")?;
    }

    writeln!(out)?;
    match detail {
        LogDetail::Environment => {
            writeln!(out, "LIGANDS ENVIRONMENT:")?;
            if findings.environment.is_empty() {
                writeln!(out, "< no ligands found >")?;
            }
            for record in &findings.environment {
                writeln!(out, "{record}")?;
            }
        }
        LogDetail::MatchedDomains => {
            writeln!(out, "MATCHED DOMAINS:")?;
            if findings.binding_domains.is_empty() {
                writeln!(out, "< no domains found >")?;
            }
            for m in &findings.binding_domains {
                writeln!(out, "{}    {}", m.domain, m.ligand)?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    writeln!(out)
}

/// Appends the trailing list of structures that could not be processed.
/// Writes nothing when no structure was skipped.
pub fn write_skipped<W: Write>(out: &mut W, skipped: &[PathBuf]) -> io::Result<()> {
    if skipped.is_empty() {
        return Ok(());
    }
    writeln!(out, "SKIPPED PDB FILES:")?;
    for path in skipped {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}
