use crate::core::io::pdb::PdbOptions;
use crate::core::utils::geometry::CONTACT_DISTANCE_ANGSTROMS;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub pdb: PdbOptions,
    pub contact_cutoff: f64,
}

#[derive(Default)]
pub struct ScanConfigBuilder {
    ligand_names: Option<Vec<String>>,
    contact_cutoff: Option<f64>,
}

impl ScanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ligand_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ligand_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn contact_cutoff(mut self, angstroms: f64) -> Self {
        self.contact_cutoff = Some(angstroms);
        self
    }

    pub fn build(self) -> Result<ScanConfig, ConfigError> {
        let ligand_names = self
            .ligand_names
            .ok_or(ConfigError::MissingParameter("ligand_names"))?;
        let contact_cutoff = self.contact_cutoff.unwrap_or(CONTACT_DISTANCE_ANGSTROMS);
        if !(contact_cutoff > 0.0 && contact_cutoff.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "contact_cutoff",
                reason: format!("must be a positive distance, got {}", contact_cutoff),
            });
        }
        Ok(ScanConfig {
            pdb: PdbOptions::with_ligands(ligand_names),
            contact_cutoff,
        })
    }
}
