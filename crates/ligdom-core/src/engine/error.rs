use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Structure '{id}' is marked invalid and cannot be matched")]
    InvalidStructure { id: String },
}
