use std::path::PathBuf;
use thiserror::Error;

/// Failures from building headline combinations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsaError {
    #[error("Combination length {length} cannot be longer than the {available} elements provided")]
    InvalidLength { length: usize, available: usize },
}

/// Failures reading or writing saved form state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to access saved state at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to serialize saved state")]
    Serialize(#[from] serde_json::Error),
}
