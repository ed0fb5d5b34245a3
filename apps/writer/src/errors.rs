use thiserror::Error;

use crate::generation::GenerationError;

/// Application-level error type.
/// Only `Configuration` is fatal before any other work starts; the interactive
/// loop reports `Generation` and keeps going.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data format error: {0}")]
    DataFormat(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Short machine-friendly code, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::DataFormat(_) => "DATA_FORMAT_ERROR",
            AppError::Generation(_) => "GENERATION_ERROR",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }
}
