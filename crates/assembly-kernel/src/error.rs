//! Error types for kernel runs

use assembly_domain::{AssemblyError, ErrorKind};
use thiserror::Error;

/// Errors that can occur while running the kernel pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Invalid kernel configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input or failed assembly step
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

impl KernelError {
    /// The assembly error, if this is one
    pub fn assembly(&self) -> Option<&AssemblyError> {
        match self {
            Self::Assembly(error) => Some(error),
            Self::Config(_) => None,
        }
    }

    /// Kind of the underlying assembly error
    pub fn kind(&self) -> Option<ErrorKind> {
        self.assembly().map(AssemblyError::kind)
    }
}
