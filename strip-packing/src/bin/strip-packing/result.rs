use std::fmt::Display;

use packing_format::FormatError;
use strip_packing::PackingError;
use thiserror::Error;

pub(crate) type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The instance file could not be read, more details: {0}")]
    InvalidFormat(#[from] FormatError),
    #[error("{0}")]
    Packing(#[from] PackingError),
    #[error("The path {0} does not name an instance file.")]
    InvalidInstancePath(String),
}

impl CliError {
    pub(crate) fn invalid_instance_path(path: impl Display) -> Self {
        Self::InvalidInstancePath(format!("{}", path))
    }
}
