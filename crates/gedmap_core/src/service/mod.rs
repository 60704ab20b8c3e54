//! Conversion use-case service.
//!
//! # Responsibility
//! - Orchestrate the pipeline stages into one conversion call.
//! - Keep callers (CLI, tests) decoupled from stage ordering details.

mod converter;
mod options;

pub use converter::{AncestorConverter, OutputMode};
pub use options::ConvertOptions;

use crate::source::SourceError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Conversion-level failure.
#[derive(Debug)]
pub enum ConvertError {
    /// Source graph could not be acquired.
    Source(SourceError),
    /// Options file missing or invalid.
    Config { path: PathBuf, message: String },
    /// Output could not be rendered.
    Serialize(serde_json::Error),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Config { path, message } => {
                write!(f, "invalid options file `{}`: {message}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to render output: {err}"),
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Config { .. } => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<SourceError> for ConvertError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}
