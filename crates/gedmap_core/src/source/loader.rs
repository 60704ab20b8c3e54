//! Snapshot loading for parsed GEDCOM graphs.

use super::SourceGraph;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type SourceResult<T> = Result<T, SourceError>;

/// Fatal source acquisition failure. Raised before any pipeline stage runs.
#[derive(Debug)]
pub enum SourceError {
    NotFound(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "source file `{}` does not exist", path.display()),
            Self::Io { path, source } => {
                write!(f, "failed to read source file `{}`: {source}", path.display())
            }
            Self::Malformed {
                path: Some(path),
                source,
            } => write!(f, "malformed source graph `{}`: {source}", path.display()),
            Self::Malformed { path: None, source } => write!(f, "malformed source graph: {source}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
        }
    }
}

/// Loads a parsed-graph JSON snapshot.
///
/// # Errors
/// - `NotFound` when `path` does not exist.
/// - `Io` when the file cannot be read.
/// - `Malformed` when the content is not a valid snapshot.
pub fn load_source_graph(path: impl AsRef<Path>) -> SourceResult<SourceGraph> {
    let path = path.as_ref();
    let started_at = Instant::now();

    if !path.exists() {
        error!(
            "event=source_load module=source status=error error_code=source_not_found path={}",
            path.display()
        );
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph: SourceGraph = serde_json::from_str(&text).map_err(|source| {
        error!(
            "event=source_load module=source status=error error_code=source_malformed path={}",
            path.display()
        );
        SourceError::Malformed {
            path: Some(path.to_path_buf()),
            source,
        }
    })?;

    info!(
        "event=source_load module=source status=ok individuals={} families={} duration_ms={}",
        graph.individuals.len(),
        graph.families.len(),
        started_at.elapsed().as_millis()
    );
    Ok(graph)
}
