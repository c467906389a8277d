use std::path::PathBuf;
use thiserror::Error;

/// Failures of the document acquisition layer
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("failed to read collection {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse collection {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CollectionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = CollectionError> = std::result::Result<T, E>;
