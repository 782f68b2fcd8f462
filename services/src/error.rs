use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token exchange failed: {status} {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Recently-played request failed: {status} {body}")]
    Fetch { status: u16, body: String },

    #[error("{}: {source}", path.display())]
    Persistence { path: PathBuf, source: PersistenceSource },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to format page: {0}")]
    Render(#[from] time::error::Format),
}

#[derive(Debug, Error)]
pub enum PersistenceSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(serde_json::Error),
}

impl Error {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: impl Into<PersistenceSource>) -> Self {
        Self::Persistence {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<serde_json::Error> for PersistenceSource {
    fn from(e: serde_json::Error) -> Self {
        // a serde_json error wrapping io is still an io failure
        match e.io_error_kind() {
            Some(kind) => Self::Io(std::io::Error::new(kind, e)),
            None => Self::Json(e),
        }
    }
}
