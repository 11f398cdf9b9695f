use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request for '{url}' failed: {source}")]
    Request {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to create '{path}': {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("transfer from '{url}' to '{path}' failed: {source}")]
    Transfer {
        url: String,
        path: PathBuf,
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
