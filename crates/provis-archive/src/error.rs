use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read archive '{path}': {source}")]
    OpenFile { path: PathBuf, source: io::Error },

    #[error("failed to open archive: {source}")]
    Open { source: zip::result::ZipError },

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    Traversal { entry: PathBuf, resolved: PathBuf },

    #[error("entry {index} is unreadable: {source}")]
    Entry {
        index: usize,
        source: zip::result::ZipError,
    },

    #[error("failed to prepare extraction root '{path}': {source}")]
    Root { path: PathBuf, source: io::Error },

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreation { path: PathBuf, source: io::Error },

    #[error("failed to extract '{entry}': {source}")]
    Extraction { entry: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
