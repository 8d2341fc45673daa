use std::path::PathBuf;

use thiserror::Error;

use crate::SearchError;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("nothing in the list: {0}")]
    EmptyInput(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("search for {query:?} failed: {source}")]
    Search {
        query: String,
        #[source]
        source: SearchError,
    },

    #[error("operator prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}
