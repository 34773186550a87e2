// src/error.rs
//! Error types shared by the engine modules.

use std::path::PathBuf;

use thiserror::Error;

/// Why a metadata lookup produced no record.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The search returned zero results (or the title was blank).
    #[error("no match in catalog")]
    NoMatch,

    /// No API key in config or environment.
    #[error("TMDb API key is not configured")]
    MissingApiKey,

    /// Building the HTTP client failed.
    #[error("http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("HTTP {code}")]
    Status { code: u16 },

    /// The body was not the JSON we expect.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// True when the service told us the title does not exist, as opposed to
    /// failing to answer.
    pub const fn is_definitive(&self) -> bool {
        matches!(self, Self::NoMatch)
    }
}

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("annotation store I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("annotation store {} is malformed: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("encode annotations: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog has no `title` column")]
    MissingTitleColumn,
}

/// Failures that stop a session from starting.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Annotations(#[from] AnnotationError),
}
