use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Unsupported platform or arch {tag}")]
    UnsupportedPlatform { tag: String },

    #[error("This script is intended to be run by a node package manager, unable to detect the package manager")]
    MissingInvoker,

    #[error("too many redirects while fetching {url} (limit {limit})")]
    TooManyRedirects { url: String, limit: usize },

    #[error("invalid redirect location '{location}' from {url}")]
    InvalidRedirect { url: String, location: String },

    #[error("can't download binary from {url}: {status} {reason}")]
    HttpFailure {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("error while unarchiving monospace binary: {0}")]
    Archive(String),

    #[error("could not read package metadata at {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl InstallError {
    pub fn archive(err: impl std::fmt::Display) -> Self {
        InstallError::Archive(err.to_string())
    }

    /// Every fatal condition leaves the process the same way.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;
