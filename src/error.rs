// SPDX-License-Identifier: Apache-2.0
//! Unified error type for all batch tools.
//!
//! Every library entry point returns [`Result`]. Binaries bubble these up
//! through `anyhow` so each tool exits non-zero with the full error chain,
//! instead of the mixed exit conventions the individual scripts used to have.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed input data. Carries the file and 1-based line number
    /// of the first offending line.
    #[error("{}:{}: {}", .path.display(), .line, .msg)]
    Parse {
        path: PathBuf,
        line: usize,
        msg: String,
    },

    /// A required input file or directory is absent.
    #[error("missing input: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} for {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub fn parse(path: impl Into<PathBuf>, line: usize, msg: impl Into<String>) -> Self {
        Error::Parse { path: path.into(), line, msg: msg.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
