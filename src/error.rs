//! Error taxonomy shared by the build scheduler and the fixture harness.
//!
//! Library code never exits the process. Every failure is threaded back to
//! `main` as an [`Error`], which prints it and returns exit code 1.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A source file was paired with an extension it does not carry.
    #[error("source file {} does not end with {suffix:?}", file.display())]
    SuffixMismatch { file: PathBuf, suffix: String },

    /// Two artifact roots both provide a real file at the same relative path.
    #[error(
        "{} is provided by both {} and {}",
        relative.display(),
        first.display(),
        second.display()
    )]
    ArtifactCollision {
        relative: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{program} failed ({status})")]
    ToolFailed { program: String, status: ExitStatus },

    #[error("failed to execute {program}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {reason}", fixture.display())]
    Header {
        fixture: PathBuf,
        line: usize,
        #[source]
        reason: HeaderError,
    },

    #[error("{}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Why a fixture's directive header was rejected.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("unknown directive {0}")]
    UnknownTag(String),

    #[error("{0} may only appear once")]
    DuplicateTag(String),

    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("invalid exit code {0:?}")]
    InvalidExitCode(String),

    #[error("COMPILE expects a JSON array of strings")]
    InvalidArguments(#[source] serde_json::Error),
}

/// Attach the offending path to an I/O error.
pub(crate) trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::result::Result<T, io::Error> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
