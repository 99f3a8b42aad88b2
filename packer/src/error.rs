//! Error type of the packer library.

use std::path::PathBuf;

/// Fatal build errors. Uris that can't be resolved are not errors, they are
/// mapped to the not-found object instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source file (or the not-found object) cannot be stat'ed while
    /// registering it.
    #[error("cannot stat {path}: {source}")]
    Stat {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Source file was replaced between registration and copy.
    #[error("rug pull: {path} was replaced after it was registered")]
    IdentityMismatch {
        /// Path of the replaced file.
        path: PathBuf,
    },

    /// Source file was modified in place between registration and copy.
    #[error("{path} size was modified during build: expected {expected} bytes, copied {actual}")]
    SizeChanged {
        /// Path of the modified file.
        path: PathBuf,
        /// Size seen at registration.
        expected: u64,
        /// Number of bytes actually copied.
        actual: u64,
    },

    /// File found while scanning web root has a name that can't be used as
    /// uri.
    #[error("{path} can't be represented as uri")]
    NonUnicodePath {
        /// Offending path.
        path: PathBuf,
    },

    /// Any other failure while reading sources or writing artifacts.
    #[error("io error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
impl Error {
    /// Process exit code for this error kind (`sysexits.h` values).
    pub fn exit_code(&self) -> u8 {
        match self {
            // EX_NOINPUT
            Error::Stat { .. } => 66,
            // EX_DATAERR
            Error::IdentityMismatch { .. }
            | Error::SizeChanged { .. }
            | Error::NonUnicodePath { .. } => 65,
            // EX_IOERR
            Error::Io { .. } => 74,
        }
    }
}

/// Result alias for packer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Helper to wrap io errors with path context.
pub trait IoResultExt<T> {
    /// Converts error into [Error::Io] pointing at `path`.
    fn with_path(
        self,
        path: impl Into<PathBuf>,
    ) -> Result<T>;
}
impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(
        self,
        path: impl Into<PathBuf>,
    ) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
