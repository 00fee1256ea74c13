//! Error types shared by the notebook reader, writer and the converters

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Lowest nbformat major version that can be read or written
pub const MIN_NBFORMAT: u64 = 4;

/// Notebook errors
#[derive(Debug, Error)]
pub enum Error {
    /// The document declares an nbformat older than [`MIN_NBFORMAT`]
    #[error("Unsupported notebook format: nbformat {found} (nbformat >= {required} is required)")]
    UnsupportedFormat { found: u64, required: u64 },

    /// The input is not a well-formed notebook document
    #[error("Invalid notebook JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for notebook operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Fail unless `found` is a supported nbformat major version
    pub fn check_format(found: u64) -> Result<()> {
        if found < MIN_NBFORMAT {
            Err(Error::UnsupportedFormat {
                found,
                required: MIN_NBFORMAT,
            })
        } else {
            Ok(())
        }
    }
}
