use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("table has no header row")]
    MissingHeader,

    #[error("required column '{0}' is missing from the header")]
    MissingColumn(&'static str),

    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}
