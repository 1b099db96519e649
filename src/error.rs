//! Error type shared by the reader, the flattener and the CSV writer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid XML in {}: {source}", .path.display())]
    Xml {
        path: PathBuf,
        source: roxmltree::Error,
    },

    /// A node lacks something the conversion cannot do without
    /// (a folder or entry `name`, or an entry `type`).
    #[error("Malformed {kind} node under '{path}': {reason}")]
    MalformedNode {
        path: String,
        kind: String,
        reason: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to move output into place at {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
