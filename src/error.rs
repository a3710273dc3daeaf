use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading tables, building splines and populating the registry.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot read table {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("Degenerate spline input: {0}")]
    DegenerateInput(String),

    #[error("x = {x} is outside the spline domain [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },

    #[error("Invalid registry configuration: {0}")]
    Config(String),

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("Dataset '{name}': {source}")]
    Dataset {
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Dataset registry is already initialized")]
    AlreadyInitialized,
}

impl Error {
    pub(crate) fn in_dataset(self, name: &str) -> Self {
        Error::Dataset { name: name.to_string(), source: Box::new(self) }
    }

    /// Innermost error, looking through [Error::Dataset] wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Dataset { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
