use std::path::PathBuf;

/// Usage errors raised while resolving the run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no input or output options set.")]
    MissingInputAndOutput,

    #[error("no output option set.")]
    MissingOutput,

    #[error("no input options set.")]
    MissingInput,

    #[error("Input hash file {path:?} does not exist. Ensure the input hash file exists and is accessible.")]
    InputNotFound { path: PathBuf },
}

impl ConfigError {
    /// Missing arguments are answered with the usage text.
    pub fn is_missing_argument(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingInputAndOutput | ConfigError::MissingOutput | ConfigError::MissingInput
        )
    }
}

/// A failed insert for a single input line. The importer logs these and moves on.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("'{hash}' is not a valid hex string: {source}")]
    InvalidHex {
        hash: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("duplicate hash {hash}: {source}")]
    Duplicate {
        hash: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("SQLite error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl LineError {
    /// Sorts a failed insert into a duplicate or a generic storage failure.
    pub fn from_insert(hash: &str, err: rusqlite::Error) -> Self {
        let unique_violation = matches!(
            &err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        );

        if unique_violation {
            LineError::Duplicate { hash: hash.to_string(), source: err }
        } else {
            LineError::Storage(err)
        }
    }
}
