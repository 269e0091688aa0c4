use shringar_core::error::CoreError;

/// Errors raised while loading snapshots or producing reports.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A domain-level error from `shringar_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A date field that is neither a calendar date, an RFC 3339 timestamp
    /// nor a `{seconds, nanoseconds}` object.
    #[error("Invalid date {value:?} on {record}")]
    InvalidDate { record: String, value: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type CliResult<T> = Result<T, CliError>;
