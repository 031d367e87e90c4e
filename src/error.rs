use thiserror::Error;

/// Everything a conversion request can fail with.
///
/// Rendering itself never fails; all variants come from input handling.
#[derive(Error, Debug)]
pub enum Error {
    /// Input text is not valid JSON. The parser message is passed through as is.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("generator for `{id}` not available (available: {})", .available.join(", "))]
    UnsupportedBackend { id: String, available: Vec<&'static str> },

    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("invalid generator options at {path}: {message}")]
    Options { path: String, message: String },

    #[error("JSON pointer `{0}` did not select a value")]
    Pointer(String),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
