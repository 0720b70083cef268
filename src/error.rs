use thiserror::Error;

/// Convenience result type used across the crate.
pub type StatsResult<T> = Result<T, StatsError>;

/// Coarse classification of a [`StatsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A lookup (name, measure, value, area) found nothing.
    NotFound,
    /// The caller passed an argument that can never be valid.
    InvalidArgument,
    /// The input did not have the expected shape or contained unparsable data.
    Malformed,
    /// The underlying stream could not be read.
    Io,
}

/// Error type shared by the model, ingestion and rendering layers.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Underlying I/O error (e.g. file not found, invalid UTF-8 in a stream).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON syntax error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Wrong header, wrong field count, missing record field, wrong column mapping, empty input.
    #[error("malformed input: {message}")]
    Malformed { message: String },

    /// A number could not be parsed out of a field.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    #[error("unsupported format '{tag}'")]
    UnsupportedFormat { tag: String },
}

impl StatsError {
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Classify this error.
    ///
    /// Reader errors count as [`ErrorKind::Io`] only when an I/O failure sits underneath them.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => ErrorKind::Io,
                _ => ErrorKind::Malformed,
            },
            Self::Json(err) if err.is_io() => ErrorKind::Io,
            Self::Json(_) => ErrorKind::Malformed,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Malformed { .. } | Self::ParseError { .. } | Self::UnsupportedFormat { .. } => {
                ErrorKind::Malformed
            }
        }
    }
}
