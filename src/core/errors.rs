/// Caller-visible failure classes.
///
/// Each failed mediator outcome maps to exactly one status. The CLI turns
/// the status into a non-zero exit code; success exits with 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    BadRequest,
    NotFound,
    Forbidden,
    RequestTimeout,
    InternalError,
}

impl Status {
    /// Process exit code used by the `hostgate` binary.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::InternalError => 1,
            Status::BadRequest => 2,
            Status::NotFound => 3,
            Status::Forbidden => 4,
            Status::RequestTimeout => 5,
        }
    }
}

/// All domain errors for hostgate.
///
/// The `Display` text is the human-readable `error` field of a response;
/// `cause()` carries the underlying OS message when there is one.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("{message}")]
    MissingField { message: String },

    #[error("{message}")]
    InvalidField { message: String },

    #[error("Unsupported platform")]
    UnsupportedPlatform,

    #[error("{what} not found")]
    NotFound { what: String, path: String },

    #[error("Executable not allowed on this platform")]
    Forbidden,

    #[error("Connection timed out")]
    Timeout,

    #[error("Failed to establish connection: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Failed to {action} file")]
    FileOperation {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start process")]
    SpawnFailed {
        #[source]
        source: std::io::Error,
    },

    #[error("Audit log error: {detail}")]
    AuditError { detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GateError {
    /// Status class the caller should see for this error.
    pub fn status(&self) -> Status {
        match self {
            GateError::MissingField { .. }
            | GateError::InvalidField { .. }
            | GateError::UnsupportedPlatform
            | GateError::ConnectionFailed { .. } => Status::BadRequest,
            GateError::NotFound { .. } => Status::NotFound,
            GateError::Forbidden => Status::Forbidden,
            GateError::Timeout => Status::RequestTimeout,
            GateError::FileOperation { .. }
            | GateError::SpawnFailed { .. }
            | GateError::AuditError { .. }
            | GateError::InvalidConfig { .. }
            | GateError::Io(_) => Status::InternalError,
        }
    }

    /// Underlying cause, rendered as the `message` field of a response.
    pub fn cause(&self) -> Option<String> {
        match self {
            GateError::FileOperation { source, .. } | GateError::SpawnFailed { source } => {
                Some(source.to_string())
            }
            _ => None,
        }
    }

    /// Path associated with a not-found or file error, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            GateError::NotFound { path, .. } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn file_not_found(path: &str) -> Self {
        GateError::NotFound {
            what: "File".into(),
            path: path.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GateError>;
