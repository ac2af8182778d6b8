use crate::tail::ResolveError;
use http::StatusCode;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TailError {
    #[error("invalid value '{value}' for parameter '{param}'")]
    InvalidParameter { param: &'static str, value: String },

    #[error("invalid log name '{name}'")]
    InvalidName { name: String },

    #[error("log file '{name}' is outside the log directory")]
    Forbidden { name: String },

    #[error("log file '{name}' not found")]
    NotFound { name: String },

    #[error("error reading file - {name}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl TailError {
    pub fn invalid_parameter(param: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param,
            value: value.into(),
        }
    }

    pub(crate) fn resolve(err: ResolveError, name: &str) -> Self {
        let name = name.to_string();
        match err {
            ResolveError::NotFound => Self::NotFound { name },
            ResolveError::Forbidden => Self::Forbidden { name },
            ResolveError::BadName => Self::InvalidName { name },
        }
    }

    /// The file resolved but could not be opened.
    pub(crate) fn open(name: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                name: name.to_string(),
            },
            _ => Self::read(name, source),
        }
    }

    pub(crate) fn read(name: &str, source: io::Error) -> Self {
        Self::Read {
            name: name.to_string(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter { .. } | Self::InvalidName { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Read { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
