use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: status code {status_code}, message: {message}")]
    ServerError {
        status_code: u16,
        message: String,
    },

    #[error("API error: code {code}, message: {message}")]
    ApiError {
        code: String,
        message: String,
    },

    #[error("Login expired")]
    SessionExpired,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Param error: {0}")]
    ParamError(String),

    #[error("Action '{key}' not found in action list")]
    MissingAction {
        key: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl TransferError {
    pub fn server_error(status_code: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status_code,
            message: message.into(),
        }
    }

    pub fn api_error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiError {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn missing_action(key: impl Into<String>) -> Self {
        Self::MissingAction { key: key.into() }
    }

    /// Human-readable part shown under the notification headline.
    pub fn detail(&self) -> String {
        match self {
            TransferError::ApiError { message, code } if message.is_empty() => code.clone(),
            TransferError::ApiError { message, .. } => message.clone(),
            TransferError::ServerError { status_code, message } if message.is_empty() => {
                format!("status code {}", status_code)
            }
            TransferError::ServerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, TransferError::SessionExpired)
    }
}

/// Error alias
pub type Result<T, E = TransferError> = std::result::Result<T, E>;
