use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// 伺服器回應非 2xx；訊息為固定字串，不含狀態碼或伺服器內容
    #[error("{message}")]
    OperationFailed { message: &'static str },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Data,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    pub fn operation_failed(message: &'static str) -> Self {
        Self::OperationFailed { message }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::OperationFailed { .. } => ErrorCategory::Server,
            Self::HttpError(_) => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::Storage,
            Self::SerializationError(_) | Self::CsvError(_) => ErrorCategory::Data,
            Self::InvalidUrlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Server | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::OperationFailed { .. } => {
                "Check the server logs; the request was rejected or the record does not exist"
            }
            Self::HttpError(e) if e.is_timeout() => {
                "The server did not answer in time; raise --timeout or retry later"
            }
            Self::HttpError(_) => "Make sure the server is running and --base-url points at it",
            Self::IoError(_) => "Check that the file exists and the download directory is writable",
            Self::SerializationError(_) => {
                "The server answered with something other than JSON; check the server logs"
            }
            Self::CsvError(_) => "Try --format json to see the raw server response",
            Self::InvalidUrlError(_) => "Use a full URL such as http://127.0.0.1:5050",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration and try again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::OperationFailed { message } => message.to_string(),
            Self::HttpError(e) if e.is_connect() => "Could not connect to the server".to_string(),
            Self::HttpError(e) if e.is_timeout() => "The request timed out".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
