use thiserror::Error;

#[derive(Error, Debug)]
pub enum BasketError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{message}")]
    IncompatibleProduct {
        candidate: String,
        conflicting: String,
        message: String,
    },

    #[error("Storage file {path} is malformed: {message}")]
    StorageFormatError { path: String, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 使用者操作被拒絕，狀態未改變
    Low,
    /// 設定有誤
    Medium,
    /// 儲存失敗
    High,
}

impl BasketError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BasketError::IncompatibleProduct { .. } => ErrorSeverity::Low,
            BasketError::ConfigValidationError { .. }
            | BasketError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
            BasketError::IoError(_)
            | BasketError::SerializationError(_)
            | BasketError::StorageFormatError { .. } => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BasketError::IncompatibleProduct { message, .. } => message.clone(),
            BasketError::IoError(e) => format!("Could not access basket storage: {}", e),
            BasketError::SerializationError(e) => format!("Could not encode the basket: {}", e),
            BasketError::StorageFormatError { path, .. } => {
                format!("The basket store at {} is not readable", path)
            }
            BasketError::ConfigValidationError { field, message } => {
                format!("Shop configuration is invalid ({}): {}", field, message)
            }
            BasketError::InvalidConfigValueError { field, reason, .. } => {
                format!("Shop configuration is invalid ({}): {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BasketError::IncompatibleProduct { conflicting, .. } => {
                format!("Remove '{}' from the basket or clear it first", conflicting)
            }
            BasketError::IoError(_) => {
                "Check that the store path exists and is writable".to_string()
            }
            BasketError::SerializationError(_) => "Clear the basket and try again".to_string(),
            BasketError::StorageFormatError { path, .. } => {
                format!("Delete or repair {} so it holds a JSON object", path)
            }
            BasketError::ConfigValidationError { .. }
            | BasketError::InvalidConfigValueError { .. } => {
                "Fix the TOML configuration file and rerun".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BasketError>;
