use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error on slot '{key}': {message}")]
    StorageError { key: String, message: String },

    #[error("Quantity overflow for item '{item}'")]
    QuantityOverflow { item: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CartError::QuantityOverflow { .. } => ErrorSeverity::Low,
            CartError::StorageError { .. } => ErrorSeverity::Medium,
            CartError::ValidationError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::MissingConfigError { .. } => ErrorSeverity::High,
            CartError::IoError(_) | CartError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a failed command. Always non-zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::IoError(e) => format!("Could not access the cart storage: {}", e),
            CartError::SerializationError(_) => "The cart could not be written".to_string(),
            CartError::StorageError { key, .. } => {
                format!("Saving the '{}' slot failed", key)
            }
            CartError::QuantityOverflow { item } => {
                format!("Item {} already has the maximum quantity", item)
            }
            CartError::ConfigValidationError { field, .. }
            | CartError::InvalidConfigValueError { field, .. }
            | CartError::MissingConfigError { field } => {
                format!("Configuration problem with '{}'", field)
            }
            CartError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CartError::IoError(_) => "Check that the data directory exists and is writable",
            CartError::SerializationError(_) => "Run `clear` to reset the stored cart",
            CartError::StorageError { .. } => "Free up space in the data directory and retry",
            CartError::QuantityOverflow { .. } => "Remove some of the item before adding more",
            CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::MissingConfigError { .. } => "Fix the configuration file and retry",
            CartError::ValidationError { .. } => "Check the item identifier and retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let overflow = CartError::QuantityOverflow {
            item: "1".to_string(),
        };
        assert_eq!(overflow.severity(), ErrorSeverity::Low);

        let io = CartError::IoError(std::io::Error::other("disk full"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);

        let missing = CartError::MissingConfigError {
            field: "store.path".to_string(),
        };
        assert_eq!(missing.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_rejected_add_exits_non_zero() {
        let overflow = CartError::QuantityOverflow {
            item: "1".to_string(),
        };
        assert_eq!(overflow.exit_code(), 1);

        let storage = CartError::StorageError {
            key: "cart".to_string(),
            message: "quota exceeded".to_string(),
        };
        assert_eq!(storage.exit_code(), 2);

        let io = CartError::IoError(std::io::Error::other("disk full"));
        assert_eq!(io.exit_code(), 3);
    }

    #[test]
    fn test_user_friendly_message_names_slot() {
        let err = CartError::StorageError {
            key: "cart".to_string(),
            message: "quota exceeded".to_string(),
        };
        assert!(err.user_friendly_message().contains("'cart'"));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
