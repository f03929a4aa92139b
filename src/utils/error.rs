use crate::core::triangle::InvalidSidesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Triangle validation failed: {0}")]
    InvalidSides(#[from] InvalidSidesError),

    #[error("Currency already exists: {name}")]
    CurrencyExists { name: String },

    #[error("Currency not found: {name}")]
    CurrencyNotFound { name: String },

    #[error("Chat {chat_id} is already registered")]
    AlreadyRegistered { chat_id: i64 },

    #[error("Chat {chat_id} is not registered")]
    NotRegistered { chat_id: i64 },

    #[error("Category already exists: {name}")]
    CategoryExists { name: String },

    #[error("Category not found: {name}")]
    CategoryNotFound { name: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid {field}: '{value}' ({reason})")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Data,
    Domain,
    Config,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinError::IoError(_) => ErrorCategory::Storage,
            FinError::SerializationError(_) => ErrorCategory::Data,
            FinError::CurrencyExists { .. }
            | FinError::CurrencyNotFound { .. }
            | FinError::AlreadyRegistered { .. }
            | FinError::NotRegistered { .. }
            | FinError::CategoryExists { .. }
            | FinError::CategoryNotFound { .. } => ErrorCategory::Domain,
            FinError::ConfigValidationError { .. }
            | FinError::InvalidConfigValueError { .. }
            | FinError::MissingConfigError { .. } => ErrorCategory::Config,
            FinError::InvalidSides(_) | FinError::ValidationError { .. } => {
                ErrorCategory::Validation
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Re-running the same registration is harmless.
            FinError::AlreadyRegistered { .. } => ErrorSeverity::Low,
            FinError::CurrencyExists { .. }
            | FinError::CurrencyNotFound { .. }
            | FinError::NotRegistered { .. }
            | FinError::CategoryExists { .. }
            | FinError::CategoryNotFound { .. } => ErrorSeverity::Medium,
            FinError::InvalidSides(_)
            | FinError::ValidationError { .. }
            | FinError::ConfigValidationError { .. }
            | FinError::InvalidConfigValueError { .. }
            | FinError::MissingConfigError { .. } => ErrorSeverity::High,
            FinError::IoError(_) | FinError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FinError::IoError(_) => {
                "Check that the data directory exists and is writable, then run `init`".to_string()
            }
            FinError::SerializationError(_) => {
                "A data file may be corrupted; restore it or re-run `init` on a fresh directory"
                    .to_string()
            }
            FinError::InvalidSides(_) => {
                "Provide three positive side lengths that satisfy the strict triangle inequality"
                    .to_string()
            }
            FinError::CurrencyExists { name } => {
                format!("Use `currency update {} <rate>` to change an existing rate", name)
            }
            FinError::CurrencyNotFound { .. } => {
                "Run `currency list` to see known currencies, or add it with `currency add`"
                    .to_string()
            }
            FinError::AlreadyRegistered { .. } => {
                "This chat is already registered, no action needed".to_string()
            }
            FinError::NotRegistered { .. } => {
                "Register first with `ledger register <chat-id> <login>`".to_string()
            }
            FinError::CategoryExists { .. } => {
                "Category names must be unique per user; pick a different name".to_string()
            }
            FinError::CategoryNotFound { .. } => {
                "Add the category first with `ledger add-category`".to_string()
            }
            FinError::ConfigValidationError { .. }
            | FinError::InvalidConfigValueError { .. }
            | FinError::MissingConfigError { .. } => {
                "Fix the configuration value and retry".to_string()
            }
            FinError::ValidationError { .. } => "Correct the input value and retry".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinError::IoError(e) => format!("Could not access local storage: {}", e),
            FinError::SerializationError(e) => format!("Could not read a data file: {}", e),
            FinError::InvalidSides(e) => e.to_string(),
            FinError::CurrencyExists { name } => {
                format!("Currency '{}' is already in the rate table", name)
            }
            FinError::CurrencyNotFound { name } => {
                format!("Currency '{}' is not in the rate table", name)
            }
            FinError::AlreadyRegistered { chat_id } => {
                format!("Chat {} is already registered", chat_id)
            }
            FinError::NotRegistered { chat_id } => {
                format!("Chat {} is not registered yet", chat_id)
            }
            FinError::CategoryExists { name } => format!("Category '{}' already exists", name),
            FinError::CategoryNotFound { name } => {
                format!("There is no category '{}'", name)
            }
            FinError::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            FinError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Bad configuration value for {} ('{}'): {}", field, value, reason),
            FinError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            FinError::ValidationError {
                field,
                value,
                reason,
            } => format!("Bad value for {} ('{}'): {}", field, value, reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_conflicts_are_medium() {
        let err = FinError::CurrencyExists {
            name: "USD".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Domain);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn duplicate_registration_is_low() {
        let err = FinError::AlreadyRegistered { chat_id: 42 };
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn storage_failures_are_critical() {
        let err = FinError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
