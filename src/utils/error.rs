use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurchargeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Delivery time lookup failed for '{delivery_time_id}': {message}")]
    LookupError {
        delivery_time_id: String,
        message: String,
    },

    #[error("Item '{item_id}' has no price entry to apply a surcharge to")]
    MissingPriceError { item_id: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Lookup,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SurchargeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SurchargeError::ConfigError { .. }
            | SurchargeError::ConfigValidationError { .. }
            | SurchargeError::InvalidConfigValueError { .. }
            | SurchargeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SurchargeError::LookupError { .. } | SurchargeError::HttpError(_) => {
                ErrorCategory::Lookup
            }
            SurchargeError::MissingPriceError { .. }
            | SurchargeError::ProcessingError { .. }
            | SurchargeError::SerializationError(_)
            | SurchargeError::CsvError(_) => ErrorCategory::Data,
            SurchargeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 查詢失敗通常是暫時性的，重跑即可
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SurchargeError::ConfigError { .. }
            | SurchargeError::ConfigValidationError { .. }
            | SurchargeError::InvalidConfigValueError { .. } => {
                "Check the [surcharge] section of the configuration file"
            }
            SurchargeError::MissingConfigError { .. } => {
                "Add the missing key to the configuration file"
            }
            SurchargeError::LookupError { .. } | SurchargeError::HttpError(_) => {
                "Make sure the delivery time service is reachable and retry"
            }
            SurchargeError::MissingPriceError { .. } => {
                "Every item that can receive a surcharge needs at least one price entry"
            }
            SurchargeError::SerializationError(_) => "Make sure the catalog file is valid JSON",
            SurchargeError::CsvError(_) | SurchargeError::ProcessingError { .. } => {
                "Inspect the catalog data for malformed records"
            }
            SurchargeError::IoError(_) => "Check that the paths exist and are writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Lookup => format!("Could not resolve delivery times: {}", self),
            ErrorCategory::Data => format!("Catalog data problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SurchargeError>;
