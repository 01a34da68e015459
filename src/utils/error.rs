use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error in '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Could not parse {field} from '{input}'")]
    ParseError { field: String, input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn invalid_body_type(value: &str) -> Self {
        ReportError::InvalidArgument {
            field: "body_type".to_string(),
            value: value.to_string(),
            reason: "must be hatchback, saloon, or estate".to_string(),
        }
    }

    /// Whether an interactive session may report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidArgument { .. } | ReportError::ParseError { .. }
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReportError::InvalidArgument { .. } | ReportError::ParseError { .. } => {
                ErrorSeverity::Low
            }
            ReportError::ValidationError { .. } | ReportError::ConfigError { .. } => {
                ErrorSeverity::Medium
            }
            ReportError::CsvError(_) | ReportError::SerializationError(_) => ErrorSeverity::High,
            ReportError::IoError(_) | ReportError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::InvalidArgument { .. } => {
                "Use one of the body types Hatchback, Saloon or Estate"
            }
            ReportError::ParseError { .. } => "Enter a numeric value",
            ReportError::ValidationError { .. } | ReportError::ConfigError { .. } => {
                "Check the command line flags or the TOML configuration file"
            }
            ReportError::CsvError(_) => {
                "Check the input CSV header: manufacturer,model,weight,sales_price,units_sold,body_type"
            }
            ReportError::SerializationError(_) => "Re-run with --verbose to inspect the report data",
            ReportError::IoError(_) | ReportError::ZipError(_) => {
                "Check that the input file exists and the output path is writable"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
