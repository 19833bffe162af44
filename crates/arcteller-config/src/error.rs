//! Error types for arcteller-config

use thiserror::Error;

/// Error codes for configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    /// File not found
    FileNotFound,
    /// Invalid YAML format
    InvalidYaml,
    /// Invalid field value
    InvalidValue,
    /// IO error
    IoError,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ConfigErrorCode::InvalidYaml => write!(f, "INVALID_YAML"),
            ConfigErrorCode::InvalidValue => write!(f, "INVALID_VALUE"),
            ConfigErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Detailed error information shown to the operator
#[derive(Debug, Clone)]
pub struct ConfigErrorDetails {
    pub code: ConfigErrorCode,
    pub message: String,
    /// Field path (for field-specific errors)
    pub field: Option<String>,
    pub suggestions: Vec<String>,
}

impl ConfigErrorDetails {
    pub fn new(code: ConfigErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            field: None,
            suggestions: vec![],
        }
    }

    pub fn with_field(mut self, field: String) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ConfigErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref field) = self.field {
            write!(f, "\nField: {}", field)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorSeverity {
    Warning,
    Error,
}

impl std::fmt::Display for ConfigErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorSeverity::Warning => write!(f, "warning"),
            ConfigErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML format: {message}")]
    InvalidYaml { message: String },

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("IO error reading {path}")]
    IoError { path: String },
}

impl ConfigError {
    /// Get the error code
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            ConfigError::IoError { .. } => ConfigErrorCode::IoError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ConfigErrorSeverity {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorSeverity::Warning,
            ConfigError::InvalidYaml { .. } => ConfigErrorSeverity::Error,
            ConfigError::InvalidValue { .. } => ConfigErrorSeverity::Error,
            ConfigError::IoError { .. } => ConfigErrorSeverity::Error,
        }
    }

    /// Details with a fix hint for the operator
    pub fn to_details(&self) -> ConfigErrorDetails {
        let details = ConfigErrorDetails::new(self.code(), self.to_string());

        match self {
            ConfigError::FileNotFound { .. } => details
                .with_suggestion("Pass the file with --config, or remove it to run on defaults.".to_string()),
            ConfigError::InvalidValue { field, reason } => {
                let details = details.with_field(field.clone()).with_suggestion(reason.clone());
                if field == "backend.base_url" {
                    details.with_suggestion(format!(
                        "The value may come from --base-url or {}.",
                        crate::BASE_URL_ENV
                    ))
                } else {
                    details
                }
            }
            ConfigError::InvalidYaml { .. } => details.with_suggestion(
                "Compare against the template printed by Config::generate_default.".to_string(),
            ),
            ConfigError::IoError { .. } => details,
        }
    }

    /// One block of text for the terminal: severity, code, field and hints
    pub fn report(&self) -> String {
        format!("{}: {}", self.severity(), self.to_details())
    }
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_code() {
        let error = ConfigError::FileNotFound {
            path: "/etc/arcteller.yaml".to_string(),
        };
        assert_eq!(error.code(), ConfigErrorCode::FileNotFound);
        assert_eq!(error.code().to_string(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_invalid_value_details_carry_field() {
        let error = ConfigError::InvalidValue {
            field: "backend.timeout_secs".to_string(),
            reason: "Timeout must be greater than 0".to_string(),
        };
        let details = error.to_details();

        assert_eq!(details.field.as_deref(), Some("backend.timeout_secs"));
        assert_eq!(details.suggestions.len(), 1);
        assert_eq!(error.severity(), ConfigErrorSeverity::Error);
        assert!(details.to_string().starts_with("[INVALID_VALUE]"));
    }

    #[test]
    fn test_report_for_bad_base_url_names_override_sources() {
        let error = ConfigError::InvalidValue {
            field: "backend.base_url".to_string(),
            reason: "Base URL must start with http:// or https://".to_string(),
        };
        let report = error.report();

        assert!(report.starts_with("error: [INVALID_VALUE]"));
        assert!(report.contains("Field: backend.base_url"));
        assert!(report.contains("ARCTELLER_API_BASE_URL"));
        assert!(report.contains("--base-url"));
    }

    #[test]
    fn test_report_for_yaml_error() {
        let report = ConfigError::InvalidYaml {
            message: "expected a mapping".to_string(),
        }
        .report();

        assert!(report.starts_with("error: [INVALID_YAML] Invalid YAML format: expected a mapping"));
        assert!(report.contains("Suggestions:"));
    }
}
