//! Error types for arcteller-core
//!
//! Every failure that reaches a teller screen is an [`ApiError`]. Its
//! `Display` output is the message shown to the cashier, so HTTP failures
//! render the backend's own text verbatim. The HTTP status is kept alongside
//! the message so callers can branch on it instead of parsing text.

use serde::Serialize;
use thiserror::Error;

/// Fallback message when neither the body nor the status carries one
pub const GENERIC_SERVER_ERROR: &str = "Error del servidor";

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Backend answered 404
    NotFound,
    /// Backend answered another 4xx
    Rejected,
    /// Backend answered 5xx
    ServerError,
    /// Backend could not be reached
    NetworkError,
    /// Call exceeded its deadline
    Timeout,
    /// Caller abandoned the call
    Cancelled,
    /// Response body did not match the expected shape
    InvalidResponse,
    /// Client resolved but owns no account
    NoActiveAccounts,
    /// Caller supplied a bad argument
    InvalidInput,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::Rejected => write!(f, "REJECTED"),
            ErrorCode::ServerError => write!(f, "SERVER_ERROR"),
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::Timeout => write!(f, "TIMEOUT"),
            ErrorCode::Cancelled => write!(f, "CANCELLED"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ErrorCode::NoActiveAccounts => write!(f, "NO_ACTIVE_ACCOUNTS"),
            ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
        }
    }
}

/// Detailed error information for display
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    /// HTTP status, when the backend answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            status: None,
            suggestions: vec![],
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSugerencias:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Client-boundary error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{message}")]
    Network { message: String },

    #[error("Tiempo de espera agotado")]
    Timeout,

    #[error("Operación cancelada")]
    Cancelled,

    #[error("Respuesta inválida del servidor: {message}")]
    Decode { message: String },

    #[error("El cliente {client_name} no tiene cuentas activas.")]
    NoActiveAccounts { client_name: String },

    #[error("Motivo de devolución inválido: {code}")]
    InvalidReasonCode { code: String },

    #[error("{message}")]
    InvalidInput { message: String },
}

impl ApiError {
    /// Build an HTTP error from a status and an already-extracted message
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            message: message.into(),
        }
    }

    /// Message shown to the cashier
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend said the looked-up entity does not exist.
    ///
    /// Status 404 is authoritative. Some services answer a different status
    /// with a "no encontrada" business message, so that text still counts.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::Http { status, message } => {
                *status == 404 || message.contains("404") || message.contains("no encontrada")
            }
            _ => false,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Http { status: 404, .. } => ErrorCode::NotFound,
            ApiError::Http { status, .. } if *status >= 500 => ErrorCode::ServerError,
            ApiError::Http { .. } => ErrorCode::Rejected,
            ApiError::Network { .. } => ErrorCode::NetworkError,
            ApiError::Timeout => ErrorCode::Timeout,
            ApiError::Cancelled => ErrorCode::Cancelled,
            ApiError::Decode { .. } => ErrorCode::InvalidResponse,
            ApiError::NoActiveAccounts { .. } => ErrorCode::NoActiveAccounts,
            ApiError::InvalidReasonCode { .. } | ApiError::InvalidInput { .. } => ErrorCode::InvalidInput,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self.code() {
            ErrorCode::NotFound | ErrorCode::NoActiveAccounts | ErrorCode::Cancelled => ErrorSeverity::Info,
            ErrorCode::Rejected | ErrorCode::InvalidInput | ErrorCode::Timeout => ErrorSeverity::Warning,
            ErrorCode::ServerError | ErrorCode::NetworkError | ErrorCode::InvalidResponse => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());
        if let Some(status) = self.status() {
            details = details.with_status(status);
        }

        match self {
            ApiError::Network { .. } | ApiError::Timeout => {
                details = details.with_suggestion(
                    "Verifique la conexión con el gateway y la URL configurada.".to_string()
                );
            }
            ApiError::NoActiveAccounts { .. } => {
                details = details.with_suggestion(
                    "Busque por número de cuenta o registre una cuenta para el cliente.".to_string()
                );
            }
            ApiError::InvalidReasonCode { .. } => {
                details = details.with_suggestion(format!(
                    "Códigos válidos: {}",
                    crate::types::ReasonCode::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
            _ => {}
        }

        details
    }
}

/// Result type with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Identifier the cashier typed, if any
    pub subject: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &ApiError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &ApiError, context: &ErrorContext) {
        let subject = context.subject.as_deref().unwrap_or("-");
        match error.severity() {
            ErrorSeverity::Error => log::error!(
                target: "arcteller::error",
                "{} - Operation: {} - Subject: {}",
                error.to_details(),
                context.operation,
                subject
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "arcteller::error",
                "{} - Operation: {} - Subject: {}",
                error.to_details(),
                context.operation,
                subject
            ),
            ErrorSeverity::Info => log::info!(
                target: "arcteller::error",
                "{} - Operation: {} - Subject: {}",
                error.to_details(),
                context.operation,
                subject
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_message_verbatim() {
        let error = ApiError::http(409, "Transacción ya reversada");
        assert_eq!(error.to_string(), "Transacción ya reversada");
        assert_eq!(error.status(), Some(409));
        assert_eq!(error.code(), ErrorCode::Rejected);
    }

    #[test]
    fn test_not_found_by_status() {
        assert!(ApiError::http(404, "Not Found").is_not_found());
        assert_eq!(ApiError::http(404, "x").code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_not_found_by_legacy_message() {
        assert!(ApiError::http(400, "Cuenta no encontrada").is_not_found());
        assert!(ApiError::http(500, "upstream returned 404").is_not_found());
        assert!(!ApiError::http(500, "Error interno").is_not_found());
    }

    #[test]
    fn test_transport_errors_are_never_not_found() {
        let error = ApiError::Network {
            message: "cuenta no encontrada".to_string(),
        };
        assert!(!error.is_not_found());
        assert!(!ApiError::Timeout.is_not_found());
    }

    #[test]
    fn test_no_active_accounts_message() {
        let error = ApiError::NoActiveAccounts {
            client_name: "María Pérez".to_string(),
        };
        assert_eq!(error.to_string(), "El cliente María Pérez no tiene cuentas activas.");
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_severity_by_status() {
        assert_eq!(ApiError::http(503, "caído").severity(), ErrorSeverity::Error);
        assert_eq!(ApiError::http(422, "inválido").severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_details_include_status_and_suggestions() {
        let details = ApiError::InvalidReasonCode { code: "XX01".to_string() }.to_details();
        assert_eq!(details.code, ErrorCode::InvalidInput);
        assert!(details.suggestions[0].contains("AM04"));

        let details = ApiError::http(500, "boom").to_details();
        assert_eq!(details.status, Some(500));
        assert!(details.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("accounts.resolve").with_subject("1712345678");
        assert_eq!(context.operation, "accounts.resolve");
        assert_eq!(context.subject.as_deref(), Some("1712345678"));
    }
}
