//! Mapping of transport failures and error bodies onto `ApiError`

use arcteller_core::error::GENERIC_SERVER_ERROR;
use arcteller_core::ApiError;
use reqwest::StatusCode;
use serde_json::Value;

/// Convert a reqwest failure into the client-boundary error
pub(crate) fn transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else if error.is_decode() {
        ApiError::Decode {
            message: error.to_string(),
        }
    } else {
        ApiError::Network {
            message: format!("No se pudo contactar al servidor: {}", error),
        }
    }
}

/// Pick the message for a non-success response.
///
/// Order: `mensaje`, then `error`, then the status text, then the generic
/// fallback. A body that is missing, empty or not JSON counts as absent, and
/// so does an empty string field.
pub(crate) fn error_message(status: StatusCode, body: Option<&[u8]>) -> String {
    let parsed = body
        .filter(|b| !b.is_empty())
        .and_then(|b| serde_json::from_slice::<Value>(b).ok());

    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    field("mensaje")
        .or_else(|| field("error"))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mensaje_wins() {
        let body = br#"{"mensaje": "Saldo insuficiente", "error": "Bad Request"}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, Some(body)), "Saldo insuficiente");
    }

    #[test]
    fn test_error_field_fallback() {
        let body = br#"{"error": "Internal Server Error", "status": 500}"#;
        assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, Some(body)), "Internal Server Error");
    }

    #[test]
    fn test_empty_mensaje_falls_through() {
        let body = br#"{"mensaje": "", "error": "Conflict"}"#;
        assert_eq!(error_message(StatusCode::CONFLICT, Some(body)), "Conflict");
    }

    #[test]
    fn test_unparseable_body_uses_status_text() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, Some(b"<html>nginx</html>")),
            "Bad Gateway"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, None), "Not Found");
    }

    #[test]
    fn test_object_without_fields_uses_status_text() {
        assert_eq!(error_message(StatusCode::FORBIDDEN, Some(b"{}")), "Forbidden");
    }

    #[test]
    fn test_generic_fallback_without_status_text() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(error_message(status, Some(b"")), GENERIC_SERVER_ERROR);
    }
}
