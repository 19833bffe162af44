//! Uniform request executor
//!
//! Every operation goes through [`ApiClient::execute`]: one HTTP call that
//! yields parsed JSON, an explicit empty result for 204, or an `ApiError`.

use std::time::Duration;

use arcteller_core::{ApiError, ApiResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{error_message, transport_error};
use crate::ApiClient;

/// Options bag for one call
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// JSON body, sent as a complete object
    pub body: Option<Value>,
    /// Merged over the default `Content-Type: application/json`
    pub headers: Vec<(String, String)>,
    /// Overrides the client's default deadline
    pub timeout: Option<Duration>,
    /// Identifier the cashier typed, attached to failure logs
    pub subject: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    /// POST with a serialised body
    pub fn post<T: Serialize + ?Sized>(body: &T) -> ApiResult<Self> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::InvalidInput {
            message: format!("No se pudo serializar la solicitud: {}", e),
        })?;
        Ok(Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        })
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    fn error_context(&self, path: &str) -> ErrorContext {
        let context = ErrorContext::new(format!("{} {}", self.method, path));
        match self.subject {
            Some(ref subject) => context.with_subject(subject.clone()),
            None => context,
        }
    }

    fn header_map(&self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| ApiError::InvalidInput {
                message: format!("Cabecera inválida: {}", name),
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| ApiError::InvalidInput {
                message: format!("Valor inválido para la cabecera {}", name),
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

impl ApiClient {
    /// Perform one call.
    ///
    /// Returns `Ok(None)` for 204, `Ok(Some(json))` for any other success.
    pub async fn execute(&self, path: &str, options: RequestOptions) -> ApiResult<Option<Value>> {
        let context = options.error_context(path);
        let result = self.execute_inner(path, options).await;

        if let Err(ref error) = result {
            DefaultErrorLogger.log_error(error, &context);
        }
        result
    }

    /// Perform one call and decode the body into `T`
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> ApiResult<T> {
        let value = self.execute(path, options).await?.ok_or_else(|| ApiError::Decode {
            message: format!("respuesta vacía de {}", path),
        })?;
        decode(value)
    }

    /// Like `fetch`, but a 204 is `None` instead of an error
    pub async fn fetch_optional<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> ApiResult<Option<T>> {
        match self.execute(path, options).await? {
            Some(value) => decode(value).map(Some),
            None => Ok(None),
        }
    }

    async fn execute_inner(&self, path: &str, options: RequestOptions) -> ApiResult<Option<Value>> {
        if self.cancel.as_ref().is_some_and(|token| token.is_cancelled()) {
            return Err(ApiError::Cancelled);
        }

        let url = format!("{}{}", self.base_url, path);
        log::debug!("Request {} {}", options.method, url);

        let mut request = self
            .http
            .request(options.method.clone(), &url)
            .headers(options.header_map()?)
            .timeout(options.timeout.unwrap_or(self.timeout));

        if let Some(ref body) = options.body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::InvalidInput {
                message: e.to_string(),
            })?;
            request = request.body(bytes);
        }

        let call = async {
            let response = request.send().await.map_err(transport_error)?;
            read_response(&url, response).await
        };

        match self.cancel {
            Some(ref token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(ApiError::Cancelled),
                result = call => result,
            },
            None => call.await,
        }
    }
}

async fn read_response(url: &str, response: Response) -> ApiResult<Option<Value>> {
    let status = response.status();
    log::debug!("Response status {} for {}", status.as_u16(), url);

    if !status.is_success() {
        let body = response.bytes().await.ok();
        let message = error_message(status, body.as_deref());
        return Err(ApiError::http(status.as_u16(), message));
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| ApiError::Decode { message: e.to_string() })
}

fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode { message: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_type() {
        let headers = RequestOptions::get().header_map().unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let headers = RequestOptions::get()
            .with_header("Content-Type", "application/json; charset=utf-8")
            .with_header("X-Caja", "07")
            .header_map()
            .unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json; charset=utf-8");
        assert_eq!(headers.get("x-caja").unwrap(), "07");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        let err = RequestOptions::get().with_header("bad header", "x").header_map().unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput { .. }));
    }

    #[test]
    fn test_error_context_carries_subject() {
        let context = RequestOptions::get()
            .with_subject("482913")
            .error_context("/api/transacciones/buscar-codigo/482913");
        assert_eq!(context.operation, "GET /api/transacciones/buscar-codigo/482913");
        assert_eq!(context.subject.as_deref(), Some("482913"));

        assert!(RequestOptions::get().error_context("/x").subject.is_none());
    }

    #[test]
    fn test_post_serialises_body() {
        let options = RequestOptions::post(&serde_json::json!({"motivo": "CUST"})).unwrap();
        assert_eq!(options.method, Method::POST);
        assert_eq!(options.body.unwrap()["motivo"], "CUST");
    }
}
