//! HTTP client for the bank's backend services
//!
//! Operation groups are organized into modules:
//! - routes::clients: client lookups (MS-Clientes)
//! - routes::auth: cashier login
//! - routes::accounts: savings accounts and the account-or-client resolver (MS-Cuentas)
//! - routes::transactions: cash operations, searches and reversal requests

pub mod cancel;
mod error;
pub mod executor;
pub mod routes;

use std::time::Duration;

use arcteller_config::Config;
use arcteller_core::{ApiError, ApiResult};

pub use cancel::CancelToken;
pub use executor::RequestOptions;
pub use routes::{AccountsApi, AuthApi, ClientsApi, TransactionsApi};

/// Client for the backend gateway.
///
/// Cheap to clone; the base URL and default deadline are fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    cancel: Option<CancelToken>,
}

impl ApiClient {
    /// Create a client for `base_url` with a default per-call deadline
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Network { message: e.to_string() })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            cancel: None,
        })
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(config.effective_base_url(), config.request_timeout())
    }

    /// Copy of this client whose calls abort when `token` is cancelled
    pub fn with_cancel(&self, token: &CancelToken) -> Self {
        Self {
            cancel: Some(token.clone()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn clients(&self) -> ClientsApi<'_> {
        ClientsApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(self)
    }
}

/// Percent-encode a caller-supplied path segment
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://gw.local:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://gw.local:8080");
    }

    #[test]
    fn test_from_config_uses_origin_when_base_url_empty() {
        let client = ApiClient::from_config(&Config::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment(" 171234 "), "171234");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
