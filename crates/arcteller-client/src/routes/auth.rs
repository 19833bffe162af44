//! Cashier login

use arcteller_core::{ApiResult, Client, LoginRequest, Session};

use crate::{ApiClient, RequestOptions};

pub struct AuthApi<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `POST /api/v1/clientes/login`; credentials are passed through untouched
    pub async fn login(&self, identificacion: &str, clave: &str) -> ApiResult<Client> {
        let body = LoginRequest {
            identificacion: identificacion.to_string(),
            clave: clave.to_string(),
        };
        self.api
            .fetch("/api/v1/clientes/login", RequestOptions::post(&body)?)
            .await
    }

    /// Log in and wrap the cashier in a session
    pub async fn start_session(&self, identificacion: &str, clave: &str) -> ApiResult<Session> {
        let cashier = self.login(identificacion, clave).await?;
        log::info!("Cashier {} logged in", cashier.id_cliente);
        Ok(Session::new(cashier))
    }
}
