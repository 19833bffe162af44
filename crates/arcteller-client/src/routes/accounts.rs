//! MS-Cuentas savings accounts and the account-or-client resolver

use arcteller_core::{Account, ApiError, ApiResult};

use crate::{segment, ApiClient, RequestOptions};

pub struct AccountsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> AccountsApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /api/v1/cuentas/ahorros/buscar/{number}`
    pub async fn get_by_account_number(&self, number: &str) -> ApiResult<Account> {
        let path = format!("/api/v1/cuentas/ahorros/buscar/{}", segment(number));
        self.api
            .fetch(&path, RequestOptions::get().with_subject(number))
            .await
    }

    /// `GET /api/v1/cuentas/ahorros/{id}`
    pub async fn get_by_id(&self, id: i64) -> ApiResult<Account> {
        self.api
            .fetch(&format!("/api/v1/cuentas/ahorros/{}", id), RequestOptions::get())
            .await
    }

    /// `GET /api/v1/cuentas/ahorros`, the full unfiltered list
    pub async fn list_all(&self) -> ApiResult<Vec<Account>> {
        Ok(self
            .api
            .fetch_optional("/api/v1/cuentas/ahorros", RequestOptions::get())
            .await?
            .unwrap_or_default())
    }

    /// Resolve an identifier that may be an account number or a national ID.
    ///
    /// The account lookup runs first. Only a not-found answer sends the
    /// identifier to the clients service; the client's first savings account
    /// is then picked from the full account list. Calls run one after the
    /// other and any other failure is returned unchanged.
    pub async fn resolve(&self, identifier: &str) -> ApiResult<Account> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ApiError::InvalidInput {
                message: "Ingrese un número de cuenta o de identificación".to_string(),
            });
        }

        let lookup_error = match self.get_by_account_number(identifier).await {
            Ok(account) => return Ok(account),
            Err(error) if error.is_not_found() => error,
            Err(error) => return Err(error),
        };

        log::debug!("{} is not an account number, trying it as a national id", identifier);

        let Some(client) = self.api.clients().find_by_national_id(identifier).await? else {
            return Err(lookup_error);
        };

        let accounts = self.list_all().await?;
        log::debug!(
            "Scanning {} accounts for client {}",
            accounts.len(),
            client.id_cliente
        );

        accounts
            .into_iter()
            .find(|account| account.id_cliente == client.id_cliente)
            .ok_or(ApiError::NoActiveAccounts {
                client_name: client.nombre_completo,
            })
    }
}
