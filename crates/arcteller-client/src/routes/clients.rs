//! MS-Clientes lookups

use arcteller_core::{ApiResult, Client};

use crate::{segment, ApiClient, RequestOptions};

pub struct ClientsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ClientsApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /api/v1/clientes/identificacion/{id}`
    pub async fn get_by_national_id(&self, national_id: &str) -> ApiResult<Client> {
        let path = format!("/api/v1/clientes/identificacion/{}", segment(national_id));
        self.api
            .fetch(&path, RequestOptions::get().with_subject(national_id))
            .await
    }

    /// Same lookup; an empty (204) answer is `None`
    pub async fn find_by_national_id(&self, national_id: &str) -> ApiResult<Option<Client>> {
        let path = format!("/api/v1/clientes/identificacion/{}", segment(national_id));
        self.api
            .fetch_optional(&path, RequestOptions::get().with_subject(national_id))
            .await
    }

    /// `GET /api/v1/clientes/{id}`
    pub async fn get_by_id(&self, id: i64) -> ApiResult<Client> {
        self.api
            .fetch(&format!("/api/v1/clientes/{}", id), RequestOptions::get())
            .await
    }
}
