//! Transactions service: cash operations, searches and reversals

use arcteller_core::{
    ApiError, ApiResult, NewTransaction, OperationType, ReasonCode, ReversalReason, ReversalRequest,
    Transaction,
};
use serde_json::Value;

use crate::{segment, ApiClient, RequestOptions};

const TRANSACTIONS: &str = "/api/transacciones";

pub struct TransactionsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> TransactionsApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `POST /api/transacciones` with the payload as given
    pub async fn create(&self, payload: &NewTransaction) -> ApiResult<Transaction> {
        self.api
            .fetch(TRANSACTIONS, RequestOptions::post(payload)?)
            .await
    }

    /// Cash withdrawal; `tipoOperacion` is forced to `RETIRO`
    pub async fn withdraw(&self, payload: NewTransaction) -> ApiResult<Transaction> {
        self.create(&payload.with_operation(OperationType::Retiro)).await
    }

    /// Cash deposit; `tipoOperacion` is forced to `DEPOSITO`
    pub async fn deposit(&self, payload: NewTransaction) -> ApiResult<Transaction> {
        self.create(&payload.with_operation(OperationType::Deposito)).await
    }

    /// `GET /api/transacciones/cuenta/{id}`
    pub async fn get_by_account(&self, account_id: i64) -> ApiResult<Vec<Transaction>> {
        let path = format!("{}/cuenta/{}", TRANSACTIONS, account_id);
        Ok(self
            .api
            .fetch_optional(&path, RequestOptions::get())
            .await?
            .unwrap_or_default())
    }

    /// `POST /api/transacciones/{id}/devolucion`
    ///
    /// The switch may answer with a body or with 204.
    pub async fn request_reversal(&self, transaction_id: i64, reason: ReasonCode) -> ApiResult<Option<Value>> {
        let request = ReversalRequest {
            id_transaccion: transaction_id,
            motivo: reason,
        };
        let path = format!("{}/{}/devolucion", TRANSACTIONS, request.id_transaccion);

        log::info!("Requesting reversal of transaction {} ({})", transaction_id, reason);
        self.api.execute(&path, RequestOptions::post(&request)?).await
    }

    /// Reversal with a reason code given as text; unknown codes never reach the network
    pub async fn request_reversal_code(&self, transaction_id: i64, code: &str) -> ApiResult<Option<Value>> {
        let reason = code.parse::<ReasonCode>().map_err(|_| ApiError::InvalidReasonCode {
            code: code.to_string(),
        })?;
        self.request_reversal(transaction_id, reason).await
    }

    /// `GET /api/transacciones/motivos-devolucion`
    pub async fn get_reversal_reasons(&self) -> ApiResult<Vec<ReversalReason>> {
        let path = format!("{}/motivos-devolucion", TRANSACTIONS);
        Ok(self
            .api
            .fetch_optional(&path, RequestOptions::get())
            .await?
            .unwrap_or_default())
    }

    /// `GET /api/transacciones/buscar/{reference}` (switch instruction reference)
    pub async fn find_by_reference(&self, reference: &str) -> ApiResult<Transaction> {
        let path = format!("{}/buscar/{}", TRANSACTIONS, segment(reference));
        self.api
            .fetch(&path, RequestOptions::get().with_subject(reference))
            .await
    }

    /// `GET /api/transacciones/buscar/{reference}/detalle-switch`
    pub async fn find_with_switch_detail(&self, reference: &str) -> ApiResult<Transaction> {
        let path = format!("{}/buscar/{}/detalle-switch", TRANSACTIONS, segment(reference));
        self.api.fetch(&path, RequestOptions::get()).await
    }

    /// `GET /api/transacciones/{id}/detalle`
    pub async fn get_detail_by_id(&self, transaction_id: i64) -> ApiResult<Transaction> {
        let path = format!("{}/{}/detalle", TRANSACTIONS, transaction_id);
        self.api.fetch(&path, RequestOptions::get()).await
    }

    /// `GET /api/transacciones/buscar-codigo/{code}` (6-digit reference code)
    pub async fn find_by_reference_code(&self, code: &str) -> ApiResult<Transaction> {
        let path = format!("{}/buscar-codigo/{}", TRANSACTIONS, segment(code));
        self.api
            .fetch(&path, RequestOptions::get().with_subject(code))
            .await
    }
}
