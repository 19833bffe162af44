//! Backend DTOs
//!
//! Field names on the wire are the services' Spanish camelCase names.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::time::Timestamp;
use super::types::{OperationType, ReasonCode};

/// Transaction as returned by the transactions service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Internal numeric identifier
    pub id_transaccion: i64,
    /// 6-digit lookup key shown on the customer's receipt
    #[serde(default)]
    pub codigo_referencia: Option<String>,
    /// Instruction reference assigned by the switch
    #[serde(default)]
    pub referencia: Option<String>,
    #[serde(default)]
    pub monto: Option<Decimal>,
    #[serde(default)]
    pub tipo_operacion: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,

    // Originator
    #[serde(default)]
    pub nombre_ordenante: Option<String>,
    #[serde(default)]
    pub numero_cuenta_origen: Option<String>,
    #[serde(default)]
    pub id_cuenta_origen: Option<i64>,

    // Beneficiary
    #[serde(default)]
    pub nombre_beneficiario: Option<String>,
    #[serde(default)]
    pub cuenta_externa: Option<String>,
    #[serde(default)]
    pub banco_destino: Option<String>,

    #[serde(default)]
    pub fecha_creacion: Option<Timestamp>,
    #[serde(default)]
    pub horas_transcurridas: Option<i64>,
    /// Live status reported by the switch
    #[serde(default)]
    pub estado_switch: Option<String>,

    // Eligibility flags, computed by the backend
    #[serde(default)]
    pub es_reversible: bool,
    #[serde(default, rename = "dentroDe24Horas")]
    pub dentro_de_24_horas: bool,
    #[serde(default)]
    pub estado_valido: bool,
    #[serde(default)]
    pub puede_reversarse: bool,
    #[serde(default)]
    pub estado_actualizado_desde_switch: bool,
}

/// Reversal checklist as displayed to the cashier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub reversible_type: bool,
    pub within_24_hours: bool,
    pub valid_status: bool,
    /// Backend verdict; never recomputed locally
    pub can_reverse: bool,
}

impl Transaction {
    pub fn eligibility(&self) -> Eligibility {
        Eligibility {
            reversible_type: self.es_reversible,
            within_24_hours: self.dentro_de_24_horas,
            valid_status: self.estado_valido,
            can_reverse: self.puede_reversarse,
        }
    }

    /// Whether the verdict agrees with the three individual checks
    pub fn flags_consistent(&self) -> bool {
        !self.puede_reversarse || (self.es_reversible && self.dentro_de_24_horas && self.estado_valido)
    }
}

/// Bank customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id_cliente: i64,
    #[serde(default)]
    pub nombre_completo: String,
    /// National identification number (cédula)
    #[serde(default)]
    pub identificacion: Option<String>,
}

/// Savings account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id_cuenta: i64,
    /// Owning client
    pub id_cliente: i64,
    pub numero_cuenta: String,
    #[serde(default)]
    pub saldo: Option<Decimal>,
    #[serde(default)]
    pub estado: Option<String>,
}

/// Credentials passed through to the clients service
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub identificacion: String,
    pub clave: String,
}

/// Body of a reversal request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReversalRequest {
    #[serde(skip)]
    pub id_transaccion: i64,
    pub motivo: ReasonCode,
}

/// Entry of the backend's reversal-reason catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReversalReason {
    pub codigo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

const OPERATION_TYPE_FIELD: &str = "tipoOperacion";

/// Payload for `POST /api/transacciones`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_operacion: Option<OperationType>,
    pub monto: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_cuenta: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_cuenta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    /// Additional fields the cash screens attach
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NewTransaction {
    pub fn new(monto: Decimal) -> Self {
        Self {
            tipo_operacion: None,
            monto,
            id_cuenta: None,
            numero_cuenta: None,
            descripcion: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn for_account(mut self, account: &Account) -> Self {
        self.id_cuenta = Some(account.id_cuenta);
        self.numero_cuenta = Some(account.numero_cuenta.clone());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.descripcion = Some(description.into());
        self
    }

    /// Same payload with the operation type forced; a `tipoOperacion` in the
    /// extra fields is dropped so it cannot shadow the typed one
    pub fn with_operation(mut self, operation: OperationType) -> Self {
        self.extra.remove(OPERATION_TYPE_FIELD);
        self.tipo_operacion = Some(operation);
        self
    }
}
