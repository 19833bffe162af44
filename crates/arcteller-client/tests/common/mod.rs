#![allow(dead_code)]

use std::time::Duration;

use arcteller_client::ApiClient;
use serde_json::{json, Value};
use wiremock::MockServer;

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(5)).expect("client should build")
}

pub fn account_json(id_cuenta: i64, id_cliente: i64, numero: &str) -> Value {
    json!({
        "idCuenta": id_cuenta,
        "idCliente": id_cliente,
        "numeroCuenta": numero,
        "saldo": 1500.25,
        "estado": "ACTIVA"
    })
}

pub fn client_json(id_cliente: i64, nombre: &str, identificacion: &str) -> Value {
    json!({
        "idCliente": id_cliente,
        "nombreCompleto": nombre,
        "identificacion": identificacion
    })
}

pub fn transaction_json(id: i64, codigo: &str, puede_reversarse: bool) -> Value {
    json!({
        "idTransaccion": id,
        "codigoReferencia": codigo,
        "referencia": format!("ARCB-{:06}", id),
        "monto": 80.0,
        "tipoOperacion": "TRANSFERENCIA_SALIDA",
        "estado": "COMPLETADA",
        "fechaCreacion": "2025-01-15T10:30:00",
        "horasTranscurridas": 2,
        "esReversible": puede_reversarse,
        "dentroDe24Horas": puede_reversarse,
        "estadoValido": puede_reversarse,
        "puedeReversarse": puede_reversarse
    })
}
