//! Basic enumerations shared by requests and responses

use serde::{Deserialize, Serialize};

/// ISO 20022 external reason code accepted for a reversal request.
///
/// The set is closed: the switch rejects anything else, so parsing fails
/// before a request is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    /// Invalid creditor account
    #[serde(rename = "AC03")]
    Ac03,
    /// Blocked account
    #[serde(rename = "AC06")]
    Ac06,
    /// Closed account
    #[serde(rename = "AC04")]
    Ac04,
    /// Insufficient funds
    #[serde(rename = "AM04")]
    Am04,
    /// Duplication
    #[serde(rename = "AM05")]
    Am05,
    /// Fraudulent origin
    #[serde(rename = "FRAD")]
    Frad,
    /// Transaction forbidden
    #[serde(rename = "AG01")]
    Ag01,
    /// Requested by customer
    #[serde(rename = "CUST")]
    Cust,
    /// Technical error
    #[serde(rename = "MS03")]
    Ms03,
}

impl ReasonCode {
    /// Catalogue in display order
    pub const ALL: [ReasonCode; 9] = [
        ReasonCode::Ac03,
        ReasonCode::Ac06,
        ReasonCode::Ac04,
        ReasonCode::Am04,
        ReasonCode::Am05,
        ReasonCode::Frad,
        ReasonCode::Ag01,
        ReasonCode::Cust,
        ReasonCode::Ms03,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::Ac03 => "AC03",
            ReasonCode::Ac06 => "AC06",
            ReasonCode::Ac04 => "AC04",
            ReasonCode::Am04 => "AM04",
            ReasonCode::Am05 => "AM05",
            ReasonCode::Frad => "FRAD",
            ReasonCode::Ag01 => "AG01",
            ReasonCode::Cust => "CUST",
            ReasonCode::Ms03 => "MS03",
        }
    }

    /// Label shown next to the code in the reason picker
    pub fn description(&self) -> &'static str {
        match self {
            ReasonCode::Ac03 => "Cuenta Inexistente (Invalid Creditor Account)",
            ReasonCode::Ac06 => "Cuenta Bloqueada (Blocked Account)",
            ReasonCode::Ac04 => "Cuenta Cerrada (Closed Account)",
            ReasonCode::Am04 => "Saldo Insuficiente (Limits)",
            ReasonCode::Am05 => "Duplicidad (Duplication)",
            ReasonCode::Frad => "Fraude (Fraudulent Origin)",
            ReasonCode::Ag01 => "Operación Prohibida (Transaction Forbidden)",
            ReasonCode::Cust => "Solicitada por Cliente (Requested By Customer)",
            ReasonCode::Ms03 => "Error Técnico Interno (Technical Error)",
        }
    }
}

impl Default for ReasonCode {
    fn default() -> Self {
        ReasonCode::Am04
    }
}

impl std::str::FromStr for ReasonCode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        ReasonCode::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == code)
            .ok_or_else(|| format!("Invalid reason code: {}", s))
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cash operation performed at the teller window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Retiro,
    Deposito,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::Retiro => write!(f, "RETIRO"),
            OperationType::Deposito => write!(f, "DEPOSITO"),
        }
    }
}
