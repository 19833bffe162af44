//! Domain types for the arcteller teller console
//!
//! - models: backend DTOs (transactions, clients, accounts, requests)
//! - types: ISO 20022 reason codes and cash operation types
//! - time: decoding and display of creation timestamps
//! - session: the cashier context handed to each screen
//! - error: the client-boundary error type

pub mod error;
pub mod models;
pub mod session;
pub mod time;
pub mod types;

pub use error::{ApiError, ApiResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger, ErrorSeverity};
pub use models::{Account, Client, Eligibility, LoginRequest, NewTransaction, ReversalReason, ReversalRequest, Transaction};
pub use session::Session;
pub use time::{format_display, Timestamp};
pub use types::{OperationType, ReasonCode};
