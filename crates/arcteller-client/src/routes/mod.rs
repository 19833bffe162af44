//! Typed operation groups, one per backend service

pub mod accounts;
pub mod auth;
pub mod clients;
pub mod transactions;

pub use accounts::AccountsApi;
pub use auth::AuthApi;
pub use clients::ClientsApi;
pub use transactions::TransactionsApi;
