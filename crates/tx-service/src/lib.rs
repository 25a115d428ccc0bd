//! HTTP client for the Safe transaction service, implementing the resolver
//! and transaction-source capabilities the gateway consumes.

pub mod client;
pub mod consts;
pub mod error;

pub use client::TransactionService;
pub use consts::transaction_service_url;
pub use error::ServiceError;
