//! Collaborator capabilities the engine consumes.
//!
//! Address resolution never fails by contract: implementations degrade to a
//! bare-address record. Token resolution and transaction listing surface
//! errors, which callers handle per the classification rules (fall through or
//! propagate).

use alloy_primitives::Address;
use async_trait::async_trait;
use thiserror::Error;

use crate::address_info::AddressInfo;
use crate::page::Page;
use crate::safe::SafeInfo;
use crate::token::TokenInfo;
use crate::transaction::{HistoryRecord, MultisigTransaction, SafeCreation};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("not found")]
    NotFound,
    #[error("unsupported chain: {0}")]
    UnsupportedChain(u64),
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Metadata source to prefer when resolving an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressInfoKind {
    Token,
    Contract,
}

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait AddressInfoResolver: Send + Sync {
    /// Resolves display metadata for `address`, trying each kind in
    /// `preference` order. Never fails: falls back to a bare record.
    async fn resolve_address(
        &self,
        chain_id: u64,
        address: Address,
        preference: &[AddressInfoKind],
    ) -> AddressInfo;
}

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait TokenResolver: Send + Sync {
    async fn resolve_token(&self, chain_id: u64, address: Address)
        -> Result<TokenInfo, ResolveError>;
}

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn safe_info(&self, chain_id: u64, safe: Address) -> Result<SafeInfo, ResolveError>;

    /// Not-yet-executed multisig transactions, ordered by nonce ascending with
    /// ties broken by submission time.
    async fn queued_transactions(
        &self,
        chain_id: u64,
        safe: Address,
        limit: u64,
        offset: u64,
    ) -> Result<Page<MultisigTransaction>, ResolveError>;

    /// Executed multisig/module transactions and incoming transfers, ordered
    /// by recency.
    async fn history_transactions(
        &self,
        chain_id: u64,
        safe: Address,
        limit: u64,
        offset: u64,
    ) -> Result<Page<HistoryRecord>, ResolveError>;

    async fn creation(&self, chain_id: u64, safe: Address) -> Result<SafeCreation, ResolveError>;
}
