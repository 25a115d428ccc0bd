//! The reqwest-backed client and its capability trait implementations.

use alloy_primitives::Address;
use async_trait::async_trait;
use reqwest::StatusCode;
use safegate_primitives::{
    AddressInfo, AddressInfoKind, AddressInfoResolver, HistoryRecord, MultisigTransaction, Page,
    ResolveError, SafeCreation, SafeInfo, TokenInfo, TokenResolver, TransactionSource,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::consts::transaction_service_url;
use crate::error::ServiceError;

/// Contract metadata as served by `/v1/contracts/{address}/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    pub address: Address,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo_uri: Option<String>,
}

impl From<ContractRecord> for AddressInfo {
    fn from(record: ContractRecord) -> Self {
        let name = record
            .display_name
            .filter(|n| !n.is_empty())
            .or(record.name);
        AddressInfo::new(record.address, name, record.logo_uri)
    }
}

/// Client for the per-chain Safe transaction services.
///
/// One instance serves every supported chain; the base URL is looked up per
/// call from the chain id.
#[derive(Debug, Clone, Default)]
pub struct TransactionService {
    client: reqwest::Client,
}

impl TransactionService {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ServiceError> {
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(url));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status { status, body });
        }
        Ok(response.json().await?)
    }

    pub async fn get_safe(&self, chain_id: u64, safe: Address) -> Result<SafeInfo, ServiceError> {
        let base = transaction_service_url(chain_id)?;
        self.get_json(safe_url(base, safe)).await
    }

    pub async fn get_token(
        &self,
        chain_id: u64,
        address: Address,
    ) -> Result<TokenInfo, ServiceError> {
        let base = transaction_service_url(chain_id)?;
        self.get_json(token_url(base, address)).await
    }

    pub async fn get_contract(
        &self,
        chain_id: u64,
        address: Address,
    ) -> Result<ContractRecord, ServiceError> {
        let base = transaction_service_url(chain_id)?;
        self.get_json(contract_url(base, address)).await
    }

    /// Pending multisig transactions, nonce-ascending with submission time as
    /// the tie-breaker so same-nonce proposals stay adjacent.
    pub async fn get_queued(
        &self,
        chain_id: u64,
        safe: Address,
        limit: u64,
        offset: u64,
    ) -> Result<Page<MultisigTransaction>, ServiceError> {
        let base = transaction_service_url(chain_id)?;
        self.get_json(queued_url(base, safe, limit, offset)).await
    }

    /// Executed transactions of every kind, newest first.
    pub async fn get_history(
        &self,
        chain_id: u64,
        safe: Address,
        limit: u64,
        offset: u64,
    ) -> Result<Page<HistoryRecord>, ServiceError> {
        let base = transaction_service_url(chain_id)?;
        self.get_json(history_url(base, safe, limit, offset)).await
    }

    pub async fn get_creation(
        &self,
        chain_id: u64,
        safe: Address,
    ) -> Result<SafeCreation, ServiceError> {
        let base = transaction_service_url(chain_id)?;
        self.get_json(creation_url(base, safe)).await
    }
}

fn safe_url(base: &str, safe: Address) -> String {
    format!("{base}/v1/safes/{safe}/")
}

fn token_url(base: &str, address: Address) -> String {
    format!("{base}/v1/tokens/{address}/")
}

fn contract_url(base: &str, address: Address) -> String {
    format!("{base}/v1/contracts/{address}/")
}

fn queued_url(base: &str, safe: Address, limit: u64, offset: u64) -> String {
    format!(
        "{base}/v1/safes/{safe}/multisig-transactions/\
         ?executed=false&ordering=nonce,submissionDate&limit={limit}&offset={offset}"
    )
}

fn history_url(base: &str, safe: Address, limit: u64, offset: u64) -> String {
    format!(
        "{base}/v1/safes/{safe}/all-transactions/\
         ?executed=true&queued=false&limit={limit}&offset={offset}"
    )
}

fn creation_url(base: &str, safe: Address) -> String {
    format!("{base}/v1/safes/{safe}/creation/")
}

#[async_trait]
impl AddressInfoResolver for TransactionService {
    async fn resolve_address(
        &self,
        chain_id: u64,
        address: Address,
        preference: &[AddressInfoKind],
    ) -> AddressInfo {
        for kind in preference {
            let result = match kind {
                AddressInfoKind::Token => self
                    .get_token(chain_id, address)
                    .await
                    .map(|token| AddressInfo::new(address, Some(token.name), token.logo_uri)),
                AddressInfoKind::Contract => {
                    self.get_contract(chain_id, address).await.map(Into::into)
                }
            };
            match result {
                Ok(info) => return info,
                Err(ServiceError::NotFound(_)) => {
                    debug!(%address, ?kind, "no metadata record");
                }
                Err(err) => {
                    warn!(%address, ?kind, %err, "metadata lookup failed");
                }
            }
        }
        AddressInfo::bare(address)
    }
}

#[async_trait]
impl TokenResolver for TransactionService {
    async fn resolve_token(
        &self,
        chain_id: u64,
        address: Address,
    ) -> Result<TokenInfo, ResolveError> {
        Ok(self.get_token(chain_id, address).await?)
    }
}

#[async_trait]
impl TransactionSource for TransactionService {
    async fn safe_info(&self, chain_id: u64, safe: Address) -> Result<SafeInfo, ResolveError> {
        Ok(self.get_safe(chain_id, safe).await?)
    }

    async fn queued_transactions(
        &self,
        chain_id: u64,
        safe: Address,
        limit: u64,
        offset: u64,
    ) -> Result<Page<MultisigTransaction>, ResolveError> {
        Ok(self.get_queued(chain_id, safe, limit, offset).await?)
    }

    async fn history_transactions(
        &self,
        chain_id: u64,
        safe: Address,
        limit: u64,
        offset: u64,
    ) -> Result<Page<HistoryRecord>, ResolveError> {
        Ok(self.get_history(chain_id, safe, limit, offset).await?)
    }

    async fn creation(&self, chain_id: u64, safe: Address) -> Result<SafeCreation, ResolveError> {
        Ok(self.get_creation(chain_id, safe).await?)
    }
}
