//! Raw transaction records as served by the Safe transaction service.
//!
//! These are read-only inputs; the engine never mutates them.

use alloy_primitives::{Address, Bytes, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{dec_str, dec_str_opt};

/// Call kind of a Safe transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Operation {
    Call = 0,
    DelegateCall = 1,
}

impl TryFrom<u8> for Operation {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Operation::Call),
            1 => Ok(Operation::DelegateCall),
            other => Err(format!("invalid operation: {other}")),
        }
    }
}

impl From<Operation> for u8 {
    fn from(value: Operation) -> Self {
        value as u8
    }
}

/// One typed parameter out of an ABI-decoded call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDecodedParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_decoded: Option<serde_json::Value>,
}

/// Structured result of ABI-decoding a transaction's call data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDecoded {
    pub method: String,
    #[serde(default)]
    pub parameters: Option<Vec<DataDecodedParameter>>,
}

impl DataDecoded {
    pub fn parameter(&self, index: usize) -> Option<&DataDecodedParameter> {
        self.parameters.as_ref()?.get(index)
    }

    /// Positional parameter value, only when it is a JSON string.
    pub fn parameter_str(&self, index: usize) -> Option<&str> {
        self.parameter(index)?.value.as_str()
    }

    pub fn parameter_named(&self, name: &str) -> Option<&DataDecodedParameter> {
        self.parameters
            .as_ref()?
            .iter()
            .find(|param| param.name == name)
    }
}

/// A signer's confirmation of a pending multisig transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub owner: Address,
    pub submission_date: DateTime<Utc>,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigTransaction {
    pub safe: Address,
    pub to: Address,
    #[serde(with = "dec_str")]
    pub value: U256,
    #[serde(default)]
    pub data: Option<Bytes>,
    pub operation: Operation,
    #[serde(default)]
    pub data_decoded: Option<DataDecoded>,
    pub nonce: u64,
    pub is_executed: bool,
    #[serde(default)]
    pub is_successful: Option<bool>,
    #[serde(default)]
    pub confirmations: Vec<Confirmation>,
    pub confirmations_required: u64,
    #[serde(default)]
    pub execution_date: Option<DateTime<Utc>>,
    pub submission_date: DateTime<Utc>,
    pub safe_tx_hash: B256,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
    #[serde(default)]
    pub safe_tx_gas: Option<u64>,
    #[serde(default)]
    pub base_gas: Option<u64>,
    #[serde(default, with = "dec_str_opt")]
    pub gas_price: Option<U256>,
    #[serde(default)]
    pub gas_token: Option<Address>,
    #[serde(default)]
    pub refund_receiver: Option<Address>,
}

impl MultisigTransaction {
    /// Millisecond timestamp shown to clients: execution time when executed,
    /// submission time while pending.
    pub fn timestamp_ms(&self) -> i64 {
        self.execution_date
            .unwrap_or(self.submission_date)
            .timestamp_millis()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTransaction {
    pub safe: Address,
    pub to: Address,
    #[serde(with = "dec_str")]
    pub value: U256,
    #[serde(default)]
    pub data: Option<Bytes>,
    pub operation: Operation,
    #[serde(default)]
    pub data_decoded: Option<DataDecoded>,
    pub module: Address,
    pub is_successful: bool,
    pub execution_date: DateTime<Utc>,
    pub transaction_hash: B256,
}

/// Kind of an indexed incoming/outgoing transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferKind {
    #[serde(rename = "ETHER_TRANSFER")]
    Ether,
    #[serde(rename = "ERC20_TRANSFER")]
    Erc20,
    #[serde(rename = "ERC721_TRANSFER")]
    Erc721,
}

/// One transfer indexed out of an Ethereum transaction. Several of these can
/// share a single `transaction_hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingTransfer {
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub execution_date: DateTime<Utc>,
    pub transaction_hash: B256,
    pub from: Address,
    pub to: Address,
    #[serde(default, with = "dec_str_opt")]
    pub value: Option<U256>,
    #[serde(default)]
    pub token_address: Option<Address>,
    #[serde(default)]
    pub token_id: Option<String>,
}

/// Envelope for transfers that arrived in one Ethereum transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthereumTransaction {
    pub execution_date: DateTime<Utc>,
    pub tx_hash: B256,
    #[serde(default)]
    pub transfers: Vec<IncomingTransfer>,
}

/// Deployment record behind the synthetic safe-creation history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeCreation {
    pub created: DateTime<Utc>,
    pub creator: Address,
    pub transaction_hash: B256,
    #[serde(default)]
    pub factory_address: Option<Address>,
    #[serde(default)]
    pub master_copy: Option<Address>,
}

/// Union returned by the all-transactions listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "txType")]
pub enum HistoryRecord {
    #[serde(rename = "MULTISIG_TRANSACTION")]
    Multisig(MultisigTransaction),
    #[serde(rename = "ETHEREUM_TRANSACTION")]
    Ethereum(EthereumTransaction),
    #[serde(rename = "MODULE_TRANSACTION")]
    Module(ModuleTransaction),
}
