//! Stable client-facing transaction identifiers.
//!
//! Every id starts with a kind prefix so clients can route detail lookups
//! without parsing further. Incoming transfers have no hash of their own and
//! several can share one Ethereum transaction, so their id carries a content
//! hash over the fields that distinguish them.

use alloy_primitives::{keccak256, Address, B256};
use safegate_primitives::IncomingTransfer;

pub fn multisig_id(safe: Address, safe_tx_hash: B256) -> String {
    format!("multisig_{safe}_{safe_tx_hash}")
}

pub fn module_id(safe: Address, tx_hash: B256) -> String {
    format!("module_{safe}_{tx_hash}")
}

pub fn transfer_id(safe: Address, transfer: &IncomingTransfer) -> String {
    let amount = transfer
        .token_id
        .clone()
        .unwrap_or_else(|| transfer.value.unwrap_or_default().to_string());
    let content = format!(
        "{}{}{}{}{}",
        transfer.transaction_hash,
        transfer.from,
        transfer.to,
        transfer.token_address.unwrap_or(Address::ZERO),
        amount,
    );
    let content_hash = keccak256(content.as_bytes());
    format!(
        "ethereum_{safe}_{}_{content_hash}",
        transfer.transaction_hash
    )
}

pub fn creation_id(safe: Address) -> String {
    format!("creation_{safe}")
}
