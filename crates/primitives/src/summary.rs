//! Client-visible transaction shapes: enriched summaries plus the queue and
//! history list items built around them.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::address_info::AddressInfo;
use crate::transaction::DataDecoded;

/// Lifecycle state of a transaction. Success, Failed and Cancelled are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
    Failed,
    Cancelled,
    AwaitingConfirmations,
    AwaitingExecution,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Success | TransactionStatus::Failed | TransactionStatus::Cancelled
        )
    }
}

/// Direction of a transfer relative to the Safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferDirection {
    Incoming,
    Outgoing,
    Unknown,
}

/// Concrete asset moved by a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransferInfo {
    #[serde(rename = "NATIVE_COIN", rename_all = "camelCase")]
    NativeCoin {
        #[serde(with = "crate::serde_helpers::dec_str")]
        value: U256,
    },
    #[serde(rename = "ERC20", rename_all = "camelCase")]
    Erc20 {
        token_address: Address,
        token_name: Option<String>,
        token_symbol: Option<String>,
        decimals: Option<u8>,
        logo_uri: Option<String>,
        #[serde(with = "crate::serde_helpers::dec_str")]
        value: U256,
    },
    #[serde(rename = "ERC721", rename_all = "camelCase")]
    Erc721 {
        token_address: Address,
        token_name: Option<String>,
        token_symbol: Option<String>,
        logo_uri: Option<String>,
        token_id: String,
    },
}

/// Decoded view of a call that mutates the Safe's own configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SettingsInfo {
    #[serde(rename = "SET_FALLBACK_HANDLER", rename_all = "camelCase")]
    SetFallbackHandler { handler: AddressInfo },
    #[serde(rename = "ADD_OWNER", rename_all = "camelCase")]
    AddOwner { owner: AddressInfo, threshold: u64 },
    #[serde(rename = "REMOVE_OWNER", rename_all = "camelCase")]
    RemoveOwner { owner: AddressInfo, threshold: u64 },
    #[serde(rename = "SWAP_OWNER", rename_all = "camelCase")]
    SwapOwner {
        old_owner: AddressInfo,
        new_owner: AddressInfo,
    },
    #[serde(rename = "CHANGE_THRESHOLD", rename_all = "camelCase")]
    ChangeThreshold { threshold: u64 },
    #[serde(rename = "CHANGE_IMPLEMENTATION", rename_all = "camelCase")]
    ChangeImplementation { implementation: AddressInfo },
    #[serde(rename = "ENABLE_MODULE", rename_all = "camelCase")]
    EnableModule { module: AddressInfo },
    #[serde(rename = "DISABLE_MODULE", rename_all = "camelCase")]
    DisableModule { module: AddressInfo },
    #[serde(rename = "SET_GUARD", rename_all = "camelCase")]
    SetGuard { guard: AddressInfo },
}

/// What a transaction does, as shown to clients. Exactly one variant is
/// produced per raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionInfo {
    #[serde(rename = "Custom", rename_all = "camelCase")]
    Custom {
        to: AddressInfo,
        data_size: u64,
        #[serde(with = "crate::serde_helpers::dec_str")]
        value: U256,
        method_name: Option<String>,
        action_count: Option<u64>,
        is_cancellation: bool,
        human_description: Option<String>,
    },
    #[serde(rename = "Transfer", rename_all = "camelCase")]
    Transfer {
        sender: AddressInfo,
        recipient: AddressInfo,
        direction: TransferDirection,
        transfer_info: TransferInfo,
        human_description: Option<String>,
    },
    #[serde(rename = "SettingsChange", rename_all = "camelCase")]
    SettingsChange {
        data_decoded: DataDecoded,
        settings_info: Option<SettingsInfo>,
        human_description: Option<String>,
    },
    #[serde(rename = "Creation", rename_all = "camelCase")]
    Creation {
        creator: AddressInfo,
        transaction_hash: B256,
        implementation: Option<AddressInfo>,
        factory: Option<AddressInfo>,
        human_description: Option<String>,
    },
}

impl TransactionInfo {
    pub fn set_human_description(&mut self, description: Option<String>) {
        match self {
            TransactionInfo::Custom {
                human_description, ..
            }
            | TransactionInfo::Transfer {
                human_description, ..
            }
            | TransactionInfo::SettingsChange {
                human_description, ..
            }
            | TransactionInfo::Creation {
                human_description, ..
            } => *human_description = description,
        }
    }

    pub fn human_description(&self) -> Option<&str> {
        match self {
            TransactionInfo::Custom {
                human_description, ..
            }
            | TransactionInfo::Transfer {
                human_description, ..
            }
            | TransactionInfo::SettingsChange {
                human_description, ..
            }
            | TransactionInfo::Creation {
                human_description, ..
            } => human_description.as_deref(),
        }
    }
}

/// Execution metadata attached to summaries of proposed transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExecutionInfo {
    #[serde(rename = "MULTISIG", rename_all = "camelCase")]
    Multisig {
        nonce: u64,
        confirmations_required: u64,
        confirmations_submitted: u64,
        /// Present iff the transaction is awaiting confirmations.
        missing_signers: Option<Vec<AddressInfo>>,
    },
    #[serde(rename = "MODULE", rename_all = "camelCase")]
    Module { address: AddressInfo },
}

impl ExecutionInfo {
    pub fn nonce(&self) -> Option<u64> {
        match self {
            ExecutionInfo::Multisig { nonce, .. } => Some(*nonce),
            ExecutionInfo::Module { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub tx_status: TransactionStatus,
    pub tx_info: TransactionInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_info: Option<ExecutionInfo>,
}

impl TransactionSummary {
    pub fn nonce(&self) -> Option<u64> {
        self.execution_info.as_ref().and_then(ExecutionInfo::nonce)
    }
}

/// Section label within the pending queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
pub enum QueueLabel {
    Next,
    Queued,
}

/// Position of a transaction within a same-nonce group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
pub enum ConflictType {
    HasNext,
    End,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QueueItem {
    #[serde(rename = "LABEL", rename_all = "camelCase")]
    Label { label: QueueLabel },
    #[serde(rename = "CONFLICT_HEADER", rename_all = "camelCase")]
    ConflictHeader { nonce: u64 },
    #[serde(rename = "TRANSACTION", rename_all = "camelCase")]
    Transaction {
        transaction: TransactionSummary,
        conflict_type: ConflictType,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HistoryItem {
    #[serde(rename = "DATE_LABEL", rename_all = "camelCase")]
    DateLabel { timestamp: i64 },
    #[serde(rename = "TRANSACTION", rename_all = "camelCase")]
    Transaction { transaction: TransactionSummary },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn status_terminality() {
        assert!(TransactionStatus::Success.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
        assert!(TransactionStatus::Cancelled.is_terminal());
        assert!(!TransactionStatus::AwaitingConfirmations.is_terminal());
        assert!(!TransactionStatus::AwaitingExecution.is_terminal());
    }

    #[test]
    fn transaction_info_serializes_with_type_tag() {
        let info = TransactionInfo::Custom {
            to: AddressInfo::bare(address!("6B175474E89094C44Da98b954EedeAC495271d0F")),
            data_size: 68,
            value: U256::ZERO,
            method_name: Some("doSomething".to_string()),
            action_count: None,
            is_cancellation: false,
            human_description: None,
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "Custom");
        assert_eq!(json["dataSize"], 68);
        assert_eq!(json["isCancellation"], false);
    }

    #[test]
    fn human_description_is_settable_on_every_variant() {
        let mut info = TransactionInfo::SettingsChange {
            data_decoded: DataDecoded {
                method: "changeThreshold".to_string(),
                parameters: None,
            },
            settings_info: None,
            human_description: None,
        };
        info.set_human_description(Some("Change threshold".to_string()));
        assert_eq!(info.human_description(), Some("Change threshold"));
    }

    #[test]
    fn queue_item_wire_shape() {
        let item = QueueItem::Label {
            label: QueueLabel::Next,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "LABEL");
        assert_eq!(json["label"], "Next");

        let header = QueueItem::ConflictHeader { nonce: 5 };
        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json["type"], "CONFLICT_HEADER");
        assert_eq!(json["nonce"], 5);
    }
}
