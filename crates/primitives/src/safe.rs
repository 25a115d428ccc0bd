use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// On-chain state of a Safe as reported by the transaction service.
///
/// `nonce` is the next executable slot; `owners` define the set of valid
/// signers against which confirmations are counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeInfo {
    pub address: Address,
    pub owners: Vec<Address>,
    pub threshold: u64,
    pub nonce: u64,
}

impl SafeInfo {
    pub fn is_owner(&self, address: Address) -> bool {
        self.owners.contains(&address)
    }
}
