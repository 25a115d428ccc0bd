//! A borrowed, classification-relevant view over the raw transaction records.

use alloy_primitives::{Address, Bytes, B256, U256};
use safegate_primitives::{DataDecoded, ModuleTransaction, MultisigTransaction, Operation};

#[derive(Debug, Clone)]
pub struct TxFacts<'a> {
    pub chain_id: u64,
    pub safe: Address,
    pub to: Address,
    pub value: U256,
    pub data: Option<&'a Bytes>,
    pub operation: Operation,
    pub data_decoded: Option<&'a DataDecoded>,
    pub safe_tx_gas: Option<u64>,
    pub base_gas: Option<u64>,
    pub gas_price: Option<U256>,
    pub gas_token: Option<Address>,
    pub refund_receiver: Option<Address>,
    pub safe_tx_hash: Option<B256>,
    /// Module transactions have no nonce slot, so they can never be a
    /// cancellation.
    pub is_multisig: bool,
}

impl<'a> TxFacts<'a> {
    pub fn from_multisig(chain_id: u64, tx: &'a MultisigTransaction) -> Self {
        Self {
            chain_id,
            safe: tx.safe,
            to: tx.to,
            value: tx.value,
            data: tx.data.as_ref(),
            operation: tx.operation,
            data_decoded: tx.data_decoded.as_ref(),
            safe_tx_gas: tx.safe_tx_gas,
            base_gas: tx.base_gas,
            gas_price: tx.gas_price,
            gas_token: tx.gas_token,
            refund_receiver: tx.refund_receiver,
            safe_tx_hash: Some(tx.safe_tx_hash),
            is_multisig: true,
        }
    }

    pub fn from_module(chain_id: u64, tx: &'a ModuleTransaction) -> Self {
        Self {
            chain_id,
            safe: tx.safe,
            to: tx.to,
            value: tx.value,
            data: tx.data.as_ref(),
            operation: tx.operation,
            data_decoded: tx.data_decoded.as_ref(),
            safe_tx_gas: None,
            base_gas: None,
            gas_price: None,
            gas_token: None,
            refund_receiver: None,
            safe_tx_hash: None,
            is_multisig: false,
        }
    }

    /// Call data length in bytes; 0 when data is absent.
    pub fn data_size(&self) -> u64 {
        self.data.map(|data| data.len() as u64).unwrap_or(0)
    }

    pub fn method(&self) -> Option<&str> {
        self.data_decoded.map(|decoded| decoded.method.as_str())
    }

    /// A self-targeting zero-effect Call used to invalidate a pending nonce.
    pub fn is_cancellation(&self) -> bool {
        self.is_multisig
            && self.to == self.safe
            && self.data_size() == 0
            && self.value.is_zero()
            && self.operation == Operation::Call
            && self.safe_tx_gas.unwrap_or(0) == 0
            && self.base_gas.unwrap_or(0) == 0
            && self.gas_price.unwrap_or(U256::ZERO).is_zero()
            && self.gas_token.unwrap_or(Address::ZERO) == Address::ZERO
            && self.refund_receiver.unwrap_or(Address::ZERO) == Address::ZERO
    }
}
