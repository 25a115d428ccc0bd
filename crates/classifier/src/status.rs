//! Lifecycle status derivation for multisig transactions.

use alloy_primitives::Address;
use safegate_primitives::{MultisigTransaction, SafeInfo, TransactionStatus};

/// Derives the status of a multisig transaction, and the owners still missing
/// when it is awaiting confirmations.
///
/// Total over its inputs: executed transactions map to `Success`/`Failed`;
/// transactions whose slot has been consumed by a later nonce are `Cancelled`;
/// otherwise confirmation counts decide between `AwaitingConfirmations` and
/// `AwaitingExecution`. `missing_signers` is `Some` iff the result is
/// `AwaitingConfirmations`.
pub fn resolve_status(
    tx: &MultisigTransaction,
    safe: &SafeInfo,
) -> (TransactionStatus, Option<Vec<Address>>) {
    if tx.is_executed {
        let status = if tx.is_successful.unwrap_or(false) {
            TransactionStatus::Success
        } else {
            TransactionStatus::Failed
        };
        return (status, None);
    }

    if safe.nonce > tx.nonce {
        return (TransactionStatus::Cancelled, None);
    }

    if (tx.confirmations.len() as u64) < tx.confirmations_required {
        return (
            TransactionStatus::AwaitingConfirmations,
            Some(missing_signers(tx, safe)),
        );
    }

    (TransactionStatus::AwaitingExecution, None)
}

fn missing_signers(tx: &MultisigTransaction, safe: &SafeInfo) -> Vec<Address> {
    safe.owners
        .iter()
        .copied()
        .filter(|owner| !tx.confirmations.iter().any(|c| c.owner == *owner))
        .collect()
}
