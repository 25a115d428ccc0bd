//! Conflict grouping for the pending queue.
//!
//! Transactions sharing a nonce compete for the same execution slot: only one
//! of them can ever execute. The queue view makes that visible by wrapping
//! each same-nonce group in a `CONFLICT_HEADER` and tagging every member with
//! its position in the group.
//!
//! Grouping is page-local but must not duplicate section labels or headers
//! when a group spans a page boundary, so the caller passes a [`QueueContext`]
//! carrying the nonces adjacent to the page.

use safegate_primitives::{ConflictType, QueueItem, QueueLabel, TransactionSummary};
use tracing::debug;

/// Page-boundary context for [`group_queue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueContext {
    /// The Safe's current nonce. Transactions at this nonce are executable
    /// next; everything above it is queued behind them.
    pub safe_nonce: u64,
    /// Nonce of the first transaction of the next page, when one exists.
    /// A last group sharing this nonce continues past the page boundary.
    pub lookahead: Option<u64>,
    /// Nonce of the last transaction of the previous page, when one exists.
    /// A first group sharing this nonce is a continuation and re-emits
    /// neither its label nor its header.
    pub trailing: Option<u64>,
}

impl QueueContext {
    pub fn new(safe_nonce: u64) -> Self {
        Self {
            safe_nonce,
            lookahead: None,
            trailing: None,
        }
    }
}

/// Flattens an ordered page of pending transaction summaries into the queue
/// timeline: section labels, conflict headers and position-tagged
/// transactions.
pub fn group_queue(transactions: Vec<TransactionSummary>, ctx: &QueueContext) -> Vec<QueueItem> {
    let groups = partition_by_nonce(transactions);

    let mut items = Vec::new();
    // A Queued label on an earlier page covers this one too.
    let mut queued_labelled = ctx.trailing.is_some_and(|n| n > ctx.safe_nonce);

    for (position, (nonce, members)) in groups.iter().enumerate() {
        let continued = position == 0 && ctx.trailing == Some(*nonce);
        let extends = ctx.lookahead == Some(*nonce);

        if !continued {
            if *nonce == ctx.safe_nonce {
                items.push(QueueItem::Label {
                    label: QueueLabel::Next,
                });
            } else if *nonce > ctx.safe_nonce && !queued_labelled {
                items.push(QueueItem::Label {
                    label: QueueLabel::Queued,
                });
                queued_labelled = true;
            }
        }

        // A group is a conflict when it holds more than one transaction,
        // counting members on the neighbouring pages.
        let conflicted = members.len() > 1 || extends || continued;
        if conflicted && !continued {
            items.push(QueueItem::ConflictHeader { nonce: *nonce });
        }

        let last = members.len() - 1;
        for (index, transaction) in members.iter().enumerate() {
            let conflict_type = if index < last || extends {
                ConflictType::HasNext
            } else if conflicted {
                ConflictType::End
            } else {
                ConflictType::None
            };
            items.push(QueueItem::Transaction {
                transaction: transaction.clone(),
                conflict_type,
            });
        }
    }

    items
}

/// Splits summaries into same-nonce groups, preserving first-seen nonce
/// order. Summaries without multisig execution info carry no nonce and are
/// dropped; they cannot occupy a queue slot.
fn partition_by_nonce(
    transactions: Vec<TransactionSummary>,
) -> Vec<(u64, Vec<TransactionSummary>)> {
    let mut groups: Vec<(u64, Vec<TransactionSummary>)> = Vec::new();
    for transaction in transactions {
        let Some(nonce) = transaction.nonce() else {
            debug!(id = transaction.id, "queue entry without nonce, skipping");
            continue;
        };
        match groups.iter_mut().find(|(n, _)| *n == nonce) {
            Some((_, members)) => members.push(transaction),
            None => groups.push((nonce, vec![transaction])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use safegate_primitives::{
        AddressInfo, ExecutionInfo, TransactionInfo, TransactionStatus,
    };

    fn pending(id: &str, nonce: u64) -> TransactionSummary {
        TransactionSummary {
            id: id.to_string(),
            timestamp: 1_670_000_000_000,
            tx_status: TransactionStatus::AwaitingConfirmations,
            tx_info: TransactionInfo::Custom {
                to: AddressInfo::bare(Address::ZERO),
                data_size: 0,
                value: U256::ZERO,
                method_name: None,
                action_count: None,
                is_cancellation: false,
                human_description: None,
            },
            execution_info: Some(ExecutionInfo::Multisig {
                nonce,
                confirmations_required: 2,
                confirmations_submitted: 1,
                missing_signers: None,
            }),
        }
    }

    fn tags(items: &[QueueItem]) -> Vec<ConflictType> {
        items
            .iter()
            .filter_map(|item| match item {
                QueueItem::Transaction { conflict_type, .. } => Some(*conflict_type),
                _ => None,
            })
            .collect()
    }

    fn labels(items: &[QueueItem]) -> Vec<QueueLabel> {
        items
            .iter()
            .filter_map(|item| match item {
                QueueItem::Label { label } => Some(*label),
                _ => None,
            })
            .collect()
    }

    fn header_nonces(items: &[QueueItem]) -> Vec<u64> {
        items
            .iter()
            .filter_map(|item| match item {
                QueueItem::ConflictHeader { nonce } => Some(*nonce),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn tags_follow_group_positions() {
        let input = vec![
            pending("a", 1),
            pending("b", 1),
            pending("c", 2),
            pending("d", 2),
            pending("e", 2),
            pending("f", 3),
        ];
        let items = group_queue(input, &QueueContext::new(1));

        assert_eq!(
            tags(&items),
            vec![
                ConflictType::HasNext,
                ConflictType::End,
                ConflictType::HasNext,
                ConflictType::HasNext,
                ConflictType::End,
                ConflictType::None,
            ]
        );
        assert_eq!(labels(&items), vec![QueueLabel::Next, QueueLabel::Queued]);
        assert_eq!(header_nonces(&items), vec![1, 2]);
    }

    #[test]
    fn singleton_groups_get_no_header() {
        let items = group_queue(vec![pending("a", 5), pending("b", 6)], &QueueContext::new(5));
        assert!(header_nonces(&items).is_empty());
        assert_eq!(tags(&items), vec![ConflictType::None, ConflictType::None]);
    }

    #[test]
    fn next_label_only_for_current_nonce() {
        // Nothing proposed at the executable nonce yet.
        let items = group_queue(vec![pending("a", 7)], &QueueContext::new(5));
        assert_eq!(labels(&items), vec![QueueLabel::Queued]);
    }

    #[test]
    fn group_spanning_pages_keeps_one_header() {
        // Page 1 ends mid-group at nonce 2; page 2 finishes it.
        let first = group_queue(
            vec![pending("a", 1), pending("b", 2)],
            &QueueContext {
                safe_nonce: 1,
                lookahead: Some(2),
                trailing: None,
            },
        );
        assert_eq!(header_nonces(&first), vec![2]);
        assert_eq!(
            tags(&first),
            vec![ConflictType::None, ConflictType::HasNext]
        );

        let second = group_queue(
            vec![pending("c", 2), pending("d", 2)],
            &QueueContext {
                safe_nonce: 1,
                lookahead: None,
                trailing: Some(2),
            },
        );
        // Continuation: no second header, no second Queued label.
        assert!(header_nonces(&second).is_empty());
        assert!(labels(&second).is_empty());
        assert_eq!(
            tags(&second),
            vec![ConflictType::HasNext, ConflictType::End]
        );
    }

    #[test]
    fn continuation_of_a_singleton_still_ends_the_group() {
        // One member on the previous page, one here: a conflict of two.
        let items = group_queue(
            vec![pending("b", 3)],
            &QueueContext {
                safe_nonce: 1,
                lookahead: None,
                trailing: Some(3),
            },
        );
        assert!(header_nonces(&items).is_empty());
        assert_eq!(tags(&items), vec![ConflictType::End]);
    }

    #[test]
    fn queued_label_not_repeated_after_earlier_page() {
        let items = group_queue(
            vec![pending("a", 8)],
            &QueueContext {
                safe_nonce: 5,
                lookahead: None,
                trailing: Some(7),
            },
        );
        assert!(labels(&items).is_empty());
    }

    #[test]
    fn empty_page_yields_nothing() {
        assert!(group_queue(Vec::new(), &QueueContext::new(0)).is_empty());
    }

    #[test]
    fn entries_without_nonce_are_dropped() {
        let mut anomalous = pending("x", 4);
        anomalous.execution_info = None;
        let items = group_queue(vec![anomalous, pending("a", 4)], &QueueContext::new(4));
        assert_eq!(tags(&items), vec![ConflictType::None]);
    }
}
