//! Day grouping for the transaction history.

use std::collections::BTreeMap;

use safegate_primitives::{HistoryItem, TransactionSummary};

const DAY_MS: i64 = 86_400_000;

/// Start of the calendar day containing `timestamp_ms`, in the timezone
/// expressed by `offset_ms`. The returned key is itself a millisecond
/// timestamp, usable directly as a `DATE_LABEL`.
pub fn day_start(timestamp_ms: i64, offset_ms: i64) -> i64 {
    (timestamp_ms + offset_ms).div_euclid(DAY_MS) * DAY_MS
}

/// Flattens history summaries into per-day sections, each introduced by a
/// `DATE_LABEL`. Days are emitted in ascending order; within a day the input
/// order is kept.
pub fn group_history(
    transactions: Vec<TransactionSummary>,
    timezone_offset_ms: i64,
) -> Vec<HistoryItem> {
    let mut days: BTreeMap<i64, Vec<TransactionSummary>> = BTreeMap::new();
    for transaction in transactions {
        days.entry(day_start(transaction.timestamp, timezone_offset_ms))
            .or_default()
            .push(transaction);
    }

    let mut items = Vec::new();
    for (day, members) in days {
        items.push(HistoryItem::DateLabel { timestamp: day });
        items.extend(
            members
                .into_iter()
                .map(|transaction| HistoryItem::Transaction { transaction }),
        );
    }
    items
}
