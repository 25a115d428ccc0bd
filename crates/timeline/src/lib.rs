//! Presentation-order grouping of transaction summaries: the pending queue
//! with same-nonce conflict groups, and the history list with per-day labels.

pub mod history;
pub mod queue;

pub use history::group_history;
pub use queue::{group_queue, QueueContext};
