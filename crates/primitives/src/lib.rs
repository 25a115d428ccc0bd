pub use alloy_primitives;

pub mod address_info;
pub mod page;
pub mod resolve;
pub mod safe;
pub mod serde_helpers;
pub mod summary;
pub mod token;
pub mod transaction;

pub use address_info::AddressInfo;
pub use page::{Cursor, Page, DEFAULT_PAGE_SIZE};
pub use resolve::{
    AddressInfoKind, AddressInfoResolver, ResolveError, TokenResolver, TransactionSource,
};
pub use safe::SafeInfo;
pub use summary::{
    ConflictType, ExecutionInfo, HistoryItem, QueueItem, QueueLabel, SettingsInfo,
    TransactionInfo, TransactionStatus, TransactionSummary, TransferDirection, TransferInfo,
};
pub use token::{TokenInfo, TokenKind};
pub use transaction::{
    Confirmation, DataDecoded, DataDecodedParameter, EthereumTransaction, HistoryRecord,
    IncomingTransfer, ModuleTransaction, MultisigTransaction, Operation, SafeCreation,
    TransferKind,
};
