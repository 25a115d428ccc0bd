//! Decides what kind of transaction a raw record represents and what state it
//! is in.

pub mod classify;
pub mod direction;
pub mod facts;
pub mod params;
pub mod settings;
pub mod status;

pub use classify::{ClassifyError, TransactionClassifier};
pub use direction::transfer_direction;
pub use facts::TxFacts;
pub use settings::{settings_info, settings_method, SettingsMethod};
pub use status::resolve_status;
