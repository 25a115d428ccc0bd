//! The gateway pipeline: fetches raw Safe transaction records, classifies and
//! enriches them, and lays them out as queue and history timelines.

pub mod error;
pub mod ids;
pub mod pipeline;

pub use error::GatewayError;
pub use pipeline::Gateway;
