use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Best-effort display metadata for an address.
///
/// Lookups that fail degrade to a bare record carrying only the address
/// itself, so this type is always constructible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    pub value: Address,
    pub name: Option<String>,
    pub logo_uri: Option<String>,
}

impl AddressInfo {
    pub fn new(value: Address, name: Option<String>, logo_uri: Option<String>) -> Self {
        Self {
            value,
            name,
            logo_uri,
        }
    }

    /// The fallback used whenever metadata resolution fails.
    pub fn bare(value: Address) -> Self {
        Self {
            value,
            name: None,
            logo_uri: None,
        }
    }
}

impl From<Address> for AddressInfo {
    fn from(value: Address) -> Self {
        Self::bare(value)
    }
}
