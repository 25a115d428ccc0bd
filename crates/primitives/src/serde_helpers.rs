//! Serde adapters for the transaction service wire format.
//!
//! The service serializes `uint256` quantities as decimal strings, not the
//! `0x`-prefixed hex that `U256` uses by default.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serializer};

pub mod dec_str {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<U256>().map_err(serde::de::Error::custom)
    }
}

pub mod dec_str_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<U256>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&value.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(raw) => raw
                .parse::<U256>()
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
