//! Token amount and address formatting for rendered descriptions.

use alloy_primitives::{Address, U256};
use safegate_primitives::TokenInfo;

/// Approval-without-limit convention: max-uint256 reads as "unlimited".
pub const UNLIMITED: &str = "unlimited";

/// Scales `value` down by `decimals`, trimming trailing fractional zeros.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let base = U256::from(10).pow(U256::from(decimals));
    let (integer, remainder) = value.div_rem(base);
    if remainder.is_zero() {
        return integer.to_string();
    }

    let fraction = format!("{remainder:0>width$}", width = decimals as usize);
    format!("{integer}.{}", fraction.trim_end_matches('0'))
}

/// Renders an amount the way a user would read it: scaled by the token's
/// decimals and suffixed with its symbol when the token is known, the raw
/// integer otherwise.
pub fn format_token_amount(value: U256, token: Option<&TokenInfo>) -> String {
    let amount = if value == U256::MAX {
        UNLIMITED.to_string()
    } else {
        match token.and_then(|t| t.decimals) {
            Some(decimals) => format_units(value, decimals),
            None => value.to_string(),
        }
    };

    match token {
        Some(token) => format!("{amount} {}", token.symbol),
        None => amount,
    }
}

/// First 6 + last 4 characters of the checksummed form, joined by an
/// ellipsis: `0x7a9a...86E2`.
pub fn shorten_address(address: Address) -> String {
    let checksummed = address.to_checksum(None);
    format!(
        "{}...{}",
        &checksummed[..6],
        &checksummed[checksummed.len() - 4..]
    )
}
