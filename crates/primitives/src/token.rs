use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Token standard as declared by the transaction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "NATIVE_TOKEN")]
    Native,
    #[serde(rename = "ERC20")]
    Erc20,
    #[serde(rename = "ERC721")]
    Erc721,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: Address,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub name: String,
    pub symbol: String,
    /// ERC-721 tokens report no decimals.
    pub decimals: Option<u8>,
    pub logo_uri: Option<String>,
}
