//! The central classification decision: which transaction-info variant a raw
//! record maps to.

use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use safegate_primitives::{
    AddressInfo, AddressInfoKind, AddressInfoResolver, DataDecoded, Operation, TokenKind,
    TokenResolver, TransactionInfo, TransferInfo,
};
use thiserror::Error;
use tracing::debug;

use crate::direction::transfer_direction;
use crate::facts::TxFacts;
use crate::params;
use crate::settings::{settings_info_logged, settings_method};

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A settings change must carry decoded call data; its absence indicates
    /// an upstream data inconsistency.
    #[error("settings change without decoded data (safe_tx_hash: {safe_tx_hash:?})")]
    MissingDecodedData { safe_tx_hash: Option<B256> },
}

const METADATA_PREFERENCE: &[AddressInfoKind] = &[AddressInfoKind::Token, AddressInfoKind::Contract];

pub struct TransactionClassifier {
    addresses: Arc<dyn AddressInfoResolver>,
    tokens: Arc<dyn TokenResolver>,
}

impl TransactionClassifier {
    pub fn new(addresses: Arc<dyn AddressInfoResolver>, tokens: Arc<dyn TokenResolver>) -> Self {
        Self { addresses, tokens }
    }

    /// Maps a raw record to exactly one [`TransactionInfo`] variant.
    ///
    /// Branches are evaluated in a fixed priority because several predicates
    /// can hold at once: a value-carrying call with data (or any delegate
    /// call) is always Custom, then native-coin transfer, then settings
    /// change, then token transfer, then the Custom fallback.
    pub async fn classify(&self, facts: &TxFacts<'_>) -> Result<TransactionInfo, ClassifyError> {
        let data_size = facts.data_size();

        if (facts.value > U256::ZERO && data_size > 0) || facts.operation != Operation::Call {
            return Ok(self.custom(facts, data_size).await);
        }

        if facts.value > U256::ZERO && data_size == 0 {
            return Ok(self.native_coin_transfer(facts).await);
        }

        if facts.value.is_zero()
            && data_size > 0
            && facts.to == facts.safe
            && is_settings_change(facts.data_decoded)
        {
            return self.settings_change(facts).await;
        }

        if let Some(decoded) = facts.data_decoded {
            if params::is_transfer_method(&decoded.method) && safe_is_party(facts.safe, decoded) {
                if let Some(info) = self.token_transfer(facts, decoded).await {
                    return Ok(info);
                }
            }
        }

        Ok(self.custom(facts, data_size).await)
    }

    async fn custom(&self, facts: &TxFacts<'_>, data_size: u64) -> TransactionInfo {
        let to = self
            .addresses
            .resolve_address(facts.chain_id, facts.to, METADATA_PREFERENCE)
            .await;

        TransactionInfo::Custom {
            to,
            data_size,
            value: facts.value,
            method_name: facts.method().map(str::to_string),
            action_count: facts.data_decoded.and_then(multi_send_action_count),
            is_cancellation: facts.is_cancellation(),
            human_description: None,
        }
    }

    async fn native_coin_transfer(&self, facts: &TxFacts<'_>) -> TransactionInfo {
        let recipient = self
            .addresses
            .resolve_address(facts.chain_id, facts.to, METADATA_PREFERENCE)
            .await;

        TransactionInfo::Transfer {
            sender: AddressInfo::bare(facts.safe),
            recipient,
            direction: transfer_direction(facts.safe, facts.safe, facts.to),
            transfer_info: TransferInfo::NativeCoin { value: facts.value },
            human_description: None,
        }
    }

    async fn settings_change(
        &self,
        facts: &TxFacts<'_>,
    ) -> Result<TransactionInfo, ClassifyError> {
        let decoded = facts
            .data_decoded
            .ok_or(ClassifyError::MissingDecodedData {
                safe_tx_hash: facts.safe_tx_hash,
            })?;

        let settings_info = match settings_method(&decoded.method) {
            Some(method) => {
                settings_info_logged(facts.chain_id, method, decoded, self.addresses.as_ref())
                    .await
            }
            None => None,
        };

        Ok(TransactionInfo::SettingsChange {
            data_decoded: decoded.clone(),
            settings_info,
            human_description: None,
        })
    }

    /// Builds an ERC-20/ERC-721 transfer, or `None` to fall through to Custom
    /// when the target is not a known token (or an unexpected kind).
    async fn token_transfer(
        &self,
        facts: &TxFacts<'_>,
        decoded: &DataDecoded,
    ) -> Option<TransactionInfo> {
        let token = match self.tokens.resolve_token(facts.chain_id, facts.to).await {
            Ok(token) => token,
            Err(err) => {
                debug!(to = %facts.to, %err, "target is not a known token");
                return None;
            }
        };

        let safe_address = facts.safe.to_string();
        let from = parse_address(&params::from_param(decoded, &safe_address));
        let to = parse_address(&params::to_param(decoded, ""));
        let value = params::value_param(decoded, "0");

        let transfer_info = match token.kind {
            TokenKind::Erc20 => TransferInfo::Erc20 {
                token_address: token.address,
                token_name: Some(token.name),
                token_symbol: Some(token.symbol),
                decimals: token.decimals,
                logo_uri: token.logo_uri,
                value: value.parse().unwrap_or(U256::ZERO),
            },
            TokenKind::Erc721 => TransferInfo::Erc721 {
                token_address: token.address,
                token_name: Some(token.name),
                token_symbol: Some(token.symbol),
                logo_uri: token.logo_uri,
                token_id: value,
            },
            TokenKind::Native => {
                debug!(to = %facts.to, "unexpected token kind for a token transfer");
                return None;
            }
        };

        let sender = self
            .addresses
            .resolve_address(facts.chain_id, from, METADATA_PREFERENCE)
            .await;
        let recipient = self
            .addresses
            .resolve_address(facts.chain_id, to, METADATA_PREFERENCE)
            .await;

        Some(TransactionInfo::Transfer {
            sender,
            recipient,
            direction: transfer_direction(facts.safe, from, to),
            transfer_info,
            human_description: None,
        })
    }
}

fn is_settings_change(decoded: Option<&DataDecoded>) -> bool {
    decoded.is_some_and(|decoded| settings_method(&decoded.method).is_some())
}

/// The Safe has to be a transacting party: a plain `transfer` always spends
/// from the Safe, while `transferFrom`/`safeTransferFrom` must name it.
fn safe_is_party(safe: Address, decoded: &DataDecoded) -> bool {
    if decoded.method == "transfer" {
        return true;
    }
    parse_address(&params::from_param(decoded, "")) == safe
        || parse_address(&params::to_param(decoded, "")) == safe
}

fn parse_address(raw: &str) -> Address {
    raw.parse().unwrap_or(Address::ZERO)
}

fn multi_send_action_count(decoded: &DataDecoded) -> Option<u64> {
    if decoded.method != "multiSend" {
        return None;
    }
    decoded
        .parameter_named("transactions")?
        .value_decoded
        .as_ref()?
        .as_array()
        .map(|actions| actions.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes};
    use safegate_primitives::resolve::{MockAddressInfoResolver, MockTokenResolver};
    use safegate_primitives::{
        DataDecodedParameter, ResolveError, SettingsInfo, TokenInfo, TransferDirection,
    };
    use serde_json::json;

    const SAFE: Address = address!("8675B754342754A30A2AeF474D114d8460bca19b");
    const TOKEN: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
    const RECIPIENT: Address = address!("7a9af6Ef9197041A5841e84cB27873bEBd3486E2");

    fn bare_addresses() -> Arc<dyn AddressInfoResolver> {
        let mut resolver = MockAddressInfoResolver::new();
        resolver
            .expect_resolve_address()
            .returning(|_, address, _| AddressInfo::bare(address));
        Arc::new(resolver)
    }

    fn no_tokens() -> Arc<dyn TokenResolver> {
        let mut resolver = MockTokenResolver::new();
        resolver
            .expect_resolve_token()
            .returning(|_, _| Err(ResolveError::NotFound));
        Arc::new(resolver)
    }

    fn token_of_kind(kind: TokenKind) -> Arc<dyn TokenResolver> {
        let mut resolver = MockTokenResolver::new();
        resolver.expect_resolve_token().returning(move |_, address| {
            Ok(TokenInfo {
                address,
                kind,
                name: "Test Token".to_string(),
                symbol: "TST".to_string(),
                decimals: (kind == TokenKind::Erc20).then_some(18),
                logo_uri: None,
            })
        });
        Arc::new(resolver)
    }

    fn facts<'a>(
        to: Address,
        value: U256,
        data: Option<&'a Bytes>,
        operation: Operation,
        decoded: Option<&'a DataDecoded>,
    ) -> TxFacts<'a> {
        TxFacts {
            chain_id: 1,
            safe: SAFE,
            to,
            value,
            data,
            operation,
            data_decoded: decoded,
            safe_tx_gas: Some(0),
            base_gas: Some(0),
            gas_price: Some(U256::ZERO),
            gas_token: None,
            refund_receiver: None,
            safe_tx_hash: Some(B256::ZERO),
            is_multisig: true,
        }
    }

    fn transfer_decoded(to: Address, value: &str) -> DataDecoded {
        DataDecoded {
            method: "transfer".to_string(),
            parameters: Some(vec![
                DataDecodedParameter {
                    name: "to".to_string(),
                    param_type: "address".to_string(),
                    value: json!(to.to_string()),
                    value_decoded: None,
                },
                DataDecodedParameter {
                    name: "value".to_string(),
                    param_type: "uint256".to_string(),
                    value: json!(value),
                    value_decoded: None,
                },
            ]),
        }
    }

    #[tokio::test]
    async fn value_and_data_together_force_custom() {
        let classifier = TransactionClassifier::new(bare_addresses(), token_of_kind(TokenKind::Erc20));
        let data = Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]);
        let decoded = transfer_decoded(RECIPIENT, "1000");

        // Decoded as a token transfer, but the non-zero value wins.
        let f = facts(TOKEN, U256::from(1), Some(&data), Operation::Call, Some(&decoded));
        match classifier.classify(&f).await.unwrap() {
            TransactionInfo::Custom {
                data_size,
                method_name,
                is_cancellation,
                ..
            } => {
                assert_eq!(data_size, 4);
                assert_eq!(method_name.as_deref(), Some("transfer"));
                assert!(!is_cancellation);
            }
            other => panic!("expected custom, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delegate_call_forces_custom() {
        let classifier = TransactionClassifier::new(bare_addresses(), no_tokens());
        let f = facts(RECIPIENT, U256::ZERO, None, Operation::DelegateCall, None);
        assert!(matches!(
            classifier.classify(&f).await.unwrap(),
            TransactionInfo::Custom { data_size: 0, .. }
        ));
    }

    #[tokio::test]
    async fn plain_value_send_is_native_coin_transfer() {
        let classifier = TransactionClassifier::new(bare_addresses(), no_tokens());
        let f = facts(RECIPIENT, U256::from(5), None, Operation::Call, None);
        match classifier.classify(&f).await.unwrap() {
            TransactionInfo::Transfer {
                sender,
                recipient,
                direction,
                transfer_info: TransferInfo::NativeCoin { value },
                ..
            } => {
                assert_eq!(sender.value, SAFE);
                assert_eq!(recipient.value, RECIPIENT);
                assert_eq!(direction, TransferDirection::Outgoing);
                assert_eq!(value, U256::from(5));
            }
            other => panic!("expected native transfer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn self_call_with_settings_method_is_settings_change() {
        let classifier = TransactionClassifier::new(bare_addresses(), no_tokens());
        let data = Bytes::from(vec![0x69, 0x4e, 0x80, 0xc3]);
        let decoded = DataDecoded {
            method: "changeThreshold".to_string(),
            parameters: Some(vec![DataDecodedParameter {
                name: "_threshold".to_string(),
                param_type: "uint256".to_string(),
                value: json!("2"),
                value_decoded: None,
            }]),
        };

        let f = facts(SAFE, U256::ZERO, Some(&data), Operation::Call, Some(&decoded));
        match classifier.classify(&f).await.unwrap() {
            TransactionInfo::SettingsChange {
                data_decoded,
                settings_info,
                ..
            } => {
                assert_eq!(data_decoded.method, "changeThreshold");
                assert_eq!(settings_info, Some(SettingsInfo::ChangeThreshold { threshold: 2 }));
            }
            other => panic!("expected settings change, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn settings_method_on_foreign_contract_is_not_settings_change() {
        let classifier = TransactionClassifier::new(bare_addresses(), no_tokens());
        let data = Bytes::from(vec![0x69, 0x4e, 0x80, 0xc3]);
        let decoded = DataDecoded {
            method: "changeThreshold".to_string(),
            parameters: None,
        };

        let f = facts(RECIPIENT, U256::ZERO, Some(&data), Operation::Call, Some(&decoded));
        assert!(matches!(
            classifier.classify(&f).await.unwrap(),
            TransactionInfo::Custom { .. }
        ));
    }

    #[tokio::test]
    async fn erc20_transfer_classifies_with_token_metadata() {
        let classifier = TransactionClassifier::new(bare_addresses(), token_of_kind(TokenKind::Erc20));
        let data = Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]);
        let decoded = transfer_decoded(RECIPIENT, "1000");

        let f = facts(TOKEN, U256::ZERO, Some(&data), Operation::Call, Some(&decoded));
        match classifier.classify(&f).await.unwrap() {
            TransactionInfo::Transfer {
                sender,
                recipient,
                direction,
                transfer_info:
                    TransferInfo::Erc20 {
                        token_address,
                        token_symbol,
                        decimals,
                        value,
                        ..
                    },
                ..
            } => {
                assert_eq!(sender.value, SAFE);
                assert_eq!(recipient.value, RECIPIENT);
                assert_eq!(direction, TransferDirection::Outgoing);
                assert_eq!(token_address, TOKEN);
                assert_eq!(token_symbol.as_deref(), Some("TST"));
                assert_eq!(decimals, Some(18));
                assert_eq!(value, U256::from(1000));
            }
            other => panic!("expected erc20 transfer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn erc721_transfer_carries_token_id() {
        let classifier = TransactionClassifier::new(bare_addresses(), token_of_kind(TokenKind::Erc721));
        let data = Bytes::from(vec![0x42, 0x84, 0x2e, 0x0e]);
        let decoded = DataDecoded {
            method: "safeTransferFrom".to_string(),
            parameters: Some(vec![
                DataDecodedParameter {
                    name: "from".to_string(),
                    param_type: "address".to_string(),
                    value: json!(SAFE.to_string()),
                    value_decoded: None,
                },
                DataDecodedParameter {
                    name: "to".to_string(),
                    param_type: "address".to_string(),
                    value: json!(RECIPIENT.to_string()),
                    value_decoded: None,
                },
                DataDecodedParameter {
                    name: "tokenId".to_string(),
                    param_type: "uint256".to_string(),
                    value: json!("77"),
                    value_decoded: None,
                },
            ]),
        };

        let f = facts(TOKEN, U256::ZERO, Some(&data), Operation::Call, Some(&decoded));
        match classifier.classify(&f).await.unwrap() {
            TransactionInfo::Transfer {
                direction,
                transfer_info: TransferInfo::Erc721 { token_id, .. },
                ..
            } => {
                assert_eq!(direction, TransferDirection::Outgoing);
                assert_eq!(token_id, "77");
            }
            other => panic!("expected erc721 transfer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transfer_from_between_third_parties_is_custom() {
        let classifier = TransactionClassifier::new(bare_addresses(), token_of_kind(TokenKind::Erc20));
        let data = Bytes::from(vec![0x23, 0xb8, 0x72, 0xdd]);
        let decoded = DataDecoded {
            method: "transferFrom".to_string(),
            parameters: Some(vec![
                DataDecodedParameter {
                    name: "from".to_string(),
                    param_type: "address".to_string(),
                    value: json!(RECIPIENT.to_string()),
                    value_decoded: None,
                },
                DataDecodedParameter {
                    name: "to".to_string(),
                    param_type: "address".to_string(),
                    value: json!(RECIPIENT.to_string()),
                    value_decoded: None,
                },
                DataDecodedParameter {
                    name: "value".to_string(),
                    param_type: "uint256".to_string(),
                    value: json!("10"),
                    value_decoded: None,
                },
            ]),
        };

        // The Safe is neither sender nor recipient, so the transfer branch
        // is not taken at all.
        let f = facts(TOKEN, U256::ZERO, Some(&data), Operation::Call, Some(&decoded));
        assert!(matches!(
            classifier.classify(&f).await.unwrap(),
            TransactionInfo::Custom { .. }
        ));
    }

    #[tokio::test]
    async fn unknown_token_falls_through_to_custom() {
        let classifier = TransactionClassifier::new(bare_addresses(), no_tokens());
        let data = Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]);
        let decoded = transfer_decoded(RECIPIENT, "1000");

        let f = facts(TOKEN, U256::ZERO, Some(&data), Operation::Call, Some(&decoded));
        match classifier.classify(&f).await.unwrap() {
            TransactionInfo::Custom { method_name, .. } => {
                assert_eq!(method_name.as_deref(), Some("transfer"));
            }
            other => panic!("expected custom fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn native_token_kind_falls_through_to_custom() {
        let classifier = TransactionClassifier::new(bare_addresses(), token_of_kind(TokenKind::Native));
        let data = Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]);
        let decoded = transfer_decoded(RECIPIENT, "1000");

        let f = facts(TOKEN, U256::ZERO, Some(&data), Operation::Call, Some(&decoded));
        assert!(matches!(
            classifier.classify(&f).await.unwrap(),
            TransactionInfo::Custom { .. }
        ));
    }

    #[tokio::test]
    async fn multi_send_reports_action_count() {
        let classifier = TransactionClassifier::new(bare_addresses(), no_tokens());
        let data = Bytes::from(vec![0x8d, 0x80, 0xff, 0x0a]);
        let decoded = DataDecoded {
            method: "multiSend".to_string(),
            parameters: Some(vec![DataDecodedParameter {
                name: "transactions".to_string(),
                param_type: "bytes".to_string(),
                value: json!("0xdeadbeef"),
                value_decoded: Some(json!([{"to": "0x1"}, {"to": "0x2"}, {"to": "0x3"}])),
            }]),
        };

        let f = facts(RECIPIENT, U256::from(1), Some(&data), Operation::DelegateCall, Some(&decoded));
        match classifier.classify(&f).await.unwrap() {
            TransactionInfo::Custom { action_count, .. } => {
                assert_eq!(action_count, Some(3));
            }
            other => panic!("expected custom, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejection_is_flagged_as_cancellation() {
        let classifier = TransactionClassifier::new(bare_addresses(), no_tokens());
        let f = facts(SAFE, U256::ZERO, None, Operation::Call, None);
        match classifier.classify(&f).await.unwrap() {
            TransactionInfo::Custom {
                is_cancellation,
                data_size,
                method_name,
                ..
            } => {
                assert!(is_cancellation);
                assert_eq!(data_size, 0);
                assert_eq!(method_name, None);
            }
            other => panic!("expected custom, got {other:?}"),
        }
    }
}
