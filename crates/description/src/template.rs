//! The `{{type index}}` mini-templating syntax.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::hex;
use regex::Regex;
use safegate_primitives::TokenInfo;
use thiserror::Error;

use crate::amount::{format_token_amount, shorten_address};

#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("invalid function signature: {0}")]
    InvalidSignature(String),
    #[error("unknown template fragment type: {0}")]
    UnknownFragment(String),
    #[error("invalid template: {0}")]
    InvalidTemplate(String),
}

/// One token of a parsed template: either a literal word or a typed
/// placeholder referencing a decoded argument by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    TokenValue(usize),
    Address(usize),
    Identifier(usize),
    Decimals(usize),
    Word(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    fragments: Vec<Fragment>,
}

impl Template {
    /// Tokenizes a template like `"Send {{tokenValue 1}} to {{address 0}}"`.
    ///
    /// A single regex alternates between double-brace placeholders and bare
    /// words; anything else between tokens is whitespace and dropped.
    pub fn parse(raw: &str) -> Result<Self, DescriptionError> {
        let tokenizer = Regex::new(r"\{\{(\w+)\s+(\d+)\}\}|(\S+)")
            .map_err(|e| DescriptionError::InvalidTemplate(e.to_string()))?;

        let mut fragments = Vec::new();
        for capture in tokenizer.captures_iter(raw) {
            if let Some(word) = capture.get(3) {
                fragments.push(Fragment::Text(word.as_str().to_string()));
                continue;
            }

            let kind = &capture[1];
            let index: usize = capture[2]
                .parse()
                .map_err(|_| DescriptionError::InvalidTemplate(raw.to_string()))?;
            let fragment = match kind {
                "tokenValue" => Fragment::TokenValue(index),
                "address" => Fragment::Address(index),
                "identifier" => Fragment::Identifier(index),
                "decimals" => Fragment::Decimals(index),
                "word" => Fragment::Word(index),
                other => return Err(DescriptionError::UnknownFragment(other.to_string())),
            };
            fragments.push(fragment);
        }

        if fragments.is_empty() {
            return Err(DescriptionError::InvalidTemplate(raw.to_string()));
        }

        Ok(Self { fragments })
    }

    /// Renders the template against decoded arguments, joining fragments with
    /// single spaces. `None` when any referenced argument is missing or of an
    /// unexpected shape.
    pub fn render(&self, args: &[DynSolValue], token: Option<&TokenInfo>) -> Option<String> {
        let mut words = Vec::with_capacity(self.fragments.len());
        for fragment in &self.fragments {
            let word = match fragment {
                Fragment::Text(text) => text.clone(),
                Fragment::TokenValue(index) => match args.get(*index)? {
                    DynSolValue::Uint(value, _) => format_token_amount(*value, token),
                    _ => return None,
                },
                Fragment::Address(index) => match args.get(*index)? {
                    DynSolValue::Address(address) => shorten_address(*address),
                    _ => return None,
                },
                Fragment::Identifier(index) | Fragment::Decimals(index) | Fragment::Word(index) => {
                    render_plain(args.get(*index)?)?
                }
            };
            words.push(word);
        }
        Some(words.join(" "))
    }
}

fn render_plain(value: &DynSolValue) -> Option<String> {
    match value {
        DynSolValue::Address(address) => Some(address.to_checksum(None)),
        DynSolValue::Uint(value, _) => Some(value.to_string()),
        DynSolValue::Int(value, _) => Some(value.to_string()),
        DynSolValue::Bool(value) => Some(value.to_string()),
        DynSolValue::String(value) => Some(value.clone()),
        DynSolValue::Bytes(value) => Some(hex::encode_prefixed(value)),
        DynSolValue::FixedBytes(value, size) => Some(hex::encode_prefixed(&value[..*size])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};

    #[test]
    fn tokenizes_words_and_placeholders() {
        let template = Template::parse("Send {{tokenValue 1}} to {{address 0}}").unwrap();
        assert_eq!(
            template.fragments,
            vec![
                Fragment::Text("Send".to_string()),
                Fragment::TokenValue(1),
                Fragment::Text("to".to_string()),
                Fragment::Address(0),
            ]
        );
    }

    #[test]
    fn rejects_unknown_placeholder_type() {
        let err = Template::parse("{{amount 0}}").unwrap_err();
        assert!(matches!(err, DescriptionError::UnknownFragment(kind) if kind == "amount"));
    }

    #[test]
    fn rejects_empty_template() {
        assert!(Template::parse("   ").is_err());
    }

    #[test]
    fn renders_plain_fragments() {
        let template = Template::parse("Vote {{word 0}} on {{identifier 1}}").unwrap();
        let rendered = template
            .render(
                &[
                    DynSolValue::Bool(true),
                    DynSolValue::Uint(U256::from(12), 256),
                ],
                None,
            )
            .unwrap();
        assert_eq!(rendered, "Vote true on 12");
    }

    #[test]
    fn render_fails_on_argument_shape_mismatch() {
        let template = Template::parse("Send {{tokenValue 1}} to {{address 0}}").unwrap();
        // Argument 0 is not an address, so the address fragment cannot render.
        let rendered = template.render(
            &[
                DynSolValue::Uint(U256::from(1), 256),
                DynSolValue::Uint(U256::from(2), 256),
            ],
            None,
        );
        assert_eq!(rendered, None);
    }

    #[test]
    fn render_fails_on_missing_argument() {
        let template = Template::parse("Send {{tokenValue 1}}").unwrap();
        assert_eq!(template.render(&[], None), None);
    }

    #[test]
    fn shortened_address_has_ellipsis_form() {
        let template = Template::parse("{{address 0}}").unwrap();
        let rendered = template
            .render(
                &[DynSolValue::Address(address!(
                    "7a9af6Ef9197041A5841e84cB27873bEBd3486E2"
                ))],
                None,
            )
            .unwrap();
        assert!(rendered.starts_with("0x7a9a"));
        assert!(rendered.contains("..."));
        assert_eq!(rendered.len(), 6 + 3 + 4);
    }
}
