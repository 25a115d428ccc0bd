use std::sync::Arc;

use alloy_dyn_abi::JsonAbiExt;
use alloy_primitives::Address;
use safegate_primitives::TokenResolver;
use tracing::debug;

use crate::registry::TemplateRegistry;

/// Renders optional human-readable sentences for raw calldata.
///
/// Holds no mutable state: the registry is parsed once at startup and shared
/// read-only.
pub struct HumanDescriptionEngine {
    registry: TemplateRegistry,
    tokens: Arc<dyn TokenResolver>,
}

impl HumanDescriptionEngine {
    pub fn new(registry: TemplateRegistry, tokens: Arc<dyn TokenResolver>) -> Self {
        Self { registry, tokens }
    }

    /// Describes `data` sent to `to`, or `None` when no template matches or
    /// anything about decoding/rendering fails. Failures are logged and never
    /// surface to the caller.
    pub async fn describe(&self, chain_id: u64, to: Address, data: &[u8]) -> Option<String> {
        let entry = self.registry.find(data)?;

        let args = match entry.function.abi_decode_input(&data[4..], true) {
            Ok(args) => args,
            Err(err) => {
                debug!(signature = entry.signature, %err, "calldata does not decode");
                return None;
            }
        };

        // Best-effort only: an unknown token still renders, with raw amounts.
        let token = self.tokens.resolve_token(chain_id, to).await.ok();

        let rendered = entry.template.render(&args, token.as_ref());
        if rendered.is_none() {
            debug!(signature = entry.signature, "template did not render");
        }
        rendered
    }
}
