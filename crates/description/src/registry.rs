//! Signature → template registry.
//!
//! Built once at startup and injected read-only into the engine. Iteration
//! order is insertion order and the first matching selector wins.

use alloy_json_abi::Function;
use alloy_primitives::Selector;

use crate::template::{DescriptionError, Template};

#[derive(Debug, Clone)]
pub struct TemplateEntry {
    pub signature: String,
    pub function: Function,
    pub selector: Selector,
    pub template: Template,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: Vec<TemplateEntry>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in ERC-20/ERC-721 transfer and allowance templates.
    pub fn standard() -> Result<Self, DescriptionError> {
        let mut registry = Self::new();
        registry.register(
            "transfer(address,uint256)",
            "Send {{tokenValue 1}} to {{address 0}}",
        )?;
        registry.register(
            "transferFrom(address,address,uint256)",
            "Send {{tokenValue 2}} from {{address 0}} to {{address 1}}",
        )?;
        registry.register(
            "safeTransferFrom(address,address,uint256)",
            "Send {{tokenValue 2}} from {{address 0}} to {{address 1}}",
        )?;
        registry.register(
            "approve(address,uint256)",
            "Approve {{tokenValue 1}} for {{address 0}}",
        )?;
        registry.register(
            "increaseAllowance(address,uint256)",
            "Increase allowance by {{tokenValue 1}} for {{address 0}}",
        )?;
        registry.register(
            "decreaseAllowance(address,uint256)",
            "Decrease allowance by {{tokenValue 1}} for {{address 0}}",
        )?;
        Ok(registry)
    }

    pub fn register(&mut self, signature: &str, template: &str) -> Result<(), DescriptionError> {
        let function = Function::parse(signature)
            .map_err(|e| DescriptionError::InvalidSignature(e.to_string()))?;
        let template = Template::parse(template)?;
        self.entries.push(TemplateEntry {
            signature: signature.to_string(),
            selector: function.selector(),
            function,
            template,
        });
        Ok(())
    }

    /// First registered entry whose 4-byte selector prefixes `data`.
    pub fn find(&self, data: &[u8]) -> Option<&TemplateEntry> {
        if data.len() < 4 {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.selector.as_slice() == &data[..4])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
