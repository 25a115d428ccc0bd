//! Settings-change method recognition and argument decoding.

use alloy_primitives::Address;
use safegate_primitives::{
    AddressInfo, AddressInfoKind, AddressInfoResolver, DataDecoded, SettingsInfo,
};
use tracing::debug;

/// The closed set of calls that mutate a Safe's own configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsMethod {
    SetFallbackHandler,
    AddOwnerWithThreshold,
    RemoveOwner,
    SwapOwner,
    ChangeThreshold,
    ChangeMasterCopy,
    EnableModule,
    DisableModule,
    SetGuard,
}

pub fn settings_method(method: &str) -> Option<SettingsMethod> {
    match method {
        "setFallbackHandler" => Some(SettingsMethod::SetFallbackHandler),
        "addOwnerWithThreshold" => Some(SettingsMethod::AddOwnerWithThreshold),
        "removeOwner" => Some(SettingsMethod::RemoveOwner),
        "swapOwner" => Some(SettingsMethod::SwapOwner),
        "changeThreshold" => Some(SettingsMethod::ChangeThreshold),
        "changeMasterCopy" => Some(SettingsMethod::ChangeMasterCopy),
        "enableModule" => Some(SettingsMethod::EnableModule),
        "disableModule" => Some(SettingsMethod::DisableModule),
        "setGuard" => Some(SettingsMethod::SetGuard),
        _ => None,
    }
}

fn address_arg(decoded: &DataDecoded, name: &str) -> Option<Address> {
    decoded
        .parameter_named(name)?
        .value
        .as_str()?
        .parse()
        .ok()
}

fn u64_arg(decoded: &DataDecoded, name: &str) -> Option<u64> {
    let value = &decoded.parameter_named(name)?.value;
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Decodes the arguments of a settings-change call into a structured view.
///
/// Best-effort: malformed or missing arguments yield `None` rather than an
/// error, leaving clients with the raw `data_decoded` only.
pub async fn settings_info(
    chain_id: u64,
    method: SettingsMethod,
    decoded: &DataDecoded,
    addresses: &dyn AddressInfoResolver,
) -> Option<SettingsInfo> {
    let resolve = |address: Address| async move {
        addresses
            .resolve_address(chain_id, address, &[AddressInfoKind::Contract])
            .await
    };

    let info = match method {
        SettingsMethod::SetFallbackHandler => SettingsInfo::SetFallbackHandler {
            handler: resolve(address_arg(decoded, "handler")?).await,
        },
        SettingsMethod::AddOwnerWithThreshold => SettingsInfo::AddOwner {
            owner: AddressInfo::bare(address_arg(decoded, "owner")?),
            threshold: u64_arg(decoded, "_threshold")?,
        },
        SettingsMethod::RemoveOwner => SettingsInfo::RemoveOwner {
            owner: AddressInfo::bare(address_arg(decoded, "owner")?),
            threshold: u64_arg(decoded, "_threshold")?,
        },
        SettingsMethod::SwapOwner => SettingsInfo::SwapOwner {
            old_owner: AddressInfo::bare(address_arg(decoded, "oldOwner")?),
            new_owner: AddressInfo::bare(address_arg(decoded, "newOwner")?),
        },
        SettingsMethod::ChangeThreshold => SettingsInfo::ChangeThreshold {
            threshold: u64_arg(decoded, "_threshold")?,
        },
        SettingsMethod::ChangeMasterCopy => SettingsInfo::ChangeImplementation {
            implementation: resolve(address_arg(decoded, "_masterCopy")?).await,
        },
        SettingsMethod::EnableModule => SettingsInfo::EnableModule {
            module: resolve(address_arg(decoded, "module")?).await,
        },
        SettingsMethod::DisableModule => SettingsInfo::DisableModule {
            module: resolve(address_arg(decoded, "module")?).await,
        },
        SettingsMethod::SetGuard => SettingsInfo::SetGuard {
            guard: resolve(address_arg(decoded, "guard")?).await,
        },
    };

    Some(info)
}

/// Same as [`settings_info`] but logs when decoding comes up empty.
pub async fn settings_info_logged(
    chain_id: u64,
    method: SettingsMethod,
    decoded: &DataDecoded,
    addresses: &dyn AddressInfoResolver,
) -> Option<SettingsInfo> {
    let info = settings_info(chain_id, method, decoded, addresses).await;
    if info.is_none() {
        debug!(method = decoded.method, "could not decode settings arguments");
    }
    info
}
