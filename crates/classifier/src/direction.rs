use alloy_primitives::Address;
use safegate_primitives::TransferDirection;

/// Direction of a transfer relative to the Safe's point of view.
pub fn transfer_direction(safe: Address, from: Address, to: Address) -> TransferDirection {
    if safe == from {
        TransferDirection::Outgoing
    } else if safe == to {
        TransferDirection::Incoming
    } else {
        TransferDirection::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const SAFE: Address = address!("8675B754342754A30A2AeF474D114d8460bca19b");
    const OTHER: Address = address!("7a9af6Ef9197041A5841e84cB27873bEBd3486E2");
    const THIRD: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");

    #[test]
    fn outgoing_when_safe_is_sender() {
        assert_eq!(transfer_direction(SAFE, SAFE, OTHER), TransferDirection::Outgoing);
    }

    #[test]
    fn incoming_when_safe_is_recipient() {
        assert_eq!(transfer_direction(SAFE, OTHER, SAFE), TransferDirection::Incoming);
    }

    #[test]
    fn unknown_when_safe_is_neither() {
        assert_eq!(transfer_direction(SAFE, OTHER, THIRD), TransferDirection::Unknown);
    }

    #[test]
    fn sender_wins_on_self_transfer() {
        assert_eq!(transfer_direction(SAFE, SAFE, SAFE), TransferDirection::Outgoing);
    }
}
