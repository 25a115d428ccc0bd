use crate::error::ServiceError;

pub mod urls {
    pub mod mainnet {
        pub const CHAIN_ID: u64 = 1;

        pub const TRANSACTION_SERVICE_URL: &str =
            "https://safe-transaction-mainnet.safe.global/api";
    }

    pub mod sepolia {
        pub const CHAIN_ID: u64 = 11155111;

        pub const TRANSACTION_SERVICE_URL: &str =
            "https://safe-transaction-sepolia.safe.global/api";
    }

    pub mod gnosis_chain {
        pub const CHAIN_ID: u64 = 100;

        pub const TRANSACTION_SERVICE_URL: &str =
            "https://safe-transaction-gnosis-chain.safe.global/api";
    }
}

pub fn transaction_service_url(chain_id: u64) -> Result<&'static str, ServiceError> {
    match chain_id {
        urls::mainnet::CHAIN_ID => Ok(urls::mainnet::TRANSACTION_SERVICE_URL),
        urls::sepolia::CHAIN_ID => Ok(urls::sepolia::TRANSACTION_SERVICE_URL),
        urls::gnosis_chain::CHAIN_ID => Ok(urls::gnosis_chain::TRANSACTION_SERVICE_URL),
        _ => Err(ServiceError::UnsupportedChain(chain_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chains_have_a_service() {
        assert_eq!(
            transaction_service_url(1).unwrap(),
            "https://safe-transaction-mainnet.safe.global/api"
        );
        assert_eq!(
            transaction_service_url(11155111).unwrap(),
            "https://safe-transaction-sepolia.safe.global/api"
        );
    }

    #[test]
    fn unknown_chain_is_rejected() {
        assert!(matches!(
            transaction_service_url(42),
            Err(ServiceError::UnsupportedChain(42))
        ));
    }
}
