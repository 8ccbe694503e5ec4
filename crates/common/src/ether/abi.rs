//! Fetching contract interface descriptions (JSON ABIs) from external
//! services.

use crate::{constants::ETHERSCAN_SUPPORTED_CHAIN_IDS, utils::http::get_json_from_url};
use async_trait::async_trait;
use eyre::{eyre, Result};
use tracing::debug;

/// An optional collaborator that can look up the JSON ABI of a contract.
/// Implementations may use the calldata to narrow the lookup; the bundled
/// Etherscan source ignores it.
#[async_trait]
pub trait AbiSource: Send + Sync {
    /// Returns the JSON ABI for the given contract, or `None` when the
    /// service has no interface on file.
    async fn fetch_abi(&self, address: &str, calldata: &str) -> Result<Option<String>>;
}

/// Check if the chain ID is supported by the Etherscan V2 API
pub fn is_supported_chain(chain_id: u64) -> bool {
    ETHERSCAN_SUPPORTED_CHAIN_IDS.contains(&chain_id)
}

/// An [`AbiSource`] backed by the unified Etherscan V2 API.
#[derive(Debug, Clone)]
pub struct EtherscanAbiSource {
    /// The chain to look contracts up on.
    pub chain_id: u64,
    /// The Etherscan API key. May be empty, at the cost of rate limits.
    pub api_key: String,
}

impl EtherscanAbiSource {
    /// Creates a new source for the given chain.
    pub fn new(chain_id: u64, api_key: impl Into<String>) -> Self {
        Self { chain_id, api_key: api_key.into() }
    }
}

#[async_trait]
impl AbiSource for EtherscanAbiSource {
    async fn fetch_abi(&self, address: &str, _calldata: &str) -> Result<Option<String>> {
        if !is_supported_chain(self.chain_id) {
            return Err(eyre!("etherscan API not supported for chain ID {}", self.chain_id));
        }

        let url = format!(
            "https://api.etherscan.io/v2/api?chainid={}&module=contract&action=getabi&address={}&apikey={}",
            self.chain_id, address, self.api_key
        );

        let response = match get_json_from_url(&url, 10).await? {
            Some(response) => response,
            None => return Ok(None),
        };

        // a status other than "1" means the contract is not verified
        if response.get("status").and_then(|status| status.as_str()) != Some("1") {
            debug!("no verified ABI on file for {}", address);
            return Ok(None);
        }

        Ok(response.get("result").and_then(|result| result.as_str()).map(|abi| abi.to_string()))
    }
}
