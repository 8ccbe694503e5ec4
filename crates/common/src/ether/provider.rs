//! Chain-state access needed while confirming a token transfer.

use alloy::{primitives::Address, providers::ProviderBuilder, sol};
use async_trait::async_trait;
use eyre::{eyre, Result};
use tracing::debug;

sol! {
    #[sol(rpc)]
    interface IERC20Metadata {
        function decimals() external view returns (uint8);
    }
}

/// Read-only chain state consumed by the classifier: the decimal places of a
/// token contract. The lookup may suspend on network I/O and may fail; the
/// failure is surfaced to the caller.
#[async_trait]
pub trait DecimalSource: Send + Sync {
    /// Returns the number of decimal places of the given token contract.
    async fn get_decimals(&self, token: &str) -> Result<u32>;
}

/// A [`DecimalSource`] backed by a JSON-RPC endpoint, calling `decimals()`
/// on the token contract.
#[derive(Debug, Clone)]
pub struct RpcDecimalSource {
    /// The RPC endpoint to query.
    pub rpc_url: String,
}

impl RpcDecimalSource {
    /// Creates a new source for the given RPC endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self { rpc_url: rpc_url.into() }
    }
}

#[async_trait]
impl DecimalSource for RpcDecimalSource {
    async fn get_decimals(&self, token: &str) -> Result<u32> {
        let address: Address =
            token.parse().map_err(|_| eyre!("invalid token address: {token}"))?;

        let provider = ProviderBuilder::new()
            .connect(&self.rpc_url)
            .await
            .map_err(|_| eyre!("failed to connect to provider '{}'", &self.rpc_url))?;

        let decimals = IERC20Metadata::new(address, provider).decimals().call().await?;
        debug!("token {} has {} decimals", token, decimals);

        Ok(decimals as u32)
    }
}
