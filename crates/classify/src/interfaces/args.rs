use clap::Parser;
use derive_builder::Builder;

use crate::interfaces::{MetaTransaction, Operation};

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Classify a transaction into a semantically meaningful intent",
    override_usage = "sift <TO> [OPTIONS]"
)]
/// Arguments for the classify operation
///
/// This struct contains the transaction fields to classify, plus the
/// configuration for the default collaborators (the RPC decimals lookup and
/// the Etherscan ABI lookup).
pub struct ClassifyArgs {
    /// The target address of the transaction.
    #[clap(required = true)]
    pub to: String,

    /// The amount of wei sent with the transaction, as a decimal or
    /// 0x-prefixed hex string.
    #[clap(long, default_value = "0")]
    pub value: String,

    /// The ABI-encoded calldata of the transaction.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub data: String,

    /// An opaque correlation token copied into the classified result.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub id: String,

    /// The RPC provider used for fetching token decimals.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Your Etherscan API key, used for fetching contract ABIs.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub etherscan_api_key: String,

    /// The chain ID used for ABI lookups.
    #[clap(long, short, default_value_t = 1)]
    pub chain_id: u64,

    /// Whether to skip the ABI lookup for unrecognized calldata.
    #[clap(long)]
    pub skip_abi_lookup: bool,
}

impl ClassifyArgs {
    /// The transaction described by these arguments.
    pub fn transaction(&self) -> MetaTransaction {
        MetaTransaction {
            to: self.to.clone(),
            value: self.value.clone(),
            data: self.data.clone(),
            operation: Operation::Call,
        }
    }
}

impl ClassifyArgsBuilder {
    /// Creates a new ClassifyArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            to: Some(String::new()),
            value: Some(String::from("0")),
            data: Some(String::new()),
            id: Some(String::new()),
            rpc_url: Some(String::new()),
            etherscan_api_key: Some(String::new()),
            chain_id: Some(1),
            skip_abi_lookup: Some(false),
        }
    }
}
