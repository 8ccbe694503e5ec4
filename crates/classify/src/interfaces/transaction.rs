use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a transaction is executed by the account carrying it out. Not
/// consulted during classification; carried through for re-encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Operation {
    /// A regular message call.
    #[default]
    Call,
    /// A call executed in the caller's own storage context.
    DelegateCall,
}

impl From<Operation> for u8 {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Call => 0,
            Operation::DelegateCall => 1,
        }
    }
}

impl TryFrom<u8> for Operation {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Operation::Call),
            1 => Ok(Operation::DelegateCall),
            _ => Err(format!("invalid operation: {value}")),
        }
    }
}

/// A transaction to classify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTransaction {
    /// The recipient address.
    pub to: String,
    /// The amount of wei sent along, as a decimal or 0x-prefixed hex string.
    #[serde(default)]
    pub value: String,
    /// The ABI-encoded calldata as a hex string; empty for plain transfers.
    /// When present, the first 4 bytes are the function selector.
    #[serde(default)]
    pub data: String,
    /// How the transaction is executed.
    #[serde(default)]
    pub operation: Operation,
}

/// The classified form of a transaction. Exactly one variant is produced per
/// call; the variants are mutually exclusive by construction of the decode
/// pipeline, and every variant carries the caller-supplied `id` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransactionInput {
    /// A native-coin or fungible-token transfer.
    #[serde(rename_all = "camelCase")]
    TransferFunds {
        /// Caller-supplied correlation token.
        id: String,
        /// The token contract address; `None` denotes the native coin.
        token: Option<String>,
        /// The recipient of the transfer.
        to: String,
        /// The amount, scaled by `decimals` (e.g. `"1.0"` for one coin).
        amount: String,
        /// Decimal places of the transferred token.
        decimals: u32,
    },

    /// A non-fungible-token ownership transfer.
    #[serde(rename_all = "camelCase")]
    TransferCollectible {
        /// Caller-supplied correlation token.
        id: String,
        /// The collectible contract address.
        address: String,
        /// The identifier of the transferred token, as a decimal string.
        token_id: String,
        /// The new owner.
        to: String,
        /// The previous owner.
        from: String,
    },

    /// A contract call decoded against a fetched interface description.
    #[serde(rename_all = "camelCase")]
    CallContract {
        /// Caller-supplied correlation token.
        id: String,
        /// The contract address.
        to: String,
        /// The amount of wei sent along, as a decimal string.
        value: String,
        /// The interface description the call was decoded against, verbatim.
        abi: String,
        /// The canonical signature of the matched function.
        function_signature: String,
        /// Decoded arguments, keyed by parameter name or positional index.
        input_values: Map<String, Value>,
    },

    /// A call that could not be decoded. The calldata is passed through
    /// untouched.
    #[serde(rename_all = "camelCase")]
    Raw {
        /// Caller-supplied correlation token.
        id: String,
        /// The target address.
        to: String,
        /// The amount of wei sent along, as a decimal string.
        value: String,
        /// The original calldata hex string.
        data: String,
    },
}
