//! Classifies an opaque transaction (recipient, value, raw calldata) into
//! one of a small set of semantically meaningful intents, so that wallets
//! and transaction-review tooling can render or re-encode it without
//! chain-specific knowledge.

pub mod error;

mod core;
mod interfaces;
mod utils;

// re-export the public interface
pub use core::{classify, classify_transaction};
pub use interfaces::{
    ClassifyArgs, ClassifyArgsBuilder, MetaTransaction, Operation, TransactionInput,
};
pub use utils::coerce::DEFAULT_NUMERIC_WIDTH;
