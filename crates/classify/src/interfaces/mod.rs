mod args;
mod transaction;

pub use args::{ClassifyArgs, ClassifyArgsBuilder};
pub use transaction::{MetaTransaction, Operation, TransactionInput};
