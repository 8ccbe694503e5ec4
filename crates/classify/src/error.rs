#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The chain-state provider failed while confirming a detected token
    /// transfer. This is the only failure the pipeline surfaces: the
    /// classification is already committed and cannot be completed without
    /// the token's scale factor.
    #[error("Decimals lookup failed: {0}")]
    DecimalsLookup(String),
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
