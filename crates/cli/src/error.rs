#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
