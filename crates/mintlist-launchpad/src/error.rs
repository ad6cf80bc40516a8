use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchpadError {
    #[error("launch not found: {0}")]
    LaunchNotFound(String),

    #[error("launch already exists: {0}")]
    LaunchAlreadyExists(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("address is not whitelisted: {0}")]
    NotWhitelisted(String),

    #[error("published root {published} does not match local root {expected}")]
    RootMismatch { expected: String, published: String },

    #[error("launch {0} has no whitelist root")]
    NoWhitelistRoot(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("merkle error: {0}")]
    Merkle(#[from] mintlist_crypto::MerkleError),

    #[error("type error: {0}")]
    Type(#[from] mintlist_types::TypeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LaunchpadResult<T> = Result<T, LaunchpadError>;
