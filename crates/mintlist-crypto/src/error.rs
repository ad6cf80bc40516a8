use thiserror::Error;

/// Errors from building trees and handling proofs.
///
/// Verification itself never returns these; it answers `false` instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("invalid identity at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    #[error("identity not in whitelist: {0}")]
    NotFound(String),

    #[error("malformed proof: {0}")]
    MalformedProof(String),
}

pub type MerkleResult<T> = Result<T, MerkleError>;
