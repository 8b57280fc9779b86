//! Authorization error taxonomy.

use thiserror::Error;

use crate::blockchain::types::BlockchainError;

/// Why a request was not authorized.
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// Signature or message header absent or empty.
    #[error("Missing wallet signature or message hash")]
    MissingCredentials,

    /// Signature could not be decoded or no signer could be recovered.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The access time read failed. This is an infrastructure fault, not a denial.
    #[error("Access time lookup failed: {0}")]
    LookupFailed(#[from] LookupError),

    /// Valid signer without enough subscription time left.
    #[error("Insufficient subscription time. Required: {required}s, Remaining: {remaining}s")]
    InsufficientTime { required: u64, remaining: i64 },
}

impl AuthorizationError {
    /// Stable machine-readable kind, used in rejection bodies and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthorizationError::MissingCredentials => "missing_credentials",
            AuthorizationError::InvalidSignature => "invalid_signature",
            AuthorizationError::LookupFailed(_) => "lookup_failed",
            AuthorizationError::InsufficientTime { .. } => "insufficient_time",
        }
    }

    /// True when the caller presented bad or insufficient credentials, false
    /// for infrastructure faults.
    pub fn is_denial(&self) -> bool {
        !matches!(self, AuthorizationError::LookupFailed(_))
    }
}

/// Failure to recover a signer from a signature.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("signature is not valid hex: {0}")]
    Encoding(String),

    #[error("signature has length {0}, expected 65 bytes")]
    Length(usize),

    #[error("signature recovery failed: {0}")]
    Recover(String),
}

/// Failure to read the access time of an address.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Chain(#[from] BlockchainError),

    #[error("contract returned malformed data: {0}")]
    Decode(String),
}
