//! Signer recovery from wallet signatures.
//!
//! # Design Decisions
//! - One recovery scheme: EIP-191 personal message (`"\x19Ethereum Signed Message:\n" + len`)
//! - The message is hashed exactly as received; it is never hex-decoded
//! - Signatures are 65-byte `r || s || v` hex strings, `0x` prefix optional

use alloy::hex;
use alloy::primitives::{Address, Signature};

use crate::auth::error::RecoveryError;

/// Length of an `r || s || v` signature.
pub const SIGNATURE_LEN: usize = 65;

/// Recovers the address that produced a signature over a message.
pub trait SignatureRecoverer: Send + Sync {
    fn recover(&self, message: &[u8], signature: &str) -> Result<Address, RecoveryError>;
}

/// EIP-191 personal-message recovery, matching what wallets produce for
/// `personal_sign`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalMessageRecoverer;

impl SignatureRecoverer for PersonalMessageRecoverer {
    fn recover(&self, message: &[u8], signature: &str) -> Result<Address, RecoveryError> {
        let signature = parse_signature(signature)?;
        signature
            .recover_address_from_msg(message)
            .map_err(|e| RecoveryError::Recover(e.to_string()))
    }
}

/// Decode a hex signature into its `r, s, v` components.
pub fn parse_signature(signature: &str) -> Result<Signature, RecoveryError> {
    let bytes = hex::decode(signature.trim()).map_err(|e| RecoveryError::Encoding(e.to_string()))?;
    if bytes.len() != SIGNATURE_LEN {
        return Err(RecoveryError::Length(bytes.len()));
    }
    Signature::from_raw(&bytes).map_err(|e| RecoveryError::Recover(e.to_string()))
}
