//! Authorization request, policy and context types.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Credentials extracted from an inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// Hex-encoded wallet signature, as received.
    pub signature: Option<String>,
    /// The signed message payload.
    pub message: Option<String>,
}

impl AuthorizationRequest {
    pub fn new(signature: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            signature: Some(signature.into()),
            message: Some(message.into()),
        }
    }

    /// Both credentials, if present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let signature = self.signature.as_deref().filter(|s| !s.trim().is_empty())?;
        let message = self.message.as_deref().filter(|m| !m.is_empty())?;
        Some((signature, message))
    }
}

/// Minimum remaining access time required to authorize a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationPolicy {
    /// Seconds of subscription that must remain. Defaults to zero.
    pub min_remaining_time: u64,
}

impl AuthorizationPolicy {
    pub fn new(min_remaining_time: u64) -> Self {
        Self { min_remaining_time }
    }

    /// Whether `remaining` seconds satisfy this policy.
    pub fn permits(&self, remaining: i64) -> bool {
        i128::from(remaining) >= i128::from(self.min_remaining_time)
    }
}

/// Context attached to authorized requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationContext {
    /// Address recovered from the request signature.
    pub signer_address: Address,
    /// On-chain expiry timestamp (seconds since epoch).
    pub access_time_expiry: u64,
    /// `access_time_expiry - verified_at`; negative once expired.
    pub remaining_time: i64,
    /// Unix timestamp at which the decision was made.
    pub verified_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_values() {
        assert!(AuthorizationRequest::default().credentials().is_none());

        let only_sig = AuthorizationRequest {
            signature: Some("0xabc".into()),
            message: None,
        };
        assert!(only_sig.credentials().is_none());

        let blank = AuthorizationRequest::new("  ", "hello");
        assert!(blank.credentials().is_none());

        let empty_message = AuthorizationRequest::new("0xabc", "");
        assert!(empty_message.credentials().is_none());

        let full = AuthorizationRequest::new("0xabc", "hello");
        assert_eq!(full.credentials(), Some(("0xabc", "hello")));
    }

    #[test]
    fn test_policy_threshold() {
        let policy = AuthorizationPolicy::new(300);
        assert!(policy.permits(300));
        assert!(policy.permits(1000));
        assert!(!policy.permits(299));
        assert!(!policy.permits(-5));

        let open = AuthorizationPolicy::default();
        assert!(open.permits(0));
        assert!(!open.permits(-1));
    }

    #[test]
    fn test_context_serializes_camel_case() {
        let ctx = AuthorizationContext {
            signer_address: Address::ZERO,
            access_time_expiry: 2_000,
            remaining_time: 1_000,
            verified_at: 1_000,
        };
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["accessTimeExpiry"], 2_000);
        assert_eq!(json["remainingTime"], 1_000);
        assert_eq!(json["verifiedAt"], 1_000);
        assert!(json.get("signerAddress").is_some());
    }
}
