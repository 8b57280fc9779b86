//! The access-time authorization decision.

use alloy::primitives::Address;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use crate::auth::clock::{Clock, SystemClock};
use crate::auth::error::{AuthorizationError, LookupError};
use crate::auth::recovery::{PersonalMessageRecoverer, SignatureRecoverer};
use crate::auth::types::{AuthorizationContext, AuthorizationPolicy, AuthorizationRequest};
use crate::observability::metrics;

/// Reads the access-time expiry (unix seconds) of an address.
///
/// Implementations must bound their own I/O; the authorizer awaits the call
/// as-is and does not retry.
#[async_trait]
pub trait AccessTimeReader: Send + Sync {
    async fn access_time(&self, address: Address) -> Result<u64, LookupError>;
}

/// Decides whether a signed request has enough access time left.
#[derive(Clone)]
pub struct AccessAuthorizer {
    recoverer: Arc<dyn SignatureRecoverer>,
    reader: Arc<dyn AccessTimeReader>,
    clock: Arc<dyn Clock>,
    policy: AuthorizationPolicy,
}

impl AccessAuthorizer {
    /// Create an authorizer with personal-message recovery and the system clock.
    pub fn new(reader: Arc<dyn AccessTimeReader>, policy: AuthorizationPolicy) -> Self {
        Self::with_parts(
            Arc::new(PersonalMessageRecoverer),
            reader,
            Arc::new(SystemClock),
            policy,
        )
    }

    pub fn with_parts(
        recoverer: Arc<dyn SignatureRecoverer>,
        reader: Arc<dyn AccessTimeReader>,
        clock: Arc<dyn Clock>,
        policy: AuthorizationPolicy,
    ) -> Self {
        Self {
            recoverer,
            reader,
            clock,
            policy,
        }
    }

    /// The policy this authorizer was configured with.
    pub fn policy(&self) -> AuthorizationPolicy {
        self.policy
    }

    /// Authorize against the configured policy.
    pub async fn authorize(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<AuthorizationContext, AuthorizationError> {
        self.authorize_with_policy(request, &self.policy).await
    }

    /// Authorize against an explicit policy.
    pub async fn authorize_with_policy(
        &self,
        request: &AuthorizationRequest,
        policy: &AuthorizationPolicy,
    ) -> Result<AuthorizationContext, AuthorizationError> {
        let result = self.decide(request, policy).await;
        match &result {
            Ok(_) => metrics::record_authorization("authorized"),
            Err(e) => metrics::record_authorization(e.kind()),
        }
        result
    }

    async fn decide(
        &self,
        request: &AuthorizationRequest,
        policy: &AuthorizationPolicy,
    ) -> Result<AuthorizationContext, AuthorizationError> {
        // 1. Both credentials present
        let (signature, message) = request
            .credentials()
            .ok_or(AuthorizationError::MissingCredentials)?;

        // 2. Recover signer
        let signer_address = self
            .recoverer
            .recover(message.as_bytes(), signature)
            .map_err(|e| {
                tracing::debug!(error = %e, "Signature recovery failed");
                AuthorizationError::InvalidSignature
            })?;
        if signer_address.is_zero() {
            return Err(AuthorizationError::InvalidSignature);
        }

        // 3. Fresh on-chain expiry
        let started = Instant::now();
        let lookup = self.reader.access_time(signer_address).await;
        metrics::record_lookup_duration(started);
        let access_time_expiry = lookup.map_err(|e| {
            tracing::warn!(signer = %signer_address, error = %e, "Access time lookup failed");
            AuthorizationError::LookupFailed(e)
        })?;

        // 4. Compare against policy
        let verified_at = self.clock.now();
        let remaining_time = remaining_seconds(access_time_expiry, verified_at);
        if !policy.permits(remaining_time) {
            tracing::info!(
                signer = %signer_address,
                required = policy.min_remaining_time,
                remaining = remaining_time,
                "Insufficient access time"
            );
            return Err(AuthorizationError::InsufficientTime {
                required: policy.min_remaining_time,
                remaining: remaining_time,
            });
        }

        tracing::debug!(
            signer = %signer_address,
            expiry = access_time_expiry,
            remaining = remaining_time,
            "Request authorized"
        );

        Ok(AuthorizationContext {
            signer_address,
            access_time_expiry,
            remaining_time,
            verified_at,
        })
    }
}

impl std::fmt::Debug for AccessAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessAuthorizer")
            .field("policy", &self.policy)
            .finish()
    }
}

/// `expiry - now`, saturating at the `i64` bounds.
fn remaining_seconds(expiry: u64, now: u64) -> i64 {
    let diff = i128::from(expiry) - i128::from(now);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
