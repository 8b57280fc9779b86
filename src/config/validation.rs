//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GuardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::Address;
use std::net::SocketAddr;

use crate::config::schema::GuardConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check semantic constraints serde cannot express.
pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.is_empty() || tls.key_path.is_empty() {
            errors.push(ValidationError::new(
                "listener.tls",
                "cert_path and key_path are both required",
            ));
        }
    }

    if url::Url::parse(&config.chain.rpc_url).is_err() {
        errors.push(ValidationError::new(
            "chain.rpc_url",
            format!("'{}' is not a valid URL", config.chain.rpc_url),
        ));
    }

    for url_str in &config.chain.failover_urls {
        if url::Url::parse(url_str).is_err() {
            errors.push(ValidationError::new(
                "chain.failover_urls",
                format!("'{}' is not a valid URL", url_str),
            ));
        }
    }

    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("chain.rpc_timeout_secs", "must be greater than 0"));
    }

    match config.access_time.contract_address.parse::<Address>() {
        Ok(address) if address.is_zero() => {
            errors.push(ValidationError::new(
                "access_time.contract_address",
                "zero address not allowed",
            ));
        }
        Ok(_) => {}
        Err(_) => {
            errors.push(ValidationError::new(
                "access_time.contract_address",
                format!("'{}' is not an address", config.access_time.contract_address),
            ));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    // A lookup that outlives the request timeout surfaces as 408, not lookup_failed.
    let endpoints = 1 + config.chain.failover_urls.len() as u64;
    let worst_lookup_secs = endpoints.saturating_mul(config.chain.rpc_timeout_secs);
    if config.timeouts.request_secs > 0 && worst_lookup_secs >= config.timeouts.request_secs {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "must exceed the worst-case chain lookup of {}s ({} endpoints x {}s rpc_timeout_secs)",
                worst_lookup_secs, endpoints, config.chain.rpc_timeout_secs
            ),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> GuardConfig {
        let mut config = GuardConfig::default();
        config.access_time.contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_default_config_requires_contract_address() {
        let errors = validate_config(&GuardConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "access_time.contract_address");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.listener.bind_address = "nowhere".to_string();
        config.chain.rpc_url = "not a url".to_string();
        config.chain.rpc_timeout_secs = 0;
        config.access_time.contract_address = format!("{}", Address::ZERO);
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "chain.rpc_url",
                "chain.rpc_timeout_secs",
                "access_time.contract_address",
                "timeouts.request_secs",
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = valid_config();
        config.observability.metrics_address = "bogus".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }

    #[test]
    fn test_request_timeout_must_cover_failover_lookups() {
        let mut config = valid_config();
        config.chain.rpc_timeout_secs = 10;
        config.chain.failover_urls = vec![
            "http://127.0.0.1:8546".to_string(),
            "http://127.0.0.1:8547".to_string(),
        ];
        config.timeouts.request_secs = 30;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "timeouts.request_secs");
        assert!(errors[0].message.contains("30s"));

        config.timeouts.request_secs = 31;
        assert!(validate_config(&config).is_ok());
    }
}
