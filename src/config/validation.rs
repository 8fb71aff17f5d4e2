//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the upstream origin is a usable http(s) URL
//! - Validate value ranges (timeouts > 0) and marker names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: GatewayConfig -> Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::{GatewayConfig, StoreBackend};

/// One semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.upstream.origin) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                errors.push(ValidationError {
                    field: "upstream.origin",
                    message: format!("scheme must be http or https, got {}", url.scheme()),
                });
            }
            if url.host_str().is_none() {
                errors.push(ValidationError {
                    field: "upstream.origin",
                    message: "must include a host".to_string(),
                });
            }
        }
        Err(e) => errors.push(ValidationError {
            field: "upstream.origin",
            message: format!("invalid URL: {}", e),
        }),
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.connect_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    let markers = [
        ("markers.bootstrap", &config.markers.bootstrap),
        ("markers.virtual_root", &config.markers.virtual_root),
        ("markers.primary_entry", &config.markers.primary_entry),
        ("markers.legacy_entry", &config.markers.legacy_entry),
        ("markers.host_page", &config.markers.host_page),
    ];
    for (field, value) in markers {
        if value.is_empty() {
            errors.push(ValidationError {
                field,
                message: "must not be empty".to_string(),
            });
        }
    }

    if config.store.backend == StoreBackend::Redb && config.store.path.is_empty() {
        errors.push(ValidationError {
            field: "store.path",
            message: "required for the redb backend".to_string(),
        });
    }

    if config.version.is_empty() {
        errors.push(ValidationError {
            field: "version",
            message: "must not be empty".to_string(),
        });
    }

    if !config.control.path.starts_with('/') {
        errors.push(ValidationError {
            field: "control.path",
            message: "must start with '/'".to_string(),
        });
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

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn rejects_non_http_upstream() {
        let mut config = GatewayConfig::default();
        config.upstream.origin = "ftp://files.example".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "upstream.origin"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = GatewayConfig::default();
        config.upstream.origin = "nope".to_string();
        config.timeouts.request_secs = 0;
        config.markers.bootstrap = String::new();
        config.version = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 4);
    }

    #[test]
    fn memory_backend_needs_no_path() {
        let mut config = GatewayConfig::default();
        config.store.backend = StoreBackend::Memory;
        config.store.path = String::new();
        assert!(validate_config(&config).is_ok());
    }
}
