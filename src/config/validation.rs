//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the upstream origin shape (scheme, no trailing slash)
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyBindAddress,
    EmptyOrigin,
    /// Origin must be an absolute http(s) URL so paths can be appended to it.
    OriginScheme(String),
    /// A trailing slash would double up when paths are appended.
    OriginTrailingSlash(String),
    EmptyAssetRoot,
    ZeroTimeout(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyBindAddress => write!(f, "listener.bind_address is empty"),
            ValidationError::EmptyOrigin => write!(f, "upstream.origin is empty"),
            ValidationError::OriginScheme(origin) => {
                write!(f, "upstream.origin {:?} must start with http:// or https://", origin)
            }
            ValidationError::OriginTrailingSlash(origin) => {
                write!(f, "upstream.origin {:?} must not end with a slash", origin)
            }
            ValidationError::EmptyAssetRoot => write!(f, "assets.root is empty"),
            ValidationError::ZeroTimeout(field) => write!(f, "timeouts.{} must be > 0", field),
        }
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    let origin = config.upstream.origin.trim();
    if origin.is_empty() {
        errors.push(ValidationError::EmptyOrigin);
    } else {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            errors.push(ValidationError::OriginScheme(origin.to_string()));
        }
        if origin.ends_with('/') {
            errors.push(ValidationError::OriginTrailingSlash(origin.to_string()));
        }
    }

    if config.assets.root.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyAssetRoot);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.asset_fetch_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("asset_fetch_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
