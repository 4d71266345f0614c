//! # Auth Configuration
//!
//! Deployment-time settings for Google sign-in: a default web client id and
//! an optional hosted-domain filter. Both are optional; the web client id
//! can instead be supplied per call, and an explicit call argument always
//! wins over the configured default.
//!
//! ## Usage
//!
//! ```
//! use core_auth::AuthConfig;
//!
//! let config = AuthConfig::builder()
//!     .web_client_id("1234567890-abc.apps.googleusercontent.com")
//!     .hosted_domain_filter("example.com")
//!     .build();
//!
//! let resolved = config.resolve_web_client_id(None).unwrap();
//! assert_eq!(resolved, "1234567890-abc.apps.googleusercontent.com");
//! ```

use crate::error::{AuthError, Result};

/// Deployment-time configuration for Google sign-in requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    web_client_id: Option<String>,
    hosted_domain_filter: Option<String>,
}

impl AuthConfig {
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Resolve the web client id for a Google request.
    ///
    /// An explicit, non-blank call argument takes precedence over the
    /// configured default. Blank strings count as absent. With neither
    /// present the request cannot be built and resolution fails with
    /// [`AuthError::GoogleClientIdRequired`].
    pub fn resolve_web_client_id(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(value) = non_blank(explicit) {
            return Ok(value);
        }
        if let Some(value) = non_blank(self.web_client_id.as_deref()) {
            return Ok(value);
        }
        Err(AuthError::GoogleClientIdRequired)
    }

    /// The configured hosted-domain filter, with blank values treated as
    /// absent. Applied to the Sign in with Google button flow only.
    pub fn hosted_domain_filter(&self) -> Option<&str> {
        self.hosted_domain_filter
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Builder for [`AuthConfig`] instances.
#[derive(Debug, Default)]
pub struct AuthConfigBuilder {
    web_client_id: Option<String>,
    hosted_domain_filter: Option<String>,
}

impl AuthConfigBuilder {
    /// Sets the default web client id used when a call does not pass one.
    pub fn web_client_id(mut self, value: impl Into<String>) -> Self {
        self.web_client_id = Some(value.into());
        self
    }

    /// Restricts Google button sign-in to accounts of the given hosted
    /// domain.
    pub fn hosted_domain_filter(mut self, value: impl Into<String>) -> Self {
        self.hosted_domain_filter = Some(value.into());
        self
    }

    pub fn build(self) -> AuthConfig {
        AuthConfig {
            web_client_id: self.web_client_id,
            hosted_domain_filter: self.hosted_domain_filter,
        }
    }
}
