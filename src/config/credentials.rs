//! Credential resolution from configuration.
//!
//! API keys are kept out of logs by wrapping them in [`SecureString`].

use super::types::ApiConfig;

/// Authentication type for API requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// `x-api-key` header.
    ApiKey,
    /// Standard `Authorization: Bearer` header.
    Bearer,
    /// Session cookies only.
    None,
}

impl AuthType {
    /// Parse auth type from string.
    /// Defaults to `None` for unknown values.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "api_key" => AuthType::ApiKey,
            "bearer" => AuthType::Bearer,
            _ => AuthType::None,
        }
    }
}

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Status of credential resolution.
#[derive(Debug, Clone)]
pub enum CredentialStatus {
    /// API key resolved successfully.
    Configured(SecureString),
    /// Auth is required but the key is missing or empty.
    Unconfigured { reason: String },
    /// No authentication header is sent.
    NoAuth,
}

impl ApiConfig {
    pub fn auth_type(&self) -> AuthType {
        AuthType::parse(&self.auth_type_str)
    }

    pub fn resolve_credential(&self) -> CredentialStatus {
        match self.auth_type() {
            AuthType::None => CredentialStatus::NoAuth,
            AuthType::ApiKey | AuthType::Bearer => match self.api_key.as_deref() {
                Some(key) if !key.is_empty() => {
                    CredentialStatus::Configured(SecureString::new(key.to_string()))
                }
                _ => CredentialStatus::Unconfigured {
                    reason: "api.api_key is not set".to_string(),
                },
            },
        }
    }
}
