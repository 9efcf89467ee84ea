//! Authentication header building for API requests.

use super::credentials::{AuthType, CredentialStatus};
use super::types::ApiConfig;

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Build the authentication header for the admin API.
///
/// Returns `None` if no auth is configured or the key is missing; the
/// session cookie is then the only credential sent.
pub fn build_auth_header(api: &ApiConfig) -> Option<AuthHeader> {
    match (api.auth_type(), api.resolve_credential()) {
        (AuthType::ApiKey, CredentialStatus::Configured(key)) => {
            Some(("x-api-key".to_string(), key.expose().to_string()))
        }
        (AuthType::Bearer, CredentialStatus::Configured(key)) => Some((
            "Authorization".to_string(),
            format!("Bearer {}", key.expose()),
        )),
        (AuthType::None, _) => None,
        (_, CredentialStatus::Unconfigured { reason }) => {
            tracing::warn!(%reason, "API credentials not configured, sending without auth header");
            None
        }
        (_, CredentialStatus::NoAuth) => None,
    }
}
