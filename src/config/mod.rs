//! Configuration: TOML file, environment overrides and credentials.

mod auth;
mod credentials;
mod loader;
mod types;

pub use auth::{build_auth_header, AuthHeader};
pub use credentials::{AuthType, CredentialStatus, SecureString};
pub use loader::{ConfigError, API_URL_ENV};
pub use types::{ApiConfig, CacheConfig, Config, DisplayConfig};
