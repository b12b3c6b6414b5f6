//! # Remote Connection Configuration
//!
//! The seven named parameters required to address the remote catalog, read
//! once at startup from the environment.
//!
//! ## Validation Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Resolution                             │
//! │                                                                         │
//! │  Environment                     RemoteConfig::from_env()              │
//! │  ───────────                     ────────────────────────              │
//! │  SHELFSCAN_API_KEY          ──►  all 7 present & non-empty             │
//! │  SHELFSCAN_AUTH_DOMAIN           │                                     │
//! │  SHELFSCAN_DATABASE_URL          ├── yes ──► Ok(RemoteConfig)          │
//! │  SHELFSCAN_PROJECT_ID            │                                     │
//! │  SHELFSCAN_STORAGE_BUCKET        └── no  ──► Err(MissingField)         │
//! │  SHELFSCAN_SENDER_ID                         (terminal for session)    │
//! │  SHELFSCAN_APP_ID                                                      │
//! │                                                                         │
//! │  This is a pure validation gate, not a parser of arbitrary shapes.     │
//! │  There is NO partial connection attempt on an invalid config.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Configuration is constructed once at startup and immutable thereafter,
//! so no synchronization is needed.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable for the remote API key.
pub const ENV_API_KEY: &str = "SHELFSCAN_API_KEY";
/// Environment variable for the remote auth domain.
pub const ENV_AUTH_DOMAIN: &str = "SHELFSCAN_AUTH_DOMAIN";
/// Environment variable for the remote database URL.
pub const ENV_DATABASE_URL: &str = "SHELFSCAN_DATABASE_URL";
/// Environment variable for the remote project identifier.
pub const ENV_PROJECT_ID: &str = "SHELFSCAN_PROJECT_ID";
/// Environment variable for the remote storage bucket.
pub const ENV_STORAGE_BUCKET: &str = "SHELFSCAN_STORAGE_BUCKET";
/// Environment variable for the remote messaging sender id.
pub const ENV_SENDER_ID: &str = "SHELFSCAN_SENDER_ID";
/// Environment variable for the remote application id.
pub const ENV_APP_ID: &str = "SHELFSCAN_APP_ID";

// =============================================================================
// Remote Config
// =============================================================================

/// The fixed, named set of string parameters required to address the remote
/// collection.
///
/// Valid only when *all* seven fields are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// API key for the remote project.
    pub api_key: String,

    /// Authentication domain of the remote project.
    pub auth_domain: String,

    /// Base URL of the remote database.
    pub database_url: String,

    /// Remote project identifier.
    pub project_id: String,

    /// Storage bucket name.
    pub storage_bucket: String,

    /// Messaging sender identifier.
    pub messaging_sender_id: String,

    /// Application identifier.
    pub app_id: String,
}

impl RemoteConfig {
    /// Reads the seven required parameters from the process environment.
    ///
    /// Returns `Err` naming the first missing parameter; callers must treat
    /// that as terminal for this session.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the seven required parameters through a lookup function.
    ///
    /// Split out from [`from_env`](Self::from_env) so validation can be
    /// tested without touching process-global environment state.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(RemoteConfig {
            api_key: require(&lookup, ENV_API_KEY, "api_key")?,
            auth_domain: require(&lookup, ENV_AUTH_DOMAIN, "auth_domain")?,
            database_url: require(&lookup, ENV_DATABASE_URL, "database_url")?,
            project_id: require(&lookup, ENV_PROJECT_ID, "project_id")?,
            storage_bucket: require(&lookup, ENV_STORAGE_BUCKET, "storage_bucket")?,
            messaging_sender_id: require(&lookup, ENV_SENDER_ID, "messaging_sender_id")?,
            app_id: require(&lookup, ENV_APP_ID, "app_id")?,
        })
    }

    /// Re-validates an already constructed config.
    ///
    /// A config constructed through [`from_lookup`](Self::from_lookup) is
    /// always valid; this exists for configs deserialized from elsewhere.
    pub fn validate(&self) -> ConfigResult<()> {
        let fields: [(&'static str, &str); 7] = [
            ("api_key", &self.api_key),
            ("auth_domain", &self.auth_domain),
            ("database_url", &self.database_url),
            ("project_id", &self.project_id),
            ("storage_bucket", &self.storage_bucket),
            ("messaging_sender_id", &self.messaging_sender_id),
            ("app_id", &self.app_id),
        ];

        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field });
            }
        }

        Ok(())
    }

    /// Returns the subscription endpoint for a named remote collection.
    pub fn collection_endpoint(&self, collection: &str) -> String {
        format!(
            "{}/{}",
            self.database_url.trim_end_matches('/'),
            collection
        )
    }
}

fn require<F>(lookup: &F, key: &str, field: &'static str) -> ConfigResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingField { field }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_API_KEY, "key-123"),
            (ENV_AUTH_DOMAIN, "shop.example.com"),
            (ENV_DATABASE_URL, "wss://catalog.example.com/db/"),
            (ENV_PROJECT_ID, "shop-handheld"),
            (ENV_STORAGE_BUCKET, "shop-handheld.bucket"),
            (ENV_SENDER_ID, "424242"),
            (ENV_APP_ID, "1:424242:web:abc"),
        ])
    }

    fn resolve(env: &HashMap<&str, &str>) -> ConfigResult<RemoteConfig> {
        RemoteConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_all_seven_fields_resolve() {
        let config = resolve(&full_env()).unwrap();
        assert_eq!(config.project_id, "shop-handheld");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_removing_any_field_is_invalid() {
        for key in [
            ENV_API_KEY,
            ENV_AUTH_DOMAIN,
            ENV_DATABASE_URL,
            ENV_PROJECT_ID,
            ENV_STORAGE_BUCKET,
            ENV_SENDER_ID,
            ENV_APP_ID,
        ] {
            let mut env = full_env();
            env.remove(key);
            assert!(
                resolve(&env).is_err(),
                "config without {key} should be invalid"
            );
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut env = full_env();
        env.insert(ENV_APP_ID, "   ");
        let err = resolve(&env).unwrap_err();
        assert_eq!(err, ConfigError::MissingField { field: "app_id" });
    }

    #[test]
    fn test_collection_endpoint_joins_path() {
        let config = resolve(&full_env()).unwrap();
        assert_eq!(
            config.collection_endpoint("products"),
            "wss://catalog.example.com/db/products"
        );
    }
}
