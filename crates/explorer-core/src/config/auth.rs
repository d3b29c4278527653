//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Bearer token configuration shared with the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in hours.
    #[serde(default = "default_ttl")]
    pub jwt_ttl_hours: u64,
    /// Accepted clock skew in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_hours: default_ttl(),
            leeway_seconds: default_leeway(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_ttl() -> u64 {
    24 * 7
}

fn default_leeway() -> u64 {
    5
}
