//! Shared link configuration.

use serde::{Deserialize, Serialize};

/// Settings for minting public share links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Public client origin; links are built as `<base>/share/<token>`.
    #[serde(default = "default_base_url")]
    pub public_base_url: String,
    /// Random bytes per token before hex encoding.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_base_url(),
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_token_bytes() -> usize {
    32
}
