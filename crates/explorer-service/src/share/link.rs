//! Share token generation and public URL construction.

use rand::Rng;

use explorer_core::config::ShareConfig;

/// Fewest random bytes a token may carry.
const MIN_TOKEN_BYTES: usize = 16;

/// Generates share tokens and the URLs that embed them.
#[derive(Debug, Clone)]
pub struct LinkService {
    public_base_url: String,
    token_bytes: usize,
}

impl LinkService {
    /// Creates a new link service. Token length is clamped to 16 bytes or more.
    pub fn new(config: &ShareConfig) -> Self {
        Self {
            public_base_url: config.public_base_url.clone(),
            token_bytes: config.token_bytes.max(MIN_TOKEN_BYTES),
        }
    }

    /// Generates a fresh random token, hex encoded.
    ///
    /// Uses the thread-local CSPRNG; the token carries no entity data.
    pub fn generate_token(&self) -> String {
        let mut rng = rand::thread_rng();
        let bytes: Vec<u8> = (0..self.token_bytes).map(|_| rng.r#gen()).collect();
        hex::encode(&bytes)
    }

    /// Returns `<base>/share/<token>`, tolerating a trailing slash on `base`.
    pub fn share_url(&self, token: &str) -> String {
        format!("{}/share/{}", self.public_base_url.trim_end_matches('/'), token)
    }
}

mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
