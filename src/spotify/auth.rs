use serde_json::Value;

use super::{Result, SpotifyError};

/// Yields the bearer token used to authenticate API calls
///
/// The OAuth flow that produces the token is not part of this process; the
/// bridge only needs an authenticated handle and asks for the token on
/// every request so a provider may rotate it underneath.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Result<String>;
}

/// Token provider backed by a fixed token from the configuration file
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new<T: Into<String>>(token: T) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Read the token from the spotify service configuration section
    pub fn from_config(config: &Value) -> Result<Self> {
        match config.get("access_token").and_then(|v| v.as_str()) {
            Some(token) if !token.trim().is_empty() => Ok(Self::new(token)),
            _ => Err(SpotifyError::AuthError(
                "access_token is not configured".to_string(),
            )),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
