//! Bearer token sources

use super::{RemoteError, RemoteResult};
use crate::util::normalize_text_option;

/// Environment variable read by [`EnvCredential::default`].
pub const API_TOKEN_ENV: &str = "CARDSYNC_API_TOKEN";

/// Supplies the bearer token attached to every request.
pub trait CredentialProvider {
    fn bearer_token(&self) -> RemoteResult<String>;
}

/// A token fixed at construction time.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_tuple("StaticToken")
            .field(&"[REDACTED]")
            .finish()
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> RemoteResult<String> {
        normalize_text_option(Some(self.0.clone()))
            .ok_or_else(|| RemoteError::MissingCredential("API token must not be empty".to_string()))
    }
}

/// Reads the token from an environment variable on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredential {
    fn default() -> Self {
        Self::new(API_TOKEN_ENV)
    }
}

impl CredentialProvider for EnvCredential {
    fn bearer_token(&self) -> RemoteResult<String> {
        normalize_text_option(std::env::var(&self.var).ok())
            .ok_or_else(|| RemoteError::MissingCredential(format!("{} is not set", self.var)))
    }
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for &P {
    fn bearer_token(&self) -> RemoteResult<String> {
        (**self).bearer_token()
    }
}
