//! Remote entity client for the ShareMyCard REST API.
//!
//! A fetch returns `Err` only for transport faults (connection refused,
//! timeout, missing credentials). Anything the server says, including
//! non-2xx statuses, is reported through the [`Envelope`].

mod credentials;
mod envelope;
mod http;

use thiserror::Error;

use crate::wire::{WireCard, WireContact, WireLead};

pub use credentials::{CredentialProvider, EnvCredential, StaticToken, API_TOKEN_ENV};
pub use envelope::{envelope_from_response, Envelope};
pub use http::HttpEntityClient;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid API client configuration: {0}")]
    InvalidConfiguration(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Missing API credential: {0}")]
    MissingCredential(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// One list fetch per entity kind.
#[allow(async_fn_in_trait)]
pub trait RemoteEntityClient {
    async fn list_cards(&self) -> RemoteResult<Envelope<WireCard>>;

    async fn list_contacts(&self) -> RemoteResult<Envelope<WireContact>>;

    async fn list_leads(&self) -> RemoteResult<Envelope<WireLead>>;
}
