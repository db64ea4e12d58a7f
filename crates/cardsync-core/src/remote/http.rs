//! reqwest-backed client for the ShareMyCard REST API

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use super::{
    envelope_from_response, CredentialProvider, Envelope, RemoteEntityClient, RemoteError,
    RemoteResult,
};
use crate::config::ClientConfig;
use crate::util::{is_http_url, normalize_text_option};
use crate::wire::{WireCard, WireContact, WireLead};

/// Fetches entity lists over HTTPS with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpEntityClient<P> {
    base_url: String,
    client: reqwest::Client,
    credentials: P,
}

impl<P: CredentialProvider> HttpEntityClient<P> {
    pub fn new(config: &ClientConfig, credentials: P) -> RemoteResult<Self> {
        let base_url = normalize_base_url(config.api_base_url.clone())?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            base_url,
            client,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, collection: &str) -> String {
        format!("{}/{collection}/", self.base_url)
    }

    async fn fetch<T: DeserializeOwned>(&self, collection: &str) -> RemoteResult<Envelope<T>> {
        let token = self.credentials.bearer_token()?;
        let url = self.endpoint(collection);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok(envelope_from_response(status, &body))
    }
}

impl<P: CredentialProvider> RemoteEntityClient for HttpEntityClient<P> {
    async fn list_cards(&self) -> RemoteResult<Envelope<WireCard>> {
        self.fetch("cards").await
    }

    async fn list_contacts(&self) -> RemoteResult<Envelope<WireContact>> {
        self.fetch("contacts").await
    }

    async fn list_leads(&self) -> RemoteResult<Envelope<WireLead>> {
        self.fetch("leads").await
    }
}

fn normalize_base_url(raw: String) -> RemoteResult<String> {
    let base_url = normalize_text_option(Some(raw)).ok_or_else(|| {
        RemoteError::InvalidConfiguration("API base URL must not be empty".to_string())
    })?;
    if is_http_url(&base_url) {
        Ok(base_url.trim_end_matches('/').to_string())
    } else {
        Err(RemoteError::InvalidConfiguration(
            "API base URL must include http:// or https://".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::StaticToken;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig {
            api_base_url: base_url.to_string(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url(String::new()).is_err());
        assert!(normalize_base_url("sharemycard.app/api".to_string()).is_err());
    }

    #[test]
    fn endpoints_end_with_a_slash() {
        let client =
            HttpEntityClient::new(&config("https://example.test/api/"), StaticToken::new("t"))
                .unwrap();
        assert_eq!(client.base_url(), "https://example.test/api");
        assert_eq!(client.endpoint("cards"), "https://example.test/api/cards/");
        assert_eq!(client.endpoint("leads"), "https://example.test/api/leads/");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_token_fails_before_any_request() {
        let client =
            HttpEntityClient::new(&config("http://127.0.0.1:9"), StaticToken::new(""))
                .unwrap();
        let result = client.list_contacts().await;
        assert!(matches!(result, Err(RemoteError::MissingCredential(_))));
    }
}
