//! HTTP dispatch for public and private calls

use crate::envelope::decode_response;
use crate::error::{RestError, RestResult};
use kraken_auth::{Credentials, RequestSigner};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest body excerpt kept in [`RestError::Status`]
const MAX_ERROR_BODY: usize = 512;

/// Sends requests to one Kraken REST host
#[derive(Debug, Clone)]
pub struct Transport {
    http_client: Client,
    base_url: String,
}

impl Transport {
    /// Build a transport with its own connection pool
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Host every request goes to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /0/public/{method}?{params}`
    pub async fn public<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> RestResult<T> {
        let path = format!("/0/public/{}", method);
        let mut url = format!("{}{}", self.base_url, path);
        if !params.is_empty() {
            let query = serde_urlencoded::to_string(params)
                .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
            url.push('?');
            url.push_str(&query);
        }

        debug!(method, %path, "Sending public request");

        let response = self.http_client.get(&url).send().await?;
        Self::read_envelope(method, response).await
    }

    /// `POST /0/private/{method}` with a signed, nonce-first form body
    pub async fn private<T: DeserializeOwned>(
        &self,
        credentials: &Credentials,
        method: &str,
        params: &[(&str, &str)],
    ) -> RestResult<T> {
        let path = format!("/0/private/{}", method);
        let signer = RequestSigner::new(credentials, path.as_str());

        let mut post_params: Vec<(&str, &str)> = vec![("nonce", signer.nonce())];
        post_params.extend_from_slice(params);

        let post_data = serde_urlencoded::to_string(&post_params)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
        let signature = signer.sign(&post_data)?;
        let url = format!("{}{}", self.base_url, path);

        debug!(method, %path, "Sending private request");

        let response = self
            .http_client
            .post(&url)
            .header("API-Key", signer.api_key())
            .header("API-Sign", signature)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(post_data)
            .send()
            .await?;

        Self::read_envelope(method, response).await
    }

    /// Decode the envelope regardless of status; Kraken reports most
    /// failures inside it. Only a non-2xx body that is not an envelope
    /// becomes [`RestError::Status`].
    async fn read_envelope<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> RestResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        match decode_response(&bytes) {
            Err(RestError::Decode(_)) if !status.is_success() => {
                let body = String::from_utf8_lossy(&bytes);
                let body: String = body.chars().take(MAX_ERROR_BODY).collect();
                warn!(method, status = status.as_u16(), "Non-success status without envelope");
                Err(RestError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
            Err(err @ RestError::Api { .. }) => {
                warn!(method, error = %err, "Exchange reported an error");
                Err(err)
            }
            other => other,
        }
    }
}
