use crate::config::{ClientBuilder, Credentials};
use crate::error::{Error, Result};
use crate::types::SlackEnvelope;
use reqwest::header::RETRY_AFTER;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub struct SlackClient {
    pub(crate) client: ClientWithMiddleware,
    /// Bare client for requests whose bodies cannot be replayed by the retry
    /// middleware (multipart uploads).
    pub(crate) http: reqwest::Client,
    pub(crate) endpoint: String,
    pub(crate) credentials: Credentials,
}

impl fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_builder(builder: ClientBuilder) -> Result<Self> {
        builder.validate()?;
        let config = builder.get_config();
        let (http, client) = builder.build_http_clients()?;
        let credentials = config
            .credentials
            .ok_or_else(|| Error::Config("Credentials are required".to_string()))?;

        Ok(Self {
            client,
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.endpoint, method)
    }

    pub(crate) fn token(&self) -> &str {
        self.credentials.token()
    }

    /// Turn a non-2xx response into the matching error variant.
    pub(crate) async fn status_error(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            400 => Error::BadRequest(message),
            401 => Error::Unauthorized,
            429 => Error::RateLimited(retry_after),
            500..=599 => Error::ServerError(message),
            _ => Error::ApiError { status, message },
        }
    }

    /// Decode a Slack `{ "ok": ..., "error": ... }` envelope, mapping
    /// `ok: false` to [`Error::Slack`].
    pub(crate) async fn parse_envelope<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.text().await?;
        let envelope: SlackEnvelope<T> = serde_json::from_str(&body)?;

        if envelope.ok {
            Ok(envelope.body)
        } else {
            Err(Error::Slack {
                method: method.to_string(),
                error: envelope
                    .error
                    .unwrap_or_else(|| "unknown_error".to_string()),
            })
        }
    }
}
