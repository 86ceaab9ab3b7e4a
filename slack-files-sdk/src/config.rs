use crate::client::SlackClient;
use crate::error::{Error, Result};
use reqwest_middleware::{ClientBuilder as MiddlewareClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://slack.com/api";

pub const TOKEN_VAR: &str = "SLACK_TOKEN";
pub const ENDPOINT_VAR: &str = "SLACK_API_URL";

/// API token sent as a bearer header on every request.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Read the token from `SLACK_TOKEN`, loading a `.env` file first if one
    /// exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let token = env::var(TOKEN_VAR).map_err(|_| Error::MissingCredentials(TOKEN_VAR))?;
        if token.trim().is_empty() {
            return Err(Error::MissingCredentials(TOKEN_VAR));
        }
        Ok(Self::new(token))
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ClientConfig {
    pub endpoint: String,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    pub fn token(self, token: impl Into<String>) -> Self {
        self.credentials(Credentials::new(token))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Transport-level retries for transient failures. `0` disables the
    /// retry middleware.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    pub(crate) fn build_http_clients(&self) -> Result<(reqwest::Client, ClientWithMiddleware)> {
        let reqwest_client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(Error::Http)?;

        let mut builder = MiddlewareClientBuilder::new(reqwest_client.clone());
        if self.config.max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder()
                .retry_bounds(Duration::from_millis(500), Duration::from_secs(10))
                .build_with_max_retries(self.config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok((reqwest_client, builder.build()))
    }

    pub(crate) fn get_config(&self) -> ClientConfig {
        self.config.clone()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.config.endpoint.trim().is_empty() {
            return Err(Error::Config("Endpoint is required".to_string()));
        }

        match &self.config.credentials {
            None => Err(Error::Config("Credentials are required".to_string())),
            Some(credentials) if credentials.token().trim().is_empty() => {
                Err(Error::Config("Token must not be empty".to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    pub fn build(self) -> Result<SlackClient> {
        SlackClient::from_builder(self)
    }
}
