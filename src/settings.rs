use anyhow::{Context, Result};
use slack_files_sdk::{
    ClientBuilder, Credentials, DEFAULT_ENDPOINT, ENDPOINT_VAR, SlackClient, WaitConfig,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const WAIT_MAX_VAR: &str = "FILES_WAIT_MAX_SECS";
pub const WAIT_POLL_VAR: &str = "FILES_WAIT_POLL_SECS";
pub const WAIT_DELAY_VAR: &str = "FILES_WAIT_DELAY_SECS";
pub const FIXTURE_VAR: &str = "FILES_FIXTURE_PATH";

/// Image uploaded by the lifecycle checks.
pub const DEFAULT_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/APPLE_EX.png");

#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    pub credentials: Credentials,
    pub wait: WaitConfig,
    pub fixture_path: PathBuf,
}

impl Settings {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials,
            wait: WaitConfig::default(),
            fixture_path: PathBuf::from(DEFAULT_FIXTURE),
        }
    }

    /// Read settings from the environment (and `.env`). Only `SLACK_TOKEN`
    /// is required.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env()?;
        Self::from_lookup(credentials, |name| env::var(name).ok())
    }

    /// Apply the optional overrides found through `lookup`. Blank values
    /// keep the defaults.
    pub fn from_lookup(
        credentials: Credentials,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut settings = Self::new(credentials);

        if let Some(endpoint) = non_empty_var(&lookup, ENDPOINT_VAR) {
            settings.endpoint = endpoint;
        }
        if let Some(max_wait) = secs_var(&lookup, WAIT_MAX_VAR)? {
            settings.wait = settings.wait.max_wait(max_wait);
        }
        if let Some(poll_interval) = secs_var(&lookup, WAIT_POLL_VAR)? {
            settings.wait = settings.wait.poll_interval(poll_interval);
        }
        if let Some(initial_delay) = secs_var(&lookup, WAIT_DELAY_VAR)? {
            settings.wait = settings.wait.initial_delay(initial_delay);
        }
        if let Some(path) = non_empty_var(&lookup, FIXTURE_VAR) {
            settings.fixture_path = PathBuf::from(path);
        }

        Ok(settings)
    }

    pub fn client(&self) -> Result<SlackClient> {
        ClientBuilder::new()
            .endpoint(self.endpoint.clone())
            .credentials(self.credentials.clone())
            .build()
            .context("failed to build Slack client")
    }
}

fn non_empty_var(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn secs_var(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<Duration>> {
    non_empty_var(lookup, name)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| format!("{name} must be a whole number of seconds, got {value:?}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_wait_45s_polling_every_5s() {
        let settings = Settings::new(Credentials::new("xoxb-test"));
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.wait.max_wait, Duration::from_secs(45));
        assert_eq!(settings.wait.poll_interval, Duration::from_secs(5));
        assert_eq!(settings.wait.initial_delay, Duration::from_secs(5));
        assert!(settings.fixture_path.ends_with("resources/APPLE_EX.png"));
    }

    #[test]
    fn fixture_is_bundled() {
        assert!(PathBuf::from(DEFAULT_FIXTURE).is_file());
    }

    #[test]
    fn client_uses_configured_endpoint() {
        let mut settings = Settings::new(Credentials::new("xoxb-test"));
        settings.endpoint = "http://127.0.0.1:1/api".to_string();
        let client = settings.client().unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:1/api");
    }

    #[test]
    fn overrides_replace_defaults() {
        let settings = Settings::from_lookup(
            Credentials::new("xoxb-test"),
            lookup_in(&[
                (ENDPOINT_VAR, "http://127.0.0.1:9000/api"),
                (WAIT_MAX_VAR, "60"),
                (WAIT_POLL_VAR, " 2 "),
                (WAIT_DELAY_VAR, "0"),
                (FIXTURE_VAR, "/tmp/other.png"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.endpoint, "http://127.0.0.1:9000/api");
        assert_eq!(settings.wait.max_wait, Duration::from_secs(60));
        assert_eq!(settings.wait.poll_interval, Duration::from_secs(2));
        assert_eq!(settings.wait.initial_delay, Duration::ZERO);
        assert_eq!(settings.fixture_path, PathBuf::from("/tmp/other.png"));
    }

    #[test]
    fn blank_overrides_keep_defaults() {
        let settings = Settings::from_lookup(
            Credentials::new("xoxb-test"),
            lookup_in(&[
                (ENDPOINT_VAR, ""),
                (WAIT_MAX_VAR, "   "),
                (FIXTURE_VAR, " "),
            ]),
        )
        .unwrap();

        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.wait, WaitConfig::default());
        assert_eq!(settings.fixture_path, PathBuf::from(DEFAULT_FIXTURE));
    }

    #[test]
    fn non_numeric_wait_is_rejected() {
        let err = Settings::from_lookup(
            Credentials::new("xoxb-test"),
            lookup_in(&[(WAIT_POLL_VAR, "5s")]),
        )
        .unwrap_err()
        .to_string();

        assert!(err.contains(WAIT_POLL_VAR), "{err}");
        assert!(err.contains("must be a whole number of seconds"), "{err}");
        assert!(err.contains("\"5s\""), "{err}");
    }
}
