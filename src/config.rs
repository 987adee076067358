use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{ClientError, ClientResult};

pub const ENV_API_URL: &str = "QUIZAPP_API_URL";
pub const ENV_GRAPHQL_PATH: &str = "QUIZAPP_GRAPHQL_PATH";
pub const ENV_AUTH_PATH: &str = "QUIZAPP_AUTH_PATH";
pub const ENV_TIMEOUT_SECS: &str = "QUIZAPP_TIMEOUT_SECS";

/// Where the quiz API lives and how to talk to it.
///
/// Values are resolved in order: built-in defaults, an optional TOML file,
/// environment variables, and finally explicit overrides from the command line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API server, e.g. `http://localhost:8000`
    pub api_url: String,
    /// Path of the GraphQL endpoint relative to `api_url`
    pub graphql_path: String,
    /// Path prefix of the login/signup/logout endpoints relative to `api_url`
    pub auth_path: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            graphql_path: "/graphql".to_string(),
            auth_path: "/api".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from an optional file and the process environment.
    pub fn load(path: Option<&Path>) -> ClientResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ClientResult<Self> {
        toml::from_str(contents).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_env<F>(&mut self, lookup: F) -> ClientResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_API_URL) {
            self.api_url = value;
        }
        if let Some(value) = lookup(ENV_GRAPHQL_PATH) {
            self.graphql_path = value;
        }
        if let Some(value) = lookup(ENV_AUTH_PATH) {
            self.auth_path = value;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = value.parse().map_err(|_| {
                ClientError::Config(format!("{} must be a number of seconds", ENV_TIMEOUT_SECS))
            })?;
        }
        Ok(())
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn validate(&self) -> ClientResult<()> {
        let base = Url::parse(&self.api_url)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "api_url '{}' cannot be used as a base URL",
                self.api_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ClientError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn graphql_url(&self) -> ClientResult<Url> {
        join_path(&self.api_url, &[&self.graphql_path])
    }

    /// URL of an auth endpoint such as `login`, `signup` or `logout`.
    pub fn auth_url(&self, endpoint: &str) -> ClientResult<Url> {
        join_path(&self.api_url, &[&self.auth_path, endpoint])
    }
}

fn join_path(base: &str, segments: &[&str]) -> ClientResult<Url> {
    let mut url = Url::parse(base)?;
    let mut path = url.path().trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        path.push('/');
        path.push_str(segment);
    }
    url.set_path(&path);
    Ok(url)
}
