//! Basic-auth side channel for login, signup and logout.
//!
//! These endpoints are plain HTTP, not GraphQL. A successful login or signup
//! sets the server's session cookie; the caller is expected to refetch the
//! session afterwards rather than trusting anything returned here.

use std::fmt;

use async_trait::async_trait;
use base64::prelude::*;
use reqwest::{header::AUTHORIZATION, Client};
use tracing::{error, info};

use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    /// Endpoint name under the auth path prefix
    pub fn endpoint(&self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::Signup => "signup",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Signup",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Standard base64 of the UTF-8 bytes of `username:password`
    pub fn basic_token(&self) -> String {
        BASE64_STANDARD.encode(format!("{}:{}", self.username, self.password))
    }

    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.basic_token())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn authenticate(&self, mode: AuthMode, credentials: &Credentials) -> ClientResult<()>;

    async fn logout(&self) -> ClientResult<()>;
}

pub struct HttpAuthGateway {
    client: Client,
    config: ClientConfig,
}

impl HttpAuthGateway {
    pub fn new(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    async fn check(&self, action: &str, response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            status = status.as_u16(),
            reason = status.canonical_reason().unwrap_or(""),
            "Failed to {}",
            action
        );
        error!("{}", body);

        Err(ClientError::AuthFailed {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn authenticate(&self, mode: AuthMode, credentials: &Credentials) -> ClientResult<()> {
        let url = self.config.auth_url(mode.endpoint())?;
        info!(mode = %mode, username = %credentials.username, "submitting credentials");

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, credentials.authorization_header())
            .send()
            .await?;

        self.check(mode.endpoint(), response).await
    }

    async fn logout(&self) -> ClientResult<()> {
        let url = self.config.auth_url("logout")?;
        info!("logging out");

        let response = self.client.post(url).send().await?;
        self.check("logout", response).await
    }
}
