use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{GraphQlRequest, GraphQlResponse};
use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult};

/// Sends one GraphQL request and returns the raw response envelope.
///
/// Implementations report network failures and non-2xx statuses as
/// [`ClientError::Transport`]; interpreting `data`/`errors` is left to the caller.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn execute(&self, request: &GraphQlRequest) -> ClientResult<GraphQlResponse>;
}

/// Build the HTTP client shared by the GraphQL transport and the auth gateway.
///
/// The cookie store carries the server's session cookie from `/api/login` to
/// `/graphql`, so both must use the same instance.
pub fn build_http_client(config: &ClientConfig) -> ClientResult<Client> {
    Client::builder()
        .cookie_store(true)
        .timeout(config.request_timeout())
        .user_agent(concat!("quizapp/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ClientError::from)
}

pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn from_config(client: Client, config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(client, config.graphql_url()?))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn execute(&self, request: &GraphQlRequest) -> ClientResult<GraphQlResponse> {
        debug!(operation = %request.operation_name, endpoint = %self.endpoint, "sending GraphQL request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Transport(format!(
                "{} returned {}: {}",
                request.operation_name, status, body
            )));
        }

        let envelope: GraphQlResponse = response.json().await?;
        Ok(envelope)
    }
}
