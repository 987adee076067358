//! The session context handed to every page.
//!
//! `Session` never stores a user of its own. The logged-in user is whatever the
//! cached `GetUser` result says, and the only way to change it is [`Session::refetch`].

use std::sync::Arc;

use tracing::{error, info};

use crate::auth::{AuthGateway, AuthMode, Credentials};
use crate::client::{FetchPolicy, QueryStatus, QuizClient};
use crate::errors::ClientResult;
use crate::graphql::operations::{GetUser, GetUserData, NoVariables};
use crate::models::User;

#[derive(Clone)]
pub struct Session {
    client: Arc<QuizClient>,
    auth: Arc<dyn AuthGateway>,
}

impl Session {
    pub fn new(client: Arc<QuizClient>, auth: Arc<dyn AuthGateway>) -> Self {
        Self { client, auth }
    }

    pub fn client(&self) -> &Arc<QuizClient> {
        &self.client
    }

    /// The current user, or `None` while anonymous or before the first fetch
    pub fn user(&self) -> Option<User> {
        self.status().data.and_then(|data| data.user)
    }

    pub fn status(&self) -> QueryStatus<GetUserData> {
        self.client.status::<GetUser>(&NoVariables {})
    }

    /// Fetch the session once; later calls are served from the cache.
    ///
    /// Failures are logged and leave the session anonymous.
    pub async fn load(&self) -> Option<User> {
        if let Err(err) = self.client.watch::<GetUser>(&NoVariables {}).await {
            error!("failed to load session: {}", err);
        }
        self.user()
    }

    /// Re-run the session query against the server and replace the cached user.
    pub async fn refetch(&self) -> ClientResult<Option<User>> {
        self.client.current_user(FetchPolicy::NetworkOnly).await
    }

    pub async fn login(&self, credentials: &Credentials) -> ClientResult<Option<User>> {
        self.authenticate(AuthMode::Login, credentials).await
    }

    pub async fn signup(&self, credentials: &Credentials) -> ClientResult<Option<User>> {
        self.authenticate(AuthMode::Signup, credentials).await
    }

    /// Submit credentials; only a successful response triggers a refetch.
    ///
    /// A rejected request leaves the cached session untouched.
    pub async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> ClientResult<Option<User>> {
        self.auth.authenticate(mode, credentials).await?;
        let user = self.refresh_after_auth().await;
        info!(
            mode = %mode,
            user = user.as_ref().map(|u| u.username.as_str()).unwrap_or("-"),
            "session refreshed"
        );
        Ok(user)
    }

    /// POST the logout; on success the session is refetched.
    pub async fn logout(&self) -> ClientResult<()> {
        self.auth.logout().await?;
        self.refresh_after_auth().await;
        Ok(())
    }

    // Failures are logged only; the cached session entry records them.
    async fn refresh_after_auth(&self) -> Option<User> {
        match self.refetch().await {
            Ok(user) => user,
            Err(err) => {
                error!("failed to refetch session: {}", err);
                None
            }
        }
    }
}
