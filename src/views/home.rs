use tracing::info;

use crate::client::QuizClient;
use crate::errors::{ClientError, ClientResult};
use crate::graphql::operations::GetQuizTemplates;
use crate::models::QuizTemplateSummary;
use crate::session::Session;

use super::route::Route;
use super::state::{derive_page_state, PageState};

/// The home screen: the session user's quiz templates.
pub struct HomePage {
    session: Session,
}

impl HomePage {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    fn client(&self) -> &QuizClient {
        self.session.client()
    }

    pub fn state(&self) -> PageState<Vec<QuizTemplateSummary>> {
        let user = self.session.user();
        let status = match &user {
            Some(user) => self
                .client()
                .status::<GetQuizTemplates>(&QuizClient::templates_variables(user))
                .and_then(|data| Some(data.quiz_template.by_user_id)),
            None => return PageState::Anonymous,
        };
        derive_page_state(user.as_ref(), true, status)
    }

    /// Issue the templates query for the session user; a no-op while anonymous.
    pub async fn load(&self) -> ClientResult<()> {
        match self.session.user() {
            Some(user) => {
                self.client()
                    .watch::<GetQuizTemplates>(&QuizClient::templates_variables(&user))
                    .await
            }
            None => Ok(()),
        }
    }

    /// Create a template and return the route of its detail page.
    pub async fn create_quiz_template(&self, name: &str) -> ClientResult<Route> {
        let user = self
            .session
            .user()
            .ok_or_else(|| ClientError::Anonymous("create a quiz template".to_string()))?;
        let id = self.client().create_quiz_template(&user, name).await?;
        info!(id = %id, "created quiz template");
        Ok(Route::QuizTemplate(id))
    }
}
