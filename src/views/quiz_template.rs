use tracing::info;

use crate::client::QuizClient;
use crate::errors::{ClientError, ClientResult};
use crate::graphql::operations::{GetQuizTemplate, IdVariables};
use crate::models::{Question, QuestionDraft, QuizTemplate, User};
use crate::session::Session;

use super::route::Route;
use super::state::{derive_page_state, PageState};

/// Detail screen for one quiz template and its questions.
///
/// The page is loading while it has no template id; a resolved `byId: null`
/// renders as an error.
pub struct QuizTemplatePage {
    session: Session,
    id: Option<String>,
}

impl QuizTemplatePage {
    pub fn new(session: Session, id: Option<String>) -> Self {
        Self { session, id }
    }

    pub fn for_route(session: Session, route: &Route) -> Self {
        Self::new(session, route.quiz_template_id().map(str::to_string))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn client(&self) -> &QuizClient {
        self.session.client()
    }

    fn require_id(&self) -> ClientResult<&str> {
        self.id.as_deref().ok_or(ClientError::NoData)
    }

    fn require_user(&self, action: &str) -> ClientResult<User> {
        self.session
            .user()
            .ok_or_else(|| ClientError::Anonymous(action.to_string()))
    }

    pub fn state(&self) -> PageState<QuizTemplate> {
        let user = self.session.user();
        if user.is_none() {
            return PageState::Anonymous;
        }
        let Some(id) = self.id.as_deref() else {
            return PageState::Loading;
        };
        let status = self
            .client()
            .status::<GetQuizTemplate>(&IdVariables::new(id))
            .and_then(|data| data.quiz_template.by_id);
        derive_page_state(user.as_ref(), true, status)
    }

    pub async fn load(&self) -> ClientResult<()> {
        if self.session.user().is_none() {
            return Ok(());
        }
        match self.id.as_deref() {
            Some(id) => {
                self.client()
                    .watch::<GetQuizTemplate>(&IdVariables::new(id))
                    .await
            }
            None => Ok(()),
        }
    }

    pub async fn rename(&self, name: &str) -> ClientResult<QuizTemplate> {
        let user = self.require_user("rename a quiz template")?;
        let id = self.require_id()?;
        let template = self.client().edit_quiz_template(&user, id, name).await?;
        info!(id, name = %template.name, "renamed quiz template");
        Ok(template)
    }

    /// Delete the template; resolves to the route to show next.
    pub async fn delete(&self) -> ClientResult<Route> {
        let id = self.require_id()?;
        let deleted = self.client().delete_quiz_template(id).await?;
        info!(id, deleted, "deleted quiz template");
        Ok(Route::Home)
    }

    pub async fn add_question(&self, draft: QuestionDraft) -> ClientResult<Question> {
        let id = self.require_id()?;
        self.client().create_question(id, draft).await
    }

    pub async fn edit_question(&self, question_id: &str, draft: QuestionDraft) -> ClientResult<bool> {
        let id = self.require_id()?;
        self.client().edit_question(question_id, id, draft).await
    }

    pub async fn delete_question(&self, question_id: &str) -> ClientResult<bool> {
        self.require_id()?;
        self.client().delete_question(question_id).await
    }
}
