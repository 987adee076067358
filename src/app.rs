//! Application shell: routing, dialogs and the intents that drive them.
//!
//! [`App::dispatch`] applies one user action at a time and only returns once
//! every request it triggered (including refetches) has settled, so dialogs
//! close and navigation happens strictly after the server agreed.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::auth::{AuthGateway, AuthMode, Credentials, HttpAuthGateway};
use crate::client::QuizClient;
use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult};
use crate::graphql::transport::build_http_client;
use crate::graphql::{GraphQlTransport, HttpTransport};
use crate::models::{QuestionDraft, QuizTemplate, QuizTemplateSummary, User};
use crate::session::Session;
use crate::views::{
    load_question, question_dialog_state, DialogKind, DialogState, HomePage, Navigator, PageState,
    QuestionDialogState, QuizTemplatePage, Route,
};

/// Every action a user can take
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Navigate(Route),
    Back,
    OpenDialog(DialogKind),
    CloseDialog,
    SwitchAuthMode(AuthMode),
    Authenticate {
        mode: AuthMode,
        credentials: Credentials,
    },
    Logout,
    CreateQuizTemplate {
        name: String,
    },
    EditQuizTemplate {
        name: String,
    },
    DeleteQuizTemplate,
    StartEditQuestion {
        question_id: String,
    },
    AddQuestion(QuestionDraft),
    EditQuestion(QuestionDraft),
    DeleteQuestion {
        question_id: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Settled,
    Navigated(Route),
    /// The action failed; dialogs and route are unchanged
    Failed(String),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Home(PageState<Vec<QuizTemplateSummary>>),
    QuizTemplate(PageState<QuizTemplate>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DialogView {
    Login(AuthMode),
    CreateQuizTemplate,
    /// Rename form, pre-filled with the current name once loaded
    EditQuizTemplate { current_name: Option<String> },
    DeleteQuizTemplate,
    AddQuestion,
    EditQuestion(QuestionDialogState),
}

/// Everything needed to draw one frame
#[derive(Clone, Debug, PartialEq)]
pub struct Screen {
    pub route: Route,
    /// Session user for the header; `None` shows a login link
    pub user: Option<User>,
    pub body: Body,
    pub dialog: Option<DialogView>,
}

pub struct App {
    session: Session,
    navigator: Navigator,
    dialog: DialogState,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            navigator: Navigator::default(),
            dialog: DialogState::default(),
        }
    }

    pub fn from_parts(transport: Arc<dyn GraphQlTransport>, auth: Arc<dyn AuthGateway>) -> Self {
        let client = Arc::new(QuizClient::new(transport));
        Self::new(Session::new(client, auth))
    }

    /// Wire the HTTP transport and auth gateway around one cookie-sharing client.
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let http = build_http_client(config)?;
        let transport = HttpTransport::from_config(http.clone(), config)?;
        info!(endpoint = %transport.endpoint(), "connecting");
        let auth = HttpAuthGateway::new(http, config.clone());
        Ok(Self::from_parts(Arc::new(transport), Arc::new(auth)))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn client(&self) -> &QuizClient {
        self.session.client()
    }

    pub fn route(&self) -> &Route {
        self.navigator.current()
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    fn home_page(&self) -> HomePage {
        HomePage::new(self.session.clone())
    }

    fn template_page(&self) -> Option<QuizTemplatePage> {
        self.route().quiz_template_id()?;
        Some(QuizTemplatePage::for_route(
            self.session.clone(),
            self.route(),
        ))
    }

    /// Issue whatever the current screen still needs.
    ///
    /// Queries that already have an entry are left alone, including failed ones.
    pub async fn sync(&mut self) {
        self.session.load().await;

        let page = match self.template_page() {
            Some(page) => page.load().await,
            None => self.home_page().load().await,
        };
        if let Err(err) = page {
            debug!("page query settled with an error: {}", err);
        }

        if let Err(err) = load_question(self.client(), &self.dialog).await {
            debug!("question query settled with an error: {}", err);
        }
        if let QuestionDialogState::Failed(message) =
            question_dialog_state(self.client(), &self.dialog)
        {
            warn!("closing question editor: {}", message);
            self.dialog.close();
        }
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Navigate(route) => self.go(route),
            Intent::Back => {
                if self.navigator.back() {
                    self.dialog.close();
                    self.client().clear_failed();
                    Outcome::Navigated(self.route().clone())
                } else {
                    Outcome::Settled
                }
            }
            Intent::OpenDialog(kind) => {
                self.dialog.open(kind);
                Outcome::Settled
            }
            Intent::CloseDialog => {
                self.dialog.close();
                Outcome::Settled
            }
            Intent::SwitchAuthMode(mode) => {
                self.dialog.switch_auth_mode(mode);
                Outcome::Settled
            }
            Intent::Authenticate { mode, credentials } => {
                match self.session.authenticate(mode, &credentials).await {
                    Ok(_) => self.settle(),
                    Err(err) => Self::fail(err),
                }
            }
            Intent::Logout => match self.session.logout().await {
                Ok(()) => self.go(Route::Home),
                Err(err) => Self::fail(err),
            },
            Intent::CreateQuizTemplate { name } => {
                match self.home_page().create_quiz_template(&name).await {
                    Ok(route) => self.go(route),
                    Err(err) => Self::fail(err),
                }
            }
            Intent::EditQuizTemplate { name } => {
                let Some(page) = self.template_page() else {
                    return Self::no_template();
                };
                match page.rename(&name).await {
                    Ok(_) => self.settle(),
                    Err(err) => Self::fail(err),
                }
            }
            Intent::DeleteQuizTemplate => {
                let Some(page) = self.template_page() else {
                    return Self::no_template();
                };
                match page.delete().await {
                    Ok(route) => self.go(route),
                    Err(err) => Self::fail(err),
                }
            }
            Intent::StartEditQuestion { question_id } => {
                self.dialog.edit_question(question_id);
                Outcome::Settled
            }
            Intent::AddQuestion(draft) => {
                let Some(page) = self.template_page() else {
                    return Self::no_template();
                };
                match page.add_question(draft).await {
                    Ok(_) => self.settle(),
                    Err(err) => Self::fail(err),
                }
            }
            Intent::EditQuestion(draft) => {
                let Some(page) = self.template_page() else {
                    return Self::no_template();
                };
                let Some(question_id) = self.dialog.selected_question().map(str::to_string) else {
                    return Outcome::Failed("No question selected".to_string());
                };
                match page.edit_question(&question_id, draft).await {
                    Ok(_) => self.settle(),
                    Err(err) => Self::fail(err),
                }
            }
            Intent::DeleteQuestion { question_id } => {
                let Some(page) = self.template_page() else {
                    return Self::no_template();
                };
                match page.delete_question(&question_id).await {
                    Ok(_) => Outcome::Settled,
                    Err(err) => Self::fail(err),
                }
            }
        }
    }

    fn go(&mut self, route: Route) -> Outcome {
        info!(route = %route, "navigate");
        self.navigator.navigate(route.clone());
        self.dialog.close();
        self.client().clear_failed();
        Outcome::Navigated(route)
    }

    fn settle(&mut self) -> Outcome {
        self.dialog.close();
        Outcome::Settled
    }

    fn fail(err: ClientError) -> Outcome {
        debug!("intent failed: {}", err);
        Outcome::Failed(err.to_string())
    }

    fn no_template() -> Outcome {
        Outcome::Failed("No quiz template is open".to_string())
    }

    /// Derive the current frame; never touches the network.
    pub fn render(&self) -> Screen {
        let body = match self.template_page() {
            Some(page) => Body::QuizTemplate(page.state()),
            None => Body::Home(self.home_page().state()),
        };
        let dialog = self.dialog.current().map(|kind| match kind {
            DialogKind::Login(mode) => DialogView::Login(mode),
            DialogKind::CreateQuizTemplate => DialogView::CreateQuizTemplate,
            DialogKind::EditQuizTemplate => DialogView::EditQuizTemplate {
                current_name: match &body {
                    Body::QuizTemplate(PageState::Ready(template)) => Some(template.name.clone()),
                    _ => None,
                },
            },
            DialogKind::DeleteQuizTemplate => DialogView::DeleteQuizTemplate,
            DialogKind::AddQuestion => DialogView::AddQuestion,
            DialogKind::EditQuestion => {
                DialogView::EditQuestion(question_dialog_state(self.client(), &self.dialog))
            }
        });
        Screen {
            route: self.route().clone(),
            user: self.session.user(),
            body,
            dialog,
        }
    }
}
