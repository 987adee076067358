use crate::auth::AuthMode;

/// Which dialog is open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Login(AuthMode),
    CreateQuizTemplate,
    EditQuizTemplate,
    DeleteQuizTemplate,
    AddQuestion,
    EditQuestion,
}

/// At most one open dialog plus the question it targets, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogState {
    open: Option<DialogKind>,
    selected_question: Option<String>,
}

impl DialogState {
    pub fn open(&mut self, kind: DialogKind) {
        self.open = Some(kind);
    }

    /// Open the question editor for `question_id`.
    pub fn edit_question(&mut self, question_id: impl Into<String>) {
        self.selected_question = Some(question_id.into());
        self.open = Some(DialogKind::EditQuestion);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Switch the login dialog between login and signup; no-op otherwise.
    pub fn switch_auth_mode(&mut self, mode: AuthMode) {
        if let Some(DialogKind::Login(_)) = self.open {
            self.open = Some(DialogKind::Login(mode));
        }
    }

    pub fn current(&self) -> Option<DialogKind> {
        self.open
    }

    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.open == Some(kind)
    }

    /// Question targeted by the editor; kept after close so reopening is cheap
    pub fn selected_question(&self) -> Option<&str> {
        self.selected_question.as_deref()
    }

    pub fn auth_mode(&self) -> Option<AuthMode> {
        match self.open {
            Some(DialogKind::Login(mode)) => Some(mode),
            _ => None,
        }
    }
}
