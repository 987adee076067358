use crate::client::QuizClient;
use crate::errors::{ClientError, ClientResult};
use crate::graphql::operations::{GetQuestion, IdVariables};
use crate::models::QuestionDraft;

use super::dialog::{DialogKind, DialogState};

/// Render state of the question editor, derived from `GetQuestion(id)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionDialogState {
    /// Dialog closed or no question selected
    Hidden,
    Loading,
    /// The question could not be loaded; the dialog closes on the next sync
    Failed(String),
    /// Form pre-filled with the stored question
    Ready { question_id: String, draft: QuestionDraft },
}

pub fn question_dialog_state(client: &QuizClient, dialog: &DialogState) -> QuestionDialogState {
    let Some(id) = editing_question(dialog) else {
        return QuestionDialogState::Hidden;
    };
    let status = client
        .status::<GetQuestion>(&IdVariables::new(id))
        .and_then(|data| data.question.by_id);
    if let Some(message) = status.error {
        return QuestionDialogState::Failed(message);
    }
    match status.data {
        Some(question) => QuestionDialogState::Ready {
            question_id: question.id.clone(),
            draft: QuestionDraft::from(&question),
        },
        None if status.loading => QuestionDialogState::Loading,
        None => QuestionDialogState::Failed(ClientError::NoData.to_string()),
    }
}

/// Fetch the question being edited, if the editor is open.
pub async fn load_question(client: &QuizClient, dialog: &DialogState) -> ClientResult<()> {
    match editing_question(dialog) {
        Some(id) => client.watch::<GetQuestion>(&IdVariables::new(id)).await,
        None => Ok(()),
    }
}

fn editing_question(dialog: &DialogState) -> Option<&str> {
    if dialog.is_open(DialogKind::EditQuestion) {
        dialog.selected_question()
    } else {
        None
    }
}
