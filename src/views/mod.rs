//! Screens and their pure render state.
//!
//! Each page derives what to render from the session user and the cached
//! status of its query; nothing here stores a copy of server data.

pub mod dialog;
pub mod home;
pub mod question_dialog;
pub mod quiz_template;
pub mod route;
pub mod state;

pub use dialog::{DialogKind, DialogState};
pub use home::HomePage;
pub use question_dialog::{load_question, question_dialog_state, QuestionDialogState};
pub use quiz_template::QuizTemplatePage;
pub use route::{Navigator, Route};
pub use state::{derive_page_state, PageState};
