//! Line-oriented console over [`App`].
//!
//! Each command becomes one or more intents; after they settle the console
//! syncs the screen's queries and prints the rendered frame.

pub mod commands;
pub mod output;
pub mod prompt;

use std::io::{self, BufRead};

use anyhow::{anyhow, Result};
use atty::Stream;
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::debug;

use crate::app::{App, Intent, Outcome};
use crate::auth::{AuthMode, Credentials};
use crate::models::QuestionDraft;
use crate::views::{question_dialog_state, DialogKind, QuestionDialogState, Route};

use commands::{help_text, parse_line, ConsoleCommand};
use output::{print_banner, render_screen};

/// Result of one console line
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub exit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            exit: false,
        }
    }
}

/// Start the console: interactive when stdin is a terminal, batch otherwise.
pub async fn run_console(mut app: App) -> Result<()> {
    print_banner();
    app.sync().await;
    print!("{}", render_screen(&app.render()));

    if atty::is(Stream::Stdin) {
        run_interactive(&mut app).await
    } else {
        run_batch(&mut app).await
    }
}

async fn run_interactive(app: &mut App) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        let user = app.session().user();
        let prompt = prompt::render_prompt(user.as_ref(), app.route());
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if let Err(err) = editor.add_history_entry(trimmed) {
                    debug!("failed to record history entry: {}", err);
                }
                if process_line(app, trimmed).await {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("(interrupt)");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                return Err(anyhow!("reading console input: {err}"));
            }
        }
    }

    Ok(())
}

async fn run_batch(app: &mut App) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if process_line(app, trimmed).await {
            break;
        }
    }
    Ok(())
}

async fn process_line(app: &mut App, line: &str) -> bool {
    let reply = execute_line(app, line).await;
    print!("{}", reply.output);
    if !reply.output.is_empty() && !reply.output.ends_with('\n') {
        println!();
    }
    reply.exit
}

/// Run one console line against the app and collect what it prints.
pub async fn execute_line(app: &mut App, line: &str) -> Reply {
    let command = match parse_line(line) {
        Ok(command) => command,
        Err(message) => return Reply::text(message),
    };
    debug!(?command, "console command");

    let outcome = match command {
        ConsoleCommand::Help => return Reply::text(help_text()),
        ConsoleCommand::Exit => {
            return Reply {
                output: "Goodbye!".to_string(),
                exit: true,
            }
        }
        ConsoleCommand::Whoami => {
            app.sync().await;
            return Reply::text(match app.session().user() {
                Some(user) => format!("{} ({})", user.username, user.id),
                None => "anonymous".to_string(),
            });
        }
        ConsoleCommand::Show => Outcome::Settled,
        ConsoleCommand::Home => app.dispatch(Intent::Navigate(Route::Home)).await,
        ConsoleCommand::Open { id } => {
            let route = Route::parse(&format!("/quiz-template/{}", id));
            app.dispatch(Intent::Navigate(route)).await
        }
        ConsoleCommand::Back => app.dispatch(Intent::Back).await,
        ConsoleCommand::Login { username, password } => {
            authenticate(app, AuthMode::Login, Credentials::new(username, password)).await
        }
        ConsoleCommand::Signup { username, password } => {
            authenticate(app, AuthMode::Signup, Credentials::new(username, password)).await
        }
        ConsoleCommand::Logout => app.dispatch(Intent::Logout).await,
        ConsoleCommand::CreateTemplate { name } => {
            with_dialog(
                app,
                DialogKind::CreateQuizTemplate,
                Intent::CreateQuizTemplate { name },
            )
            .await
        }
        ConsoleCommand::RenameTemplate { name } => {
            with_dialog(
                app,
                DialogKind::EditQuizTemplate,
                Intent::EditQuizTemplate { name },
            )
            .await
        }
        ConsoleCommand::DeleteTemplate => {
            with_dialog(app, DialogKind::DeleteQuizTemplate, Intent::DeleteQuizTemplate).await
        }
        ConsoleCommand::AddQuestion { question, answer } => {
            with_dialog(
                app,
                DialogKind::AddQuestion,
                Intent::AddQuestion(QuestionDraft { question, answer }),
            )
            .await
        }
        ConsoleCommand::EditQuestion {
            id,
            question,
            answer,
        } => edit_question(app, id, question, answer).await,
        ConsoleCommand::DeleteQuestion { id } => {
            app.dispatch(Intent::DeleteQuestion { question_id: id }).await
        }
    };

    app.sync().await;
    let mut output = String::new();
    if let Outcome::Failed(message) = &outcome {
        output.push_str(&format!("error: {}\n", message));
    }
    output.push_str(&render_screen(&app.render()));
    Reply::text(output)
}

async fn authenticate(app: &mut App, mode: AuthMode, credentials: Credentials) -> Outcome {
    app.dispatch(Intent::OpenDialog(DialogKind::Login(AuthMode::Login)))
        .await;
    app.dispatch(Intent::SwitchAuthMode(mode)).await;
    app.dispatch(Intent::Authenticate { mode, credentials }).await
}

async fn with_dialog(app: &mut App, kind: DialogKind, submit: Intent) -> Outcome {
    app.dispatch(Intent::OpenDialog(kind)).await;
    app.dispatch(submit).await
}

/// Open the editor, wait for the stored question, then submit any overrides.
async fn edit_question(
    app: &mut App,
    id: String,
    question: Option<String>,
    answer: Option<String>,
) -> Outcome {
    app.dispatch(Intent::StartEditQuestion { question_id: id })
        .await;
    app.sync().await;

    let draft = match question_dialog_state(app.client(), app.dialog()) {
        QuestionDialogState::Ready { draft, .. } => draft,
        QuestionDialogState::Failed(message) => return Outcome::Failed(message),
        QuestionDialogState::Loading | QuestionDialogState::Hidden => {
            return Outcome::Failed("Question could not be loaded".to_string())
        }
    };
    if question.is_none() && answer.is_none() {
        return Outcome::Settled;
    }

    let draft = QuestionDraft {
        question: question.unwrap_or(draft.question),
        answer: answer.unwrap_or(draft.answer),
    };
    app.dispatch(Intent::EditQuestion(draft)).await
}
