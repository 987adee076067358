use std::cmp::max;
use std::fmt::Write;

use crate::app::{Body, DialogView, Screen};
use crate::views::{PageState, QuestionDialogState};

/// Table row wrapper for console display helpers.
#[derive(Debug)]
pub struct TableRow(pub Vec<String>);

impl TableRow {
    pub fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// Format a small ASCII table with column headers.
pub fn format_table(headers: &[&str], rows: &[TableRow]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, value) in row.0.iter().enumerate().take(widths.len()) {
            widths[idx] = max(widths[idx], value.chars().count());
        }
    }

    let divider = widths
        .iter()
        .map(|w| "-".repeat(*w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let render_row = |values: &[String]| {
        widths
            .iter()
            .enumerate()
            .map(|(idx, width)| {
                let value = values.get(idx).map(String::as_str).unwrap_or("");
                format!(" {:width$} ", value, width = *width)
            })
            .collect::<Vec<_>>()
            .join("|")
    };

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let _ = writeln!(out, "{}", divider);
    let _ = writeln!(out, "{}", render_row(&header));
    let _ = writeln!(out, "{}", divider);
    for row in rows {
        let _ = writeln!(out, "{}", render_row(&row.0));
    }
    let _ = writeln!(out, "{}", divider);
    out
}

fn page_state<T>(out: &mut String, state: &PageState<T>, ready: impl FnOnce(&mut String, &T)) {
    match state {
        PageState::Anonymous => {
            let _ = writeln!(out, "Log in to see your quiz templates (login <username> <password>).");
        }
        PageState::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        // every failure renders the same way; details go to the log
        PageState::Error(_) => {
            let _ = writeln!(out, "ERROR");
        }
        PageState::Ready(data) => ready(out, data),
    }
}

/// Render a screen the way the console shows it.
pub fn render_screen(screen: &Screen) -> String {
    let mut out = String::new();
    let who = screen
        .user
        .as_ref()
        .map(|u| format!("logged in as {}", u.username))
        .unwrap_or_else(|| "not logged in".to_string());
    let _ = writeln!(out, "== {} ({}) ==", screen.route, who);

    match &screen.body {
        Body::Home(state) => page_state(&mut out, state, |out, templates| {
            let _ = writeln!(out, "Quiz templates");
            if templates.is_empty() {
                let _ = writeln!(out, "(none yet, try create-template <name>)");
            } else {
                let rows: Vec<TableRow> = templates
                    .iter()
                    .map(|t| TableRow::from(vec![t.id.clone(), t.name.clone()]))
                    .collect();
                out.push_str(&format_table(&["id", "name"], &rows));
            }
        }),
        Body::QuizTemplate(state) => page_state(&mut out, state, |out, template| {
            let _ = writeln!(out, "Quiz template: {} [{}]", template.name, template.id);
            if template.questions.is_empty() {
                let _ = writeln!(out, "(no questions)");
            } else {
                let rows: Vec<TableRow> = template
                    .questions
                    .iter()
                    .map(|q| TableRow::from(vec![q.id.clone(), q.question.clone(), q.answer.clone()]))
                    .collect();
                out.push_str(&format_table(&["id", "question", "answer"], &rows));
            }
        }),
    }

    if let Some(dialog) = &screen.dialog {
        render_dialog(&mut out, dialog);
    }
    out
}

fn render_dialog(out: &mut String, dialog: &DialogView) {
    match dialog {
        DialogView::Login(mode) => {
            let _ = writeln!(out, "[{}] username / password", mode.title());
        }
        DialogView::CreateQuizTemplate => {
            let _ = writeln!(out, "[Create quiz template] name");
        }
        DialogView::EditQuizTemplate { current_name } => {
            let _ = writeln!(
                out,
                "[Edit quiz template] name: {}",
                current_name.as_deref().unwrap_or("")
            );
        }
        DialogView::DeleteQuizTemplate => {
            let _ = writeln!(out, "[Delete quiz template] are you sure?");
        }
        DialogView::AddQuestion => {
            let _ = writeln!(out, "[Add question] question / answer");
        }
        DialogView::EditQuestion(state) => match state {
            QuestionDialogState::Hidden => {}
            QuestionDialogState::Loading => {
                let _ = writeln!(out, "[Edit question] loading...");
            }
            QuestionDialogState::Failed(_) => {
                let _ = writeln!(out, "[Edit question] ERROR");
            }
            QuestionDialogState::Ready { question_id, draft } => {
                let _ = writeln!(out, "[Edit question {}]", question_id);
                let _ = writeln!(out, "  question: {}", draft.question);
                let _ = writeln!(out, "  answer:   {}", draft.answer);
            }
        },
    }
}

pub fn print_banner() {
    println!("Quiz console ready. Type 'help' for available commands, Ctrl+D to exit.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuizTemplateSummary, User};
    use crate::views::Route;

    #[test]
    fn test_format_table_pads_columns() {
        let rows = vec![TableRow::from(vec!["1".to_string(), "Capitals".to_string()])];
        let table = format_table(&["id", "name"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "----+----------");
        assert_eq!(lines[1], " id | name     ");
        assert_eq!(lines[3], " 1  | Capitals ");
    }

    #[test]
    fn test_render_error_is_uniform() {
        let screen = Screen {
            route: Route::QuizTemplate("x".to_string()),
            user: Some(User {
                id: "u1".to_string(),
                username: "alice".to_string(),
            }),
            body: Body::QuizTemplate(PageState::Error("Unexpected: no data".to_string())),
            dialog: None,
        };
        let text = render_screen(&screen);
        assert!(text.contains("logged in as alice"));
        assert!(text.contains("ERROR"));
        assert!(!text.contains("no data"));
    }

    #[test]
    fn test_render_home_list() {
        let screen = Screen {
            route: Route::Home,
            user: None,
            body: Body::Home(PageState::Ready(vec![QuizTemplateSummary {
                id: "t1".to_string(),
                name: "Rivers".to_string(),
            }])),
            dialog: Some(DialogView::CreateQuizTemplate),
        };
        let text = render_screen(&screen);
        assert!(text.starts_with("== / (not logged in) =="));
        assert!(text.contains("Rivers"));
        assert!(text.contains("[Create quiz template]"));
    }
}
