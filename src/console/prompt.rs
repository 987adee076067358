use nu_ansi_term::Color;

use crate::models::User;
use crate::views::Route;

/// Prompt label such as `alice@/quiz-template/42`.
pub fn prompt_label(user: Option<&User>, route: &Route) -> String {
    let who = user.map(|u| u.username.as_str()).unwrap_or("anonymous");
    format!("{}@{}", who, route)
}

pub fn render_prompt(user: Option<&User>, route: &Route) -> String {
    let label = prompt_label(user, route);
    let color = if user.is_some() { Color::Cyan } else { Color::Yellow };
    format!("{} > ", color.bold().paint(label))
}
