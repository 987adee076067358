use clap::{CommandFactory, Parser, Subcommand};

/// Top-level parser executed for each console input line.
#[derive(Parser, Debug)]
#[command(
    name = "",
    no_binary_name = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

/// Supported commands within the console.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Go to the list of your quiz templates.
    #[command(name = "home")]
    Home,
    /// Open a quiz template by id.
    #[command(name = "open")]
    Open {
        /// Quiz template identifier.
        id: String,
    },
    /// Go back to the previous screen.
    #[command(name = "back")]
    Back,
    /// Redraw the current screen.
    #[command(name = "show")]
    Show,
    /// Print the logged-in user.
    #[command(name = "whoami")]
    Whoami,
    /// Log in with a username and password.
    #[command(name = "login")]
    Login { username: String, password: String },
    /// Create an account and log in.
    #[command(name = "signup")]
    Signup { username: String, password: String },
    #[command(name = "logout")]
    Logout,
    /// Create a quiz template and open it.
    #[command(name = "create-template")]
    CreateTemplate { name: String },
    /// Rename the open quiz template.
    #[command(name = "rename-template")]
    RenameTemplate { name: String },
    /// Delete the open quiz template.
    #[command(name = "delete-template")]
    DeleteTemplate,
    /// Add a question to the open quiz template.
    #[command(name = "add-question")]
    AddQuestion {
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },
    /// Edit a question; without flags the stored values are shown.
    #[command(name = "edit-question")]
    EditQuestion {
        /// Question identifier.
        id: String,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
    },
    /// Delete a question from the open quiz template.
    #[command(name = "delete-question")]
    DeleteQuestion { id: String },
    #[command(name = "help")]
    Help,
    #[command(name = "exit", alias = "quit")]
    Exit,
}

/// Parse one input line; quoting works like a shell.
pub fn parse_line(line: &str) -> Result<ConsoleCommand, String> {
    let words = split_line(line)?;
    ConsoleLine::try_parse_from(words)
        .map(|parsed| parsed.command)
        .map_err(|err| err.to_string())
}

pub fn help_text() -> String {
    ConsoleLine::command().render_help().to_string()
}

/// Split on whitespace, honouring single quotes, double quotes and backslashes.
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_word = true;
                }
                None => return Err("trailing backslash".to_string()),
            },
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
