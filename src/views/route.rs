use std::fmt;

const QUIZ_TEMPLATE_PREFIX: &str = "/quiz-template/";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    QuizTemplate(String),
}

impl Route {
    /// Parse a path; anything unrecognised falls back to home.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        match path.strip_prefix(QUIZ_TEMPLATE_PREFIX) {
            Some(id) => {
                let id = id.trim_end_matches('/');
                if id.is_empty() || id.contains('/') {
                    Route::Home
                } else {
                    Route::QuizTemplate(id.to_string())
                }
            }
            None => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::QuizTemplate(id) => format!("{}{}", QUIZ_TEMPLATE_PREFIX, id),
        }
    }

    pub fn quiz_template_id(&self) -> Option<&str> {
        match self {
            Route::QuizTemplate(id) => Some(id),
            Route::Home => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// History stack; the last entry is the current route.
#[derive(Clone, Debug)]
pub struct Navigator {
    history: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            history: vec![start],
        }
    }

    pub fn current(&self) -> &Route {
        // history is never empty
        &self.history[self.history.len() - 1]
    }

    pub fn navigate(&mut self, route: Route) {
        if self.current() != &route {
            self.history.push(route);
        }
    }

    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }
}
