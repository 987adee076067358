//! In-memory stand-in for the quiz API.
//!
//! Implements both the GraphQL transport and the auth gateway over one shared
//! state, records every request it receives, and can be told to fail.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use quizapp::auth::{AuthGateway, AuthMode, Credentials};
use quizapp::graphql::{GraphQlErrorMessage, GraphQlRequest, GraphQlResponse, GraphQlTransport};
use quizapp::models::{Question, User};
use quizapp::{App, ClientError, ClientResult};

#[derive(Clone, Debug)]
pub struct StoredTemplate {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub questions: Vec<Question>,
}

#[derive(Default)]
pub struct FakeState {
    pub accounts: HashMap<String, (User, String)>,
    pub session: Option<User>,
    pub templates: Vec<StoredTemplate>,
    pub next_id: u32,
    /// Every GraphQL operation name and auth call, in arrival order
    pub log: Vec<String>,
    pub failing: HashSet<String>,
    pub reject_auth: Option<(u16, String)>,
    pub reject_logout: bool,
    /// Template ids answered with `byId: null`
    pub hidden_templates: HashSet<String>,
    /// Operations that apply their write but answer with data of the wrong shape
    pub garbled: HashSet<String>,
}

impl FakeState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn template(&self, id: &str) -> Option<&StoredTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    fn find_question(&self, id: &str) -> Option<&Question> {
        self.templates
            .iter()
            .flat_map(|t| t.questions.iter())
            .find(|q| q.id == id)
    }

    fn template_json(&self, id: &str) -> Value {
        if self.hidden_templates.contains(id) {
            return Value::Null;
        }
        match self.template(id) {
            Some(t) => json!({"id": t.id, "name": t.name, "questions": t.questions}),
            None => Value::Null,
        }
    }
}

#[derive(Default)]
pub struct FakeQuizApi {
    state: Mutex<FakeState>,
}

fn str_var<'a>(variables: &'a Value, pointer: &str) -> &'a str {
    variables.pointer(pointer).and_then(Value::as_str).unwrap_or("")
}

impl FakeQuizApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn add_account(&self, username: &str, password: &str) -> User {
        let mut state = self.state();
        let user = User {
            id: state.next_id("user"),
            username: username.to_string(),
        };
        state
            .accounts
            .insert(username.to_string(), (user.clone(), password.to_string()));
        user
    }

    pub fn add_template(&self, owner: &User, name: &str, questions: &[(&str, &str)]) -> String {
        let mut state = self.state();
        let id = state.next_id("qt");
        let questions = questions
            .iter()
            .map(|(question, answer)| Question {
                id: state.next_id("q"),
                question: question.to_string(),
                answer: answer.to_string(),
            })
            .collect();
        state.templates.push(StoredTemplate {
            id: id.clone(),
            name: name.to_string(),
            user_id: owner.id.clone(),
            questions,
        });
        id
    }

    pub fn fail(&self, operation: &str) {
        self.state().failing.insert(operation.to_string());
    }

    pub fn garble(&self, operation: &str) {
        self.state().garbled.insert(operation.to_string());
    }

    pub fn recover(&self, operation: &str) {
        self.state().failing.remove(operation);
    }

    pub fn log(&self) -> Vec<String> {
        self.state().log.clone()
    }

    pub fn clear_log(&self) {
        self.state().log.clear();
    }

    pub fn count(&self, operation: &str) -> usize {
        self.state().log.iter().filter(|op| *op == operation).count()
    }

    pub fn app(self: &Arc<Self>) -> App {
        App::from_parts(self.clone(), self.clone())
    }

    fn respond(&self, request: &GraphQlRequest) -> GraphQlResponse {
        let mut state = self.state();
        state.log.push(request.operation_name.clone());
        if state.failing.contains(&request.operation_name) {
            return GraphQlResponse::with_errors(vec![GraphQlErrorMessage::new(format!(
                "{} failed",
                request.operation_name
            ))]);
        }

        let vars = &request.variables;
        let data = match request.operation_name.as_str() {
            "GetUser" => json!({"user": state.session}),
            "GetQuizTemplates" => {
                let user_id = str_var(vars, "/userId");
                let list: Vec<Value> = state
                    .templates
                    .iter()
                    .filter(|t| t.user_id == user_id)
                    .map(|t| json!({"id": t.id, "name": t.name}))
                    .collect();
                json!({"quizTemplate": {"byUserId": list}})
            }
            "GetQuizTemplate" => {
                json!({"quizTemplate": {"byId": state.template_json(str_var(vars, "/id"))}})
            }
            "CreateQuizTemplate" => {
                let id = state.next_id("qt");
                let template = StoredTemplate {
                    id: id.clone(),
                    name: str_var(vars, "/input/name").to_string(),
                    user_id: str_var(vars, "/input/userId").to_string(),
                    questions: Vec::new(),
                };
                state.templates.push(template);
                json!({"quizTemplate": {"create": {"id": id}}})
            }
            "EditQuizTemplate" => {
                let id = str_var(vars, "/id").to_string();
                let name = str_var(vars, "/input/name").to_string();
                match state.templates.iter_mut().find(|t| t.id == id) {
                    Some(t) => t.name = name,
                    None => {
                        return GraphQlResponse::with_errors(vec![GraphQlErrorMessage::new(
                            "quiz template not found",
                        )])
                    }
                }
                json!({"quizTemplate": {"edit": state.template_json(&id)}})
            }
            "DeleteQuizTemplate" => {
                let id = str_var(vars, "/id");
                let before = state.templates.len();
                state.templates.retain(|t| t.id != id);
                let deleted = state.templates.len() < before;
                json!({"quizTemplate": {"deleteById": deleted}})
            }
            "GetQuestion" => {
                let question = state.find_question(str_var(vars, "/id")).cloned();
                json!({"question": {"byId": question}})
            }
            "CreateQuestion" => {
                let template_id = str_var(vars, "/input/quizTemplateId").to_string();
                let question = Question {
                    id: state.next_id("q"),
                    question: str_var(vars, "/input/question").to_string(),
                    answer: str_var(vars, "/input/answer").to_string(),
                };
                match state.templates.iter_mut().find(|t| t.id == template_id) {
                    Some(t) => {
                        t.questions.push(question.clone());
                        json!({"question": {"create": question}})
                    }
                    None => {
                        return GraphQlResponse::with_errors(vec![GraphQlErrorMessage::new(
                            "quiz template not found",
                        )])
                    }
                }
            }
            "EditQuestion" => {
                let id = str_var(vars, "/id").to_string();
                let text = str_var(vars, "/input/question").to_string();
                let answer = str_var(vars, "/input/answer").to_string();
                let mut edited = false;
                for t in state.templates.iter_mut() {
                    if let Some(q) = t.questions.iter_mut().find(|q| q.id == id) {
                        q.question = text.clone();
                        q.answer = answer.clone();
                        edited = true;
                    }
                }
                json!({"question": {"edit": edited}})
            }
            "DeleteQuestion" => {
                let id = str_var(vars, "/id").to_string();
                let mut deleted = false;
                for t in state.templates.iter_mut() {
                    let before = t.questions.len();
                    t.questions.retain(|q| q.id != id);
                    deleted |= t.questions.len() < before;
                }
                json!({"question": {"deleteById": deleted}})
            }
            other => {
                return GraphQlResponse::with_errors(vec![GraphQlErrorMessage::new(format!(
                    "unknown operation {}",
                    other
                ))])
            }
        };
        if state.garbled.contains(&request.operation_name) {
            return GraphQlResponse::with_data(json!({"unexpected": data}));
        }
        GraphQlResponse::with_data(data)
    }
}

#[async_trait]
impl GraphQlTransport for FakeQuizApi {
    async fn execute(&self, request: &GraphQlRequest) -> ClientResult<GraphQlResponse> {
        Ok(self.respond(request))
    }
}

#[async_trait]
impl AuthGateway for FakeQuizApi {
    async fn authenticate(&self, mode: AuthMode, credentials: &Credentials) -> ClientResult<()> {
        let mut state = self.state();
        state.log.push(format!("auth:{}", mode.endpoint()));
        if let Some((status, body)) = state.reject_auth.clone() {
            return Err(ClientError::AuthFailed { status, body });
        }

        match mode {
            AuthMode::Login => match state.accounts.get(&credentials.username).cloned() {
                Some((user, password)) if password == credentials.password => {
                    state.session = Some(user);
                    Ok(())
                }
                _ => Err(ClientError::AuthFailed {
                    status: 401,
                    body: "Invalid username or password".to_string(),
                }),
            },
            AuthMode::Signup => {
                if state.accounts.contains_key(&credentials.username) {
                    return Err(ClientError::AuthFailed {
                        status: 409,
                        body: "Username taken".to_string(),
                    });
                }
                let user = User {
                    id: state.next_id("user"),
                    username: credentials.username.clone(),
                };
                state.accounts.insert(
                    credentials.username.clone(),
                    (user.clone(), credentials.password.clone()),
                );
                state.session = Some(user);
                Ok(())
            }
        }
    }

    async fn logout(&self) -> ClientResult<()> {
        let mut state = self.state();
        state.log.push("auth:logout".to_string());
        if state.reject_logout {
            return Err(ClientError::AuthFailed {
                status: 500,
                body: "logout failed".to_string(),
            });
        }
        state.session = None;
        Ok(())
    }
}

/// Log of GraphQL operations only, without auth calls
pub fn operations(log: &[String]) -> Vec<&str> {
    log.iter()
        .map(String::as_str)
        .filter(|op| !op.starts_with("auth:"))
        .collect()
}
