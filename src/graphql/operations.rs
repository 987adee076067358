//! The fixed catalog of GraphQL operations the client may issue.
//!
//! Each operation is a unit type implementing [`Operation`]: its document,
//! variable and response shapes, whether it needs a logged-in user, and which
//! queries must be refetched after it succeeds. Nothing outside this catalog is
//! ever sent to the server.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::models::{
    CreateQuestionInput, CreateQuizTemplateInput, EditQuestionInput, EditQuizTemplateInput,
    Question, QuizTemplate, QuizTemplateSummary, User,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
        }
    }
}

/// Whether an operation may be issued without a session user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationScope {
    Public,
    UserScoped,
}

impl fmt::Display for OperationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationScope::Public => write!(f, "public"),
            OperationScope::UserScoped => write!(f, "user"),
        }
    }
}

pub trait Operation {
    const NAME: &'static str;
    const KIND: OperationKind;
    const SCOPE: OperationScope;
    const DOCUMENT: &'static str;
    /// Query names to re-run once this operation has succeeded
    const REFETCH: &'static [&'static str] = &[];

    type Variables: Serialize + Send + Sync;
    type Data: DeserializeOwned + Send;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NoVariables {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IdVariables {
    pub id: String,
}

impl IdVariables {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdVariables {
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputVariables<I> {
    pub input: I,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EditVariables<I> {
    pub id: String,
    pub input: I,
}

// Response shapes. Field names mirror the selection sets below.

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GetUserData {
    pub user: Option<User>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuizTemplatesData {
    pub quiz_template: QuizTemplatesByUser,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizTemplatesByUser {
    pub by_user_id: Vec<QuizTemplateSummary>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuizTemplateData {
    pub quiz_template: QuizTemplateById,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizTemplateById {
    pub by_id: Option<QuizTemplate>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizTemplateData {
    pub quiz_template: CreatedQuizTemplate,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreatedQuizTemplate {
    pub create: CreatedId,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreatedId {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditQuizTemplateData {
    pub quiz_template: EditedQuizTemplate,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EditedQuizTemplate {
    pub edit: QuizTemplate,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuizTemplateData {
    pub quiz_template: DeleteResult,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EditResult {
    pub edit: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub delete_by_id: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GetQuestionData {
    pub question: QuestionById,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionById {
    pub by_id: Option<Question>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreateQuestionData {
    pub question: CreatedQuestion,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreatedQuestion {
    pub create: Question,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EditQuestionData {
    pub question: EditResult,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DeleteQuestionData {
    pub question: DeleteResult,
}

pub struct GetUser;

impl Operation for GetUser {
    const NAME: &'static str = "GetUser";
    const KIND: OperationKind = OperationKind::Query;
    const SCOPE: OperationScope = OperationScope::Public;
    const DOCUMENT: &'static str = r#"query GetUser {
  user {
    id
    username
  }
}"#;

    type Variables = NoVariables;
    type Data = GetUserData;
}

pub struct GetQuizTemplates;

impl Operation for GetQuizTemplates {
    const NAME: &'static str = "GetQuizTemplates";
    const KIND: OperationKind = OperationKind::Query;
    const SCOPE: OperationScope = OperationScope::UserScoped;
    const DOCUMENT: &'static str = r#"query GetQuizTemplates($userId: ID!) {
  quizTemplate {
    byUserId(userId: $userId) {
      id
      name
    }
  }
}"#;

    type Variables = UserIdVariables;
    type Data = GetQuizTemplatesData;
}

pub struct GetQuizTemplate;

impl Operation for GetQuizTemplate {
    const NAME: &'static str = "GetQuizTemplate";
    const KIND: OperationKind = OperationKind::Query;
    const SCOPE: OperationScope = OperationScope::UserScoped;
    const DOCUMENT: &'static str = r#"query GetQuizTemplate($id: ID!) {
  quizTemplate {
    byId(id: $id) {
      id
      name
      questions {
        answer
        id
        question
      }
    }
  }
}"#;

    type Variables = IdVariables;
    type Data = GetQuizTemplateData;
}

pub struct CreateQuizTemplate;

impl Operation for CreateQuizTemplate {
    const NAME: &'static str = "CreateQuizTemplate";
    const KIND: OperationKind = OperationKind::Mutation;
    const SCOPE: OperationScope = OperationScope::UserScoped;
    const DOCUMENT: &'static str = r#"mutation CreateQuizTemplate($input: CreateQuizTemplate!) {
  quizTemplate {
    create(input: $input) {
      id
    }
  }
}"#;
    const REFETCH: &'static [&'static str] = &[GetQuizTemplates::NAME];

    type Variables = InputVariables<CreateQuizTemplateInput>;
    type Data = CreateQuizTemplateData;
}

pub struct EditQuizTemplate;

impl Operation for EditQuizTemplate {
    const NAME: &'static str = "EditQuizTemplate";
    const KIND: OperationKind = OperationKind::Mutation;
    const SCOPE: OperationScope = OperationScope::UserScoped;
    const DOCUMENT: &'static str = r#"mutation EditQuizTemplate($id: ID!, $input: EditQuizTemplate!) {
  quizTemplate {
    edit(id: $id, input: $input) {
      id
      name
      questions {
        answer
        id
        question
      }
    }
  }
}"#;
    const REFETCH: &'static [&'static str] = &[GetQuizTemplate::NAME, GetQuizTemplates::NAME];

    type Variables = EditVariables<EditQuizTemplateInput>;
    type Data = EditQuizTemplateData;
}

pub struct DeleteQuizTemplate;

impl Operation for DeleteQuizTemplate {
    const NAME: &'static str = "DeleteQuizTemplate";
    const KIND: OperationKind = OperationKind::Mutation;
    const SCOPE: OperationScope = OperationScope::Public;
    const DOCUMENT: &'static str = r#"mutation DeleteQuizTemplate($id: ID!) {
  quizTemplate {
    deleteById(id: $id)
  }
}"#;
    const REFETCH: &'static [&'static str] = &[GetQuizTemplates::NAME];

    type Variables = IdVariables;
    type Data = DeleteQuizTemplateData;
}

pub struct GetQuestion;

impl Operation for GetQuestion {
    const NAME: &'static str = "GetQuestion";
    const KIND: OperationKind = OperationKind::Query;
    const SCOPE: OperationScope = OperationScope::Public;
    const DOCUMENT: &'static str = r#"query GetQuestion($id: ID!) {
  question {
    byId(id: $id) {
      answer
      id
      question
    }
  }
}"#;

    type Variables = IdVariables;
    type Data = GetQuestionData;
}

pub struct CreateQuestion;

impl Operation for CreateQuestion {
    const NAME: &'static str = "CreateQuestion";
    const KIND: OperationKind = OperationKind::Mutation;
    const SCOPE: OperationScope = OperationScope::Public;
    const DOCUMENT: &'static str = r#"mutation CreateQuestion($input: CreateQuestion!) {
  question {
    create(input: $input) {
      answer
      id
      question
    }
  }
}"#;
    const REFETCH: &'static [&'static str] = &[GetQuizTemplate::NAME];

    type Variables = InputVariables<CreateQuestionInput>;
    type Data = CreateQuestionData;
}

pub struct EditQuestion;

impl Operation for EditQuestion {
    const NAME: &'static str = "EditQuestion";
    const KIND: OperationKind = OperationKind::Mutation;
    const SCOPE: OperationScope = OperationScope::Public;
    const DOCUMENT: &'static str = r#"mutation EditQuestion($id: ID!, $input: EditQuestion!) {
  question {
    edit(id: $id, input: $input)
  }
}"#;
    const REFETCH: &'static [&'static str] = &[GetQuizTemplate::NAME];

    type Variables = EditVariables<EditQuestionInput>;
    type Data = EditQuestionData;
}

pub struct DeleteQuestion;

impl Operation for DeleteQuestion {
    const NAME: &'static str = "DeleteQuestion";
    const KIND: OperationKind = OperationKind::Mutation;
    const SCOPE: OperationScope = OperationScope::Public;
    const DOCUMENT: &'static str = r#"mutation DeleteQuestion($id: ID!) {
  question {
    deleteById(id: $id)
  }
}"#;
    const REFETCH: &'static [&'static str] = &[GetQuizTemplate::NAME];

    type Variables = IdVariables;
    type Data = DeleteQuestionData;
}

/// Static description of one catalog entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationInfo {
    pub name: &'static str,
    pub kind: OperationKind,
    pub scope: OperationScope,
    pub document: &'static str,
    pub refetch: &'static [&'static str],
}

impl OperationInfo {
    pub fn of<O: Operation>() -> Self {
        Self {
            name: O::NAME,
            kind: O::KIND,
            scope: O::SCOPE,
            document: O::DOCUMENT,
            refetch: O::REFETCH,
        }
    }
}

pub fn catalog() -> Vec<OperationInfo> {
    vec![
        OperationInfo::of::<GetUser>(),
        OperationInfo::of::<GetQuizTemplates>(),
        OperationInfo::of::<GetQuizTemplate>(),
        OperationInfo::of::<CreateQuizTemplate>(),
        OperationInfo::of::<EditQuizTemplate>(),
        OperationInfo::of::<DeleteQuizTemplate>(),
        OperationInfo::of::<GetQuestion>(),
        OperationInfo::of::<CreateQuestion>(),
        OperationInfo::of::<EditQuestion>(),
        OperationInfo::of::<DeleteQuestion>(),
    ]
}

pub fn find(name: &str) -> Option<OperationInfo> {
    catalog()
        .into_iter()
        .find(|info| info.name.eq_ignore_ascii_case(name))
}
