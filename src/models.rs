use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the `user` query
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// List projection of a quiz template; questions are never fetched here
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTemplateSummary {
    pub id: String,
    pub name: String,
}

/// Detail projection of a quiz template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTemplate {
    pub id: String,
    pub name: String,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub answer: String,
}

/// Question text and answer without an identity, as edited in a dialog
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
}

impl From<&Question> for QuestionDraft {
    fn from(value: &Question) -> Self {
        Self {
            question: value.question.clone(),
            answer: value.answer.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizTemplateInput {
    pub name: String,
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditQuizTemplateInput {
    pub name: String,
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionInput {
    pub question: String,
    pub answer: String,
    pub quiz_template_id: String,
}

impl CreateQuestionInput {
    pub fn from_draft(draft: QuestionDraft, quiz_template_id: impl Into<String>) -> Self {
        Self {
            question: draft.question,
            answer: draft.answer,
            quiz_template_id: quiz_template_id.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditQuestionInput {
    pub question: String,
    pub answer: String,
    pub quiz_template_id: String,
}

impl EditQuestionInput {
    pub fn from_draft(draft: QuestionDraft, quiz_template_id: impl Into<String>) -> Self {
        Self {
            question: draft.question,
            answer: draft.answer,
            quiz_template_id: quiz_template_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_input_uses_camel_case() {
        let input = CreateQuestionInput::from_draft(
            QuestionDraft {
                question: "2 + 2?".to_string(),
                answer: "4".to_string(),
            },
            "qt-1",
        );
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            json!({"question": "2 + 2?", "answer": "4", "quizTemplateId": "qt-1"})
        );
    }

    #[test]
    fn test_quiz_template_input_uses_camel_case() {
        let input = CreateQuizTemplateInput {
            name: "Capitals".to_string(),
            user_id: "u-1".to_string(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["userId"], "u-1");
    }
}
