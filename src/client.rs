use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::cache::{EntryStatus, QueryCache, QueryKey};
use crate::errors::ClientResult;
use crate::graphql::operations::{
    self, CreateQuestion, CreateQuizTemplate, DeleteQuestion, DeleteQuizTemplate, EditQuestion,
    EditQuizTemplate, EditVariables, GetQuestion, GetQuizTemplate, GetUser,
    IdVariables, InputVariables, NoVariables, UserIdVariables,
};
use crate::graphql::{GraphQlRequest, GraphQlTransport, Operation, OperationKind};
use crate::models::{
    CreateQuestionInput, CreateQuizTemplateInput, EditQuestionInput, EditQuizTemplateInput,
    Question, QuestionDraft, QuizTemplate, User,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve a fetched result from the cache, hit the network otherwise
    #[default]
    CacheFirst,
    NetworkOnly,
}

/// Query flags as seen by a view: in flight, failed, or data present.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryStatus<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> QueryStatus<T> {
    pub fn loading() -> Self {
        Self {
            loading: true,
            error: None,
            data: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(message.into()),
            data: None,
        }
    }

    pub fn ready(data: T) -> Self {
        Self {
            loading: false,
            error: None,
            data: Some(data),
        }
    }

    /// Project the data, treating `None` from `f` as absent data.
    pub fn and_then<U, F>(self, f: F) -> QueryStatus<U>
    where
        F: FnOnce(T) -> Option<U>,
    {
        QueryStatus {
            loading: self.loading,
            error: self.error,
            data: self.data.and_then(f),
        }
    }
}

/// Executes catalog operations and keeps the normalized cache consistent.
///
/// Mutations never touch cached results directly: once a mutation succeeds,
/// every cached entry of the queries it declares in [`Operation::REFETCH`] is
/// re-run against the server before the mutation call returns.
pub struct QuizClient {
    transport: Arc<dyn GraphQlTransport>,
    cache: RwLock<QueryCache>,
}

impl QuizClient {
    pub fn new(transport: Arc<dyn GraphQlTransport>) -> Self {
        Self {
            transport,
            cache: RwLock::new(QueryCache::new()),
        }
    }

    pub fn cache(&self) -> RwLockReadGuard<'_, QueryCache> {
        self.cache.read().unwrap_or_else(|e| e.into_inner())
    }

    fn cache_mut(&self) -> RwLockWriteGuard<'_, QueryCache> {
        self.cache.write().unwrap_or_else(|e| e.into_inner())
    }

    fn key_for<O: Operation>(variables: &O::Variables) -> ClientResult<(QueryKey, Value)> {
        let variables = serde_json::to_value(variables)?;
        Ok((QueryKey::new(O::NAME, &variables), variables))
    }

    async fn send(&self, request: &GraphQlRequest) -> ClientResult<Value> {
        debug!(operation = %request.operation_name, variables = %request.variables, "dispatching");
        self.transport.execute(request).await?.into_data()
    }

    /// Run a query and store its result (or failure) in the cache.
    pub async fn query<O: Operation>(
        &self,
        variables: &O::Variables,
        policy: FetchPolicy,
    ) -> ClientResult<O::Data> {
        debug_assert_eq!(O::KIND, OperationKind::Query);
        let (key, value) = Self::key_for::<O>(variables)?;

        if policy == FetchPolicy::CacheFirst {
            if let Some(EntryStatus::Fetched(data)) =
                self.cache().entry(&key).map(|entry| entry.status.clone())
            {
                return Ok(serde_json::from_value(data)?);
            }
        }

        self.cache_mut().mark_pending(key.clone(), value.clone());
        let request = GraphQlRequest::for_operation::<O>(variables)?;
        match self.send(&request).await {
            Ok(data) => {
                let decoded = serde_json::from_value::<O::Data>(data.clone());
                match decoded {
                    Ok(decoded) => {
                        self.cache_mut().write_result(key, value, data);
                        Ok(decoded)
                    }
                    Err(err) => {
                        self.cache_mut().write_error(key, value, err.to_string());
                        Err(err.into())
                    }
                }
            }
            Err(err) => {
                self.cache_mut().write_error(key, value, err.to_string());
                Err(err)
            }
        }
    }

    /// Issue a query unless it already has an entry (in flight, fetched or failed).
    ///
    /// This is how views subscribe to data: a failed entry is left alone until
    /// something clears it, so failures are never retried behind the user's back.
    pub async fn watch<O: Operation>(&self, variables: &O::Variables) -> ClientResult<()> {
        let (key, _) = Self::key_for::<O>(variables)?;
        if self.cache().entry(&key).is_some() {
            return Ok(());
        }
        if let Err(err) = self.query::<O>(variables, FetchPolicy::CacheFirst).await {
            error!(operation = O::NAME, "{}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Cached status of a query, decoded for a view.
    ///
    /// An absent entry reads as loading: the view is about to issue it.
    pub fn status<O: Operation>(&self, variables: &O::Variables) -> QueryStatus<O::Data> {
        let key = match Self::key_for::<O>(variables) {
            Ok((key, _)) => key,
            Err(err) => return QueryStatus::failed(err.to_string()),
        };
        let status = self.cache().entry(&key).map(|entry| entry.status.clone());
        match status {
            None | Some(EntryStatus::Pending) => QueryStatus::loading(),
            Some(EntryStatus::Failed(message)) => QueryStatus::failed(message),
            Some(EntryStatus::Fetched(data)) => match serde_json::from_value(data) {
                Ok(data) => QueryStatus::ready(data),
                Err(err) => QueryStatus::failed(err.to_string()),
            },
        }
    }

    /// Run a mutation, then refetch the queries it declares.
    pub async fn mutate<O: Operation>(&self, variables: &O::Variables) -> ClientResult<O::Data> {
        debug_assert_eq!(O::KIND, OperationKind::Mutation);
        let request = GraphQlRequest::for_operation::<O>(variables)?;
        let data = match self.send(&request).await {
            Ok(data) => data,
            Err(err) => {
                error!(operation = O::NAME, "{}", err);
                return Err(err);
            }
        };
        // the write is committed once the round trip succeeds
        for name in O::REFETCH {
            self.refetch(name).await;
        }

        match serde_json::from_value(data) {
            Ok(decoded) => Ok(decoded),
            Err(err) => {
                error!(operation = O::NAME, "undecodable mutation result: {}", err);
                Err(err.into())
            }
        }
    }

    /// Re-run every cached entry of the named query, replacing each result.
    ///
    /// A failed refetch replaces the entry with the failure. Returns the number
    /// of entries that were refreshed successfully.
    pub async fn refetch(&self, operation: &str) -> usize {
        let Some(info) = operations::find(operation) else {
            warn!(operation, "refetch requested for an unknown operation");
            return 0;
        };

        let entries = self.cache().entries_for(info.name);
        let mut refreshed = 0;
        for (key, variables) in entries {
            let request = GraphQlRequest {
                operation_name: info.name.to_string(),
                query: info.document.to_string(),
                variables: variables.clone(),
            };
            match self.send(&request).await {
                Ok(data) => {
                    self.cache_mut().write_result(key, variables, data);
                    refreshed += 1;
                }
                Err(err) => {
                    warn!(operation = info.name, "refetch failed: {}", err);
                    self.cache_mut().write_error(key, variables, err.to_string());
                }
            }
        }
        refreshed
    }

    pub fn clear_failed(&self) -> usize {
        self.cache_mut().clear_failed()
    }

    pub async fn current_user(&self, policy: FetchPolicy) -> ClientResult<Option<User>> {
        let data = self.query::<GetUser>(&NoVariables {}, policy).await?;
        Ok(data.user)
    }

    /// Create a template owned by `user` and return the server-assigned id.
    pub async fn create_quiz_template(&self, user: &User, name: &str) -> ClientResult<String> {
        let variables = InputVariables {
            input: CreateQuizTemplateInput {
                name: name.to_string(),
                user_id: user.id.clone(),
            },
        };
        let data = self.mutate::<CreateQuizTemplate>(&variables).await?;
        Ok(data.quiz_template.create.id)
    }

    pub async fn edit_quiz_template(
        &self,
        user: &User,
        id: &str,
        name: &str,
    ) -> ClientResult<QuizTemplate> {
        let variables = EditVariables {
            id: id.to_string(),
            input: EditQuizTemplateInput {
                name: name.to_string(),
                user_id: user.id.clone(),
            },
        };
        let data = self.mutate::<EditQuizTemplate>(&variables).await?;
        Ok(data.quiz_template.edit)
    }

    pub async fn delete_quiz_template(&self, id: &str) -> ClientResult<bool> {
        let data = self
            .mutate::<DeleteQuizTemplate>(&IdVariables::new(id))
            .await?;
        let deleted = data.quiz_template.delete_by_id;
        if deleted {
            let (detail, _) = Self::key_for::<GetQuizTemplate>(&IdVariables::new(id))?;
            let mut cache = self.cache_mut();
            cache.evict(&detail);
            cache.evict_entity("QuizTemplate", id);
        }
        Ok(deleted)
    }

    pub async fn create_question(
        &self,
        quiz_template_id: &str,
        draft: QuestionDraft,
    ) -> ClientResult<Question> {
        let variables = InputVariables {
            input: CreateQuestionInput::from_draft(draft, quiz_template_id),
        };
        let data = self.mutate::<CreateQuestion>(&variables).await?;
        Ok(data.question.create)
    }

    pub async fn edit_question(
        &self,
        id: &str,
        quiz_template_id: &str,
        draft: QuestionDraft,
    ) -> ClientResult<bool> {
        let variables = EditVariables {
            id: id.to_string(),
            input: EditQuestionInput::from_draft(draft, quiz_template_id),
        };
        let data = self.mutate::<EditQuestion>(&variables).await?;
        if data.question.edit {
            // the editor re-reads the question next time it opens
            self.evict_question(id)?;
        }
        Ok(data.question.edit)
    }

    pub async fn delete_question(&self, id: &str) -> ClientResult<bool> {
        let data = self.mutate::<DeleteQuestion>(&IdVariables::new(id)).await?;
        let deleted = data.question.delete_by_id;
        if deleted {
            self.evict_question(id)?;
            self.cache_mut().evict_entity("Question", id);
        }
        Ok(deleted)
    }

    fn evict_question(&self, id: &str) -> ClientResult<()> {
        let (key, _) = Self::key_for::<GetQuestion>(&IdVariables::new(id))?;
        self.cache_mut().evict(&key);
        Ok(())
    }

    pub fn templates_variables(user: &User) -> UserIdVariables {
        UserIdVariables {
            user_id: user.id.clone(),
        }
    }
}
