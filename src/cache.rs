//! Normalized client-side store.
//!
//! Query results are kept per `(operation, variables)` key in insertion order,
//! which is also the order refetches are replayed in. Every object carrying an
//! `id` is additionally indexed by `(typename, id)`. Results are only ever
//! replaced wholesale; nothing here edits a cached result in place.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub operation: String,
    /// Canonical JSON of the variables (object keys are sorted)
    pub variables: String,
}

impl QueryKey {
    pub fn new(operation: &str, variables: &Value) -> Self {
        Self {
            operation: operation.to_string(),
            variables: variables.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntryStatus {
    Pending,
    Fetched(Value),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub variables: Value,
    pub status: EntryStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityKey {
    pub typename: &'static str,
    pub id: String,
}

impl EntityKey {
    pub fn new(typename: &'static str, id: impl Into<String>) -> Self {
        Self {
            typename,
            id: id.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    queries: IndexMap<QueryKey, CacheEntry>,
    entities: HashMap<EntityKey, Map<String, Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, key: &QueryKey) -> Option<&CacheEntry> {
        self.queries.get(key)
    }

    /// Record that a request for `key` is in flight.
    ///
    /// Fetched data stays visible while a refetch is running.
    pub fn mark_pending(&mut self, key: QueryKey, variables: Value) {
        match self.queries.get_mut(&key) {
            Some(CacheEntry {
                status: EntryStatus::Fetched(_),
                ..
            }) => {}
            Some(entry) => entry.status = EntryStatus::Pending,
            None => {
                self.queries.insert(
                    key,
                    CacheEntry {
                        variables,
                        status: EntryStatus::Pending,
                    },
                );
            }
        }
    }

    pub fn write_result(&mut self, key: QueryKey, variables: Value, data: Value) {
        let mut path = vec![];
        self.normalize(&data, &mut path);
        self.queries.insert(
            key,
            CacheEntry {
                variables,
                status: EntryStatus::Fetched(data),
            },
        );
    }

    pub fn write_error(&mut self, key: QueryKey, variables: Value, message: impl Into<String>) {
        self.queries.insert(
            key,
            CacheEntry {
                variables,
                status: EntryStatus::Failed(message.into()),
            },
        );
    }

    pub fn evict(&mut self, key: &QueryKey) -> Option<CacheEntry> {
        self.queries.shift_remove(key)
    }

    /// Keys and variables of every cached entry for one operation, in insertion order
    pub fn entries_for(&self, operation: &str) -> Vec<(QueryKey, Value)> {
        self.queries
            .iter()
            .filter(|(key, _)| key.operation == operation)
            .map(|(key, entry)| (key.clone(), entry.variables.clone()))
            .collect()
    }

    /// Drop failed entries so that the next read issues a fresh request
    pub fn clear_failed(&mut self) -> usize {
        let before = self.queries.len();
        self.queries
            .retain(|_, entry| !matches!(entry.status, EntryStatus::Failed(_)));
        before - self.queries.len()
    }

    pub fn entity(&self, typename: &'static str, id: &str) -> Option<&Map<String, Value>> {
        self.entities.get(&EntityKey::new(typename, id))
    }

    pub fn evict_entity(&mut self, typename: &'static str, id: &str) -> bool {
        self.entities.remove(&EntityKey::new(typename, id)).is_some()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    fn normalize<'a>(&mut self, value: &'a Value, path: &mut Vec<&'a str>) {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.normalize(item, path);
                }
            }
            Value::Object(fields) => {
                if let (Some(Value::String(id)), Some(typename)) =
                    (fields.get("id"), typename_for(path))
                {
                    let stored = self
                        .entities
                        .entry(EntityKey::new(typename, id.clone()))
                        .or_default();
                    for (name, field) in fields {
                        stored.insert(name.clone(), field.clone());
                    }
                }
                for (name, field) in fields {
                    path.push(name.as_str());
                    self.normalize(field, path);
                    path.pop();
                }
            }
            _ => {}
        }
    }
}

/// Entity type of an object reached through `path` in a response.
///
/// The operation documents do not select `__typename`, so the type is implied by
/// where the object sits: `user` is a User, `questions` holds Questions, and
/// anything else under the `quizTemplate` or `question` roots is of that type.
fn typename_for(path: &[&str]) -> Option<&'static str> {
    match path.last().copied() {
        Some("user") => return Some("User"),
        Some("questions") => return Some("Question"),
        _ => {}
    }
    match path.first().copied() {
        Some("quizTemplate") => Some("QuizTemplate"),
        Some("question") => Some("Question"),
        _ => None,
    }
}
