//! GraphQL wire types, the fixed operation catalog and the transport seam.

pub mod operations;
pub mod transport;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ClientError, ClientResult};

pub use operations::{Operation, OperationKind, OperationScope};
pub use transport::{GraphQlTransport, HttpTransport};

/// Body POSTed to the GraphQL endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub operation_name: String,
    pub query: String,
    pub variables: Value,
}

impl GraphQlRequest {
    pub fn for_operation<O: Operation>(variables: &O::Variables) -> ClientResult<Self> {
        Ok(Self {
            operation_name: O::NAME.to_string(),
            query: O::DOCUMENT.to_string(),
            variables: serde_json::to_value(variables)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphQlErrorMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
}

impl GraphQlErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }
}

/// Response envelope as returned by the server
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorMessage>>,
}

impl GraphQlResponse {
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    pub fn with_errors(errors: Vec<GraphQlErrorMessage>) -> Self {
        Self {
            data: None,
            errors: Some(errors),
        }
    }

    /// Errors win over partial data; a missing or null `data` is `NoData`.
    pub fn into_data(self) -> ClientResult<Value> {
        if let Some(errors) = self.errors {
            if !errors.is_empty() {
                return Err(ClientError::GraphQl(errors));
            }
        }
        match self.data {
            Some(Value::Null) | None => Err(ClientError::NoData),
            Some(data) => Ok(data),
        }
    }
}
