use crate::client::QueryStatus;
use crate::errors::ClientError;
use crate::models::User;

/// What a data-bearing page renders, derived fresh on every render.
#[derive(Clone, Debug, PartialEq)]
pub enum PageState<T> {
    /// No session user; the page shows a login prompt.
    Anonymous,
    Loading,
    Error(String),
    Ready(T),
}

/// Derive a page state from the session user and the page query's status.
///
/// Order matters: the anonymous check wins over everything, an error wins over
/// loading, and a settled query with no data is an error.
pub fn derive_page_state<T>(
    user: Option<&User>,
    requires_user: bool,
    status: QueryStatus<T>,
) -> PageState<T> {
    if requires_user && user.is_none() {
        return PageState::Anonymous;
    }
    if let Some(message) = status.error {
        return PageState::Error(message);
    }
    match status.data {
        Some(data) => PageState::Ready(data),
        None if status.loading => PageState::Loading,
        None => PageState::Error(ClientError::NoData.to_string()),
    }
}
