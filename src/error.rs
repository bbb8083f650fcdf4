//! # Bot Error Types Module
//!
//! Failure taxonomy shared by the store, the TMDB facade and the handlers.
//! Every variant maps to a user-facing reply at the handler boundary; none
//! is allowed to escape the dispatcher loop.

use crate::templates;

/// Custom error types for bot operations
#[derive(Debug, Clone)]
pub enum BotError {
    /// Bad or missing command arguments
    Validation(String),
    /// Empty search result or unknown movie id
    NotFound(String),
    /// TMDB unreachable or returned a malformed response
    Upstream(String),
    /// Favorites persistence failure
    StoreUnavailable(String),
    /// Admin-only command from a non-admin
    AccessDenied,
}

impl BotError {
    /// The reply template shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            BotError::Validation(_) => templates::SEARCH_MISSING_QUERY,
            BotError::NotFound(_) => templates::SEARCH_NOT_FOUND,
            BotError::Upstream(_) => templates::GENERAL_ERROR,
            BotError::StoreUnavailable(_) => templates::STORE_ERROR,
            BotError::AccessDenied => templates::ERROR_ACCESS_DENIED,
        }
    }
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::Validation(msg) => write!(f, "Validation error: {msg}"),
            BotError::NotFound(msg) => write!(f, "Not found: {msg}"),
            BotError::Upstream(msg) => write!(f, "Upstream error: {msg}"),
            BotError::StoreUnavailable(msg) => write!(f, "Store unavailable: {msg}"),
            BotError::AccessDenied => write!(f, "Access denied"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<sqlx::Error> for BotError {
    fn from(err: sqlx::Error) -> Self {
        BotError::StoreUnavailable(err.to_string())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting() {
        let err = BotError::Validation("empty query".to_string());
        assert_eq!(format!("{}", err), "Validation error: empty query");
    }

    #[test]
    fn test_user_messages_cover_all_variants() {
        assert_eq!(
            BotError::AccessDenied.user_message(),
            templates::ERROR_ACCESS_DENIED
        );
        assert_eq!(
            BotError::StoreUnavailable("down".into()).user_message(),
            templates::STORE_ERROR
        );
        assert_eq!(
            BotError::Upstream("503".into()).user_message(),
            templates::GENERAL_ERROR
        );
    }
}
