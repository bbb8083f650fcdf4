//! Menu dialogue module for handling conversation state with users.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::error::BotError;

/// Represents the conversation state of one chat.
///
/// `MainMenu` is the resting state; free text is interpreted as a search
/// query only while in `AwaitingSearchInput`, and only the yes/no buttons
/// leave `AwaitingClearConfirm`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuState {
    #[default]
    MainMenu,
    AwaitingSearchInput,
    AwaitingClearConfirm,
}

/// Type alias for our menu dialogue
pub type MenuDialogue = Dialogue<MenuState, InMemStorage<MenuState>>;

/// State entered by a clear-favorites intent: confirmation is only asked
/// when there is something to clear.
pub fn clear_intent_target(favorites: &[i64]) -> MenuState {
    if favorites.is_empty() {
        MenuState::MainMenu
    } else {
        MenuState::AwaitingClearConfirm
    }
}

/// Validates a search query input
pub fn validate_query(query: &str) -> Result<&str, BotError> {
    let trimmed = query.trim();

    if trimmed.is_empty() {
        return Err(BotError::Validation("empty search query".to_string()));
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_main_menu() {
        assert_eq!(MenuState::default(), MenuState::MainMenu);
    }

    #[test]
    fn test_clear_intent_needs_favorites() {
        assert_eq!(clear_intent_target(&[]), MenuState::MainMenu);
        assert_eq!(clear_intent_target(&[603]), MenuState::AwaitingClearConfirm);
    }

    #[test]
    fn test_query_validation() {
        assert!(validate_query("Matrix").is_ok());
        assert_eq!(validate_query("  Matrix  ").unwrap(), "Matrix");

        assert!(validate_query("").is_err());
        assert!(validate_query("   ").is_err());
    }
}
