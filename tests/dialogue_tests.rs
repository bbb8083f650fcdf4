use anyhow::Result;

use kinobot::dialogue::{clear_intent_target, validate_query, MenuState};
use kinobot::error::BotError;

/// The resting state is the main menu.
#[test]
fn test_initial_state_is_main_menu() {
    assert_eq!(MenuState::default(), MenuState::MainMenu);
}

/// A clear intent with nothing to clear never leaves the main menu.
#[test]
fn test_clear_intent_with_empty_favorites_stays_idle() {
    assert_eq!(clear_intent_target(&[]), MenuState::MainMenu);
}

/// A clear intent with favorites present asks for confirmation first.
#[test]
fn test_clear_intent_with_favorites_asks_confirmation() {
    assert_eq!(
        clear_intent_target(&[603, 604]),
        MenuState::AwaitingClearConfirm
    );
}

/// Search queries must be non-empty after trimming.
#[test]
fn test_query_validation() {
    assert_eq!(validate_query("  Matrix  ").unwrap(), "Matrix");

    assert!(matches!(validate_query(""), Err(BotError::Validation(_))));
    assert!(matches!(validate_query("   "), Err(BotError::Validation(_))));
}

/// Dialogue states survive a serialization round trip, so a persistent
/// storage backend could replace the in-memory one.
#[test]
fn test_state_serialization_round_trip() -> Result<()> {
    for state in [
        MenuState::MainMenu,
        MenuState::AwaitingSearchInput,
        MenuState::AwaitingClearConfirm,
    ] {
        let raw = serde_json::to_string(&state)?;
        let restored: MenuState = serde_json::from_str(&raw)?;
        assert_eq!(restored, state);
    }
    Ok(())
}
