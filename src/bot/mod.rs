//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles commands, menu buttons and state-gated text
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards
//! - `dialogue_manager`: The conversation flows shared by both handlers

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

// Re-export utility functions that might be used elsewhere
pub use ui_builder::{main_menu_keyboard, trending_keyboard};
