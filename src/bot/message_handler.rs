//! Message Handler module for processing incoming Telegram messages
//!
//! Commands are accepted in any dialogue state; free text is routed by the
//! current state: a search query while awaiting input, a yes/no decision
//! while awaiting clear confirmation, a menu-button press otherwise.

use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use crate::config::AppConfig;
use crate::dialogue::{MenuDialogue, MenuState};
use crate::movie_api::MovieApi;
use crate::templates;

use super::dialogue_manager::{
    finish_clear_flow, list_favorites, run_search, send_all_dump, send_welcome, show_trending,
    start_clear_flow, start_search_prompt,
};

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: MenuDialogue,
    pool: SqlitePool,
    api: Arc<MovieApi>,
    config: Arc<AppConfig>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = msg.chat.id;
    // Private chats only; fall back to the chat id when the sender is hidden.
    let user_id = msg
        .from
        .as_ref()
        .map(|user| user.id.0 as i64)
        .unwrap_or(chat_id.0);

    debug!(user_id, message_length = text.len(), "Received text message from user");

    if let Some((command, args)) = parse_command(text) {
        return handle_command(
            &bot, chat_id, user_id, &dialogue, &pool, &api, &config, command, args,
        )
        .await;
    }

    let state = dialogue.get().await?.unwrap_or_default();
    match state {
        MenuState::AwaitingSearchInput => {
            run_search(&bot, chat_id, user_id, &dialogue, &pool, &api, text).await
        }
        MenuState::AwaitingClearConfirm => match text {
            templates::BUTTON_CLEAR_CONFIRM => {
                finish_clear_flow(&bot, chat_id, user_id, &dialogue, &pool, true).await
            }
            templates::BUTTON_CLEAR_CANCEL => {
                finish_clear_flow(&bot, chat_id, user_id, &dialogue, &pool, false).await
            }
            _ => {
                // Only the two buttons leave this state; re-ask.
                bot.send_message(chat_id, templates::DIALOG_CLEAR_CONFIRM)
                    .await?;
                Ok(())
            }
        },
        MenuState::MainMenu => match text {
            templates::BUTTON_SEARCH => start_search_prompt(&bot, chat_id, &dialogue).await,
            templates::BUTTON_FAVORITES_SHOW => {
                list_favorites(&bot, chat_id, user_id, &pool, &api).await
            }
            templates::BUTTON_TRENDING => show_trending(&bot, chat_id, &api).await,
            templates::BUTTON_FAVORITES_CLEAR => {
                start_clear_flow(&bot, chat_id, user_id, &dialogue, &pool).await
            }
            templates::BUTTON_HELP => {
                bot.send_message(chat_id, templates::HELP).await?;
                Ok(())
            }
            _ => {
                debug!(user_id, "Ignoring free text outside of any flow");
                Ok(())
            }
        },
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_command(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    dialogue: &MenuDialogue,
    pool: &SqlitePool,
    api: &MovieApi,
    config: &AppConfig,
    command: &str,
    args: Option<&str>,
) -> Result<()> {
    match command {
        "start" => send_welcome(bot, chat_id, user_id, dialogue, pool).await,
        "search" => match args {
            Some(query) => run_search(bot, chat_id, user_id, dialogue, pool, api, query).await,
            None => start_search_prompt(bot, chat_id, dialogue).await,
        },
        "favorites" => list_favorites(bot, chat_id, user_id, pool, api).await,
        "trending" => show_trending(bot, chat_id, api).await,
        "clear_favorites" => start_clear_flow(bot, chat_id, user_id, dialogue, pool).await,
        "help" => {
            bot.send_message(chat_id, templates::HELP).await?;
            Ok(())
        }
        "all" => send_all_dump(bot, chat_id, user_id as u64, pool, config).await,
        _ => {
            debug!(user_id, command, "Ignoring unknown command");
            Ok(())
        }
    }
}

/// Splits "/search the matrix" into ("search", Some("the matrix")),
/// stripping a "@BotName" mention from the command itself.
fn parse_command(text: &str) -> Option<(&str, Option<&str>)> {
    let rest = text.strip_prefix('/')?;

    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, Some(args.trim())),
        None => (rest, None),
    };

    let command = head.split('@').next().unwrap_or(head);
    if command.is_empty() {
        return None;
    }

    Some((command, args.filter(|args| !args.is_empty())))
}
