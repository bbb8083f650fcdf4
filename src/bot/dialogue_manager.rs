//! Dialogue Manager module for the conversation flows
//!
//! Flow helpers shared by the message and callback handlers: welcome,
//! search, favorites listing, trending, the clear-confirmation dialog and
//! the admin dump. Every store/API failure is converted to a reply here;
//! nothing propagates past the handler boundary except Telegram send errors.

use anyhow::Result;
use sqlx::SqlitePool;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, InputFile, ParseMode};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::db;
use crate::dialogue::{clear_intent_target, MenuDialogue, MenuState};
use crate::error::BotError;
use crate::movie::Movie;
use crate::movie_api::MovieApi;
use crate::templates;

use super::ui_builder::{
    clear_confirm_keyboard, favorites_list_keyboard, info_keyboard, main_menu_keyboard,
    search_result_keyboard, trending_keyboard,
};

/// Handle /start: register the user, reset the session, show the main menu.
pub async fn send_welcome(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    dialogue: &MenuDialogue,
    pool: &SqlitePool,
) -> Result<()> {
    match db::register_user(pool, user_id).await {
        Ok(()) => {
            bot.send_message(chat_id, templates::START)
                .reply_markup(main_menu_keyboard())
                .await?;
        }
        Err(e) => {
            error!(user_id, error = %e, "Failed to register user");
            bot.send_message(chat_id, templates::START_DB_ERROR).await?;
        }
    }

    dialogue.update(MenuState::MainMenu).await?;
    Ok(())
}

/// Prompt for a search query and wait for the next text message.
pub async fn start_search_prompt(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &MenuDialogue,
) -> Result<()> {
    bot.send_message(chat_id, templates::STATE_SEARCH_INPUT)
        .await?;
    dialogue.update(MenuState::AwaitingSearchInput).await?;
    Ok(())
}

/// Run a search and reply with the best match. Trailing candidates are
/// referenced by id in the "show more" button rather than cached, so a
/// stale button always resolves to a consistent set.
pub async fn run_search(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    dialogue: &MenuDialogue,
    pool: &SqlitePool,
    api: &MovieApi,
    query: &str,
) -> Result<()> {
    let movies = match api.search(query).await {
        Ok(movies) => movies,
        Err(e) => return reply_error(bot, chat_id, &e).await,
    };

    let Some(best) = movies.first() else {
        bot.send_message(chat_id, templates::SEARCH_NOT_FOUND)
            .await?;
        dialogue.update(MenuState::MainMenu).await?;
        return Ok(());
    };

    // A store failure must not block the search reply itself; the card is
    // rendered with the default "add" button instead.
    let in_favorites = match db::get_favorites(pool, user_id).await {
        Ok(favorites) => favorites.contains(&best.id),
        Err(e) => {
            warn!(user_id, error = %e, "Favorites lookup failed, rendering without membership");
            false
        }
    };

    let rest_ids: Vec<i64> = movies[1..].iter().map(|movie| movie.id).collect();

    let mut caption = best.caption();
    if !rest_ids.is_empty() {
        caption.push_str(&format!(
            "{}{}",
            templates::SEARCH_MORE_PENDING,
            rest_ids.len()
        ));
    }

    send_movie_card(
        bot,
        chat_id,
        best,
        caption,
        search_result_keyboard(best.id, in_favorites, &rest_ids),
    )
    .await?;

    dialogue.update(MenuState::MainMenu).await?;
    Ok(())
}

/// Handle the clear-favorites intent: ask for confirmation only when there
/// is something to clear.
pub async fn start_clear_flow(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    dialogue: &MenuDialogue,
    pool: &SqlitePool,
) -> Result<()> {
    let favorites = match db::get_favorites(pool, user_id).await {
        Ok(favorites) => favorites,
        Err(e) => return reply_error(bot, chat_id, &e).await,
    };

    match clear_intent_target(&favorites) {
        MenuState::AwaitingClearConfirm => {
            bot.send_message(chat_id, templates::DIALOG_CLEAR_CONFIRM)
                .reply_markup(clear_confirm_keyboard())
                .await?;
            dialogue.update(MenuState::AwaitingClearConfirm).await?;
        }
        _ => {
            bot.send_message(chat_id, templates::FAVORITES_LIST_EMPTY)
                .await?;
        }
    }

    Ok(())
}

/// Leave the confirmation dialog, clearing the list only on confirm.
pub async fn finish_clear_flow(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    dialogue: &MenuDialogue,
    pool: &SqlitePool,
    confirmed: bool,
) -> Result<()> {
    let reply = if confirmed {
        match db::clear_favorites(pool, user_id).await {
            Ok(()) => templates::ALERT_CLEAR_SUCCESS,
            Err(e) => {
                error!(user_id, error = %e, "Failed to clear favorites");
                e.user_message()
            }
        }
    } else {
        templates::ALERT_CLEAR_CANCELLED
    };

    bot.send_message(chat_id, reply)
        .reply_markup(main_menu_keyboard())
        .await?;
    dialogue.update(MenuState::MainMenu).await?;
    Ok(())
}

/// List the user's favorites, one expand button per movie.
pub async fn list_favorites(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    pool: &SqlitePool,
    api: &MovieApi,
) -> Result<()> {
    let favorites = match db::get_favorites(pool, user_id).await {
        Ok(favorites) => favorites,
        Err(e) => return reply_error(bot, chat_id, &e).await,
    };

    if favorites.is_empty() {
        bot.send_message(chat_id, templates::FAVORITES_LIST_EMPTY)
            .await?;
        return Ok(());
    }

    let movies = match api.get_many_by_id(&favorites).await {
        Ok(movies) => movies,
        Err(e) => return reply_error(bot, chat_id, &e).await,
    };

    if movies.is_empty() {
        bot.send_message(chat_id, templates::FAVORITES_LIST_EMPTY)
            .await?;
        return Ok(());
    }

    bot.send_message(chat_id, templates::BUTTON_FAVORITES_SHOW)
        .reply_markup(favorites_list_keyboard(&movies))
        .await?;
    Ok(())
}

/// Show this week's trending movies as the fixed 2/2/3 button grid.
pub async fn show_trending(bot: &Bot, chat_id: ChatId, api: &MovieApi) -> Result<()> {
    let movies = match api.get_trending().await {
        Ok(movies) => movies,
        Err(e) => return reply_error(bot, chat_id, &e).await,
    };

    if movies.is_empty() {
        bot.send_message(chat_id, templates::SEARCH_NOT_FOUND)
            .await?;
        return Ok(());
    }

    bot.send_message(chat_id, templates::BUTTON_TRENDING)
        .reply_markup(trending_keyboard(&movies))
        .await?;
    Ok(())
}

/// Handle /all: dump every stored favorites list. Admin allowlist only.
pub async fn send_all_dump(
    bot: &Bot,
    chat_id: ChatId,
    user_id: u64,
    pool: &SqlitePool,
    config: &AppConfig,
) -> Result<()> {
    if !config.is_admin(user_id) {
        info!(user_id, "Denied /all for non-admin");
        return reply_error(bot, chat_id, &BotError::AccessDenied).await;
    }

    match db::get_all(pool).await {
        Ok(rows) => {
            let dump: std::collections::BTreeMap<i64, Vec<i64>> = rows.into_iter().collect();
            let text = serde_json::to_string_pretty(&dump)
                .unwrap_or_else(|_| templates::GENERAL_ERROR.to_string());
            bot.send_message(chat_id, text).await?;
        }
        Err(e) => return reply_error(bot, chat_id, &e).await,
    }

    Ok(())
}

/// Send one movie card: poster with an HTML caption when TMDB has a poster,
/// plain HTML text otherwise.
pub async fn send_movie_card(
    bot: &Bot,
    chat_id: ChatId,
    movie: &Movie,
    caption: String,
    markup: InlineKeyboardMarkup,
) -> Result<()> {
    let poster = movie
        .poster_url
        .as_deref()
        .and_then(|raw| reqwest::Url::parse(raw).ok());

    match poster {
        Some(url) => {
            bot.send_photo(chat_id, InputFile::url(url))
                .caption(caption)
                .parse_mode(ParseMode::Html)
                .reply_markup(markup)
                .await?;
        }
        None => {
            bot.send_message(chat_id, caption)
                .parse_mode(ParseMode::Html)
                .reply_markup(markup)
                .await?;
        }
    }

    Ok(())
}

/// Expanded movie card reached from a listing button.
pub async fn send_expanded_movie(
    bot: &Bot,
    chat_id: ChatId,
    movie: &Movie,
    in_favorites: bool,
) -> Result<()> {
    send_movie_card(
        bot,
        chat_id,
        movie,
        movie.caption(),
        info_keyboard(movie.id, in_favorites),
    )
    .await
}

/// Convert a failed operation into its user-facing reply.
pub async fn reply_error(bot: &Bot, chat_id: ChatId, err: &BotError) -> Result<()> {
    error!(chat_id = %chat_id, error = %err, "Operation failed, replying with error template");
    bot.send_message(chat_id, err.user_message()).await?;
    Ok(())
}
