//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::InlineKeyboardMarkup;
use tracing::{debug, error, warn};

use crate::callback::CallbackData;
use crate::db;
use crate::movie_api::MovieApi;
use crate::templates;

use super::dialogue_manager::send_expanded_movie;
use super::ui_builder::favorites_button;

/// Where an expand button came from; a favorites listing implies membership,
/// a trending listing does not.
enum ExpandSource {
    Favorites,
    Trending,
}

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    pool: SqlitePool,
    api: Arc<MovieApi>,
) -> Result<()> {
    debug!(user_id = %q.from.id, data = ?q.data, "Received callback query from user");

    let Some(payload) = q.data.as_deref().and_then(CallbackData::parse) else {
        warn!(user_id = %q.from.id, data = ?q.data, "Unrecognized callback payload");
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    match payload {
        CallbackData::FavoritesAdd {
            movie_id,
            from_search,
        } => handle_toggle(&bot, &q, &pool, movie_id, true, from_search).await,
        CallbackData::FavoritesRemove {
            movie_id,
            from_search,
        } => handle_toggle(&bot, &q, &pool, movie_id, false, from_search).await,
        CallbackData::ExpandFavorites { movie_id } => {
            handle_expand(&bot, &q, &pool, &api, movie_id, ExpandSource::Favorites).await
        }
        CallbackData::ExpandTrending { movie_id } => {
            handle_expand(&bot, &q, &pool, &api, movie_id, ExpandSource::Trending).await
        }
        CallbackData::ShowMore { movie_ids } => {
            handle_show_more(&bot, &q, &pool, &api, &movie_ids).await
        }
    }
}

/// Add or remove a favorite and flip the pressed button to its inverse.
/// Any rows below the toggle row (the "show more" button of a search card)
/// are preserved as they are.
async fn handle_toggle(
    bot: &Bot,
    q: &CallbackQuery,
    pool: &SqlitePool,
    movie_id: i64,
    add: bool,
    from_search: bool,
) -> Result<()> {
    let user_id = q.from.id.0 as i64;

    let result = if add {
        db::add_favorite(pool, user_id, movie_id).await
    } else {
        db::remove_favorite(pool, user_id, movie_id).await
    };

    if let Err(e) = result {
        error!(user_id, movie_id, error = %e, "Favorites update failed");
        bot.answer_callback_query(q.id.clone())
            .text(e.user_message())
            .await?;
        return Ok(());
    }

    let alert = if add {
        templates::ALERT_FAVORITES_ADDED
    } else {
        templates::ALERT_FAVORITES_REMOVED
    };
    bot.answer_callback_query(q.id.clone()).text(alert).await?;

    if let Some(message) = q.message.as_ref().and_then(|m| m.regular_message()) {
        let mut keyboard = message
            .reply_markup()
            .map(|markup| markup.inline_keyboard.clone())
            .unwrap_or_default();

        // The movie is in favorites exactly when the press added it.
        let toggle_row = vec![favorites_button(movie_id, add, from_search)];
        if keyboard.is_empty() {
            keyboard.push(toggle_row);
        } else {
            keyboard[0] = toggle_row;
        }

        bot.edit_message_reply_markup(message.chat.id, message.id)
            .reply_markup(InlineKeyboardMarkup::new(keyboard))
            .await?;
    }

    Ok(())
}

/// Render the full card for a movie picked from a listing.
async fn handle_expand(
    bot: &Bot,
    q: &CallbackQuery,
    pool: &SqlitePool,
    api: &MovieApi,
    movie_id: i64,
    source: ExpandSource,
) -> Result<()> {
    let user_id = q.from.id.0 as i64;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    let movie = match api.get_by_id(movie_id).await {
        Ok(movie) => movie,
        Err(e) => {
            error!(user_id, movie_id, error = %e, "Movie expand failed");
            bot.answer_callback_query(q.id.clone())
                .text(e.user_message())
                .await?;
            return Ok(());
        }
    };

    let in_favorites = match source {
        ExpandSource::Favorites => true,
        ExpandSource::Trending => match db::get_favorites(pool, user_id).await {
            Ok(favorites) => favorites.contains(&movie_id),
            Err(e) => {
                warn!(user_id, error = %e, "Favorites lookup failed, rendering without membership");
                false
            }
        },
    };

    send_expanded_movie(bot, chat_id, &movie, in_favorites).await?;
    bot.answer_callback_query(q.id.clone()).await?;
    Ok(())
}

/// Render the trailing search candidates, one card each. The ids come from
/// the button payload and are re-fetched, so membership is always current.
async fn handle_show_more(
    bot: &Bot,
    q: &CallbackQuery,
    pool: &SqlitePool,
    api: &MovieApi,
    movie_ids: &[i64],
) -> Result<()> {
    let user_id = q.from.id.0 as i64;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    let movies = match api.get_many_by_id(movie_ids).await {
        Ok(movies) => movies,
        Err(e) => {
            error!(user_id, error = %e, "Show-more fetch failed");
            bot.answer_callback_query(q.id.clone())
                .text(e.user_message())
                .await?;
            return Ok(());
        }
    };

    if movies.is_empty() {
        bot.answer_callback_query(q.id.clone())
            .text(templates::SEARCH_NOT_FOUND)
            .await?;
        return Ok(());
    }

    let favorites = match db::get_favorites(pool, user_id).await {
        Ok(favorites) => favorites,
        Err(e) => {
            warn!(user_id, error = %e, "Favorites lookup failed, rendering without membership");
            Vec::new()
        }
    };

    bot.answer_callback_query(q.id.clone())
        .text(format!(
            "{}{}",
            templates::SEARCH_MORE_DISPLAYED_ALERT,
            movies.len()
        ))
        .await?;

    for movie in &movies {
        send_expanded_movie(bot, chat_id, movie, favorites.contains(&movie.id)).await?;
    }

    Ok(())
}
