//! UI Builder module for creating keyboards
//!
//! Pure construction only: every function maps values to markup, all I/O
//! stays in the handlers.

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};

use crate::callback::CallbackData;
use crate::movie::Movie;
use crate::templates;

/// Trending is always rendered as 7 buttons split 2/2/3, matching how
/// Telegram lays out the accompanying poster group.
const TRENDING_LAYOUT: [&[usize]; 3] = [&[0, 1], &[2, 3], &[4, 5, 6]];

/// Main menu reply keyboard: search / (favorites, trending) / (clear, help).
pub fn main_menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(templates::BUTTON_SEARCH)],
        vec![
            KeyboardButton::new(templates::BUTTON_FAVORITES_SHOW),
            KeyboardButton::new(templates::BUTTON_TRENDING),
        ],
        vec![
            KeyboardButton::new(templates::BUTTON_FAVORITES_CLEAR),
            KeyboardButton::new(templates::BUTTON_HELP),
        ],
    ])
    .resize_keyboard()
}

/// Yes/no keyboard for the clear-favorites confirmation dialog.
pub fn clear_confirm_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(templates::BUTTON_CLEAR_CONFIRM),
        KeyboardButton::new(templates::BUTTON_CLEAR_CANCEL),
    ]])
    .resize_keyboard()
}

/// The add/remove favorites button for one movie card. Shows the action the
/// press will perform, so a movie already in favorites gets "remove".
pub fn favorites_button(
    movie_id: i64,
    in_favorites: bool,
    from_search: bool,
) -> InlineKeyboardButton {
    if in_favorites {
        InlineKeyboardButton::callback(
            templates::BUTTON_FAVORITES_REMOVE,
            CallbackData::FavoritesRemove {
                movie_id,
                from_search,
            }
            .encode(),
        )
    } else {
        InlineKeyboardButton::callback(
            templates::BUTTON_FAVORITES_ADD,
            CallbackData::FavoritesAdd {
                movie_id,
                from_search,
            }
            .encode(),
        )
    }
}

/// Markup under a standalone movie card (favorites/trending expand,
/// show-more results): just the toggle button.
pub fn info_keyboard(movie_id: i64, in_favorites: bool) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![favorites_button(movie_id, in_favorites, false)]])
}

/// Markup under the best-match card of a search reply: the toggle button
/// (search provenance) plus, when trailing candidates exist, a "show more"
/// button carrying their ids.
pub fn search_result_keyboard(
    movie_id: i64,
    in_favorites: bool,
    rest_ids: &[i64],
) -> InlineKeyboardMarkup {
    let mut keyboard = vec![vec![favorites_button(movie_id, in_favorites, true)]];

    if !rest_ids.is_empty() {
        keyboard.push(vec![InlineKeyboardButton::callback(
            templates::BUTTON_SHOW_MORE,
            CallbackData::ShowMore {
                movie_ids: rest_ids.to_vec(),
            }
            .encode(),
        )]);
    }

    InlineKeyboardMarkup::new(keyboard)
}

/// One expand button per favorite movie, a row each.
pub fn favorites_list_keyboard(movies: &[Movie]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(movies.iter().map(|movie| {
        vec![InlineKeyboardButton::callback(
            movie.title.clone(),
            CallbackData::ExpandFavorites { movie_id: movie.id }.encode(),
        )]
    }))
}

/// Trending buttons in the fixed 2/2/3 grid.
pub fn trending_keyboard(movies: &[Movie]) -> InlineKeyboardMarkup {
    let mut keyboard = Vec::new();

    for layout_row in TRENDING_LAYOUT {
        let row: Vec<InlineKeyboardButton> = layout_row
            .iter()
            .filter_map(|&i| movies.get(i))
            .map(|movie| {
                InlineKeyboardButton::callback(
                    movie.title.clone(),
                    CallbackData::ExpandTrending { movie_id: movie.id }.encode(),
                )
            })
            .collect();

        if !row.is_empty() {
            keyboard.push(row);
        }
    }

    InlineKeyboardMarkup::new(keyboard)
}
