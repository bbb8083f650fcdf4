use anyhow::Result;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardButtonKind};
use tempfile::TempDir;

use kinobot::bot::ui_builder::{
    clear_confirm_keyboard, favorites_button, favorites_list_keyboard, info_keyboard,
    main_menu_keyboard, search_result_keyboard, trending_keyboard,
};
use kinobot::db;
use kinobot::movie::Movie;
use kinobot::templates;

fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        genres: "Бойовик".to_string(),
        rating: 7.1,
        year: "2020".to_string(),
        overview: String::new(),
        poster_url: None,
        trailer_url: None,
    }
}

fn callback_data(button: &InlineKeyboardButton) -> &str {
    match &button.kind {
        InlineKeyboardButtonKind::CallbackData(data) => data,
        other => panic!("Expected callback button, got {:?}", other),
    }
}

/// Trending is always one button per movie in the fixed 2/2/3 grid.
#[test]
fn test_trending_keyboard_layout() {
    let movies: Vec<Movie> = (1..=7).map(|i| movie(i, &format!("Movie {i}"))).collect();
    let markup = trending_keyboard(&movies);

    let row_lengths: Vec<usize> = markup.inline_keyboard.iter().map(|row| row.len()).collect();
    assert_eq!(row_lengths, vec![2, 2, 3]);

    let payloads: Vec<&str> = markup
        .inline_keyboard
        .iter()
        .flatten()
        .map(callback_data)
        .collect();
    assert_eq!(
        payloads,
        vec![
            "expand_trending:1",
            "expand_trending:2",
            "expand_trending:3",
            "expand_trending:4",
            "expand_trending:5",
            "expand_trending:6",
            "expand_trending:7",
        ]
    );
}

/// Fewer movies than the grid expects must not panic the builder.
#[test]
fn test_trending_keyboard_with_short_list() {
    let movies: Vec<Movie> = (1..=3).map(|i| movie(i, "M")).collect();
    let markup = trending_keyboard(&movies);

    let row_lengths: Vec<usize> = markup.inline_keyboard.iter().map(|row| row.len()).collect();
    assert_eq!(row_lengths, vec![2, 1]);
}

/// The search card carries search provenance on the toggle button and a
/// show-more button with the trailing candidate ids.
#[test]
fn test_search_result_keyboard_with_more_results() {
    let markup = search_result_keyboard(42, false, &[12, 13, 14, 15, 16]);

    assert_eq!(markup.inline_keyboard.len(), 2);
    assert_eq!(
        callback_data(&markup.inline_keyboard[0][0]),
        "favorites_add:42|search"
    );
    assert_eq!(markup.inline_keyboard[0][0].text, templates::BUTTON_FAVORITES_ADD);

    assert_eq!(
        callback_data(&markup.inline_keyboard[1][0]),
        "others:12,13,14,15,16"
    );
    assert_eq!(markup.inline_keyboard[1][0].text, templates::BUTTON_SHOW_MORE);
}

/// A single-candidate search renders no show-more row.
#[test]
fn test_search_result_keyboard_without_more_results() {
    let markup = search_result_keyboard(42, true, &[]);

    assert_eq!(markup.inline_keyboard.len(), 1);
    assert_eq!(
        callback_data(&markup.inline_keyboard[0][0]),
        "favorites_remove:42|search"
    );
}

/// Standalone cards get a single toggle button without provenance suffix.
#[test]
fn test_info_keyboard() {
    let markup = info_keyboard(77, true);
    assert_eq!(markup.inline_keyboard.len(), 1);
    assert_eq!(callback_data(&markup.inline_keyboard[0][0]), "favorites_remove:77");
    assert_eq!(
        markup.inline_keyboard[0][0].text,
        templates::BUTTON_FAVORITES_REMOVE
    );
}

/// One expand row per favorite movie, labelled with the title.
#[test]
fn test_favorites_list_keyboard() {
    let movies = vec![movie(1, "Перший"), movie(2, "Другий")];
    let markup = favorites_list_keyboard(&movies);

    assert_eq!(markup.inline_keyboard.len(), 2);
    assert_eq!(markup.inline_keyboard[0][0].text, "Перший");
    assert_eq!(callback_data(&markup.inline_keyboard[0][0]), "expand_favorites:1");
    assert_eq!(callback_data(&markup.inline_keyboard[1][0]), "expand_favorites:2");
}

/// Main menu layout: search / (favorites, trending) / (clear, help).
#[test]
fn test_main_menu_keyboard_layout() {
    let markup = main_menu_keyboard();
    let texts: Vec<Vec<&str>> = markup
        .keyboard
        .iter()
        .map(|row| row.iter().map(|b| b.text.as_str()).collect())
        .collect();

    assert_eq!(
        texts,
        vec![
            vec![templates::BUTTON_SEARCH],
            vec![templates::BUTTON_FAVORITES_SHOW, templates::BUTTON_TRENDING],
            vec![templates::BUTTON_FAVORITES_CLEAR, templates::BUTTON_HELP],
        ]
    );
}

#[test]
fn test_clear_confirm_keyboard_layout() {
    let markup = clear_confirm_keyboard();
    assert_eq!(markup.keyboard.len(), 1);
    assert_eq!(markup.keyboard[0][0].text, templates::BUTTON_CLEAR_CONFIRM);
    assert_eq!(markup.keyboard[0][1].text, templates::BUTTON_CLEAR_CANCEL);
}

/// End-to-end favorites toggle as the handlers drive it: a fresh user sees
/// an "add" button, pressing it stores the movie, and the re-rendered
/// button reads "remove".
#[tokio::test]
async fn test_favorite_toggle_scenario() -> Result<()> {
    let dir = TempDir::new()?;
    let url = format!("sqlite://{}", dir.path().join("favorites.db").display());
    let pool = db::connect(&url).await?;
    db::init_database_schema(&pool).await?;

    let user_id = 5;
    let movie_id = 603;

    db::register_user(&pool, user_id).await?;
    let favorites = db::get_favorites(&pool, user_id).await?;
    assert!(favorites.is_empty());

    // Search renders the best match with an "add" button
    let button = favorites_button(movie_id, favorites.contains(&movie_id), true);
    assert_eq!(button.text, templates::BUTTON_FAVORITES_ADD);
    assert_eq!(callback_data(&button), "favorites_add:603|search");

    // Pressing it adds the movie and the button flips to "remove"
    db::add_favorite(&pool, user_id, movie_id).await?;
    let favorites = db::get_favorites(&pool, user_id).await?;
    assert_eq!(favorites, vec![movie_id]);

    let button = favorites_button(movie_id, favorites.contains(&movie_id), true);
    assert_eq!(button.text, templates::BUTTON_FAVORITES_REMOVE);
    assert_eq!(callback_data(&button), "favorites_remove:603|search");
    Ok(())
}
