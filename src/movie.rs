//! Movie value type and its Telegram presentation.
//!
//! A [`Movie`] is an immutable snapshot fetched from TMDB; rendering it to a
//! caption is a pure function over the value so the formatting can be tested
//! without any network access.

use std::collections::HashMap;
use std::sync::LazyLock;

use teloxide::utils::html;

use crate::templates;

/// TMDB genre ids mapped to Ukrainian display names. List endpoints
/// (search, trending) only carry `genre_ids`, detail endpoints carry
/// full `genres` objects.
static GENRES: LazyLock<HashMap<i64, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (28, "Бойовик"),
        (12, "Пригоди"),
        (16, "Мультфільм"),
        (35, "Комедія"),
        (80, "Кримінал"),
        (99, "Документальний"),
        (18, "Драма"),
        (10751, "Сімейний"),
        (14, "Фентезі"),
        (36, "Історичний"),
        (27, "Жахи"),
        (10402, "Музика"),
        (9648, "Детектив"),
        (10749, "Мелодрама"),
        (878, "Фантастика"),
        (10770, "Телефільм"),
        (53, "Трилер"),
        (10752, "Військовий"),
        (37, "Вестерн"),
    ])
});

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Immutable movie snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Display string, e.g. "Бойовик, трилер". Empty when TMDB has no genres.
    pub genres: String,
    /// 0.0 means "unrated".
    pub rating: f64,
    /// Release year as text; empty when the release date is unknown.
    pub year: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
}

impl Movie {
    /// HTML caption for the movie card, mirroring the card layout of the
    /// detail view: title, rating, year, genres, optional trailer link,
    /// expandable overview.
    pub fn caption(&self) -> String {
        let mut result = String::new();

        result.push_str(&format!("🎬 <b>{}</b>\n\n", html::escape(&self.title)));

        if self.rating != 0.0 {
            result.push_str(&format!("⭐️ {:.1}\n", self.rating));
        } else {
            result.push_str(&format!("⭐️ {}\n", templates::RATING_NONE));
        }
        result.push_str(&format!("📅 {}\n", self.year));
        result.push_str(&format!("🎭 {}\n\n", self.genres));

        if let Some(trailer) = &self.trailer_url {
            result.push_str(&format!(
                "🔗 <a href=\"{}\">{}</a>\n",
                trailer,
                templates::TRAILER_LINK
            ));
        }
        result.push_str(&format!(
            "<blockquote expandable>{}</blockquote>\n\n",
            html::escape(&self.overview)
        ));

        result
    }
}

/// Joins genre names with ", " and sentence-capitalizes the result:
/// `["Бойовик", "Трилер"]` becomes "Бойовик, трилер".
pub fn join_genres<S: AsRef<str>>(names: &[S]) -> String {
    let joined = names
        .iter()
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
        .to_lowercase();

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => joined,
    }
}

/// Resolves list-endpoint genre ids to display names, skipping ids missing
/// from the table.
pub fn genre_names(genre_ids: &[i64]) -> Vec<&'static str> {
    genre_ids
        .iter()
        .filter_map(|id| GENRES.get(id).copied())
        .collect()
}

/// Full poster URL for a TMDB `poster_path`, if any.
pub fn poster_url(poster_path: Option<&str>) -> Option<String> {
    poster_path.map(|path| format!("{POSTER_BASE_URL}{path}"))
}

/// Year prefix of a TMDB release date ("2014-11-05" -> "2014").
pub fn release_year(release_date: &str) -> String {
    release_date.get(..4).unwrap_or("").to_string()
}

/// Ratings arrive with arbitrary precision; one decimal is displayed.
pub fn round_rating(vote_average: f64) -> f64 {
    (vote_average * 10.0).round() / 10.0
}
