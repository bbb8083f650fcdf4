//! Inline-keyboard callback payload encoding.
//!
//! The wire format is `<intent>:<args...>` with `:` as separator, `,`
//! between ids and an optional `|search` suffix marking that the button
//! lives on a search-result card:
//!
//! - `favorites_add:42`, `favorites_remove:42|search`
//! - `expand_favorites:77`, `expand_trending:77`
//! - `others:12,13,14,15,16`

/// A decoded callback payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackData {
    FavoritesAdd { movie_id: i64, from_search: bool },
    FavoritesRemove { movie_id: i64, from_search: bool },
    ExpandFavorites { movie_id: i64 },
    ExpandTrending { movie_id: i64 },
    ShowMore { movie_ids: Vec<i64> },
}

impl CallbackData {
    pub fn encode(&self) -> String {
        match self {
            CallbackData::FavoritesAdd {
                movie_id,
                from_search,
            } => format!("favorites_add:{movie_id}{}", search_suffix(*from_search)),
            CallbackData::FavoritesRemove {
                movie_id,
                from_search,
            } => format!("favorites_remove:{movie_id}{}", search_suffix(*from_search)),
            CallbackData::ExpandFavorites { movie_id } => format!("expand_favorites:{movie_id}"),
            CallbackData::ExpandTrending { movie_id } => format!("expand_trending:{movie_id}"),
            CallbackData::ShowMore { movie_ids } => {
                let ids: Vec<String> = movie_ids.iter().map(|id| id.to_string()).collect();
                format!("others:{}", ids.join(","))
            }
        }
    }

    /// Parses a raw payload string. Returns `None` for payloads this bot
    /// never produced.
    pub fn parse(data: &str) -> Option<Self> {
        let (data, from_search) = match data.strip_suffix("|search") {
            Some(stripped) => (stripped, true),
            None => (data, false),
        };

        let (intent, args) = data.split_once(':')?;

        match intent {
            "favorites_add" => Some(CallbackData::FavoritesAdd {
                movie_id: args.parse().ok()?,
                from_search,
            }),
            "favorites_remove" => Some(CallbackData::FavoritesRemove {
                movie_id: args.parse().ok()?,
                from_search,
            }),
            "expand_favorites" => Some(CallbackData::ExpandFavorites {
                movie_id: args.parse().ok()?,
            }),
            "expand_trending" => Some(CallbackData::ExpandTrending {
                movie_id: args.parse().ok()?,
            }),
            // A payload with no ids decodes to an empty list; the handler
            // answers it with an alert instead of failing.
            "others" => Some(CallbackData::ShowMore {
                movie_ids: args
                    .split(',')
                    .filter(|part| !part.is_empty())
                    .map(str::parse)
                    .collect::<Result<Vec<i64>, _>>()
                    .ok()?,
            }),
            _ => None,
        }
    }
}

fn search_suffix(from_search: bool) -> &'static str {
    if from_search {
        "|search"
    } else {
        ""
    }
}
