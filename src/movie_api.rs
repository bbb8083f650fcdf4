//! TMDB lookup facade.
//!
//! Thin async wrapper over the TMDB v3 REST API: title search, weekly
//! trending, detail fetches and best-effort trailer resolution. All lookups
//! are parameterized by the configured locale; trailer lookup retries once
//! in the fallback locale and never fails the surrounding fetch.

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::dialogue::validate_query;
use crate::error::BotError;
use crate::movie::{
    genre_names, join_genres, poster_url, release_year, round_rating, Movie,
};

const BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Search replies render the best match; at most this many candidates are
/// kept for the "show more" follow-up.
const SEARCH_RESULT_LIMIT: usize = 6;
const TRENDING_LIMIT: usize = 7;

pub struct MovieApi {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
    language: String,
    fallback_language: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<MovieListItem>,
}

/// List-endpoint shape (search, trending): genres come as bare ids.
#[derive(Debug, Deserialize)]
pub struct MovieListItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
}

/// Detail-endpoint shape: genres come as named objects.
#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    pub results: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl MovieApi {
    pub fn new(
        access_token: String,
        language: String,
        fallback_language: String,
    ) -> Result<Self, BotError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            access_token,
            base_url: BASE_URL.to_string(),
            language,
            fallback_language,
        })
    }

    /// Search movies by title, best match first, at most 6 candidates.
    /// An empty result is `Ok(vec![])`, not an error. Only the best match
    /// carries a trailer; the tail is re-fetched through [`Self::get_by_id`]
    /// when expanded.
    pub async fn search(&self, query: &str) -> Result<Vec<Movie>, BotError> {
        let query = validate_query(query)?;

        let response: SearchResponse = self
            .get_json(
                "/search/movie",
                &[
                    ("query", query),
                    ("language", self.language.as_str()),
                    ("include_adult", "false"),
                ],
            )
            .await?;

        let mut movies: Vec<Movie> = response
            .results
            .into_iter()
            .take(SEARCH_RESULT_LIMIT)
            .map(|item| movie_from_list_item(item, None))
            .collect();

        if let Some(best) = movies.first_mut() {
            best.trailer_url = self.fetch_trailer(best.id).await;
        }

        debug!(query, results = movies.len(), "Search completed");
        Ok(movies)
    }

    /// This week's trending movies, top 7 in the service's order.
    pub async fn get_trending(&self) -> Result<Vec<Movie>, BotError> {
        let response: SearchResponse = self
            .get_json("/trending/movie/week", &[("language", self.language.as_str())])
            .await?;

        Ok(response
            .results
            .into_iter()
            .take(TRENDING_LIMIT)
            .map(|item| movie_from_list_item(item, None))
            .collect())
    }

    /// Full movie by id, trailer included when one exists.
    pub async fn get_by_id(&self, movie_id: i64) -> Result<Movie, BotError> {
        let details: MovieDetails = self
            .get_json(
                &format!("/movie/{movie_id}"),
                &[("language", self.language.as_str())],
            )
            .await?;

        let trailer_url = self.fetch_trailer(movie_id).await;
        Ok(movie_from_details(details, trailer_url))
    }

    /// Fetch several movies, one request per id, preserving input order.
    /// Ids TMDB no longer knows are skipped so one delisted movie does not
    /// take a whole favorites list down with it.
    pub async fn get_many_by_id(&self, movie_ids: &[i64]) -> Result<Vec<Movie>, BotError> {
        let mut movies = Vec::with_capacity(movie_ids.len());

        for &movie_id in movie_ids {
            match self.get_by_id(movie_id).await {
                Ok(movie) => movies.push(movie),
                Err(BotError::NotFound(_)) => {
                    warn!(movie_id, "Movie no longer exists upstream, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(movies)
    }

    /// Best-effort trailer lookup: preferred locale first, then one retry in
    /// the fallback locale. Any failure resolves to `None`.
    async fn fetch_trailer(&self, movie_id: i64) -> Option<String> {
        for language in [&self.language, &self.fallback_language] {
            let response: Result<VideosResponse, BotError> = self
                .get_json(
                    &format!("/movie/{movie_id}/videos"),
                    &[("language", language.as_str())],
                )
                .await;

            match response {
                Ok(videos) if videos.results.is_empty() => continue,
                Ok(videos) => return pick_trailer(&videos.results),
                Err(e) => {
                    debug!(movie_id, error = %e, "Trailer lookup failed");
                    return None;
                }
            }
        }

        None
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, BotError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BotError::NotFound(path.to_string()));
        }

        Ok(response.error_for_status()?.json::<T>().await?)
    }
}

/// First official-looking trailer: type "Trailer", hosted on YouTube.
fn pick_trailer(videos: &[VideoItem]) -> Option<String> {
    videos
        .iter()
        .find(|video| video.kind == "Trailer" && video.site == "YouTube")
        .map(|video| format!("https://www.youtube.com/watch?v={}", video.key))
}

fn movie_from_list_item(item: MovieListItem, trailer_url: Option<String>) -> Movie {
    Movie {
        id: item.id,
        title: item.title,
        genres: join_genres(&genre_names(&item.genre_ids)),
        rating: round_rating(item.vote_average),
        year: release_year(&item.release_date),
        overview: item.overview,
        poster_url: poster_url(item.poster_path.as_deref()),
        trailer_url,
    }
}

fn movie_from_details(details: MovieDetails, trailer_url: Option<String>) -> Movie {
    let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();

    Movie {
        id: details.id,
        title: details.title,
        genres: join_genres(&names),
        rating: round_rating(details.vote_average),
        year: release_year(&details.release_date),
        overview: details.overview,
        poster_url: poster_url(details.poster_path.as_deref()),
        trailer_url,
    }
}
