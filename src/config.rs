//! Process configuration loaded from the environment.

use std::collections::HashSet;
use std::env;

use anyhow::{Context, Result};
use log::warn;

/// Runtime configuration. Lives for the whole process behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub tmdb_access_token: String,
    pub database_url: String,
    /// Telegram user ids allowed to use the /all command.
    pub admins: HashSet<u64>,
    /// Preferred TMDB locale for all lookups.
    pub language: String,
    /// Locale retried once when the preferred one has no videos.
    pub fallback_language: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .context("TELEGRAM_BOT_TOKEN must be set")?,
            tmdb_access_token: env::var("TMDB_ACCESS_TOKEN")
                .context("TMDB_ACCESS_TOKEN must be set")?,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            admins: parse_admins(&env::var("ADMINS").unwrap_or_default()),
            language: env::var("TMDB_LANGUAGE").unwrap_or_else(|_| "uk-UA".to_string()),
            fallback_language: env::var("TMDB_FALLBACK_LANGUAGE")
                .unwrap_or_else(|_| "en-US".to_string()),
        })
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admins.contains(&user_id)
    }
}

/// Parses the comma-separated ADMINS variable, skipping malformed entries.
fn parse_admins(raw: &str) -> HashSet<u64> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring malformed admin id in ADMINS: {part}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admins() {
        let admins = parse_admins("123, 456,,789");
        assert_eq!(admins, HashSet::from([123, 456, 789]));
    }

    #[test]
    fn test_parse_admins_skips_garbage() {
        let admins = parse_admins("123,abc,-5");
        assert_eq!(admins, HashSet::from([123]));
    }

    #[test]
    fn test_parse_admins_empty() {
        assert!(parse_admins("").is_empty());
    }

    #[test]
    fn test_is_admin() {
        let config = AppConfig {
            bot_token: String::new(),
            tmdb_access_token: String::new(),
            database_url: String::new(),
            admins: HashSet::from([42]),
            language: "uk-UA".to_string(),
            fallback_language: "en-US".to_string(),
        };
        assert!(config.is_admin(42));
        assert!(!config.is_admin(7));
    }
}
