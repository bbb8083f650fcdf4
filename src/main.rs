use std::sync::Arc;

use anyhow::Result;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kinobot::bot;
use kinobot::config::AppConfig;
use kinobot::db;
use kinobot::dialogue::MenuState;
use kinobot::movie_api::MovieApi;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging; `log` records from the store are captured too
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting KinoBot Telegram Bot");

    let config = Arc::new(AppConfig::from_env()?);

    info!("Initializing database at: {}", config.database_url);
    let pool = db::connect(&config.database_url).await?;
    db::init_database_schema(&pool).await?;

    let api = Arc::new(MovieApi::new(
        config.tmdb_access_token.clone(),
        config.language.clone(),
        config.fallback_language.clone(),
    )?);

    let bot = Bot::new(config.bot_token.clone());

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .enter_dialogue::<Message, InMemStorage<MenuState>, MenuState>()
                .endpoint(bot::message_handler),
        )
        .branch(Update::filter_callback_query().endpoint(bot::callback_handler));

    // The default update distribution keys by chat id: one chat's events are
    // handled in arrival order, different chats run concurrently.
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<MenuState>::new(),
            pool,
            api,
            config
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
