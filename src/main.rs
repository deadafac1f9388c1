mod config;
mod db;
mod entities;
mod error;
mod forms;
mod models;
mod routes;
mod session;
mod store;
mod templates;
mod tmdb;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::MovieStore, tmdb::SearchClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub search: Arc<SearchClient>,
    key: Key,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: MovieStore, search: SearchClient) -> Self {
        let key = session::signing_key(&config.secret_key);
        Self { config, store, search: Arc::new(search), key }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/add", get(routes::add_form).post(routes::add))
        .route("/select", get(routes::select))
        .route("/edit/{id}", get(routes::edit_form).post(routes::edit))
        .route("/delete/{id}", post(routes::delete))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movieshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);
    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY not set, signing cookies with the built-in development key");
    }

    let http = reqwest::Client::builder()
        .user_agent("movieshelf/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = MovieStore::new(db);

    let search =
        SearchClient::new(http, config.tmdb_access_token.clone(), config.tmdb_base_url.clone());

    let state = AppState::new(config.clone(), store, search);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
