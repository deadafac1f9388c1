use std::net::SocketAddr;

use anyhow::Context;

/// Used when `SECRET_KEY` is unset. Anyone who knows it can forge cookies.
pub const INSECURE_DEFAULT_SECRET_KEY: &str = "movieshelf-insecure-development-secret";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub secret_key: String,
    pub tmdb_access_token: Option<String>,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies-collection.db?mode=rwc".to_string());

        let secret_key = std::env::var("SECRET_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| INSECURE_DEFAULT_SECRET_KEY.to_string());

        let tmdb_access_token =
            std::env::var("API_READ_ACCESS").ok().filter(|s| !s.trim().is_empty());
        let tmdb_base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = std::env::var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p/w500".to_string());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            secret_key,
            tmdb_access_token,
            tmdb_base_url,
            tmdb_image_base_url,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == INSECURE_DEFAULT_SECRET_KEY
    }
}
