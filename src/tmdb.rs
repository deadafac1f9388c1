use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{error::AppResult, models::SearchCandidate};

pub struct SearchClient {
    client: reqwest::Client,
    access_token: Option<String>,
    base_url: String,
}

impl SearchClient {
    pub fn new(client: reqwest::Client, access_token: Option<String>, base_url: String) -> Self {
        if access_token.is_none() {
            warn!("no API_READ_ACCESS token configured, TMDB searches will be unauthenticated");
        }
        Self { client, access_token, base_url }
    }

    /// Searches TMDB by title. Any upstream failure yields an empty list.
    pub async fn search(&self, title: &str) -> Vec<SearchCandidate> {
        match self.search_movie(title).await {
            Ok(candidates) => {
                debug!(title = %title, count = candidates.len(), "tmdb search finished");
                candidates
            },
            Err(err) => {
                warn!(title = %title, error = %err, "tmdb search failed");
                Vec::new()
            },
        }
    }

    async fn search_movie(&self, title: &str) -> AppResult<Vec<SearchCandidate>> {
        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let mut req = self.client.get(url).header(ACCEPT, "application/json").query(&[
            ("query", title),
            ("include_adult", "false"),
            ("language", "en-US"),
            ("page", "1"),
        ]);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(title = %title, status = %status, "tmdb search returned non-success status");
            return Ok(Vec::new());
        }

        let body: SearchResponse = resp.json().await?;
        Ok(body.results.into_iter().map(SearchMovie::into_candidate).collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    #[serde(default)]
    id: i32,
    #[serde(default)]
    title: String,
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    poster_path: Option<String>,
}

impl SearchMovie {
    fn into_candidate(self) -> SearchCandidate {
        SearchCandidate::new(
            self.id,
            self.title,
            self.release_date,
            self.overview.unwrap_or_default(),
            self.poster_path,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        response::IntoResponse,
        routing::get,
    };
    use serde_json::json;

    use super::*;

    async fn start_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: String, token: Option<&str>) -> SearchClient {
        SearchClient::new(reqwest::Client::new(), token.map(str::to_string), base_url)
    }

    async fn godfather_search(
        Query(q): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> impl IntoResponse {
        let expected = [
            ("query", "The Godfather"),
            ("include_adult", "false"),
            ("language", "en-US"),
            ("page", "1"),
        ];
        let params_ok = expected.iter().all(|(k, v)| q.get(*k).map(String::as_str) == Some(*v));
        let auth_ok = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
            == Some("Bearer test-token");
        if !params_ok || !auth_ok {
            return (StatusCode::BAD_REQUEST, Json(json!({ "status_message": "bad request" })));
        }

        (
            StatusCode::OK,
            Json(json!({
                "page": 1,
                "results": [{
                    "id": 238,
                    "title": "The Godfather",
                    "release_date": "1972-03-14",
                    "overview": "Spanning the years 1945 to 1955...",
                    "poster_path": "/3bhkrj58Vtu7enYsRolD1fZdja1.jpg",
                    "adult": false,
                    "vote_average": 8.7
                }],
                "total_pages": 1,
                "total_results": 1
            })),
        )
    }

    #[tokio::test]
    async fn parses_results_on_success() {
        let base = start_upstream(Router::new().route("/search/movie", get(godfather_search))).await;

        let results = client(base, Some("test-token")).search("The Godfather").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Godfather");
        assert_eq!(results[0].tmdb_id, 238);
        assert_eq!(results[0].year, Some(1972));
        assert_eq!(results[0].poster_path.as_deref(), Some("/3bhkrj58Vtu7enYsRolD1fZdja1.jpg"));
    }

    #[tokio::test]
    async fn non_success_status_yields_empty_list() {
        let app = Router::new().route(
            "/search/movie",
            get(|| async {
                (StatusCode::UNAUTHORIZED, Json(json!({ "status_message": "Invalid API key" })))
            }),
        );
        let base = start_upstream(app).await;

        assert!(client(base, None).search("The Godfather").await.is_empty());
    }

    #[tokio::test]
    async fn missing_token_sends_no_authorization_header() {
        // Same upstream as the happy path, which rejects requests without the bearer token.
        let base = start_upstream(Router::new().route("/search/movie", get(godfather_search))).await;

        assert!(client(base, None).search("The Godfather").await.is_empty());
    }

    #[tokio::test]
    async fn missing_results_key_yields_empty_list() {
        let app = Router::new()
            .route("/search/movie", get(|| async { Json(json!({ "page": 1 })) }));
        let base = start_upstream(app).await;

        assert!(client(base, Some("test-token")).search("Nothing").await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_upstream_yields_empty_list() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let results = client(format!("http://{addr}"), Some("test-token")).search("Heat").await;
        assert!(results.is_empty());
    }
}
