use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    forms::{AddQuery, DeleteForm, FormAction, FormError, MovieForm},
    session, templates,
};

pub async fn index(State(state): State<AppState>, jar: SignedCookieJar) -> AppResult<Response> {
    let movies = state.store.list_all().await?;
    let (jar, flash) = session::take_flash(jar);
    let (jar, token) = session::csrf_token(jar);
    Ok((jar, Html(templates::index_page(&movies, flash.as_deref(), &token))).into_response())
}

pub async fn add_form(jar: SignedCookieJar, Query(prefill): Query<AddQuery>) -> Response {
    let (jar, token) = session::csrf_token(jar);
    let form = MovieForm::from(prefill);
    (jar, Html(templates::movie_form_page("Add a movie", "/add", &form, &[], &token, true)))
        .into_response()
}

pub async fn add(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<MovieForm>,
) -> AppResult<Response> {
    check_csrf(&jar, &form.csrf_token)?;

    if form.action == FormAction::Search {
        return Ok(match form.search_title() {
            Ok(title) => {
                Redirect::to(&format!("/select?title={}", urlencoding::encode(title))).into_response()
            },
            Err(err) => invalid_form("Add a movie", "/add", jar, &form, &[err], true),
        });
    }

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(invalid_form("Add a movie", "/add", jar, &form, &errors, true)),
    };

    let movie = state.store.create(&input).await?;
    info!(id = movie.id, title = %movie.title, "movie added");
    let jar = session::set_flash(jar, format!("Added \u{201c}{}\u{201d}.", movie.title));
    Ok((jar, Redirect::to("/")).into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SelectQuery {
    title: String,
}

pub async fn select(State(state): State<AppState>, Query(q): Query<SelectQuery>) -> Response {
    let title = q.title.trim();
    if title.is_empty() {
        return Redirect::to("/add").into_response();
    }

    let candidates = state.search.search(title).await;
    Html(templates::select_page(title, &candidates, &state.config.tmdb_image_base_url))
        .into_response()
}

pub async fn edit_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(movie) = state.store.read(id).await? else {
        return Ok(not_found(jar, id));
    };

    let (jar, token) = session::csrf_token(jar);
    let form = MovieForm::from(&movie);
    let heading = format!("Edit \u{201c}{}\u{201d}", movie.title);
    let action = format!("/edit/{id}");
    Ok((jar, Html(templates::movie_form_page(&heading, &action, &form, &[], &token, false)))
        .into_response())
}

pub async fn edit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
    Form(form): Form<MovieForm>,
) -> AppResult<Response> {
    check_csrf(&jar, &form.csrf_token)?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let action = format!("/edit/{id}");
            return Ok(invalid_form("Edit movie", &action, jar, &form, &errors, false));
        },
    };

    let Some(movie) = state.store.update(id, &input).await? else {
        return Ok(not_found(jar, id));
    };

    info!(id = movie.id, "movie edited");
    let jar = session::set_flash(jar, format!("Updated \u{201c}{}\u{201d}.", movie.title));
    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
    Form(form): Form<DeleteForm>,
) -> AppResult<Response> {
    check_csrf(&jar, &form.csrf_token)?;

    let Some(movie) = state.store.delete(id).await? else {
        return Ok(not_found(jar, id));
    };

    info!(id = movie.id, "movie deleted");
    let jar = session::set_flash(jar, format!("Deleted \u{201c}{}\u{201d}.", movie.title));
    Ok((jar, Redirect::to("/")).into_response())
}

fn check_csrf(jar: &SignedCookieJar, submitted: &str) -> AppResult<()> {
    if session::csrf_matches(jar, submitted) {
        Ok(())
    } else {
        Err(AppError::bad_request("The form expired or was tampered with. Reload and try again."))
    }
}

fn not_found(jar: SignedCookieJar, id: i32) -> Response {
    let jar = session::set_flash(jar, format!("Movie #{id} not found."));
    (jar, Redirect::to("/")).into_response()
}

fn invalid_form(
    heading: &str,
    action: &str,
    jar: SignedCookieJar,
    form: &MovieForm,
    errors: &[FormError],
    search: bool,
) -> Response {
    let (jar, token) = session::csrf_token(jar);
    let body = templates::movie_form_page(heading, action, form, errors, &token, search);
    (StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response()
}
