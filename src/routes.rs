use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use tracing::debug;

use crate::{
    AppState,
    accounts::{CurrentUser, api_key_from_headers},
    entities::{director, film},
    error::{AppError, AppResult},
    extract::{AppJson, AppPath, AppQuery},
    film_schema::Record,
    models::{Created, Credentials, DirectorSearch, FilmSearch},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/films", get(search_films).post(create_film))
        .route("/films/{id}", get(get_film).patch(patch_film).delete(delete_film))
        .route("/directors", get(search_directors))
        .with_state(state)
}

/// Token from the `Authorization` header when present, otherwise username
/// and password from the body. Answers with the api key.
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Option<Json<Credentials>>, JsonRejection>,
) -> AppResult<String> {
    let body = body?;
    let user = if headers.contains_key(axum::http::header::AUTHORIZATION) {
        match api_key_from_headers(&headers) {
            Some(api_key) => state.accounts.by_api_key(api_key).await?,
            None => None,
        }
    } else if let Some(Json(creds)) = body {
        state.accounts.by_credentials(&creds.username, &creds.password).await?
    } else {
        None
    };

    let user = user.ok_or(AppError::Unauthorized)?;
    let user = state.accounts.mark_authenticated(user).await?;
    debug!(user_id = user.id, "logged in");
    Ok(user.api_key)
}

pub async fn search_films(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    AppQuery(params): AppQuery<FilmSearch>,
) -> AppResult<Json<Vec<film::Model>>> {
    Ok(Json(state.catalog.search_films(&params).await?))
}

pub async fn get_film(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<film::Model>> {
    let params = FilmSearch { id: Some(id), ..Default::default() };
    let film = state.catalog.search_films(&params).await?.into_iter().next().ok_or_else(|| {
        AppError::NotFound(format!(r#"Film with id "{id}" was not found"#))
    })?;
    Ok(Json(film))
}

pub async fn create_film(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    AppJson(record): AppJson<Record>,
) -> AppResult<(StatusCode, Json<Created>)> {
    let id = state.catalog.create_film(&record, user.id).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn patch_film(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<i32>,
    AppJson(patch): AppJson<Record>,
) -> AppResult<Json<film::Model>> {
    Ok(Json(state.catalog.patch_film(id, patch, user.id).await?))
}

pub async fn delete_film(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<film::Model>> {
    Ok(Json(state.catalog.delete_film(id, user.id).await?))
}

pub async fn search_directors(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<DirectorSearch>,
) -> AppResult<Json<Vec<director::Model>>> {
    Ok(Json(state.catalog.search_directors(&params).await?))
}
